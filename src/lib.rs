pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command, OutputFormat};

pub use adapters::ApiClient;
pub use config::ClientConfig;
pub use crate::core::{
    controller::ListController,
    detail::{load_detail, DetailState, DetailViewModel},
    listing::{Filter, ListViewModel, PAGE_SIZE},
    rate::{rate, Rate},
};
pub use utils::error::{CdsError, Result};
