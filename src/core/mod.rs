pub mod browse;
pub mod controller;
pub mod detail;
pub mod listing;
pub mod pagination;
pub mod rate;

pub use crate::domain::model::{AdmissionRecord, Institution, InstitutionDetail, ListQuery};
pub use crate::domain::ports::{ConfigProvider, SchoolSource};
pub use crate::utils::error::Result;
