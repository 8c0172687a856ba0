use crate::config::{ClientConfig, FileConfig, API_URL_ENV};
use crate::utils::error::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "cds-browser")]
#[command(about = "Browse Common Data Set admission statistics")]
pub struct CliConfig {
    /// Base URL of the CDS API (overrides CDS_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// TOML settings file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List institutions, one page at a time
    List {
        /// Free-text search on the institution name
        #[arg(long, short, conflicts_with = "letter")]
        search: Option<String>,

        /// Only names starting with this letter
        #[arg(long, short)]
        letter: Option<char>,

        #[arg(long, short, default_value = "1")]
        page: usize,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Show admission statistics for one institution
    Show { id: String },
    /// Interactive search loop on stdin
    Browse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Tsv,
}

impl CliConfig {
    pub fn client_config(&self) -> Result<ClientConfig> {
        let file = match &self.config {
            Some(path) => Some(FileConfig::from_file(path)?),
            None => None,
        };
        Ok(ClientConfig::resolve(
            file.as_ref(),
            std::env::var(API_URL_ENV).ok(),
            self.api_url.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_with_letter() {
        let cli = CliConfig::parse_from(["cds-browser", "list", "--letter", "b", "--page", "2"]);
        match cli.command {
            Command::List {
                search,
                letter,
                page,
                format,
            } => {
                assert_eq!(search, None);
                assert_eq!(letter, Some('b'));
                assert_eq!(page, 2);
                assert_eq!(format, OutputFormat::Table);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_search_and_letter_conflict() {
        let parsed =
            CliConfig::try_parse_from(["cds-browser", "list", "--search", "tech", "--letter", "M"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_flag_overrides_url() {
        let cli = CliConfig::parse_from([
            "cds-browser",
            "--api-url",
            "https://cds.example.org/api/v1",
            "show",
            "166027",
        ]);
        let config = cli.client_config().unwrap();
        assert_eq!(config.api_url, "https://cds.example.org/api/v1");
    }
}
