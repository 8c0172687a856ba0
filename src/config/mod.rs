#[cfg(feature = "cli")]
pub mod cli;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::{CdsError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const API_URL_ENV: &str = "CDS_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_REQUEST_LIMIT: usize = 1000;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Effective client settings after merging file, environment and flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_url: String,
    pub request_limit: usize,
    pub timeout_seconds: u64,
    pub debounce_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_limit: DEFAULT_REQUEST_LIMIT,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl ClientConfig {
    /// Defaults with the base URL taken from `CDS_API_URL` when set.
    pub fn from_env() -> Self {
        Self::resolve(None, std::env::var(API_URL_ENV).ok(), None)
    }

    /// Precedence: flag > environment > file > default.
    pub fn resolve(
        file: Option<&FileConfig>,
        env_url: Option<String>,
        flag_url: Option<String>,
    ) -> Self {
        let mut config = Self::default();

        if let Some(api) = file.and_then(|f| f.api.as_ref()) {
            if let Some(url) = &api.base_url {
                config.api_url = url.clone();
            }
            if let Some(limit) = api.request_limit {
                config.request_limit = limit;
            }
            if let Some(timeout) = api.timeout_seconds {
                config.timeout_seconds = timeout;
            }
        }
        if let Some(debounce) = file
            .and_then(|f| f.browse.as_ref())
            .and_then(|b| b.debounce_ms)
        {
            config.debounce_ms = debounce;
        }

        if let Some(url) = env_url.filter(|u| !u.trim().is_empty()) {
            config.api_url = url;
        }
        if let Some(url) = flag_url {
            config.api_url = url;
        }

        config
    }
}

impl ConfigProvider for ClientConfig {
    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn request_limit(&self) -> usize {
        self.request_limit
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api_url)?;
        validation::validate_positive_number("api.request_limit", self.request_limit, 1)?;
        validation::validate_range("api.timeout_seconds", self.timeout_seconds, 1, 300)?;
        validation::validate_range("browse.debounce_ms", self.debounce_ms, 0, 5000)?;
        Ok(())
    }
}

/// On-disk TOML settings. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    pub api: Option<ApiSection>,
    pub browse: Option<BrowseSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub request_limit: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseSection {
    pub debounce_ms: Option<u64>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| CdsError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

/// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
fn substitute_env_vars(content: &str) -> Result<String> {
    let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| CdsError::ConfigError {
        message: format!("env substitution pattern: {}", e),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });

    Ok(result.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::resolve(None, None, None);
        assert_eq!(config.api_url, "http://localhost:8000/api/v1");
        assert_eq!(config.request_limit, 1000);
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_precedence() {
        let file = FileConfig::from_toml_str(
            r#"
[api]
base_url = "http://file.example/api/v1"
request_limit = 250

[browse]
debounce_ms = 150
"#,
        )
        .unwrap();

        let from_file = ClientConfig::resolve(Some(&file), None, None);
        assert_eq!(from_file.api_url, "http://file.example/api/v1");
        assert_eq!(from_file.request_limit, 250);
        assert_eq!(from_file.debounce_ms, 150);

        let from_env = ClientConfig::resolve(
            Some(&file),
            Some("http://env.example/api/v1".to_string()),
            None,
        );
        assert_eq!(from_env.api_url, "http://env.example/api/v1");

        let from_flag = ClientConfig::resolve(
            Some(&file),
            Some("http://env.example/api/v1".to_string()),
            Some("https://flag.example".to_string()),
        );
        assert_eq!(from_flag.api_url, "https://flag.example");
        assert_eq!(from_flag.request_limit, 250);
    }

    #[test]
    fn test_blank_env_url_is_ignored() {
        let config = ClientConfig::resolve(None, Some("  ".to_string()), None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CDS_BROWSER_TEST_HOST", "https://cds.test.edu");

        let file = FileConfig::from_toml_str(
            r#"
[api]
base_url = "${CDS_BROWSER_TEST_HOST}/api/v1"
"#,
        )
        .unwrap();
        assert_eq!(
            file.api.unwrap().base_url.as_deref(),
            Some("https://cds.test.edu/api/v1")
        );

        std::env::remove_var("CDS_BROWSER_TEST_HOST");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = ClientConfig {
            api_url: "not a url".to_string(),
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());

        config.api_url = DEFAULT_API_URL.to_string();
        config.request_limit = 0;
        assert!(config.validate().is_err());

        config.request_limit = 10;
        config.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = FileConfig::from_toml_str("[api\nbase_url = ").unwrap_err();
        assert!(matches!(err, CdsError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[api]\ntimeout_seconds = 5\n")
            .unwrap();

        let file = FileConfig::from_file(temp_file.path()).unwrap();
        let config = ClientConfig::resolve(Some(&file), None, None);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert!(file.browse.is_none());
    }
}
