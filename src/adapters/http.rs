use crate::domain::model::{Institution, InstitutionDetail, ListQuery};
use crate::domain::ports::{ConfigProvider, SchoolSource};
use crate::utils::error::{CdsError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

/// HTTP implementation of [`SchoolSource`] against the CDS REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_url().to_string(),
        })
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Joins `path` onto the base URL with exactly one `/` between them.
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.strip_suffix('/').unwrap_or(&self.base_url);
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    pub fn schools_url(&self, query: &ListQuery) -> Result<Url> {
        let pairs = query.to_pairs();
        Ok(Url::parse_with_params(&self.url("/schools"), pairs)?)
    }

    pub fn school_url(&self, id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.url("/schools"))?;
        url.path_segments_mut()
            .map_err(|_| CdsError::ConfigError {
                message: format!("API base URL cannot carry a path: {}", self.base_url),
            })?
            .push(id);
        Ok(url)
    }

    async fn fetch_text(&self, url: Url) -> Result<(StatusCode, String)> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Ok((status, String::new()));
        }
        Ok((status, response.text().await?))
    }
}

#[async_trait]
impl SchoolSource for ApiClient {
    async fn list_schools(&self, query: &ListQuery) -> Result<Vec<Institution>> {
        let url = self.schools_url(query)?;
        let (status, body) = self.fetch_text(url.clone()).await?;
        if !status.is_success() {
            return Err(CdsError::StatusError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let schools: Vec<Institution> = serde_json::from_str(&body)?;
        tracing::debug!("Schools data length: {}", schools.len());
        Ok(schools)
    }

    async fn get_school(&self, id: &str) -> Result<InstitutionDetail> {
        let url = self.school_url(id)?;
        let (status, body) = self.fetch_text(url.clone()).await?;
        if status == StatusCode::NOT_FOUND {
            return Err(CdsError::NotFound { id: id.to_string() });
        }
        if !status.is_success() {
            return Err(CdsError::StatusError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
