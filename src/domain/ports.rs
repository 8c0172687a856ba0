use crate::domain::model::{Institution, InstitutionDetail, ListQuery};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn api_url(&self) -> &str;
    fn request_limit(&self) -> usize;
    fn request_timeout(&self) -> Duration;
    fn debounce(&self) -> Duration;
}

/// Where institutions come from. The HTTP client is the production
/// implementation; tests plug in scripted sources.
#[async_trait]
pub trait SchoolSource: Send + Sync {
    async fn list_schools(&self, query: &ListQuery) -> Result<Vec<Institution>>;
    async fn get_school(&self, id: &str) -> Result<InstitutionDetail>;
}
