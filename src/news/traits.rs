use crate::models::Article;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for news providers
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Produce a fresh batch of articles. Nothing is cached.
    async fn fetch(&self) -> Result<Vec<Article>>;

    /// Get the name of the news source
    fn source_name(&self) -> &'static str;
}
