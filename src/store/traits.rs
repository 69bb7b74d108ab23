use crate::models::Property;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Document collection holding property records.
/// Backends only persist; validation and timestamps belong to [`super::PropertyStore`].
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Store a new document
    async fn insert(&self, property: &Property) -> Result<()>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>>;

    /// Overwrite an existing document. Returns false if the id is unknown.
    async fn replace(&self, property: &Property) -> Result<bool>;

    /// Returns false if the id is unknown
    async fn remove(&self, id: Uuid) -> Result<bool>;

    async fn count(&self) -> Result<u64>;

    /// Newest first by creation time. Tie order is up to the backend.
    async fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<Property>>;

    /// Get the name of the backend
    fn backend_name(&self) -> &'static str;
}
