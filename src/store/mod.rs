pub mod file;
pub mod memory;
pub mod traits;
pub mod types;

pub use file::FileCollection;
pub use memory::MemoryCollection;
pub use traits::DocumentCollection;
pub use types::{Page, PageRequest};

use crate::models::{validation, Property, PropertyInput, ValidationErrors};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Property not found")]
    NotFound,

    #[error("Storage error: {0:#}")]
    Backend(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Property access over a document collection.
///
/// Owns validation and timestamps; the collection only persists what it is
/// given. Cheap to clone.
#[derive(Clone)]
pub struct PropertyStore {
    collection: Arc<dyn DocumentCollection>,
}

impl PropertyStore {
    pub fn new(collection: Arc<dyn DocumentCollection>) -> Self {
        Self { collection }
    }

    /// Store backed by a fresh [`MemoryCollection`]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryCollection::new()))
    }

    pub fn backend_name(&self) -> &'static str {
        self.collection.backend_name()
    }

    /// One page of properties, newest first, with totals
    pub async fn list(&self, request: PageRequest) -> StoreResult<Page<Property>> {
        debug!(
            "Listing properties page={} limit={} skip={}",
            request.page(),
            request.limit(),
            request.offset()
        );

        let (items, total) = tokio::try_join!(
            self.collection.find_page(request.offset(), request.limit()),
            self.collection.count(),
        )?;

        Ok(Page {
            items,
            current_page: request.page(),
            total_pages: request.total_pages(total),
            total_count: total,
        })
    }

    pub async fn get(&self, id: &str) -> StoreResult<Property> {
        let id = parse_id(id)?;
        self.collection
            .find_by_id(id)
            .await?
            .ok_or(StoreError::NotFound)
    }

    pub async fn create(&self, input: &PropertyInput) -> StoreResult<Property> {
        let fields = validation::validate(input).map_err(StoreError::Validation)?;
        let property = Property::new(fields, Utc::now());

        self.collection.insert(&property).await?;
        info!("Created property {} ({})", property.id, property.address);

        Ok(property)
    }

    /// Apply a partial update. Unknown ids are never created.
    pub async fn update(&self, id: &str, patch: &PropertyInput) -> StoreResult<Property> {
        let mut property = self.get(id).await?;

        let fields = validation::validate(&patch.merged_onto(&property))
            .map_err(StoreError::Validation)?;
        property.apply(fields, Utc::now());

        // deleted since we read it
        if !self.collection.replace(&property).await? {
            return Err(StoreError::NotFound);
        }
        info!("Updated property {}", property.id);

        Ok(property)
    }

    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        let id = parse_id(id)?;
        if !self.collection.remove(id).await? {
            return Err(StoreError::NotFound);
        }
        info!("Deleted property {}", id);
        Ok(())
    }
}

// malformed ids cannot match anything
fn parse_id(raw: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| StoreError::NotFound)
}
