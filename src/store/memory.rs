use crate::models::Property;
use crate::store::traits::DocumentCollection;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-process collection. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryCollection {
    // insertion order
    docs: RwLock<Vec<Property>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentCollection for MemoryCollection {
    async fn insert(&self, property: &Property) -> Result<()> {
        self.docs.write().await.push(property.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>> {
        let docs = self.docs.read().await;
        Ok(docs.iter().find(|p| p.id == id).cloned())
    }

    async fn replace(&self, property: &Property) -> Result<bool> {
        let mut docs = self.docs.write().await;
        match docs.iter_mut().find(|p| p.id == property.id) {
            Some(slot) => {
                *slot = property.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        let mut docs = self.docs.write().await;
        let before = docs.len();
        docs.retain(|p| p.id != id);
        Ok(docs.len() != before)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.docs.read().await.len() as u64)
    }

    async fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<Property>> {
        let docs = self.docs.read().await;
        Ok(newest_first(docs.iter().cloned().collect(), skip, limit))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// Sort documents given in insertion order newest first and cut out one page
pub(crate) fn newest_first(mut docs: Vec<Property>, skip: u64, limit: u64) -> Vec<Property> {
    docs.reverse();
    // stable, so equal timestamps keep latest-inserted first
    docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let skip = usize::try_from(skip).unwrap_or(usize::MAX);
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    docs.into_iter().skip(skip).take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PropertyFields;
    use chrono::{Duration, TimeZone, Utc};

    fn property(address: &str, minute: i64) -> Property {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        Property::new(
            PropertyFields {
                address: address.to_string(),
                price: 100_000.0,
                bedrooms: 1,
                bathrooms: 1.0,
                sqft: 500,
                description: "Condo".to_string(),
                image_url: "https://img.example/c.jpg".to_string(),
            },
            base + Duration::minutes(minute),
        )
    }

    #[tokio::test]
    async fn insert_find_replace_remove() {
        let collection = MemoryCollection::new();
        let mut p = property("1 Main St", 0);
        collection.insert(&p).await.unwrap();

        assert_eq!(collection.find_by_id(p.id).await.unwrap(), Some(p.clone()));

        p.price = 90_000.0;
        assert!(collection.replace(&p).await.unwrap());
        assert_eq!(collection.find_by_id(p.id).await.unwrap().unwrap().price, 90_000.0);

        assert!(collection.remove(p.id).await.unwrap());
        assert!(!collection.remove(p.id).await.unwrap());
        assert_eq!(collection.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn replace_unknown_id_does_not_insert() {
        let collection = MemoryCollection::new();
        let p = property("2 Main St", 0);

        assert!(!collection.replace(&p).await.unwrap());
        assert_eq!(collection.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn pages_are_newest_first() {
        let collection = MemoryCollection::new();
        // inserted out of chronological order
        collection.insert(&property("b", 2)).await.unwrap();
        collection.insert(&property("a", 1)).await.unwrap();
        collection.insert(&property("c", 3)).await.unwrap();

        let page = collection.find_page(0, 10).await.unwrap();
        let addresses: Vec<&str> = page.iter().map(|p| p.address.as_str()).collect();
        assert_eq!(addresses, vec!["c", "b", "a"]);

        let page = collection.find_page(1, 1).await.unwrap();
        assert_eq!(page[0].address, "b");

        assert!(collection.find_page(3, 10).await.unwrap().is_empty());
    }

    #[test]
    fn equal_timestamps_fall_back_to_insertion_order() {
        let docs = vec![property("first", 0), property("second", 0)];
        let page = newest_first(docs, 0, 2);
        assert_eq!(page[0].address, "second");
        assert_eq!(page[1].address, "first");
    }
}
