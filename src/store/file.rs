use crate::models::Property;
use crate::store::traits::DocumentCollection;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

/// Collection stored as one JSON document per property: `<dir>/<id>.json`
pub struct FileCollection {
    dir: PathBuf,
    // serializes writers so a replace cannot resurrect a removed document
    write_lock: Mutex<()>,
}

impl FileCollection {
    /// Open the collection, creating the directory if needed
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create data directory {}", dir.display()))?;

        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    fn doc_path(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    async fn write_doc(&self, property: &Property) -> Result<()> {
        let path = self.doc_path(property.id);
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(property)?;

        tokio::fs::write(&tmp, json)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .with_context(|| format!("Failed to move {} into place", tmp.display()))?;

        debug!("Wrote {}", path.display());
        Ok(())
    }

    async fn read_doc(path: &Path) -> Result<Option<Property>> {
        match tokio::fs::read(path).await {
            Ok(bytes) => {
                let property = serde_json::from_slice(&bytes)
                    .with_context(|| format!("Corrupt document {}", path.display()))?;
                Ok(Some(property))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    async fn doc_paths(&self) -> Result<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .with_context(|| format!("Failed to list {}", self.dir.display()))?;

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        Ok(paths)
    }
}

#[async_trait]
impl DocumentCollection for FileCollection {
    async fn insert(&self, property: &Property) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write_doc(property).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>> {
        Self::read_doc(&self.doc_path(id)).await
    }

    async fn replace(&self, property: &Property) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        if !tokio::fs::try_exists(self.doc_path(property.id)).await? {
            return Ok(false);
        }
        self.write_doc(property).await?;
        Ok(true)
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let path = self.doc_path(id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
        }
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.doc_paths().await?.len() as u64)
    }

    async fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<Property>> {
        let mut docs = Vec::new();
        for path in self.doc_paths().await? {
            // removed between listing and reading
            if let Some(property) = Self::read_doc(&path).await? {
                docs.push(property);
            }
        }

        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(docs.into_iter().skip(skip).take(limit).collect())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PropertyFields;
    use chrono::{Duration, TimeZone, Utc};

    fn property(address: &str, minute: i64) -> Property {
        let base = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        Property::new(
            PropertyFields {
                address: address.to_string(),
                price: 310_000.0,
                bedrooms: 2,
                bathrooms: 1.0,
                sqft: 980,
                description: "Townhouse".to_string(),
                image_url: "https://img.example/t.jpg".to_string(),
            },
            base + Duration::minutes(minute),
        )
    }

    #[tokio::test]
    async fn documents_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let p = property("9 Beacon St", 0);

        {
            let collection = FileCollection::open(dir.path()).await.unwrap();
            collection.insert(&p).await.unwrap();
        }

        let collection = FileCollection::open(dir.path()).await.unwrap();
        assert_eq!(collection.find_by_id(p.id).await.unwrap(), Some(p.clone()));
        assert_eq!(collection.count().await.unwrap(), 1);
        assert!(dir.path().join(format!("{}.json", p.id)).exists());
    }

    #[tokio::test]
    async fn replace_and_remove_unknown_ids() {
        let dir = tempfile::tempdir().unwrap();
        let collection = FileCollection::open(dir.path()).await.unwrap();
        let p = property("3 Pond Rd", 0);

        assert!(!collection.replace(&p).await.unwrap());
        assert!(!collection.remove(p.id).await.unwrap());
        assert_eq!(collection.count().await.unwrap(), 0);

        collection.insert(&p).await.unwrap();
        assert!(collection.remove(p.id).await.unwrap());
        assert!(!collection.remove(p.id).await.unwrap());
        assert_eq!(collection.find_by_id(p.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn pages_are_newest_first_and_ignore_other_files() {
        let dir = tempfile::tempdir().unwrap();
        let collection = FileCollection::open(dir.path()).await.unwrap();
        collection.insert(&property("old", 0)).await.unwrap();
        collection.insert(&property("new", 10)).await.unwrap();
        collection.insert(&property("mid", 5)).await.unwrap();
        tokio::fs::write(dir.path().join("notes.txt"), "ignored").await.unwrap();

        let page = collection.find_page(0, 2).await.unwrap();
        let addresses: Vec<&str> = page.iter().map(|p| p.address.as_str()).collect();
        assert_eq!(addresses, vec!["new", "mid"]);
        assert_eq!(collection.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn corrupt_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let collection = FileCollection::open(dir.path()).await.unwrap();
        let id = Uuid::new_v4();
        tokio::fs::write(dir.path().join(format!("{}.json", id)), "{not json")
            .await
            .unwrap();

        assert!(collection.find_by_id(id).await.is_err());
    }
}
