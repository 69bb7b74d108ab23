//! Property listing service: CRUD over a property collection plus an
//! AI-generated real-estate news feed.
//!
//! Routes live under `/api` (see [`api::router`]). Properties are kept in a
//! [`store::DocumentCollection`], either in memory or as JSON documents on
//! disk when `DATA_DIR` is set.

pub mod api;
pub mod config;
pub mod models;
pub mod news;
pub mod store;

use anyhow::Result;
use api::AppState;
use config::Config;
use news::GeminiNews;
use std::sync::Arc;
use store::{FileCollection, PropertyStore};
use tracing::info;

/// Wire the store and news source described by `config`
pub async fn build_state(config: &Config) -> Result<AppState> {
    let store = match &config.data_dir {
        Some(dir) => {
            info!("Using file collection at {}", dir.display());
            PropertyStore::new(Arc::new(FileCollection::open(dir).await?))
        }
        None => {
            info!("DATA_DIR not set, properties are kept in memory");
            PropertyStore::in_memory()
        }
    };

    let news = GeminiNews::new(config.gemini.clone())?;

    Ok(AppState::new(store, Arc::new(news)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn data_dir_selects_file_collection() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("properties");
        let config = Config::from_lookup(|key| match key {
            "DATA_DIR" => Some(data_dir.display().to_string()),
            _ => None,
        })
        .unwrap();

        let state = build_state(&config).await.unwrap();

        assert_eq!(state.store.backend_name(), "file");
        assert_eq!(state.news.source_name(), "Gemini");
        assert!(data_dir.is_dir());
    }

    #[tokio::test]
    async fn defaults_to_memory() {
        let config = Config::from_lookup(|_| None).unwrap();
        let state = build_state(&config).await.unwrap();
        assert_eq!(state.store.backend_name(), "memory");
    }
}
