use crate::news::NewsSource;
use crate::store::PropertyStore;
use axum::{
    http::{header::CONTENT_TYPE, Method},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
mod health;
mod news;
mod properties;

pub use error::ApiError;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: PropertyStore,
    pub news: Arc<dyn NewsSource>,
}

impl AppState {
    pub fn new(store: PropertyStore, news: Arc<dyn NewsSource>) -> Self {
        Self { store, news }
    }
}

/// Full HTTP surface, mounted under `/api`
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let api = Router::new()
        .nest("/properties", properties::router())
        .nest("/news", news::router())
        .merge(health::router::<AppState>())
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
