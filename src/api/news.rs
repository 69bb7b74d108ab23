use crate::api::{error::ApiError, AppState};
use crate::models::Article;
use axum::{extract::State, routing::get, Json, Router};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_news))
}

#[tracing::instrument(skip(state))]
pub async fn get_news(State(state): State<AppState>) -> Result<Json<Vec<Article>>, ApiError> {
    let articles = state
        .news
        .fetch()
        .await
        .map_err(|source| ApiError::Upstream {
            message: "Failed to fetch news",
            source,
        })?;

    Ok(Json(articles))
}
