use crate::api::{error::ApiError, AppState};
use crate::models::{Property, PropertyInput};
use crate::store::{Page, PageRequest};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

/// Raw pagination query. Kept as strings so bad numbers fall back to defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_properties).post(create_property))
        .route(
            "/:id",
            get(get_property).put(update_property).delete(delete_property),
        )
}

#[tracing::instrument(skip(state))]
pub async fn list_properties(
    State(state): State<AppState>,
    query: Option<Query<ListQuery>>,
) -> Result<Json<Page<Property>>, ApiError> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let request = PageRequest::from_query(query.page.as_deref(), query.limit.as_deref());

    let page = state
        .store
        .list(request)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to fetch properties"))?;

    Ok(Json(page))
}

#[tracing::instrument(skip(state))]
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Property>, ApiError> {
    let property = state
        .store
        .get(&id)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to fetch property"))?;

    Ok(Json(property))
}

#[tracing::instrument(skip(state, payload))]
pub async fn create_property(
    State(state): State<AppState>,
    payload: Result<Json<PropertyInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Property>), ApiError> {
    let Json(input) = payload.map_err(|e| ApiError::MalformedBody(e.body_text()))?;

    let property = state
        .store
        .create(&input)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to create property"))?;

    Ok((StatusCode::CREATED, Json(property)))
}

#[tracing::instrument(skip(state, payload))]
pub async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PropertyInput>, JsonRejection>,
) -> Result<Json<Property>, ApiError> {
    let Json(patch) = payload.map_err(|e| ApiError::MalformedBody(e.body_text()))?;

    let property = state
        .store
        .update(&id, &patch)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to update property"))?;

    Ok(Json(property))
}

#[tracing::instrument(skip(state))]
pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .store
        .delete(&id)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to delete property"))?;

    Ok(Json(MessageResponse {
        message: "Property deleted successfully".to_string(),
    }))
}
