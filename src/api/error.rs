use crate::models::ValidationErrors;
use crate::store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(ValidationErrors),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Property not found")]
    NotFound,

    /// Store or provider failure. Only `message` reaches the client.
    #[error("{message}")]
    Upstream {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    /// Map a store failure, using `message` if it turns out to be upstream
    pub fn from_store(err: StoreError, message: &'static str) -> Self {
        match err {
            StoreError::Validation(errors) => ApiError::Validation(errors),
            StoreError::NotFound => ApiError::NotFound,
            StoreError::Backend(source) => ApiError::Upstream { message, source },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            ApiError::Validation(errors) => json!({
                "error": self.to_string(),
                "fields": errors.fields(),
            }),
            ApiError::Upstream { message, source } => {
                tracing::error!(error = ?source, "{}", message);
                json!({ "error": message })
            }
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldError;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn upstream_detail_is_not_leaked() {
        let err = ApiError::from_store(
            StoreError::Backend(anyhow::anyhow!("disk on fire at /srv/data")),
            "Failed to fetch properties",
        );
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Failed to fetch properties" })
        );
    }

    #[tokio::test]
    async fn validation_lists_fields() {
        let err = ApiError::from_store(
            StoreError::Validation(ValidationErrors(vec![FieldError {
                field: "price",
                message: "must be greater than or equal to 0".to_string(),
            }])),
            "unused",
        );
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({
                "error": "Validation failed",
                "fields": [{ "field": "price", "message": "must be greater than or equal to 0" }]
            })
        );
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::from_store(StoreError::NotFound, "unused");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
