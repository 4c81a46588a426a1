// HTTP request handlers
use crate::application::errors::StructuralError;
use crate::infrastructure::sheet_values::SourceFetchError;
use crate::presentation::app_state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Fetch the outline and return the generated template document
pub async fn generate_templates(State(state): State<Arc<AppState>>) -> Response {
    match state.template_service.generate().await {
        Ok(document) => Json(document).into_response(),
        Err(e) => {
            tracing::error!("Error generating templates: {:#}", e);
            error_response(&e)
        }
    }
}

fn error_response(err: &anyhow::Error) -> Response {
    if let Some(structural) = err.downcast_ref::<StructuralError>() {
        let body = json!({
            "error": structural.to_string(),
            "row": structural.row,
            "missing": structural.missing,
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response();
    }

    let status = if err.downcast_ref::<SourceFetchError>().is_some() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(json!({ "error": format!("{:#}", err) }))).into_response()
}
