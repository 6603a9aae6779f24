// src/api/handlers.rs

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::debug;

use super::AppState;
use super::error::ApiError;
use crate::engine::JobLookup;
use crate::types::JobId;

const YAML_CONTENT_TYPE: &str = "application/x-yaml";

/// `POST <sync_path>`: convert and answer in the same request.
pub async fn convert_sync(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let payload = read_payload(body)?;
    let result = state.service.submit_sync(payload).await?;

    match result.outcome {
        Ok(yaml) => Ok(yaml_response(yaml)),
        Err(failure) => Err(ApiError::ConversionFailed(failure)),
    }
}

/// `POST <async_path>`: queue and return `202` with a job id.
pub async fn convert_async(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let payload = read_payload(body)?;
    let id = state.service.submit_async(payload)?;

    let body = json!({
        "status": "processing",
        "jobID": id,
        "resultURL": format!("{}/{}", state.result_path, id),
    });
    Ok((StatusCode::ACCEPTED, Json(body)).into_response())
}

/// `GET <result_path>/{jobID}`.
///
/// Unknown and still-processing ids both answer `404`; the `status` field of
/// the body tells them apart.
pub async fn get_result(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = JobId::from(job_id);

    match state.service.poll(&id) {
        JobLookup::Completed(result) => match result.outcome {
            Ok(yaml) => Ok(yaml_response(yaml)),
            Err(failure) => Err(ApiError::ConversionFailed(failure)),
        },
        JobLookup::Processing => {
            debug!(job_id = %id, "poll for job still in flight");
            let body = json!({
                "status": "processing",
                "jobID": id,
                "message": "Job is still processing",
            });
            Ok((StatusCode::NOT_FOUND, Json(body)).into_response())
        }
        JobLookup::Unknown => {
            let body = json!({
                "status": "not_found",
                "message": "Job not found",
            });
            Ok((StatusCode::NOT_FOUND, Json(body)).into_response())
        }
    }
}

/// `GET /healthz`.
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "queued": state.service.queued(),
        "queueCapacity": state.service.queue_capacity(),
        "processing": state.service.processing(),
        "completed": state.service.completed(),
        "workers": state.service.workers(),
    }))
}

pub async fn post_only() -> ApiError {
    ApiError::MethodNotAllowed { allowed: "POST" }
}

pub async fn get_only() -> ApiError {
    ApiError::MethodNotAllowed { allowed: "GET" }
}

fn read_payload(body: Result<Bytes, BytesRejection>) -> Result<Vec<u8>, ApiError> {
    let bytes = body.map_err(|e| ApiError::UnreadableBody(e.body_text()))?;
    if bytes.is_empty() {
        return Err(ApiError::EmptyBody);
    }
    Ok(bytes.to_vec())
}

fn yaml_response(yaml: String) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, YAML_CONTENT_TYPE)], yaml).into_response()
}
