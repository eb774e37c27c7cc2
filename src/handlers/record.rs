//! Record handlers: each is a function of (table descriptor, request) with
//! the pool injected through state. Errors are converted to responses at
//! this boundary and never propagate further.

use crate::error::AppError;
use crate::schema::TableDescriptor;
use crate::service::CrudService;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Request bodies are a column -> value map. Anything that is not a JSON
/// object degrades to an empty map; the statement built from it fails in the
/// database and surfaces as a generic server error.
fn body_to_map(body: Value) -> Map<String, Value> {
    match body {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

pub async fn list(
    State(state): State<AppState>,
    table: Arc<TableDescriptor>,
) -> Result<Response, AppError> {
    let rows = CrudService::list(&state.pool, &table).await?;
    Ok(Json(rows).into_response())
}

pub async fn get_one(
    State(state): State<AppState>,
    table: Arc<TableDescriptor>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let row = CrudService::find_by_key(&state.pool, &table, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(row).into_response())
}

pub async fn create(
    State(state): State<AppState>,
    table: Arc<TableDescriptor>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let body = body_to_map(body);
    let row = CrudService::create(&state.pool, &table, &body).await?;
    Ok((StatusCode::CREATED, Json(row)).into_response())
}

pub async fn update(
    State(state): State<AppState>,
    table: Arc<TableDescriptor>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let body = body_to_map(body);
    let row = CrudService::update_by_key(&state.pool, &table, &id, &body)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(row).into_response())
}

pub async fn delete(
    State(state): State<AppState>,
    table: Arc<TableDescriptor>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let affected = CrudService::delete_by_key(&state.pool, &table, &id).await?;
    if affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT.into_response())
}
