//! Schema-driven REST backend: inspects a PostgreSQL schema once at startup
//! and generates a CRUD HTTP API plus its OpenAPI document.

pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod schema;
pub mod service;
pub mod sql;
pub mod state;
pub mod typemap;

pub use error::{AppError, SchemaError};
pub use openapi::{synthesize, ApiDocument};
pub use routes::{record_routes, route_plan, Operation, RouteSpec};
pub use schema::{inspect, ColumnDescriptor, TableDescriptor};
pub use state::AppState;
pub use typemap::{map_type, TypeDescriptor};

use axum::Router;
use sqlx::PgPool;
use std::sync::Arc;

/// Everything the one-time generation pass produces. Document and route plan
/// derive from the same snapshot, so they cannot disagree about which
/// operations exist.
pub struct GeneratedApi {
    pub tables: Vec<TableDescriptor>,
    pub document: ApiDocument,
    pub plan: Vec<RouteSpec>,
}

/// Inspect the schema once and derive the document and route plan. Any
/// failure here is fatal; nothing is generated partially.
pub async fn initialize(pool: &PgPool) -> Result<GeneratedApi, SchemaError> {
    let tables = schema::inspect(pool).await?;
    let document = openapi::synthesize(&tables)?;
    let plan = routes::route_plan(&tables);
    Ok(GeneratedApi {
        tables,
        document,
        plan,
    })
}

impl GeneratedApi {
    /// Assemble the full router: generated record routes, the document at
    /// /api-docs, and health/readiness.
    pub fn into_router(self, pool: PgPool) -> Router {
        let state = AppState {
            pool,
            document: Arc::new(self.document),
        };
        Router::new()
            .merge(routes::common_routes_with_ready(state.clone()))
            .merge(routes::docs_routes(state.clone()))
            .merge(routes::record_routes(state, &self.tables))
    }
}
