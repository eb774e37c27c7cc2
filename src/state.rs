//! Shared application state: the pool plus the document from the one-time
//! generation pass. Built before the server accepts connections and never
//! mutated afterwards.

use crate::openapi::ApiDocument;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub document: Arc<ApiDocument>,
}
