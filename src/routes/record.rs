//! Record router: every route in the plan registered with a handler bound to
//! its table descriptor. Dispatch is over the closed operation set; there is
//! no reflection at request time.

use crate::handlers::record;
use crate::routes::plan::{table_routes, Operation};
use crate::schema::TableDescriptor;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::routing::{self, MethodRouter};
use axum::{Json, Router};
use serde_json::Value;
use std::sync::Arc;

/// Build the record router from the snapshot. Routes for the same path are
/// merged by method, so a keyed table contributes two paths with five
/// operations between them.
pub fn record_routes(state: AppState, tables: &[TableDescriptor]) -> Router {
    let mut router = Router::new();
    for table in tables {
        let shared = Arc::new(table.clone());
        for spec in table_routes(table) {
            router = router.route(&spec.axum_path(), bind(spec.operation, shared.clone()));
        }
    }
    router.with_state(state)
}

/// One bound handler per operation. The closure owns its table descriptor;
/// the request-scoped extractors supply everything else.
fn bind(operation: Operation, table: Arc<TableDescriptor>) -> MethodRouter<AppState> {
    match operation {
        Operation::List => routing::get(move |state: State<AppState>| {
            record::list(state, table.clone())
        }),
        Operation::Create => routing::post(move |state: State<AppState>, body: Json<Value>| {
            record::create(state, table.clone(), body)
        }),
        Operation::GetOne => routing::get(move |state: State<AppState>, id: Path<String>| {
            record::get_one(state, table.clone(), id)
        }),
        Operation::Update => routing::put(
            move |state: State<AppState>, id: Path<String>, body: Json<Value>| {
                record::update(state, table.clone(), id, body)
            },
        ),
        Operation::Delete => routing::delete(move |state: State<AppState>, id: Path<String>| {
            record::delete(state, table.clone(), id)
        }),
    }
}
