//! Pure route planning: which (method, path, operation) triples exist for a
//! snapshot. The router registers exactly this plan; tests compare it
//! against the synthesized document.

use crate::schema::TableDescriptor;
use axum::http::Method;

/// The closed set of generated operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    GetOne,
    Update,
    Delete,
}

impl Operation {
    pub fn method(self) -> Method {
        match self {
            Operation::List | Operation::GetOne => Method::GET,
            Operation::Create => Method::POST,
            Operation::Update => Method::PUT,
            Operation::Delete => Method::DELETE,
        }
    }

    /// Whether the operation addresses a single record, which requires a
    /// primary key.
    pub fn addresses_record(self) -> bool {
        matches!(self, Operation::GetOne | Operation::Update | Operation::Delete)
    }
}

/// One planned route: an operation bound to a table, with its HTTP method
/// and `{param}`-style path template.
#[derive(Clone, Debug)]
pub struct RouteSpec {
    pub table: String,
    pub operation: Operation,
    pub method: Method,
    pub path: String,
}

impl RouteSpec {
    /// The path in axum's `:param` syntax.
    pub fn axum_path(&self) -> String {
        self.path.replace("{id}", ":id")
    }
}

/// Routes for one table: list and create always, the single-record
/// operations only when the table has a primary key.
pub fn table_routes(table: &TableDescriptor) -> Vec<RouteSpec> {
    let mut specs = vec![route(table, Operation::List), route(table, Operation::Create)];
    if table.has_primary_key() {
        specs.push(route(table, Operation::GetOne));
        specs.push(route(table, Operation::Update));
        specs.push(route(table, Operation::Delete));
    }
    specs
}

/// The full plan over the snapshot.
pub fn route_plan(tables: &[TableDescriptor]) -> Vec<RouteSpec> {
    tables.iter().flat_map(table_routes).collect()
}

fn route(table: &TableDescriptor, operation: Operation) -> RouteSpec {
    let path = if operation.addresses_record() {
        table.record_path()
    } else {
        table.collection_path()
    };
    RouteSpec {
        table: table.name.clone(),
        operation,
        method: operation.method(),
        path,
    }
}
