//! Route assembly: the generated record routes, the documentation route, and
//! service-level common routes.

mod common;
mod docs;
mod plan;
mod record;

pub use common::common_routes_with_ready;
pub use docs::docs_routes;
pub use plan::{route_plan, table_routes, Operation, RouteSpec};
pub use record::record_routes;
