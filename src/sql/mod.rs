//! Statement construction: identifiers interpolated from the catalog
//! snapshot only, values always bound as parameters.

mod bind;
mod builder;

pub use bind::BindValue;
pub use builder::{delete_by_key, insert, select_all, select_by_key, update_by_key, Statement};
