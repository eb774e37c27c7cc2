//! CrudService: statement execution against PostgreSQL.

mod crud;

pub use crud::CrudService;
