//! Generic CRUD execution. One statement per call; the pool scopes the
//! connection to the statement and releases it on every exit path.

use crate::error::AppError;
use crate::schema::TableDescriptor;
use crate::sql::{self, Statement};
use serde_json::{Map, Value};
use sqlx::postgres::PgRow;
use sqlx::PgPool;

pub struct CrudService;

impl CrudService {
    /// All rows of the table, as JSON objects.
    pub async fn list(pool: &PgPool, table: &TableDescriptor) -> Result<Vec<Value>, AppError> {
        let stmt = sql::select_all(table);
        Self::fetch_many(pool, &stmt).await
    }

    /// One row addressed by the identifier, or None.
    pub async fn find_by_key(
        pool: &PgPool,
        table: &TableDescriptor,
        id: &str,
    ) -> Result<Option<Value>, AppError> {
        let stmt = sql::select_by_key(table, id);
        Self::fetch_optional(pool, &stmt).await
    }

    /// Insert one row from the body map. Returns the inserted row.
    pub async fn create(
        pool: &PgPool,
        table: &TableDescriptor,
        body: &Map<String, Value>,
    ) -> Result<Value, AppError> {
        let stmt = sql::insert(table, body);
        Self::fetch_optional(pool, &stmt)
            .await?
            .ok_or(AppError::Statement(sqlx::Error::RowNotFound))
    }

    /// Update one row addressed by the identifier. Returns the updated row,
    /// or None when nothing matched.
    pub async fn update_by_key(
        pool: &PgPool,
        table: &TableDescriptor,
        id: &str,
        body: &Map<String, Value>,
    ) -> Result<Option<Value>, AppError> {
        let stmt = sql::update_by_key(table, id, body);
        Self::fetch_optional(pool, &stmt).await
    }

    /// Delete one row addressed by the identifier. Returns the affected-row
    /// count.
    pub async fn delete_by_key(
        pool: &PgPool,
        table: &TableDescriptor,
        id: &str,
    ) -> Result<u64, AppError> {
        let stmt = sql::delete_by_key(table, id);
        tracing::debug!(sql = %stmt.sql, params = ?stmt.params, "statement");
        let result = bind_all(sqlx::query(&stmt.sql), &stmt).execute(pool).await?;
        Ok(result.rows_affected())
    }

    async fn fetch_many(pool: &PgPool, stmt: &Statement) -> Result<Vec<Value>, AppError> {
        tracing::debug!(sql = %stmt.sql, params = ?stmt.params, "statement");
        let rows = bind_all(sqlx::query(&stmt.sql), stmt).fetch_all(pool).await?;
        Ok(rows.iter().map(row_to_json).collect())
    }

    async fn fetch_optional(pool: &PgPool, stmt: &Statement) -> Result<Option<Value>, AppError> {
        tracing::debug!(sql = %stmt.sql, params = ?stmt.params, "statement");
        let row = bind_all(sqlx::query(&stmt.sql), stmt)
            .fetch_optional(pool)
            .await?;
        Ok(row.as_ref().map(row_to_json))
    }
}

fn bind_all<'q>(
    mut query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
    stmt: &'q Statement,
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    for p in &stmt.params {
        query = query.bind(p.clone());
    }
    query
}

fn row_to_json(row: &PgRow) -> Value {
    use sqlx::Column;
    use sqlx::Row;
    let mut map = serde_json::Map::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    Value::Object(map)
}

/// Decode one cell by probing concrete Postgres types in order. A cell whose
/// type none of the probes cover becomes null.
fn cell_to_value(row: &PgRow, name: &str) -> Value {
    use sqlx::Row;
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return Value::Bool(b);
    }
    if let Ok(Some(n)) = row.try_get::<Option<i16>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f32>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n as f64) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(u)) = row.try_get::<Option<uuid::Uuid>, _>(name) {
        return Value::String(u.to_string());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name) {
        return Value::String(d.to_rfc3339());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::NaiveDateTime>, _>(name) {
        return Value::String(d.format("%Y-%m-%dT%H:%M:%S%.f").to_string());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::NaiveDate>, _>(name) {
        return Value::String(d.format("%Y-%m-%d").to_string());
    }
    if let Ok(Some(t)) = row.try_get::<Option<chrono::NaiveTime>, _>(name) {
        return Value::String(t.format("%H:%M:%S%.f").to_string());
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    if let Ok(Some(j)) = row.try_get::<Option<Value>, _>(name) {
        return j;
    }
    Value::Null
}
