//! Builds the five parameterized statement shapes. This is the only place
//! where table and column names are interpolated into SQL text; names come
//! from the catalog snapshot, never from request input, and values are
//! always bound.

use crate::schema::TableDescriptor;
use crate::sql::BindValue;
use serde_json::{Map, Value};

/// SQL text plus its positional parameters.
#[derive(Debug)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl Statement {
    fn new() -> Self {
        Statement {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Bind a value and return its 1-based placeholder. When the snapshot
    /// knows the column type, the placeholder carries a cast so text-typed
    /// binds coerce on the server.
    fn placeholder(&mut self, table: &TableDescriptor, column: &str, value: BindValue) -> String {
        self.params.push(value);
        let n = self.params.len();
        match table.column_type(column).filter(|t| castable(t)) {
            Some(t) => format!("${}::{}", n, t),
            None => format!("${}", n),
        }
    }
}

/// Catalog names usable as cast targets. The catalog reports "array" and
/// "user-defined" for types whose real name lives elsewhere; those are not
/// valid in a cast.
fn castable(data_type: &str) -> bool {
    !data_type.is_empty()
        && data_type != "array"
        && data_type != "user-defined"
        && data_type
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' ')
}

/// WHERE clause over every primary-key column in snapshot order, each
/// placeholder bound to the same identifier value.
fn key_clause(stmt: &mut Statement, table: &TableDescriptor, id: &str) -> String {
    table
        .primary_key
        .iter()
        .map(|key| {
            let ph = stmt.placeholder(table, key, BindValue::Text(id.to_string()));
            format!("{} = {}", key, ph)
        })
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// `SELECT * FROM {table}`, no parameters.
pub fn select_all(table: &TableDescriptor) -> Statement {
    let mut stmt = Statement::new();
    stmt.sql = format!("SELECT * FROM {}", table.name);
    stmt
}

/// `SELECT * FROM {table} WHERE pk1 = $1 AND ... LIMIT 1`.
pub fn select_by_key(table: &TableDescriptor, id: &str) -> Statement {
    let mut stmt = Statement::new();
    let where_clause = key_clause(&mut stmt, table, id);
    stmt.sql = format!(
        "SELECT * FROM {} WHERE {} LIMIT 1",
        table.name, where_clause
    );
    stmt
}

/// `INSERT INTO {table} (...) VALUES (...) RETURNING *`. Columns and
/// placeholders derive from the body's own keys; no column-existence check
/// happens here, unknown columns surface as a database error.
pub fn insert(table: &TableDescriptor, body: &Map<String, Value>) -> Statement {
    let mut stmt = Statement::new();
    let mut columns = Vec::with_capacity(body.len());
    let mut placeholders = Vec::with_capacity(body.len());
    for (column, value) in body {
        let ph = stmt.placeholder(table, column, BindValue::from(value));
        columns.push(column.as_str());
        placeholders.push(ph);
    }
    stmt.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
        table.name,
        columns.join(", "),
        placeholders.join(", ")
    );
    stmt
}

/// `UPDATE {table} SET ... WHERE ... RETURNING *`. SET parameters come
/// first; the key placeholders continue the numbering after them.
pub fn update_by_key(table: &TableDescriptor, id: &str, body: &Map<String, Value>) -> Statement {
    let mut stmt = Statement::new();
    let sets: Vec<String> = body
        .iter()
        .map(|(column, value)| {
            let ph = stmt.placeholder(table, column, BindValue::from(value));
            format!("{} = {}", column, ph)
        })
        .collect();
    let where_clause = key_clause(&mut stmt, table, id);
    stmt.sql = format!(
        "UPDATE {} SET {} WHERE {} RETURNING *",
        table.name,
        sets.join(", "),
        where_clause
    );
    stmt
}

/// `DELETE FROM {table} WHERE ...`.
pub fn delete_by_key(table: &TableDescriptor, id: &str) -> Statement {
    let mut stmt = Statement::new();
    let where_clause = key_clause(&mut stmt, table, id);
    stmt.sql = format!("DELETE FROM {} WHERE {}", table.name, where_clause);
    stmt
}
