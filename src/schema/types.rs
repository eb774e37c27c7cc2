//! Normalized descriptors for the schema snapshot. Immutable once produced
//! by the inspector; both the document synthesizer and the route generator
//! read the same snapshot.

use serde::Deserialize;

/// One column as reported by the catalog.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Lowercase catalog type name (e.g. "integer", "character varying",
    /// "timestamp without time zone").
    pub data_type: String,
    pub is_nullable: bool,
}

/// One base table: columns in catalog order plus the primary-key column set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableDescriptor {
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
    /// Deduplicated primary-key column names, empty when the table has none.
    /// Order is stable per snapshot and drives WHERE clause construction.
    pub primary_key: Vec<String>,
}

impl TableDescriptor {
    pub fn has_primary_key(&self) -> bool {
        !self.primary_key.is_empty()
    }

    /// Catalog type of a column, if the snapshot knows it.
    pub fn column_type(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.data_type.as_str())
    }

    /// Path template for the collection, e.g. "/users".
    pub fn collection_path(&self) -> String {
        format!("/{}", self.name)
    }

    /// Path template for a single record, e.g. "/users/{id}".
    pub fn record_path(&self) -> String {
        format!("/{}/{{id}}", self.name)
    }
}
