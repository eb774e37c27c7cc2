//! Catalog introspection: one read of information_schema, normalized into
//! TableDescriptors.

use crate::error::SchemaError;
use crate::schema::{ColumnDescriptor, TableDescriptor};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

/// One grouped catalog row: a table, its column aggregate in ordinal order,
/// and the primary-key aggregate (NULL when the table has no primary key).
struct CatalogRow {
    table_name: String,
    columns: Vec<ColumnDescriptor>,
    primary_keys: Option<Vec<Option<String>>>,
}

const CATALOG_SQL: &str = r#"
SELECT
    t.table_name,
    json_agg(
        json_build_object(
            'name', c.column_name,
            'data_type', lower(c.data_type),
            'is_nullable', c.is_nullable = 'YES'
        )
        ORDER BY c.ordinal_position
    ) AS columns,
    json_agg(
        CASE
            WHEN tc.constraint_type = 'PRIMARY KEY' THEN c.column_name
            ELSE NULL
        END
        ORDER BY kcu.ordinal_position
    ) FILTER (WHERE tc.constraint_type = 'PRIMARY KEY') AS primary_keys
FROM information_schema.tables t
JOIN information_schema.columns c
    ON t.table_name = c.table_name
    AND t.table_schema = c.table_schema
LEFT JOIN information_schema.key_column_usage kcu
    ON c.table_name = kcu.table_name
    AND c.column_name = kcu.column_name
    AND c.table_schema = kcu.table_schema
LEFT JOIN information_schema.table_constraints tc
    ON kcu.constraint_name = tc.constraint_name
    AND kcu.table_schema = tc.table_schema
WHERE t.table_schema = 'public'
    AND t.table_type = 'BASE TABLE'
GROUP BY t.table_name
ORDER BY t.table_name
"#;

/// Run the catalog query once and normalize the result. Failures here are
/// fatal; the caller aborts startup.
pub async fn inspect(pool: &PgPool) -> Result<Vec<TableDescriptor>, SchemaError> {
    let rows = sqlx::query(CATALOG_SQL).fetch_all(pool).await?;
    rows.into_iter()
        .map(|row| decode_row(&row).map(normalize_row))
        .collect()
}

fn decode_row(row: &PgRow) -> Result<CatalogRow, SchemaError> {
    let table_name: String = row
        .try_get("table_name")
        .map_err(|e| SchemaError::MalformedCatalog(e.to_string()))?;
    let columns: Json<Vec<ColumnDescriptor>> = row
        .try_get("columns")
        .map_err(|e| SchemaError::MalformedCatalog(e.to_string()))?;
    let primary_keys: Option<Json<Vec<Option<String>>>> = row
        .try_get("primary_keys")
        .map_err(|e| SchemaError::MalformedCatalog(e.to_string()))?;
    Ok(CatalogRow {
        table_name,
        columns: columns.0,
        primary_keys: primary_keys.map(|j| j.0),
    })
}

/// Fold one grouped row into a descriptor: drop the NULL placeholders the
/// outer joins introduce, deduplicate key names (a composite key column can
/// match several constraint-usage rows), deduplicate columns by name keeping
/// catalog order.
fn normalize_row(row: CatalogRow) -> TableDescriptor {
    let mut columns: Vec<ColumnDescriptor> = Vec::new();
    for col in row.columns {
        if !columns.iter().any(|c| c.name == col.name) {
            columns.push(col);
        }
    }

    let mut primary_key: Vec<String> = Vec::new();
    for key in row.primary_keys.unwrap_or_default().into_iter().flatten() {
        if !primary_key.contains(&key) {
            primary_key.push(key);
        }
    }

    TableDescriptor {
        name: row.table_name,
        columns,
        primary_key,
    }
}
