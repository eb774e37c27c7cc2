//! Catalog type names mapped to documentation type descriptors.

use serde::Serialize;

/// Documentation scalar descriptor: a type plus an optional format qualifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    #[serde(rename = "type")]
    pub type_: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<&'static str>,
}

const fn descriptor(type_: &'static str, format: Option<&'static str>) -> TypeDescriptor {
    TypeDescriptor { type_, format }
}

/// Map a relational type name to its documentation descriptor. Total and
/// case-insensitive: unknown names fall back to a bare string descriptor,
/// never an error.
pub fn map_type(data_type: &str) -> TypeDescriptor {
    match data_type.to_ascii_lowercase().as_str() {
        "smallint" | "integer" => descriptor("integer", Some("int32")),
        "bigint" => descriptor("integer", Some("int64")),
        "real" => descriptor("number", Some("float")),
        "double precision" | "numeric" | "decimal" => descriptor("number", Some("double")),
        "character varying" | "character" | "text" => descriptor("string", None),
        "boolean" => descriptor("boolean", None),
        "timestamp" | "timestamp with time zone" | "timestamp without time zone" => {
            descriptor("string", Some("date-time"))
        }
        "date" => descriptor("string", Some("date")),
        "time" | "time with time zone" | "time without time zone" => {
            descriptor("string", Some("time"))
        }
        "json" | "jsonb" => descriptor("object", None),
        "uuid" => descriptor("string", Some("uuid")),
        "bytea" => descriptor("string", Some("binary")),
        "inet" | "cidr" => descriptor("string", Some("ipv4")),
        "macaddr" => descriptor("string", None),
        "point" | "line" | "lseg" | "box" | "path" | "polygon" | "circle" => {
            descriptor("object", None)
        }
        "interval" => descriptor("string", None),
        _ => descriptor("string", None),
    }
}
