//! API document synthesis: one resource per table, operations derived from
//! the primary-key set, schemas derived from the column set.

use crate::error::SchemaError;
use crate::schema::TableDescriptor;
use crate::typemap::{map_type, TypeDescriptor};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

#[derive(Clone, Debug, Serialize)]
pub struct ApiDocument {
    pub openapi: String,
    pub info: Info,
    pub paths: BTreeMap<String, PathItem>,
    pub components: Components,
}

#[derive(Clone, Debug, Serialize)]
pub struct Info {
    pub title: String,
    pub version: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<OperationObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<OperationObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<OperationObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<OperationObject>,
}

impl PathItem {
    /// HTTP method names declared on this path, in a fixed order.
    pub fn methods(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.get.is_some() {
            out.push("GET");
        }
        if self.post.is_some() {
            out.push("POST");
        }
        if self.put.is_some() {
            out.push("PUT");
        }
        if self.delete.is_some() {
            out.push("DELETE");
        }
        out
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct OperationObject {
    pub tags: Vec<String>,
    pub summary: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    pub responses: BTreeMap<String, ResponseObject>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: &'static str,
    pub required: bool,
    pub schema: ParameterSchema,
    pub description: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ParameterSchema {
    #[serde(rename = "type")]
    pub type_: &'static str,
}

#[derive(Clone, Debug, Serialize)]
pub struct RequestBody {
    pub required: bool,
    pub content: Content,
}

#[derive(Clone, Debug, Serialize)]
pub struct Content {
    #[serde(rename = "application/json")]
    pub json: MediaType,
}

#[derive(Clone, Debug, Serialize)]
pub struct MediaType {
    pub schema: SchemaRef,
}

/// A reference to a component schema, or an inline array of such references.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum SchemaRef {
    Ref {
        #[serde(rename = "$ref")]
        reference: String,
    },
    Array {
        #[serde(rename = "type")]
        type_: &'static str,
        items: Box<SchemaRef>,
    },
}

impl SchemaRef {
    fn component(schema_name: &str) -> Self {
        SchemaRef::Ref {
            reference: format!("#/components/schemas/{}", schema_name),
        }
    }

    fn array_of(schema_name: &str) -> Self {
        SchemaRef::Array {
            type_: "array",
            items: Box::new(Self::component(schema_name)),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ResponseObject {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
}

impl ResponseObject {
    fn with_schema(description: &str, schema: SchemaRef) -> Self {
        ResponseObject {
            description: description.to_string(),
            content: Some(Content {
                json: MediaType { schema },
            }),
        }
    }

    fn plain(description: &str) -> Self {
        ResponseObject {
            description: description.to_string(),
            content: None,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Components {
    pub schemas: BTreeMap<String, SchemaObject>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SchemaObject {
    #[serde(rename = "type")]
    pub type_: &'static str,
    pub properties: BTreeMap<String, PropertySchema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PropertySchema {
    #[serde(flatten)]
    pub descriptor: TypeDescriptor,
    pub nullable: bool,
}

/// Synthesize the full document from the snapshot. The only failure mode is
/// a structurally invalid snapshot with two tables of the same name.
pub fn synthesize(tables: &[TableDescriptor]) -> Result<ApiDocument, SchemaError> {
    let mut paths = BTreeMap::new();
    let mut schemas = BTreeMap::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for table in tables {
        if !seen.insert(table.name.as_str()) {
            return Err(SchemaError::DuplicateResource(table.name.clone()));
        }
        let schema_name = format!("{}Schema", table.name);
        schemas.insert(schema_name.clone(), table_schema(table));
        paths.insert(table.collection_path(), collection_item(table, &schema_name));
        if table.has_primary_key() {
            paths.insert(table.record_path(), record_item(table, &schema_name));
        }
    }

    Ok(ApiDocument {
        openapi: "3.0.0".to_string(),
        info: Info {
            title: "Auto-generated REST API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "REST API generated from the PostgreSQL schema".to_string(),
        },
        paths,
        components: Components { schemas },
    })
}

/// List and create live on the collection path for every table.
fn collection_item(table: &TableDescriptor, schema_name: &str) -> PathItem {
    let list = OperationObject {
        tags: vec![table.name.clone()],
        summary: format!("List all {}", table.name),
        parameters: Vec::new(),
        request_body: None,
        responses: BTreeMap::from([
            (
                "200".to_string(),
                ResponseObject::with_schema(
                    "Successful operation",
                    SchemaRef::array_of(schema_name),
                ),
            ),
            (
                "500".to_string(),
                ResponseObject::plain("Internal server error"),
            ),
        ]),
    };
    let create = OperationObject {
        tags: vec![table.name.clone()],
        summary: format!("Create a new {}", table.name),
        parameters: Vec::new(),
        request_body: Some(RequestBody {
            required: true,
            content: Content {
                json: MediaType {
                    schema: SchemaRef::component(schema_name),
                },
            },
        }),
        responses: BTreeMap::from([
            (
                "201".to_string(),
                ResponseObject::with_schema(
                    "Successfully created",
                    SchemaRef::component(schema_name),
                ),
            ),
            (
                "500".to_string(),
                ResponseObject::plain("Internal server error"),
            ),
        ]),
    };
    PathItem {
        get: Some(list),
        post: Some(create),
        ..PathItem::default()
    }
}

/// Get-one, update and delete live on the record path, present only when the
/// table has a primary key. The identifier is an opaque string path
/// parameter regardless of the key column type.
fn record_item(table: &TableDescriptor, schema_name: &str) -> PathItem {
    let get = OperationObject {
        tags: vec![table.name.clone()],
        summary: format!("Get a single {}", table.name),
        parameters: vec![id_parameter(table)],
        request_body: None,
        responses: BTreeMap::from([
            (
                "200".to_string(),
                ResponseObject::with_schema(
                    "Successful operation",
                    SchemaRef::component(schema_name),
                ),
            ),
            ("404".to_string(), ResponseObject::plain("Record not found")),
        ]),
    };
    let put = OperationObject {
        tags: vec![table.name.clone()],
        summary: format!("Update a {}", table.name),
        parameters: vec![id_parameter(table)],
        request_body: Some(RequestBody {
            required: true,
            content: Content {
                json: MediaType {
                    schema: SchemaRef::component(schema_name),
                },
            },
        }),
        responses: BTreeMap::from([
            (
                "200".to_string(),
                ResponseObject::with_schema(
                    "Successful operation",
                    SchemaRef::component(schema_name),
                ),
            ),
            ("404".to_string(), ResponseObject::plain("Record not found")),
        ]),
    };
    let delete = OperationObject {
        tags: vec![table.name.clone()],
        summary: format!("Delete a {}", table.name),
        parameters: vec![id_parameter(table)],
        request_body: None,
        responses: BTreeMap::from([
            (
                "204".to_string(),
                ResponseObject::plain("Successfully deleted"),
            ),
            ("404".to_string(), ResponseObject::plain("Record not found")),
        ]),
    };
    PathItem {
        get: Some(get),
        put: Some(put),
        delete: Some(delete),
        ..PathItem::default()
    }
}

fn id_parameter(table: &TableDescriptor) -> Parameter {
    Parameter {
        name: "id".to_string(),
        location: "path",
        required: true,
        schema: ParameterSchema { type_: "string" },
        description: format!("ID of the {}", table.name),
    }
}

/// Per-table object schema: one property per column via the type mapper, a
/// property required exactly when its column is not nullable.
fn table_schema(table: &TableDescriptor) -> SchemaObject {
    let mut properties = BTreeMap::new();
    let mut required = Vec::new();
    for column in &table.columns {
        properties.insert(
            column.name.clone(),
            PropertySchema {
                descriptor: map_type(&column.data_type),
                nullable: column.is_nullable,
            },
        );
        if !column.is_nullable {
            required.push(column.name.clone());
        }
    }
    SchemaObject {
        type_: "object",
        properties,
        required,
    }
}
