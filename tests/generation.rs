//! Cross-component invariant: the synthesized document and the route plan
//! are derived from the same snapshot and must declare identical operation
//! sets per table.

use autorest::{route_plan, synthesize, ColumnDescriptor, TableDescriptor};
use std::collections::BTreeSet;

fn column(name: &str, data_type: &str, is_nullable: bool) -> ColumnDescriptor {
    ColumnDescriptor {
        name: name.into(),
        data_type: data_type.into(),
        is_nullable,
    }
}

fn users() -> TableDescriptor {
    TableDescriptor {
        name: "users".into(),
        columns: vec![
            column("id", "integer", false),
            column("name", "text", false),
            column("email", "text", true),
        ],
        primary_key: vec!["id".into()],
    }
}

fn logs() -> TableDescriptor {
    TableDescriptor {
        name: "logs".into(),
        columns: vec![
            column("ts", "timestamp without time zone", true),
            column("msg", "text", true),
        ],
        primary_key: vec![],
    }
}

fn memberships() -> TableDescriptor {
    TableDescriptor {
        name: "memberships".into(),
        columns: vec![
            column("org_id", "integer", false),
            column("user_id", "integer", false),
        ],
        primary_key: vec!["org_id".into(), "user_id".into()],
    }
}

fn declared_operations(tables: &[TableDescriptor]) -> BTreeSet<(String, String)> {
    let doc = synthesize(tables).unwrap();
    let mut out = BTreeSet::new();
    for (path, item) in &doc.paths {
        for method in item.methods() {
            out.insert((path.clone(), method.to_string()));
        }
    }
    out
}

fn planned_operations(tables: &[TableDescriptor]) -> BTreeSet<(String, String)> {
    route_plan(tables)
        .into_iter()
        .map(|spec| (spec.path, spec.method.to_string()))
        .collect()
}

#[test]
fn document_and_route_plan_agree_on_every_operation() {
    let tables = vec![users(), logs(), memberships()];
    assert_eq!(declared_operations(&tables), planned_operations(&tables));
}

#[test]
fn keyed_tables_expose_five_operations_in_both_artifacts() {
    let tables = vec![users()];
    let expected: BTreeSet<(String, String)> = [
        ("/users", "GET"),
        ("/users", "POST"),
        ("/users/{id}", "GET"),
        ("/users/{id}", "PUT"),
        ("/users/{id}", "DELETE"),
    ]
    .into_iter()
    .map(|(p, m)| (p.to_string(), m.to_string()))
    .collect();
    assert_eq!(declared_operations(&tables), expected);
    assert_eq!(planned_operations(&tables), expected);
}

#[test]
fn keyless_tables_expose_two_operations_in_both_artifacts() {
    let tables = vec![logs()];
    let expected: BTreeSet<(String, String)> = [("/logs", "GET"), ("/logs", "POST")]
        .into_iter()
        .map(|(p, m)| (p.to_string(), m.to_string()))
        .collect();
    assert_eq!(declared_operations(&tables), expected);
    assert_eq!(planned_operations(&tables), expected);
}

#[test]
fn composite_key_table_uses_a_single_identifier_segment() {
    let plan = route_plan(&[memberships()]);
    let record_paths: BTreeSet<&str> = plan
        .iter()
        .filter(|s| s.operation.addresses_record())
        .map(|s| s.path.as_str())
        .collect();
    assert_eq!(record_paths, BTreeSet::from(["/memberships/{id}"]));
}
