//! End-to-end behavior against a live PostgreSQL. These tests create a
//! scratch table in the target database; run them explicitly:
//!
//!   DATABASE_URL=postgres://localhost/scratch cargo test -- --ignored

use autorest::initialize;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

const TABLE_DDL: &str = "CREATE TABLE IF NOT EXISTS autorest_people (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT
)";

async fn setup() -> (PgPool, axum::Router) {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a scratch database");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .unwrap();
    sqlx::query(TABLE_DDL).execute(&pool).await.unwrap();
    let api = initialize(&pool).await.unwrap();
    let router = api.into_router(pool.clone());
    (pool, router)
}

fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

fn with_body(method: &str, path: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(path: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn remove_row(pool: &PgPool, id: i64) {
    sqlx::query("DELETE FROM autorest_people WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn created_record_round_trips_through_get_one() {
    let (pool, router) = setup().await;

    let response = router
        .clone()
        .oneshot(with_body(
            "POST",
            "/autorest_people",
            json!({"name": "ada", "email": "ada@example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().expect("server-assigned id");

    let response = router
        .clone()
        .oneshot(get(&format!("/autorest_people/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched, created);

    remove_row(&pool, id).await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn repeated_updates_converge_to_the_same_row() {
    let (pool, router) = setup().await;

    let response = router
        .clone()
        .oneshot(with_body(
            "POST",
            "/autorest_people",
            json!({"name": "grace", "email": null}),
        ))
        .await
        .unwrap();
    let id = body_json(response).await["id"].as_i64().unwrap();
    let path = format!("/autorest_people/{}", id);

    let update = json!({"name": "grace hopper", "email": "gh@example.com"});
    let first = router
        .clone()
        .oneshot(with_body("PUT", &path, update.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let first_row = body_json(first).await;

    let second = router
        .clone()
        .oneshot(with_body("PUT", &path, update))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(body_json(second).await, first_row);

    remove_row(&pool, id).await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn delete_returns_404_once_the_row_is_gone() {
    let (_pool, router) = setup().await;

    let response = router
        .clone()
        .oneshot(with_body(
            "POST",
            "/autorest_people",
            json!({"name": "linus"}),
        ))
        .await
        .unwrap();
    let id = body_json(response).await["id"].as_i64().unwrap();
    let path = format!("/autorest_people/{}", id);

    let first = router.clone().oneshot(delete(&path)).await.unwrap();
    assert_eq!(first.status(), StatusCode::NO_CONTENT);

    let second = router.clone().oneshot(delete(&path)).await.unwrap();
    assert_eq!(second.status(), StatusCode::NOT_FOUND);

    let fetched = router.clone().oneshot(get(&path)).await.unwrap();
    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn deleting_a_nonexistent_record_affects_nothing() {
    let (_pool, router) = setup().await;
    let response = router
        .oneshot(delete("/autorest_people/999999"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn document_reflects_the_live_schema() {
    let (_pool, router) = setup().await;
    let response = router.oneshot(get("/api-docs")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;
    assert!(doc["paths"].get("/autorest_people").is_some());
    assert!(doc["paths"].get("/autorest_people/{id}").is_some());
    let schema = &doc["components"]["schemas"]["autorest_peopleSchema"];
    assert_eq!(schema["properties"]["id"]["type"], "integer");
    assert!(schema["required"]
        .as_array()
        .unwrap()
        .contains(&json!("name")));
}
