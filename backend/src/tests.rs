//! Integration tests for the student record store.

use std::collections::HashSet;

use reqwest::Client;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tempfile::TempDir;

use crate::db::{init_database, Repository};
use crate::{create_router, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");

        // Initialize database
        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let state = AppState::new(Repository::new(pool.clone()));

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            pool,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn create(&self, name: &str, email: &str) -> Value {
        let resp = self
            .client
            .post(self.url("/students"))
            .json(&json!({ "name": name, "email": email }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
        resp.json().await.unwrap()
    }

    async fn list(&self) -> Vec<Value> {
        let resp = self
            .client
            .get(self.url("/students"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        body.as_array().unwrap().clone()
    }
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;
    fixture.create("Ada", "ada@x.com").await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["students"], 1);
}

#[tokio::test]
async fn test_student_lifecycle_scenario() {
    let fixture = TestFixture::new().await;

    // Create
    let created = fixture.create("Ada", "ada@x.com").await;
    assert_eq!(created, json!({ "id": 1, "name": "Ada", "email": "ada@x.com" }));

    // List
    assert_eq!(
        fixture.list().await,
        vec![json!({ "id": 1, "name": "Ada", "email": "ada@x.com" })]
    );

    // Update
    let update_resp = fixture
        .client
        .put(fixture.url("/students/1"))
        .json(&json!({ "name": "Ada L.", "email": "ada@x.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(update_resp.status(), 200);
    let update_body: Value = update_resp.json().await.unwrap();
    assert_eq!(update_body["id"], 1);
    assert_eq!(update_body["name"], "Ada L.");

    // Delete
    let delete_resp = fixture
        .client
        .delete(fixture.url("/students/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(delete_resp.status(), 200);
    let delete_body: Value = delete_resp.json().await.unwrap();
    assert_eq!(delete_body["message"], "Student deleted successfully");
    assert_eq!(delete_body["id"], 1);

    // Verify deleted
    let get_resp = fixture
        .client
        .get(fixture.url("/students/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(get_resp.status(), 404);

    assert!(fixture.list().await.is_empty());
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let fixture = TestFixture::new().await;

    let created = fixture.create("Grace Hopper", "grace@navy.mil").await;
    let id = created["id"].as_i64().unwrap();

    let resp = fixture
        .client
        .get(fixture.url(&format!("/students/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["name"], "Grace Hopper");
    assert_eq!(body["email"], "grace@navy.mil");
}

#[tokio::test]
async fn test_created_ids_are_unique() {
    let fixture = TestFixture::new().await;

    let mut ids = Vec::new();
    for i in 0..5 {
        let created = fixture
            .create(&format!("Student {}", i), "same@x.com")
            .await;
        ids.push(created["id"].as_i64().unwrap());
    }

    // Duplicate emails are permitted
    let unique: HashSet<i64> = ids.iter().copied().collect();
    assert_eq!(unique.len(), 5);

    // A deleted id is not handed out again
    let last = *ids.last().unwrap();
    fixture
        .client
        .delete(fixture.url(&format!("/students/{}", last)))
        .send()
        .await
        .unwrap();
    let next = fixture.create("Newcomer", "new@x.com").await;
    assert!(next["id"].as_i64().unwrap() > last);
}

#[tokio::test]
async fn test_update_leaves_other_records_alone() {
    let fixture = TestFixture::new().await;

    let ada = fixture.create("Ada", "ada@x.com").await;
    let bob = fixture.create("Bob", "bob@x.com").await;

    let resp = fixture
        .client
        .put(fixture.url(&format!("/students/{}", ada["id"])))
        .json(&json!({ "name": "Ada L.", "email": "lovelace@x.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let list = fixture.list().await;
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["name"], "Ada L.");
    assert_eq!(list[0]["email"], "lovelace@x.com");
    assert_eq!(list[1], bob);
}

#[tokio::test]
async fn test_delete_shrinks_list_by_one() {
    let fixture = TestFixture::new().await;

    fixture.create("Ada", "ada@x.com").await;
    let bob = fixture.create("Bob", "bob@x.com").await;
    fixture.create("Cy", "cy@x.com").await;

    let before = fixture.list().await;
    let resp = fixture
        .client
        .delete(fixture.url(&format!("/students/{}", bob["id"])))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let after = fixture.list().await;
    assert_eq!(after.len(), before.len() - 1);
    assert!(after.iter().all(|s| s["id"] != bob["id"]));
}

#[tokio::test]
async fn test_list_is_idempotent_and_ordered() {
    let fixture = TestFixture::new().await;

    fixture.create("Zed", "zed@x.com").await;
    fixture.create("Amy", "amy@x.com").await;

    let first = fixture.list().await;
    let second = fixture.list().await;
    assert_eq!(first, second);

    let ids: Vec<i64> = first.iter().map(|s| s["id"].as_i64().unwrap()).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_not_found_errors() {
    let fixture = TestFixture::new().await;

    let get_resp = fixture
        .client
        .get(fixture.url("/students/999"))
        .send()
        .await
        .unwrap();
    assert_eq!(get_resp.status(), 404);
    let body: Value = get_resp.json().await.unwrap();
    assert_eq!(body["error"], "Student 999 not found");
    assert_eq!(body["code"], "NOT_FOUND");

    let put_resp = fixture
        .client
        .put(fixture.url("/students/999"))
        .json(&json!({ "name": "Ghost", "email": "ghost@x.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(put_resp.status(), 404);

    let delete_resp = fixture
        .client
        .delete(fixture.url("/students/999"))
        .send()
        .await
        .unwrap();
    assert_eq!(delete_resp.status(), 404);
    let body: Value = delete_resp.json().await.unwrap();
    assert_eq!(body["code"], "NOT_FOUND");

    // Non-numeric ids cannot match anything either
    let bad_id_resp = fixture
        .client
        .get(fixture.url("/students/abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_id_resp.status(), 404);

    // Unknown routes answer with the same JSON error shape
    let unknown_resp = fixture
        .client
        .get(fixture.url("/students/1/x"))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown_resp.status(), 404);
    let body: Value = unknown_resp.json().await.unwrap();
    assert_eq!(body["code"], "NOT_FOUND");
    assert!(body["error"].is_string());

    // Failed update did not create anything
    assert!(fixture.list().await.is_empty());
}

#[tokio::test]
async fn test_validation_errors() {
    let fixture = TestFixture::new().await;

    // Empty name
    let resp = fixture
        .client
        .post(fixture.url("/students"))
        .json(&json!({ "name": "", "email": "ada@x.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"], "Name is required");

    // Missing email
    let resp = fixture
        .client
        .post(fixture.url("/students"))
        .json(&json!({ "name": "Ada" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // Blank fields on update are rejected before touching storage
    let ada = fixture.create("Ada", "ada@x.com").await;
    let resp = fixture
        .client
        .put(fixture.url(&format!("/students/{}", ada["id"])))
        .json(&json!({ "name": "Ada", "email": "  " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(fixture.list().await, vec![ada]);
}

#[tokio::test]
async fn test_malformed_body_gets_json_error() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/students"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["error"].is_string());

    // Path segment that is not valid UTF-8
    let resp = fixture
        .client
        .get(fixture.url("/students/%FF"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["error"].is_string());

    // Unsupported method on a known route
    let resp = fixture
        .client
        .patch(fixture.url("/students/1"))
        .json(&json!({ "name": "Ada" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 405);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "METHOD_NOT_ALLOWED");
    assert_eq!(body["error"], "Method PATCH not allowed on /students/1");
}

#[tokio::test]
async fn test_storage_failure_is_internal_error() {
    let fixture = TestFixture::new().await;
    fixture.pool.close().await;

    let resp = fixture
        .client
        .get(fixture.url("/students"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "DATABASE_ERROR");
    assert_eq!(body["error"], "Database error");

    // Storage failure is not reported as not-found
    let resp = fixture
        .client
        .delete(fixture.url("/students/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
}
