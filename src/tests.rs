//! Integration tests for the live editor backend.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use crate::config::Config;
use crate::db::{init_database, Repository};
use crate::editor::EditorService;
use crate::{create_router, AppState};

async fn test_state(temp_dir: &TempDir) -> AppState {
    let db_path = temp_dir.path().join("test.sqlite");

    // Initialize database
    let pool = init_database(&db_path).await.expect("Failed to init DB");
    let repo = Arc::new(Repository::new(pool));

    // Create config
    let config = Config {
        db_path,
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        log_level: "warn".to_string(),
        refresh_delay: Duration::from_millis(10),
    };

    AppState {
        editor: Arc::new(EditorService::new(repo, config.refresh_delay)),
        config: Arc::new(config),
    }
}

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = create_router(test_state(&temp_dir).await);

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
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> (u16, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        (resp.status().as_u16(), resp.json().await.unwrap())
    }

    async fn post(&self, path: &str) -> (u16, Value) {
        let resp = self.client.post(self.url(path)).send().await.unwrap();
        (resp.status().as_u16(), resp.json().await.unwrap())
    }

    async fn put(&self, path: &str, body: Value) -> (u16, Value) {
        let resp = self
            .client
            .put(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        (resp.status().as_u16(), resp.json().await.unwrap())
    }
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_get_shipped_theme() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get("/api/themes/1").await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert!(body["data"]["pages"]["homepage"].is_array());
    assert!(body["data"]["staticPages"]["project"].is_array());
}

#[tokio::test]
async fn test_get_invalid_theme() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get("/api/themes/7").await;
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "INVALID_THEME");
    assert_eq!(body["error"]["details"]["themeNumber"], 7);

    let (status, body) = fixture.get("/api/themes/seven").await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_switch_and_restore_flow() {
    let fixture = TestFixture::new().await;

    let (status, _) = fixture
        .put(
            "/api/tenants/acme/editor/current-page",
            json!({ "slug": "homepage" }),
        )
        .await;
    assert_eq!(status, 200);

    // First switch has no active theme to back up
    let (status, body) = fixture.post("/api/tenants/acme/themes/1/switch").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["theme"], 1);
    assert!(body["data"]["backupKey"].is_null());
    assert_eq!(body["data"]["tenantSynced"], true);

    let (status, body) = fixture.post("/api/tenants/acme/themes/2/switch").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["backupKey"], "Theme1Backup");

    let (_, editor) = fixture.get("/api/tenants/acme/editor").await;
    assert_eq!(editor["data"]["globalHeaderVariant"], "StaticHeader2");
    assert!(editor["data"]["pageComponentsByPage"]["about-us"].is_array());

    let (status, body) = fixture
        .post("/api/tenants/acme/backups/Theme1Backup/restore")
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["theme"], 1);
    assert_eq!(body["data"]["backupKey"], "Theme1Backup");
    assert_eq!(body["data"]["finalRefreshMs"], 10);
    assert!(body["data"]["restoreId"].is_string());

    // Let the deferred refresh finish the restore and sync the tenant store
    tokio::time::sleep(Duration::from_millis(100)).await;
    let (_, document) = fixture.get("/api/tenants/acme/document").await;
    assert_eq!(document["data"]["document"]["currentTheme"], 1);

    let (_, editor) = fixture.get("/api/tenants/acme/editor").await;
    let data = &editor["data"];
    assert_eq!(data["currentTheme"], 1);
    assert_eq!(data["globalHeaderVariant"], "StaticHeader1");
    assert_eq!(data["globalHeaderData"]["data"]["variant"], "StaticHeader1");
    assert_eq!(
        data["globalComponentsData"]["globalFooterVariant"],
        "StaticFooter1"
    );
    assert!(data["pageComponentsByPage"]["contact-us"].is_array());
    assert!(data["pageComponentsByPage"]["about-us"].is_null());
    assert!(data["websiteLayout"]["Theme1Backup"].is_null());

    // The consumed backup cannot be restored twice
    let (status, body) = fixture
        .post("/api/tenants/acme/backups/Theme1Backup/restore")
        .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], "BACKUP_NOT_FOUND");
}

#[tokio::test]
async fn test_restore_missing_backup() {
    let fixture = TestFixture::new().await;

    let (_, before) = fixture.get("/api/tenants/acme/editor").await;
    let (status, body) = fixture
        .post("/api/tenants/acme/backups/Theme5Backup/restore")
        .await;
    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "BACKUP_NOT_FOUND");
    assert_eq!(body["error"]["details"]["backupKey"], "Theme5Backup");
    assert_eq!(body["revisionId"], before["revisionId"]);
}

#[tokio::test]
async fn test_page_shapes_assemble_alike() {
    let fixture = TestFixture::new().await;

    let (status, from_list) = fixture
        .put(
            "/api/tenants/acme/editor/pages/homepage",
            json!([
                { "id": "hero", "type": "hero", "componentName": "Hero1", "position": 1 },
                { "id": "cards", "type": "contactCards", "componentName": "ContactCards1", "position": 2 }
            ]),
        )
        .await;
    assert_eq!(status, 200);

    let (status, from_map) = fixture
        .put(
            "/api/tenants/acme/editor/pages/about-us",
            json!({
                "components": {
                    "hero": { "type": "hero", "componentName": "Hero1", "position": 1 },
                    "cards": { "type": "contactCards", "componentName": "ContactCards1", "position": 2 }
                }
            }),
        )
        .await;
    assert_eq!(status, 200);

    assert_eq!(
        from_list["data"]["components"],
        from_map["data"]["components"]
    );
    assert_eq!(from_map["data"]["slug"], "about-us");
    assert!(from_map["revisionId"].as_i64().unwrap() > from_list["revisionId"].as_i64().unwrap());
}

#[tokio::test]
async fn test_change_global_variant() {
    let fixture = TestFixture::new().await;
    fixture.post("/api/tenants/acme/themes/1/apply").await;

    let (status, body) = fixture
        .put(
            "/api/tenants/acme/editor/globals/header",
            json!({ "variant": "StaticHeader2", "overrides": { "tagline": "Homes" } }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["variant"], "StaticHeader2");
    assert_eq!(body["data"]["tagline"], "Homes");

    let (_, editor) = fixture.get("/api/tenants/acme/editor").await;
    assert_eq!(editor["data"]["globalHeaderVariant"], "StaticHeader2");
    assert_eq!(
        editor["data"]["componentStates"]["header"]["StaticHeader2"]["variant"],
        "StaticHeader2"
    );

    let (status, body) = fixture
        .put(
            "/api/tenants/acme/editor/globals/sidebar",
            json!({ "variant": "Sidebar1" }),
        )
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_tenant_document() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get("/api/tenants/acme/document").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    fixture.post("/api/tenants/acme/themes/2/apply").await;
    fixture.post("/api/tenants/acme/themes/1/apply").await;

    let (status, body) = fixture.get("/api/tenants/acme/document").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["tenantId"], "acme");
    assert_eq!(body["data"]["version"], 2);
    assert_eq!(body["data"]["document"]["currentTheme"], 1);
    assert!(body["data"]["document"]["staticPagesData"]["project"].is_object());

    // Applying in place leaves pages the theme does not mention
    assert!(body["data"]["document"]["componentSettings"]["about-us"].is_array());
}

#[tokio::test]
async fn test_invalid_tenant_id() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get("/api/tenants/bad.tenant/editor").await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_error_envelope_without_server() {
    let temp_dir = TempDir::new().unwrap();
    let app = create_router(test_state(&temp_dir).await);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/tenants/acme/themes/3/switch")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "INVALID_THEME");
    assert_eq!(body["revisionId"], 0);
}
