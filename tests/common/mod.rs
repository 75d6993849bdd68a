use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use issuetracker::config::{Config, StoreBackend};
use issuetracker::db::{IssueStore, MemoryIssueStore, PgIssueStore};

/// A running test server instance.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    /// Pool and name of the throw-away database, for postgres-backed apps.
    pub database: Option<(PgPool, String)>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn issues_url(&self, project: &str, query: &[(&str, &str)]) -> String {
        let mut url = self.url(&format!("/api/issues/{project}"));
        if !query.is_empty() {
            let encoded = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query)
                .finish();
            url.push('?');
            url.push_str(&encoded);
        }
        url
    }

    /// Create an issue, return the response body.
    pub async fn create_issue(&self, project: &str, body: &Value) -> Value {
        let resp = self
            .client
            .post(self.issues_url(project, &[]))
            .json(body)
            .send()
            .await
            .expect("create issue request failed");
        assert_eq!(resp.status(), StatusCode::OK, "create issue non-200");
        resp.json().await.unwrap()
    }

    /// Create an issue with the three required fields, return its `_id`.
    pub async fn seed_issue(&self, project: &str, title: &str) -> String {
        let body = self
            .create_issue(
                project,
                &json!({ "issue_title": title, "issue_text": "Seeded", "created_by": "Seeder" }),
            )
            .await;
        body["_id"].as_str().expect("seeded issue has no _id").to_string()
    }

    /// List a project's issues with optional filters.
    pub async fn list_issues(&self, project: &str, query: &[(&str, &str)]) -> Value {
        let resp = self
            .client
            .get(self.issues_url(project, query))
            .send()
            .await
            .expect("list issues request failed");
        assert_eq!(resp.status(), StatusCode::OK, "list issues non-200");
        resp.json().await.unwrap()
    }

    pub async fn update_issue(&self, project: &str, body: &Value) -> Value {
        let resp = self
            .client
            .put(self.issues_url(project, &[]))
            .json(body)
            .send()
            .await
            .expect("update issue request failed");
        assert_eq!(resp.status(), StatusCode::OK, "update issue non-200");
        resp.json().await.unwrap()
    }

    /// Delete with an optional JSON body.
    pub async fn delete_issue(&self, project: &str, body: Option<&Value>) -> Value {
        let mut req = self.client.delete(self.issues_url(project, &[]));
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await.expect("delete issue request failed");
        assert_eq!(resp.status(), StatusCode::OK, "delete issue non-200");
        resp.json().await.unwrap()
    }
}

fn test_config(store: StoreBackend, database_url: Option<String>) -> Config {
    Config {
        store,
        database_url,
        db_max_connections: 5,
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        max_body_size: 1_048_576,
        log_level: "warn".to_string(),
    }
}

async fn serve(store: Arc<dyn IssueStore>, config: Config) -> (SocketAddr, Client) {
    let app = issuetracker::build_app(store, config);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    (addr, Client::new())
}

/// Spawn a test app over a fresh in-memory store.
pub async fn spawn_app() -> TestApp {
    let config = test_config(StoreBackend::Memory, None);
    let (addr, client) = serve(Arc::new(MemoryIssueStore::new()), config).await;

    TestApp {
        addr,
        client,
        database: None,
    }
}

/// Spawn a test app over a fresh PostgreSQL database, or `None` when
/// `DATABASE_URL` is not set.
#[allow(dead_code)]
pub async fn spawn_pg_app() -> Option<TestApp> {
    let _ = dotenvy::dotenv();
    let base_url = std::env::var("DATABASE_URL").ok()?;

    // Create a unique test database
    let db_name = format!("issues_test_{}", Uuid::now_v7().simple());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url(&base_url))
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    // Connect to test DB and run migrations
    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.clone());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    let config = test_config(StoreBackend::Postgres, Some(test_url));
    let (addr, client) = serve(Arc::new(PgIssueStore::new(pool.clone())), config).await;

    Some(TestApp {
        addr,
        client,
        database: Some((pool, db_name)),
    })
}

fn admin_url(base_url: &str) -> String {
    base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.to_string())
}

/// Drop the test database, if any, after tests complete.
pub async fn cleanup(app: TestApp) {
    let Some((pool, db_name)) = app.database else {
        return;
    };
    pool.close().await;

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url(&base_url))
        .await
        .expect("Failed to connect for cleanup");

    let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&admin_pool)
        .await;

    admin_pool.close().await;
}
