use std::net::SocketAddr;

use reqwest::Client;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tempfile::TempDir;

use common::DesignConfig;
use portfolio_server::config::{
    ApiConfig, AppConfig, CorsConfig, DatabaseConfig, LogConfig, ServerConfig,
};
use portfolio_server::state::AppState;

pub mod routes {
    pub const ROOT: &str = "/";
    pub const HEALTH: &str = "/api/v1/health";

    pub const DATA: &str = "/api/v1/data";
    pub const DATA_TAGS: &str = "/api/v1/data/tags";

    pub fn data_item(id: i64) -> String {
        format!("/api/v1/data/{id}")
    }

    pub fn data_list(query: &str) -> String {
        format!("/api/v1/data?{query}")
    }

    pub fn data_search(query: &str) -> String {
        format!("/api/v1/data/search?{query}")
    }

    pub const DESIGN: &str = "/api/v1/design";
    pub const DESIGN_ACTIVE: &str = "/api/v1/design/active";
    pub const DESIGN_COLOR_SCHEME: &str = "/api/v1/design/color-scheme";
    pub const DESIGN_CSS: &str = "/api/v1/design/css";
    pub const DESIGN_PALETTE: &str = "/api/v1/design/palette";

    pub fn design(id: i64) -> String {
        format!("/api/v1/design/{id}")
    }

    pub fn design_activate(id: i64) -> String {
        format!("/api/v1/design/{id}/activate")
    }

    pub const EXPERIENCES: &str = "/api/v1/experiences";

    pub fn experience(id: &str) -> String {
        format!("/api/v1/experiences/{id}")
    }

    pub const PROJECTS: &str = "/api/v1/projects";

    pub fn project(id: &str) -> String {
        format!("/api/v1/projects/{id}")
    }

    pub const PROFILE: &str = "/api/v1/profile";
    pub const PORTFOLIO: &str = "/api/v1/portfolio";
}

/// A running test server backed by its own SQLite file.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
    _dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }
}

pub fn test_config(db_url: String) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors: CorsConfig {
                allow_origins: vec!["*".to_string()],
                max_age: 3600,
            },
        },
        database: DatabaseConfig {
            url: db_url,
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 8,
            sqlx_logging: false,
        },
        log: LogConfig {
            level: "warn".to_string(),
        },
        api: ApiConfig { default_limit: 100 },
        default_theme: DesignConfig::default(),
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}/test.db?mode=rwc", dir.path().display());
        let config = test_config(db_url);

        let db = portfolio_server::database::init_db(&config.database)
            .await
            .expect("Failed to initialize test database");

        let app = portfolio_server::build_router(AppState::new(db.clone(), config));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            db,
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_empty(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request");

        TestResponse::from_response(res).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    /// Create a data item and return its id.
    pub async fn create_data_item(&self, title: &str, description: Option<&str>, tags: &[&str]) -> i64 {
        let res = self
            .post(
                routes::DATA,
                &json!({
                    "title": title,
                    "description": description,
                    "content": {"key": "value"},
                    "tags": tags,
                }),
            )
            .await;
        assert_eq!(res.status, 201, "Data item creation failed: {}", res.text);
        res.body["id"].as_i64().unwrap()
    }

    /// Create a design system with the default sections and return its id.
    pub async fn create_design(&self, name: &str) -> i64 {
        let res = self.post(routes::DESIGN, &design_body(name)).await;
        assert_eq!(res.status, 201, "Design creation failed: {}", res.text);
        res.body["id"].as_i64().unwrap()
    }
}

/// Full create body for a design system using the built-in sections.
pub fn design_body(name: &str) -> Value {
    let mut body = serde_json::to_value(DesignConfig::default()).unwrap();
    body["name"] = json!(name);
    body
}

/// Tag names of a data item response, in response order.
pub fn tag_names(item: &Value) -> Vec<String> {
    item["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect()
}
