#![allow(dead_code)]

use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use reqwest::{header::SET_COOKIE, multipart, Client, Response};
use serde_json::{json, Value};
use skill_tracker::{
    auth::cookie::SESSION_COOKIE,
    db::postgres::{create_pool, run_migrations, seed_departments},
    middlewares::auth::SessionMiddleware,
    routes::{configure_extractors, configure_routes},
    settings::{AppConfig, AppEnvironment},
    AppState,
};
use sqlx::PgPool;
use std::{env, net::TcpListener, time::Duration};
use uuid::Uuid;

pub fn test_config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "Skill Tracker Test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        worker_count: 1,
        database_url: String::new(),
        session_secret: "test_session_secret_that_is_long_enough_for_hs512_0123456789".into(),
        session_ttl_hours: 1,
        upload_dir: env::temp_dir()
            .join(format!("skill-tracker-uploads-{}", Uuid::new_v4()))
            .to_string_lossy()
            .into_owned(),
        max_upload_bytes: 1024 * 1024,
        cors_allowed_origins: vec!["*".to_string()],
    }
}

/// A student or faculty account registered through the API, with the
/// session cookie the registration returned.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub cookie: String,
}

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub client: Client,
    pub config: AppConfig,
}

impl TestApp {
    /// Boots the full application against `APP_TEST_DATABASE_URL`. Returns
    /// `None` when no test database is configured so the suite can skip.
    pub async fn spawn() -> Option<Self> {
        let Ok(database_url) = env::var("APP_TEST_DATABASE_URL") else {
            eprintln!("APP_TEST_DATABASE_URL not set, skipping API test");
            return None;
        };

        let mut config = test_config();
        config.database_url = database_url;

        let db_pool = create_pool(&config.database_url)
            .await
            .expect("Failed to create test DB pool");

        run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        let state = web::Data::new(AppState::new(&config, db_pool.clone()));
        seed_departments(&state.department_handler.department_repo).await;
        state.evidence_store
            .ensure_dir()
            .await
            .expect("Failed to create upload directory");

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let max_upload_bytes = config.max_upload_bytes;
        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .configure(configure_extractors(max_upload_bytes))
                .wrap(SessionMiddleware)
                .wrap(NormalizePath::trim())
                .configure(configure_routes)
        })
        .listen(listener)
        .expect("Failed to bind server")
        .workers(1)
        .run();

        tokio::spawn(server);

        let client = Client::new();
        while client.get(format!("{}/api/health", address)).send().await.is_err() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        Some(Self { address, db_pool, client, config })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn department_id(&self, name: &str) -> i64 {
        let departments: Vec<Value> = self.client
            .get(self.url("/api/departments"))
            .send()
            .await
            .expect("Failed to list departments")
            .json()
            .await
            .unwrap();

        departments.iter()
            .find(|d| d["name"] == name)
            .and_then(|d| d["id"].as_i64())
            .unwrap_or_else(|| panic!("Department {name} missing"))
    }

    pub async fn register(&self, body: &Value) -> Response {
        self.client
            .post(self.url("/api/register"))
            .json(body)
            .send()
            .await
            .expect("Failed to register user")
    }

    pub async fn create_user(&self, role: &str, department_id: Option<i64>) -> TestUser {
        let email = format!("{}-{}@campus.test", role, Uuid::new_v4());
        let password = "CorrectHorse9".to_string();

        let response = self.register(&json!({
            "name": format!("Test {role}"),
            "email": email,
            "password": password,
            "role": role,
            "department_id": department_id,
        }))
        .await;

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let cookie = session_cookie(&response).expect("Registration set no session cookie");
        let profile: Value = response.json().await.unwrap();

        TestUser {
            id: profile["id"].as_i64().unwrap(),
            email,
            password,
            cookie,
        }
    }

    pub async fn submit_skill(
        &self,
        user: &TestUser,
        skill_name: &str,
        level: &str,
        evidence: Option<(&str, &[u8])>,
    ) -> Response {
        let mut form = multipart::Form::new()
            .text("skillName", skill_name.to_string())
            .text("level", level.to_string());

        if let Some((filename, bytes)) = evidence {
            form = form.part(
                "evidence",
                multipart::Part::bytes(bytes.to_vec()).file_name(filename.to_string()),
            );
        }

        self.client
            .post(self.url("/api/skills"))
            .header("Cookie", &user.cookie)
            .multipart(form)
            .send()
            .await
            .expect("Failed to submit skill")
    }

    /// Installs a trigger that aborts the validation insert for any skill
    /// whose name starts with `prefix`. Other skills are unaffected.
    pub async fn fail_validation_inserts_for(&self, prefix: &str) {
        sqlx::query(&format!(
            r#"
            CREATE OR REPLACE FUNCTION reject_marked_validation() RETURNS trigger AS $$
            BEGIN
                IF (SELECT skill_name FROM skills WHERE id = NEW.skill_id) LIKE '{prefix}%' THEN
                    RAISE EXCEPTION 'validation insert rejected for test';
                END IF;
                RETURN NEW;
            END;
            $$ LANGUAGE plpgsql
            "#
        ))
        .execute(&self.db_pool)
        .await
        .expect("Failed to create trigger function");

        sqlx::query("DROP TRIGGER IF EXISTS reject_marked_validation ON validations")
            .execute(&self.db_pool)
            .await
            .expect("Failed to drop trigger");

        sqlx::query(
            r#"
            CREATE TRIGGER reject_marked_validation
            BEFORE INSERT ON validations
            FOR EACH ROW EXECUTE FUNCTION reject_marked_validation()
            "#
        )
        .execute(&self.db_pool)
        .await
        .expect("Failed to create trigger");
    }

    pub async fn validation_row(&self, skill_id: i64) -> Option<(i64, String, Option<String>)> {
        sqlx::query_as(
            "SELECT id, status::text, feedback FROM validations WHERE skill_id = $1"
        )
        .bind(skill_id)
        .fetch_optional(&self.db_pool)
        .await
        .unwrap()
    }
}

/// `name=value` pair of the session cookie from a response, ready to be
/// sent back in a `Cookie` header.
pub fn session_cookie(response: &Response) -> Option<String> {
    response.headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{SESSION_COOKIE}=")))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}
