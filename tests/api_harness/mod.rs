//! Shared harness for the HTTP integration tests
//!
//! Every test gets its own router over a fresh [`InMemoryStore`], guarded by
//! a real [`JwtAuthProvider`], plus a signed-up staff user whose access token
//! authorizes the requests.
//!
//! ```text
//! axum_test::TestServer
//!     └─ Router (ServerBuilder + RestaurantModule)
//!         └─ Repository → DocumentStore (in-memory unless a test injects one)
//! ```

#![allow(dead_code)]

use axum::http::StatusCode;
use axum_test::{TestRequest, TestServer};
use restaurant::core::auth::{JwtAuthProvider, JwtSettings};
use restaurant::prelude::*;
use serde_json::{Value, json};

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn jwt_settings() -> JwtSettings {
    JwtSettings {
        secret: TEST_SECRET.to_string(),
        issuer: "restaurant-tests".to_string(),
        access_token_minutes: 5,
        refresh_token_hours: 1,
    }
}

/// Router over `store` with the JWT provider and the full module
pub fn build_router(store: Arc<dyn DocumentStore>, timeouts: StoreTimeouts) -> axum::Router {
    ServerBuilder::new()
        .with_repository(Repository::new(store, timeouts))
        .with_auth_provider(JwtAuthProvider::new(jwt_settings()))
        .register_module(RestaurantModule)
        .and_then(|builder| builder.build())
        .unwrap()
}

/// Running test API with an authenticated caller
pub struct Api {
    pub server: TestServer,
    pub store: Arc<InMemoryStore>,
    pub token: String,
}

impl Api {
    pub async fn spawn() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let router = build_router(store.clone(), StoreTimeouts::default());
        let server = TestServer::new(router);
        let token = signup(&server, "staff@example.com", "+15550000001").await["token"]
            .as_str()
            .unwrap()
            .to_string();

        Self {
            server,
            store,
            token,
        }
    }

    /// Repository over the same store the server writes to
    pub fn repository(&self) -> Repository {
        Repository::new(self.store.clone(), StoreTimeouts::default())
    }

    pub fn get(&self, path: &str) -> TestRequest {
        self.server.get(path).authorization_bearer(&self.token)
    }

    pub fn post(&self, path: &str, body: Value) -> TestRequest {
        self.server
            .post(path)
            .authorization_bearer(&self.token)
            .json(&body)
    }

    pub fn patch(&self, path: &str, body: Value) -> TestRequest {
        self.server
            .patch(path)
            .authorization_bearer(&self.token)
            .json(&body)
    }

    /// POST and return the created body, asserting 201
    pub async fn create(&self, path: &str, body: Value) -> Value {
        let response = self.post(path, body).await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    pub async fn menu(&self) -> String {
        let menu = self
            .create("/menus", json!({"name": "Dinner", "category": "main"}))
            .await;
        menu["menu_id"].as_str().unwrap().to_string()
    }

    pub async fn food(&self, menu_id: &str, name: &str, price: f64) -> String {
        let food = self
            .create(
                "/foods",
                json!({
                    "name": name,
                    "price": price,
                    "food_image": format!("{}.png", name),
                    "menu_id": menu_id
                }),
            )
            .await;
        food["food_id"].as_str().unwrap().to_string()
    }

    pub async fn table(&self, table_number: i64) -> String {
        let table = self
            .create(
                "/tables",
                json!({"number_of_guests": 4, "table_number": table_number}),
            )
            .await;
        table["table_id"].as_str().unwrap().to_string()
    }
}

/// Sign up a user and return the response body
pub async fn signup(server: &TestServer, email: &str, phone: &str) -> Value {
    let response = server
        .post("/users/signup")
        .json(&json!({
            "first_name": "Sam",
            "last_name": "Cook",
            "email": email,
            "password": "correct horse",
            "phone": phone
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}
