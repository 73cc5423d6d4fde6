//! Common test utilities

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Days, NaiveDate};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::util::ServiceExt;

use credit_application::api::{self, AppState};
use credit_application::domain::validation;
use credit_application::handlers::{CreateCreditCommand, RegisterCustomerCommand};
use credit_application::Credit;

pub const CREDITS_URL: &str = "/api/credits";
pub const CUSTOMERS_URL: &str = "/api/customers";

/// Router plus direct access to its repositories for seeding
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

/// Application backed by a fresh in-memory store
pub fn test_app() -> TestApp {
    let state = AppState::in_memory();
    TestApp {
        router: api::build_router(state.clone()),
        state,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    pub async fn send_json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, body) = self.send(request).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    /// Seed a customer directly through the handler, returning its id
    pub async fn seed_customer(&self, email: &str, tax_id: &str) -> i64 {
        self.state
            .customer_handler()
            .register(customer_command(email, tax_id))
            .await
            .expect("Failed to seed customer")
            .id
    }

    /// Seed a credit directly through the handler
    pub async fn seed_credit(&self, customer_id: i64, credit_value: Decimal) -> Credit {
        self.state
            .create_credit_handler()
            .execute(CreateCreditCommand::new(
                credit_value,
                days_from_today(45),
                12,
                customer_id,
            ))
            .await
            .expect("Failed to seed credit")
            .credit
    }
}

pub fn customer_command(email: &str, tax_id: &str) -> RegisterCustomerCommand {
    RegisterCustomerCommand {
        first_name: "Cami".to_string(),
        last_name: "Cavalcante".to_string(),
        tax_id: tax_id.to_string(),
        income: Decimal::new(10000, 1),
        email: email.to_string(),
        password: "1234".to_string(),
        zip_code: "000000".to_string(),
        street: "Rua da Cami, 123".to_string(),
    }
}

pub fn days_from_today(days: u64) -> NaiveDate {
    validation::today()
        .checked_add_days(Days::new(days))
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("accept", "application/json")
        .body(Body::empty())
        .unwrap()
}

/// Assert the uniform error envelope
pub fn assert_error(body: &Value, status: u16, exception: &str, detail: &str) {
    let title = match status {
        409 => "Conflict! Consult the documentation",
        _ => "Bad Request! Consult the documentation",
    };
    assert_eq!(body["title"], title);
    assert!(body["timestamp"].is_string(), "timestamp missing: {}", body);
    assert_eq!(body["status"], status);
    assert_eq!(body["exception"], exception);
    assert_eq!(body["details"], serde_json::json!([detail]));
}
