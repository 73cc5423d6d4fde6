//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Credit, CreditStatus, Customer, DomainError, FieldViolation};
use crate::error::AppError;
use crate::handlers::{CreateCreditCommand, RegisterCustomerCommand, UpdateCustomerCommand};

use super::AppState;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditRequest {
    pub credit_value: Decimal,
    pub day_first_installment: NaiveDate,
    pub number_of_installments: i64,
    pub customer_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditView {
    pub credit_code: Uuid,
    #[serde(with = "rust_decimal::serde::float")]
    pub credit_value: Decimal,
    pub number_of_installments: i32,
    pub status: CreditStatus,
    pub email_customer: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub income_customer: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditSummary {
    pub credit_code: Uuid,
    #[serde(with = "rust_decimal::serde::float")]
    pub credit_value: Decimal,
    pub number_of_installments: i32,
}

impl From<Credit> for CreditSummary {
    fn from(credit: Credit) -> Self {
        Self {
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            number_of_installments: credit.number_of_installments,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub tax_id: String,
    pub income: Decimal,
    pub email: String,
    pub password: String,
    pub zip_code: String,
    pub street: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdateRequest {
    pub first_name: String,
    pub last_name: String,
    pub income: Decimal,
    pub zip_code: String,
    pub street: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerView {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub tax_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    pub email: String,
    pub zip_code: String,
    pub street: String,
}

impl From<Customer> for CustomerView {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            tax_id: customer.tax_id,
            income: customer.income,
            email: customer.email,
            zip_code: customer.zip_code,
            street: customer.street,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerIdQuery {
    pub customer_id: i64,
}

// =========================================================================
// Extraction failures
// =========================================================================

fn bad_body(rejection: JsonRejection) -> AppError {
    DomainError::Validation(vec![FieldViolation::new("body", rejection.body_text())]).into()
}

fn bad_query(rejection: QueryRejection) -> AppError {
    DomainError::Validation(vec![FieldViolation::new("customerId", rejection.body_text())]).into()
}

/// Counts beyond `i32` saturate so they fail the installment bound check
fn installments_from(raw: i64) -> i32 {
    raw.clamp(i32::MIN.into(), i32::MAX.into()) as i32
}

fn parse_customer_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| DomainError::MalformedIdentifier(format!("Invalid customer id: {}", raw)).into())
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/credits", post(create_credit).get(list_credits))
        .route("/credits/:credit_code", get(get_credit))
        .route("/customers", post(create_customer).patch(update_customer))
        .route("/customers/:customer_id", get(get_customer).delete(delete_customer))
}

// =========================================================================
// POST /credits
// =========================================================================

/// Request a new credit
async fn create_credit(
    State(state): State<AppState>,
    payload: Result<Json<CreditRequest>, JsonRejection>,
) -> Result<(StatusCode, String), AppError> {
    let Json(request) = payload.map_err(bad_body)?;

    let command = CreateCreditCommand::new(
        request.credit_value,
        request.day_first_installment,
        installments_from(request.number_of_installments),
        request.customer_id,
    );

    let result = state.create_credit_handler().execute(command).await?;

    Ok((
        StatusCode::CREATED,
        format!(
            "Credit {} - Customer {} saved!",
            result.credit.credit_code, result.customer_email
        ),
    ))
}

// =========================================================================
// GET /credits?customerId=
// =========================================================================

/// List a customer's credits
async fn list_credits(
    State(state): State<AppState>,
    query: Result<Query<CustomerIdQuery>, QueryRejection>,
) -> Result<Json<Vec<CreditSummary>>, AppError> {
    let Query(query) = query.map_err(bad_query)?;

    let credits = state.list_credits_handler().execute(query.customer_id).await?;

    Ok(Json(credits.into_iter().map(CreditSummary::from).collect()))
}

// =========================================================================
// GET /credits/:credit_code?customerId=
// =========================================================================

/// Get a credit by code on behalf of its owner
async fn get_credit(
    State(state): State<AppState>,
    Path(credit_code): Path<String>,
    query: Result<Query<CustomerIdQuery>, QueryRejection>,
) -> Result<Json<CreditView>, AppError> {
    let Query(query) = query.map_err(bad_query)?;

    let details = state
        .find_credit_handler()
        .execute(&credit_code, query.customer_id)
        .await?;

    Ok(Json(CreditView {
        credit_code: details.credit.credit_code,
        credit_value: details.credit.credit_value,
        number_of_installments: details.credit.number_of_installments,
        status: details.credit.status,
        email_customer: details.customer.email,
        income_customer: details.customer.income,
    }))
}

// =========================================================================
// POST /customers
// =========================================================================

/// Register a customer
async fn create_customer(
    State(state): State<AppState>,
    payload: Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<(StatusCode, String), AppError> {
    let Json(request) = payload.map_err(bad_body)?;

    let command = RegisterCustomerCommand {
        first_name: request.first_name,
        last_name: request.last_name,
        tax_id: request.tax_id,
        income: request.income,
        email: request.email,
        password: request.password,
        zip_code: request.zip_code,
        street: request.street,
    };

    let customer = state.customer_handler().register(command).await?;

    Ok((
        StatusCode::CREATED,
        format!("Customer {} saved!", customer.email),
    ))
}

// =========================================================================
// GET /customers/:customer_id
// =========================================================================

/// Get customer by ID
async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<CustomerView>, AppError> {
    let customer_id = parse_customer_id(&customer_id)?;
    let customer = state.customer_handler().find(customer_id).await?;
    Ok(Json(customer.into()))
}

// =========================================================================
// PATCH /customers?customerId=
// =========================================================================

/// Update customer
async fn update_customer(
    State(state): State<AppState>,
    query: Result<Query<CustomerIdQuery>, QueryRejection>,
    payload: Result<Json<CustomerUpdateRequest>, JsonRejection>,
) -> Result<Json<CustomerView>, AppError> {
    let Query(query) = query.map_err(bad_query)?;
    let Json(request) = payload.map_err(bad_body)?;

    let command = UpdateCustomerCommand {
        customer_id: query.customer_id,
        first_name: request.first_name,
        last_name: request.last_name,
        income: request.income,
        zip_code: request.zip_code,
        street: request.street,
    };

    let customer = state.customer_handler().update(command).await?;
    Ok(Json(customer.into()))
}

// =========================================================================
// DELETE /customers/:customer_id
// =========================================================================

/// Delete customer together with their credits
async fn delete_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let customer_id = parse_customer_id(&customer_id)?;
    state.customer_handler().delete(customer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_request_deserialize() {
        let json = r#"{
            "creditValue": 500000,
            "dayFirstInstallment": "2026-11-02",
            "numberOfInstallments": 25,
            "customerId": 1
        }"#;

        let request: CreditRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.credit_value, Decimal::from(500000));
        assert_eq!(
            request.day_first_installment,
            NaiveDate::from_ymd_opt(2026, 11, 2).unwrap()
        );
        assert_eq!(request.number_of_installments, 25);
    }

    #[test]
    fn test_installments_out_of_i32_range_saturate() {
        assert_eq!(installments_from(25), 25);
        assert_eq!(installments_from(3_000_000_000), i32::MAX);
        assert_eq!(installments_from(-3_000_000_000), i32::MIN);
    }

    #[test]
    fn test_credit_view_decimals_are_numbers() {
        let view = CreditView {
            credit_code: Uuid::new_v4(),
            credit_value: Decimal::new(5000050, 2),
            number_of_installments: 12,
            status: CreditStatus::Pending,
            email_customer: "camila@email.com".to_string(),
            income_customer: Decimal::from(1000),
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["creditValue"], 50000.5);
        assert_eq!(json["incomeCustomer"], 1000.0);
        assert_eq!(json["status"], "PENDING");
    }

    #[test]
    fn test_customer_view_has_no_password() {
        let view = CustomerView {
            id: 1,
            first_name: "Cami".to_string(),
            last_name: "Cavalcante".to_string(),
            tax_id: "28475934625".to_string(),
            income: Decimal::from(1000),
            email: "camila@email.com".to_string(),
            zip_code: "000000".to_string(),
            street: "Rua da Cami, 123".to_string(),
        };

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["firstName"], "Cami");
        assert_eq!(json["zipCode"], "000000");
        assert_eq!(json["income"], 1000.0);
    }

    #[test]
    fn test_customer_id_query() {
        let query: CustomerIdQuery = serde_json::from_str(r#"{"customerId": 7}"#).unwrap();
        assert_eq!(query.customer_id, 7);
    }

    #[test]
    fn test_parse_customer_id() {
        assert_eq!(parse_customer_id("42").unwrap(), 42);
        assert!(parse_customer_id("abc").is_err());
    }
}
