//! Stateless HTTP request builder and response parser for the expense API.
//!
//! # Design
//! `ExpenseClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. `ExpenseApi` glues the two halves to a `Transport` for
//! callers that just want the typed result.

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{default_headers, HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::types::{ExpenseDraft, ExpenseRecord, ReimburseReceipt, ReimburseRequest};

/// Synchronous, stateless client for the expense API.
#[derive(Debug, Clone)]
pub struct ExpenseClient {
    base_url: String,
}

impl ExpenseClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_expenses(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/api/expenses", None)
    }

    pub fn build_add_expense(&self, draft: &ExpenseDraft) -> Result<HttpRequest, ApiError> {
        let body = encode(draft)?;
        Ok(self.request(HttpMethod::Post, "/api/expenses", Some(body)))
    }

    pub fn build_approve_expense(&self, id: &str) -> HttpRequest {
        let path = format!("/api/expenses/{}/approve", urlencoding::encode(id));
        self.request(HttpMethod::Post, &path, None)
    }

    pub fn build_reimburse(&self, amount: Decimal) -> Result<HttpRequest, ApiError> {
        let body = encode(&ReimburseRequest { amount })?;
        Ok(self.request(HttpMethod::Post, "/api/reimburse", Some(body)))
    }

    pub fn parse_list_expenses(&self, response: HttpResponse) -> Result<Vec<ExpenseRecord>, ApiError> {
        decode(response)
    }

    pub fn parse_add_expense(&self, response: HttpResponse) -> Result<ExpenseRecord, ApiError> {
        decode(response)
    }

    pub fn parse_approve_expense(&self, response: HttpResponse) -> Result<ExpenseRecord, ApiError> {
        decode(response)
    }

    /// Returns the remaining outstanding amount.
    pub fn parse_reimburse(&self, response: HttpResponse) -> Result<Decimal, ApiError> {
        decode::<ReimburseReceipt>(response).map(|receipt| receipt.remaining)
    }

    fn request(&self, method: HttpMethod, path: &str, body: Option<String>) -> HttpRequest {
        debug!(method = method.as_str(), path, "building request");
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: default_headers(),
            body,
        }
    }
}

fn encode<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Encode(e.to_string()))
}

/// Map non-2xx statuses to `ApiError::Http`, otherwise decode the body.
fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    warn!(status = response.status, "expense API returned an error status");
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Typed expense operations over a host-supplied `Transport`.
///
/// No retry and no timeout: the first failure is returned as is.
#[derive(Debug, Clone)]
pub struct ExpenseApi<T> {
    client: ExpenseClient,
    transport: T,
}

impl<T: Transport> ExpenseApi<T> {
    pub fn new(client: ExpenseClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn list_expenses(&self) -> Result<Vec<ExpenseRecord>, ApiError> {
        let response = self.transport.execute(&self.client.build_list_expenses())?;
        self.client.parse_list_expenses(response)
    }

    pub fn add_expense(&self, draft: &ExpenseDraft) -> Result<ExpenseRecord, ApiError> {
        let request = self.client.build_add_expense(draft)?;
        let response = self.transport.execute(&request)?;
        self.client.parse_add_expense(response)
    }

    pub fn approve_expense(&self, id: &str) -> Result<ExpenseRecord, ApiError> {
        let response = self.transport.execute(&self.client.build_approve_expense(id))?;
        self.client.parse_approve_expense(response)
    }

    pub fn reimburse(&self, amount: Decimal) -> Result<Decimal, ApiError> {
        let request = self.client.build_reimburse(amount)?;
        let response = self.transport.execute(&request)?;
        self.client.parse_reimburse(response)
    }
}
