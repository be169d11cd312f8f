use std::{cmp::Reverse, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub const SUBMITTER: &str = "Mila";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Approved,
    Reimbursed,
}

impl Status {
    fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Approved => "approved",
            Status::Reimbursed => "reimbursed",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub status: Status,
    #[serde(rename = "submittedBy")]
    pub submitted_by: String,
}

#[derive(Deserialize)]
pub struct CreateExpense {
    pub date: NaiveDate,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Deserialize, Default)]
pub struct ListParams {
    pub status: Option<Status>,
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: usize,
}

#[derive(Deserialize)]
pub struct Reimburse {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Serialize, Deserialize)]
pub struct Remaining {
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining: Decimal,
}

/// Round half-up to cents.
pub fn chf(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// In-memory state of the service.
#[derive(Debug, Default)]
pub struct Ledger {
    pub expenses: Vec<Expense>,
    pub reimbursed: Decimal,
}

impl Ledger {
    /// Two sample expenses for local runs.
    pub fn seeded() -> Self {
        let sample = |id: &str, date: (i32, u32, u32), description: &str, cents, status| Expense {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap_or_default(),
            description: description.to_string(),
            amount: Decimal::new(cents, 2),
            status,
            submitted_by: SUBMITTER.to_string(),
        };
        Self {
            expenses: vec![
                sample("1", (2025, 9, 23), "School supplies", 1850, Status::Pending),
                sample("2", (2025, 9, 22), "Bus ticket", 320, Status::Approved),
            ],
            reimbursed: Decimal::ZERO,
        }
    }

    fn approved_total(&self) -> Decimal {
        self.expenses
            .iter()
            .filter(|e| e.status == Status::Approved)
            .map(|e| e.amount)
            .sum()
    }

    pub fn outstanding(&self) -> Decimal {
        self.approved_total() - self.reimbursed
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("expense {0} not found")]
    NotFound(String),

    #[error("Cannot approve from state {0}.")]
    InvalidTransition(&'static str),

    #[error("amount must be > 0")]
    NonPositiveAmount,

    #[error("reimbursement of {requested} exceeds outstanding {outstanding}")]
    ExceedsOutstanding {
        requested: Decimal,
        outstanding: Decimal,
    },
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::InvalidTransition(_) | ServiceError::ExceedsOutstanding { .. } => {
                StatusCode::CONFLICT
            }
            ServiceError::NonPositiveAmount => StatusCode::UNPROCESSABLE_ENTITY,
        };
        tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        (status, self.to_string()).into_response()
    }
}

pub type Db = Arc<RwLock<Ledger>>;

/// Router over an empty ledger.
pub fn app() -> Router {
    app_with(Ledger::default())
}

pub fn app_with(ledger: Ledger) -> Router {
    let db: Db = Arc::new(RwLock::new(ledger));
    Router::new()
        .route("/health", get(health))
        .route("/api/expenses", get(list_expenses).post(create_expense))
        .route("/api/expenses/{id}/approve", post(approve_expense))
        .route("/api/reimburse", post(reimburse))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener, ledger: Ledger) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(ledger)).await
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Newest date first, ties broken by id descending.
async fn list_expenses(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Expense>> {
    let ledger = db.read().await;
    let mut items: Vec<Expense> = ledger
        .expenses
        .iter()
        .filter(|e| params.status.map_or(true, |s| e.status == s))
        .cloned()
        .collect();
    items.sort_by_key(|e| Reverse((e.date, e.id.clone())));
    let items = items
        .into_iter()
        .skip(params.offset)
        .take(params.limit.unwrap_or(usize::MAX))
        .collect();
    Json(items)
}

async fn create_expense(
    State(db): State<Db>,
    Json(input): Json<CreateExpense>,
) -> Result<(StatusCode, Json<Expense>), ServiceError> {
    if input.amount <= Decimal::ZERO {
        return Err(ServiceError::NonPositiveAmount);
    }
    let expense = Expense {
        id: Uuid::new_v4().to_string(),
        date: input.date,
        description: input.description.trim().to_string(),
        amount: chf(input.amount),
        status: Status::Pending,
        submitted_by: SUBMITTER.to_string(),
    };
    tracing::info!(id = %expense.id, amount = %expense.amount, "expense created");
    db.write().await.expenses.push(expense.clone());
    Ok((StatusCode::CREATED, Json(expense)))
}

async fn approve_expense(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Expense>, ServiceError> {
    let mut ledger = db.write().await;
    let expense = ledger
        .expenses
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or_else(|| ServiceError::NotFound(id.clone()))?;
    if expense.status != Status::Pending {
        return Err(ServiceError::InvalidTransition(expense.status.as_str()));
    }
    expense.status = Status::Approved;
    tracing::info!(id = %expense.id, "expense approved");
    Ok(Json(expense.clone()))
}

async fn reimburse(
    State(db): State<Db>,
    Json(input): Json<Reimburse>,
) -> Result<Json<Remaining>, ServiceError> {
    if input.amount <= Decimal::ZERO {
        return Err(ServiceError::NonPositiveAmount);
    }
    let amount = chf(input.amount);
    let mut ledger = db.write().await;
    let outstanding = ledger.outstanding();
    if amount > outstanding {
        return Err(ServiceError::ExceedsOutstanding {
            requested: amount,
            outstanding,
        });
    }
    ledger.reimbursed += amount;
    let remaining = ledger.outstanding();
    tracing::info!(%amount, %remaining, "reimbursement recorded");
    Ok(Json(Remaining { remaining }))
}
