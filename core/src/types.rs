//! Domain DTOs for the expense API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! Amounts are `Decimal` in memory and plain JSON numbers on the wire, so
//! aggregate sums stay exact while the wire format matches what any JSON
//! client sends.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a record. Transitions only move forward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    Pending,
    Approved,
    Reimbursed,
}

impl ExpenseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ExpenseStatus::Pending => "pending",
            ExpenseStatus::Approved => "approved",
            ExpenseStatus::Reimbursed => "reimbursed",
        }
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A server-confirmed expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpenseRecord {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub status: ExpenseStatus,
    #[serde(rename = "submittedBy")]
    pub submitted_by: String,
}

/// Client-authored payload for creating an expense. The service assigns
/// the id and the initial status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub date: NaiveDate,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl ExpenseDraft {
    /// Empty draft dated `date`.
    pub fn blank(date: NaiveDate) -> Self {
        Self {
            date,
            description: String::new(),
            amount: Decimal::ZERO,
        }
    }

    /// Empty draft dated today (local time).
    pub fn today() -> Self {
        Self::blank(chrono::Local::now().date_naive())
    }
}

/// Request payload for recording a reimbursement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReimburseRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Outstanding amount reported after a reimbursement was recorded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReimburseReceipt {
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining: Decimal,
}
