//! Client core for the expense tracking service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the expense
//! view-model that reconciles a local list of records with confirmed server
//! results.
//!
//! # Design
//! - `ExpenseClient` is stateless; it holds only `base_url`, which comes
//!   from `ClientConfig` resolved once at startup.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response). `ExpenseApi` joins them over a
//!   host-supplied `Transport`.
//! - `ExpenseView` owns the local `ExpenseList`, the UI flags and the error
//!   banner. Calls are `begin_*` / `finish_*` pairs so several can be in
//!   flight at once.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod render;
pub mod store;
pub mod totals;
pub mod types;
pub mod view;

pub use client::{ExpenseApi, ExpenseClient};
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use store::ExpenseList;
pub use totals::Totals;
pub use types::{ExpenseDraft, ExpenseRecord, ExpenseStatus, ReimburseReceipt, ReimburseRequest};
pub use view::{ExpenseView, LoadState, Outcome};
