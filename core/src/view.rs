//! Expense view-model: the local list, UI flags and reconciliation rules.
//!
//! # Design
//! Every remote call is split in two. `begin_*` checks whether the action is
//! currently allowed, flips the matching flag and hands back a ticket
//! carrying the `HttpRequest` to execute. The host runs the request however
//! it likes (blocking, on an executor, interleaved with other calls) and
//! passes the outcome to the matching `finish_*`, which reconciles the
//! local list with the confirmed server result.
//!
//! Nothing is applied optimistically: a failed call only replaces the error
//! banner. Once the view is unmounted, late completions are dropped.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::client::ExpenseClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::store::ExpenseList;
use crate::totals::Totals;
use crate::types::{ExpenseDraft, ExpenseRecord, ExpenseStatus};

/// Progress of the initial list fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
}

/// What a `finish_*` call did with its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The confirmed result was merged into local state.
    Applied,
    /// The call failed; the error banner was replaced.
    Failed,
    /// The view was torn down first; nothing changed.
    Discarded,
}

/// Pending initial list fetch.
#[derive(Debug)]
pub struct LoadTicket {
    request: HttpRequest,
}

impl LoadTicket {
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }
}

/// Pending draft submission.
#[derive(Debug)]
pub struct SubmitTicket {
    request: HttpRequest,
    draft: ExpenseDraft,
}

impl SubmitTicket {
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    /// The draft as it was sent.
    pub fn draft(&self) -> &ExpenseDraft {
        &self.draft
    }
}

/// Pending approval of one record.
#[derive(Debug)]
pub struct ApproveTicket {
    id: String,
    request: HttpRequest,
}

impl ApproveTicket {
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone)]
pub struct ExpenseView {
    client: ExpenseClient,
    expenses: ExpenseList,
    totals: Totals,
    load: LoadState,
    mounted: bool,
    error: Option<String>,
    draft: ExpenseDraft,
    submitting: bool,
    approving: HashSet<String>,
}

impl ExpenseView {
    /// A mounted view with an empty list and a draft dated today.
    pub fn new(client: ExpenseClient) -> Self {
        Self::with_draft(client, ExpenseDraft::today())
    }

    pub fn with_draft(client: ExpenseClient, draft: ExpenseDraft) -> Self {
        Self {
            client,
            expenses: ExpenseList::new(),
            totals: Totals::default(),
            load: LoadState::Idle,
            mounted: true,
            error: None,
            draft,
            submitting: false,
            approving: HashSet::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Initial load
    // -----------------------------------------------------------------------

    /// Start the one-and-only list fetch. Returns `None` on every later call
    /// and after teardown.
    pub fn mount(&mut self) -> Option<LoadTicket> {
        if !self.mounted || self.load != LoadState::Idle {
            return None;
        }
        self.load = LoadState::Loading;
        debug!("loading expenses");
        Some(LoadTicket {
            request: self.client.build_list_expenses(),
        })
    }

    pub fn finish_load(
        &mut self,
        _ticket: LoadTicket,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Outcome {
        if !self.mounted {
            debug!("view unmounted, dropping list result");
            return Outcome::Discarded;
        }
        self.load = LoadState::Loaded;
        let result = outcome
            .and_then(|response| self.client.parse_list_expenses(response))
            .and_then(|records| self.commit(ExpenseList::from_records(records)));
        match result {
            Ok(()) => {
                debug!(count = self.expenses.len(), "expenses loaded");
                Outcome::Applied
            }
            Err(err) => self.fail(err),
        }
    }

    // -----------------------------------------------------------------------
    // Draft submission
    // -----------------------------------------------------------------------

    /// Send the current draft. Refused until the initial load has finished
    /// and while another submission is in flight.
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        if !self.mounted || self.load != LoadState::Loaded || self.submitting {
            return None;
        }
        match self.client.build_add_expense(&self.draft) {
            Ok(request) => {
                self.submitting = true;
                Some(SubmitTicket {
                    request,
                    draft: self.draft.clone(),
                })
            }
            Err(err) => {
                self.fail(err);
                None
            }
        }
    }

    /// On success the new record goes first and the draft keeps only its date.
    pub fn finish_submit(
        &mut self,
        _ticket: SubmitTicket,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Outcome {
        if !self.mounted {
            debug!("view unmounted, dropping submit result");
            return Outcome::Discarded;
        }
        self.submitting = false;
        let result = outcome
            .and_then(|response| self.client.parse_add_expense(response))
            .and_then(|record| {
                debug!(id = %record.id, "expense created");
                let mut expenses = self.expenses.clone();
                expenses.prepend(record);
                self.commit(expenses)
            });
        match result {
            Ok(()) => {
                self.draft = ExpenseDraft::blank(self.draft.date);
                Outcome::Applied
            }
            Err(err) => self.fail(err),
        }
    }

    // -----------------------------------------------------------------------
    // Approval
    // -----------------------------------------------------------------------

    /// Whether the Approve control for `id` is enabled: the record is known,
    /// pending, and has no approval already in flight.
    pub fn can_approve(&self, id: &str) -> bool {
        self.mounted
            && !self.approving.contains(id)
            && self
                .expenses
                .get(id)
                .is_some_and(|record| record.status == ExpenseStatus::Pending)
    }

    pub fn begin_approve(&mut self, id: &str) -> Option<ApproveTicket> {
        if !self.can_approve(id) {
            debug!(id, "approve not allowed");
            return None;
        }
        self.approving.insert(id.to_string());
        Some(ApproveTicket {
            id: id.to_string(),
            request: self.client.build_approve_expense(id),
        })
    }

    /// On success the returned record replaces the requested one in place. A
    /// record for any other id is rejected and nothing changes.
    pub fn finish_approve(
        &mut self,
        ticket: ApproveTicket,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Outcome {
        if !self.mounted {
            debug!(id = %ticket.id, "view unmounted, dropping approve result");
            return Outcome::Discarded;
        }
        self.approving.remove(&ticket.id);
        let result = outcome
            .and_then(|response| self.client.parse_approve_expense(response))
            .and_then(|record| {
                if record.id != ticket.id {
                    return Err(ApiError::Decode(format!(
                        "approved expense {} but {} was requested",
                        record.id, ticket.id
                    )));
                }
                let mut expenses = self.expenses.clone();
                if !expenses.replace(record) {
                    warn!(id = %ticket.id, "approved record is not in the local list");
                }
                self.commit(expenses)
            });
        match result {
            Ok(()) => Outcome::Applied,
            Err(err) => self.fail(err),
        }
    }

    // -----------------------------------------------------------------------
    // Teardown, errors, draft editing
    // -----------------------------------------------------------------------

    /// Tear the view down. In-flight requests keep running but their results
    /// are never applied.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.draft.date = date;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn set_amount(&mut self, amount: Decimal) {
        self.draft.amount = amount;
    }

    /// Swap in a new list, provided its totals can be computed.
    fn commit(&mut self, expenses: ExpenseList) -> Result<(), ApiError> {
        let totals = expenses
            .totals()
            .ok_or_else(|| ApiError::Decode("amounts are too large to total".into()))?;
        self.expenses = expenses;
        self.totals = totals;
        Ok(())
    }

    fn fail(&mut self, err: ApiError) -> Outcome {
        warn!(error = %err, "expense request failed");
        self.error = Some(err.to_string());
        Outcome::Failed
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    pub fn expenses(&self) -> &ExpenseList {
        &self.expenses
    }

    pub fn records(&self) -> impl Iterator<Item = &ExpenseRecord> + '_ {
        self.expenses.iter()
    }

    /// Kept in step with the list; a list whose sums overflow is never
    /// accepted.
    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_approving(&self, id: &str) -> bool {
        self.approving.contains(id)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn draft(&self) -> &ExpenseDraft {
        &self.draft
    }
}
