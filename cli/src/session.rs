//! Drives an `ExpenseView` through a `Transport`, one call at a time.

use chrono::NaiveDate;
use expense_core::{render, ExpenseClient, ExpenseView, Outcome, Transport};
use rust_decimal::Decimal;
use tracing::info;

pub struct Session<T> {
    view: ExpenseView,
    transport: T,
}

impl<T: Transport> Session<T> {
    pub fn new(client: ExpenseClient, transport: T) -> Self {
        Self::with_view(ExpenseView::new(client), transport)
    }

    pub fn with_view(view: ExpenseView, transport: T) -> Self {
        Self { view, transport }
    }

    /// Run the initial list fetch. A second call does nothing.
    pub fn load(&mut self) -> Option<Outcome> {
        let ticket = self.view.mount()?;
        let outcome = self.transport.execute(ticket.request());
        Some(self.view.finish_load(ticket, outcome))
    }

    /// Fill the form and submit it.
    pub fn add(&mut self, date: NaiveDate, description: &str, amount: Decimal) -> Option<Outcome> {
        self.view.set_date(date);
        self.view.set_description(description);
        self.view.set_amount(amount);
        let ticket = self.view.begin_submit()?;
        let outcome = self.transport.execute(ticket.request());
        let outcome = self.view.finish_submit(ticket, outcome);
        info!(?outcome, "submit finished");
        Some(outcome)
    }

    /// `None` when the Approve control for `id` is disabled.
    pub fn approve(&mut self, id: &str) -> Option<Outcome> {
        let ticket = self.view.begin_approve(id)?;
        let outcome = self.transport.execute(ticket.request());
        let outcome = self.view.finish_approve(ticket, outcome);
        info!(id, ?outcome, "approve finished");
        Some(outcome)
    }

    pub fn render(&self) -> String {
        render::render(&self.view)
    }

    pub fn view(&self) -> &ExpenseView {
        &self.view
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn close(mut self) {
        self.view.unmount();
    }
}
