//! Plain-text rendering of the expense screen.

use std::fmt::Write as _;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::view::ExpenseView;

const DESCRIPTION_WIDTH: usize = 28;

/// `CHF 18.50`
pub fn chf(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("CHF {rounded:.2}")
}

/// Label of the form's submit control.
pub fn submit_label(view: &ExpenseView) -> &'static str {
    if view.is_submitting() {
        "Adding..."
    } else {
        "Add"
    }
}

/// Render the whole screen: banner, summary cards, rows, form.
///
/// An enabled Approve control renders as `[Approve]`, a disabled one as
/// `(Approve)`.
pub fn render(view: &ExpenseView) -> String {
    let mut out = String::new();

    if let Some(error) = view.error() {
        let _ = writeln!(out, "! {error}");
        out.push('\n');
    }

    let totals = view.totals();
    for (label, amount) in [
        ("Total", totals.total),
        ("Pending", totals.pending),
        ("Approved", totals.approved),
    ] {
        let _ = writeln!(out, "{label:<10}{:>16}", chf(amount));
    }

    out.push_str("\nExpenses\n");
    if view.is_loading() {
        out.push_str("  Loading...\n");
    }
    for record in view.records() {
        let control = if view.can_approve(&record.id) {
            "[Approve]"
        } else {
            "(Approve)"
        };
        let _ = writeln!(
            out,
            "  {:<width$} {} {:>14}  {:<10} {control}",
            truncate(&record.description, DESCRIPTION_WIDTH),
            record.date,
            chf(record.amount),
            record.status.as_str(),
            width = DESCRIPTION_WIDTH,
        );
    }

    let draft = view.draft();
    out.push_str("\nAdd new expense\n");
    let _ = writeln!(out, "  Date:         {}", draft.date);
    let _ = writeln!(out, "  Description:  {}", draft.description);
    let _ = writeln!(out, "  Amount (CHF): {:.2}", draft.amount);
    let _ = writeln!(out, "  Status set on server  [{}]", submit_label(view));

    out
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::client::ExpenseClient;
    use crate::http::HttpResponse;
    use crate::types::ExpenseDraft;

    const LIST: &str = r#"[
        {"id":"a","date":"2025-09-23","description":"School supplies","amount":18.5,"status":"pending","submittedBy":"Mila"},
        {"id":"b","date":"2025-09-22","description":"Bus ticket","amount":3.2,"status":"approved","submittedBy":"Mila"}
    ]"#;

    fn view() -> ExpenseView {
        ExpenseView::with_draft(
            ExpenseClient::new("http://localhost:8000"),
            ExpenseDraft::blank(NaiveDate::from_ymd_opt(2025, 9, 24).unwrap()),
        )
    }

    fn loaded() -> ExpenseView {
        let mut view = view();
        let ticket = view.mount().unwrap();
        view.finish_load(ticket, Ok(HttpResponse::new(200, LIST)));
        view
    }

    #[test]
    fn chf_uses_two_decimals() {
        assert_eq!(chf(Decimal::new(185, 1)), "CHF 18.50");
        assert_eq!(chf(Decimal::ZERO), "CHF 0.00");
        assert_eq!(chf(Decimal::new(12345, 3)), "CHF 12.35");
    }

    #[test]
    fn cards_show_totals() {
        let screen = render(&loaded());
        assert!(screen.contains("Total") && screen.contains("CHF 21.70"));
        assert!(screen.contains("Pending") && screen.contains("CHF 18.50"));
        assert!(screen.contains("Approved") && screen.contains("CHF 3.20"));
    }

    #[test]
    fn approve_control_enabled_only_for_pending_rows() {
        let screen = render(&loaded());
        let supplies = screen.lines().find(|l| l.contains("School supplies")).unwrap();
        let bus = screen.lines().find(|l| l.contains("Bus ticket")).unwrap();
        assert!(supplies.ends_with("[Approve]"));
        assert!(bus.ends_with("(Approve)"));
    }

    #[test]
    fn in_flight_approve_disables_the_control() {
        let mut view = loaded();
        let _ticket = view.begin_approve("a").unwrap();
        let screen = render(&view);
        let supplies = screen.lines().find(|l| l.contains("School supplies")).unwrap();
        assert!(supplies.ends_with("(Approve)"));
    }

    #[test]
    fn loading_and_banner_lines() {
        let mut view = view();
        let ticket = view.mount().unwrap();
        assert!(render(&view).contains("Loading..."));

        view.finish_load(ticket, Ok(HttpResponse::new(500, "boom")));
        let screen = render(&view);
        assert!(screen.starts_with("! API 500: boom"));
        assert!(!screen.contains("Loading..."));
    }

    #[test]
    fn submit_label_reflects_in_flight_submission() {
        let mut view = loaded();
        assert!(render(&view).contains("[Add]"));
        let _ticket = view.begin_submit().unwrap();
        assert_eq!(submit_label(&view), "Adding...");
        assert!(render(&view).contains("[Adding...]"));
    }

    #[test]
    fn long_descriptions_are_truncated() {
        assert_eq!(truncate("short", 10), "short");
        let cut = truncate("a very long description indeed", 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with('…'));
    }
}
