//! Aggregate figures shown on the summary cards.

use rust_decimal::Decimal;

use crate::types::{ExpenseRecord, ExpenseStatus};

/// Sums over a set of records. `approved` is everything not pending, so
/// `total == pending + approved` always holds exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub total: Decimal,
    pub pending: Decimal,
    pub approved: Decimal,
}

impl Totals {
    /// `None` when a sum leaves the range of `Decimal`.
    pub fn from_records<'a, I>(records: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a ExpenseRecord>,
    {
        let mut total = Decimal::ZERO;
        let mut pending = Decimal::ZERO;
        for record in records {
            total = total.checked_add(record.amount)?;
            if record.status == ExpenseStatus::Pending {
                pending = pending.checked_add(record.amount)?;
            }
        }
        Some(Self {
            total,
            pending,
            approved: total.checked_sub(pending)?,
        })
    }
}
