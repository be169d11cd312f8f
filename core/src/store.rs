//! Local snapshot of server records in display order.
//!
//! # Design
//! Records live in a map keyed by id; display order is a separate id
//! sequence. Reconciliation is then "replace by id" (order untouched) or
//! "prepend" (new id at the front), with no scan over record contents.

use std::collections::HashMap;

use crate::totals::Totals;
use crate::types::ExpenseRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseList {
    records: HashMap<String, ExpenseRecord>,
    order: Vec<String>,
}

impl ExpenseList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a server response, keeping the received order. A repeated
    /// id keeps its first position and takes the later contents.
    pub fn from_records(records: impl IntoIterator<Item = ExpenseRecord>) -> Self {
        let mut list = Self::new();
        for record in records {
            if !list.records.contains_key(&record.id) {
                list.order.push(record.id.clone());
            }
            list.records.insert(record.id.clone(), record);
        }
        list
    }

    /// Put `record` first. An entry with the same id is moved to the front.
    pub fn prepend(&mut self, record: ExpenseRecord) {
        if self.records.contains_key(&record.id) {
            self.order.retain(|id| id != &record.id);
        }
        self.order.insert(0, record.id.clone());
        self.records.insert(record.id.clone(), record);
    }

    /// Swap in `record` for the entry with the same id, keeping its position.
    /// Returns false, leaving the list untouched, when no entry matches.
    pub fn replace(&mut self, record: ExpenseRecord) -> bool {
        match self.records.get_mut(&record.id) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&ExpenseRecord> {
        self.records.get(id)
    }

    /// Records in display order.
    pub fn iter(&self) -> impl Iterator<Item = &ExpenseRecord> + '_ {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// `None` when the amounts cannot be summed without overflow.
    pub fn totals(&self) -> Option<Totals> {
        Totals::from_records(self.iter())
    }

    pub fn to_vec(&self) -> Vec<ExpenseRecord> {
        self.iter().cloned().collect()
    }
}
