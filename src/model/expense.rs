//! The expense record and the on-disk collection shape.

use crate::model::{Amount, Category};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One persisted expense record.
///
/// The `date` and `timestamp` fields are both derived from the creation time
/// and never change afterward; `timestamp` is the sort key for listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    /// Lowercase label. Not required to be a member of [`Category`].
    pub category: String,
    pub amount: Amount,
    pub description: String,
    pub date: NaiveDate,
    pub timestamp: NaiveDateTime,
}

impl Expense {
    /// Creates a record stamped with the current local time. The category is
    /// lowercased and the amount rounded to two decimal places.
    pub fn new(category: &str, amount: Amount, description: &str) -> Self {
        let now = Local::now().naive_local();
        Self {
            id: Uuid::new_v4(),
            category: category.trim().to_lowercase(),
            amount: amount.rounded(),
            description: description.to_string(),
            date: now.date(),
            timestamp: now,
        }
    }

    /// Whether the record's category is in the recognized set.
    pub fn has_known_category(&self) -> bool {
        Category::parse(&self.category).is_some()
    }
}

/// The full ordered collection of expenses as stored on disk.
///
/// Records keep insertion order. The collection is always read and written
/// as a whole; there is no partial or streaming access.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseBook {
    expenses: Vec<Expense>,
}

impl ExpenseBook {
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Appends a record, preserving insertion order.
    pub fn push(&mut self, expense: Expense) {
        self.expenses.push(expense);
    }

    /// Keeps only the records for which `keep` returns true.
    pub fn retain(&mut self, keep: impl FnMut(&Expense) -> bool) {
        self.expenses.retain(keep);
    }
}
