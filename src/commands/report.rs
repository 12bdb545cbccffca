//! Read-only reporting commands: the record count and the full listing.

use crate::commands::Out;
use crate::model::{Amount, Expense};
use crate::{Config, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Write;

/// Returns the number of recorded expenses.
///
/// An empty store is reported as a friendly message rather than a bare zero
/// so the calling agent always has something to relay.
pub async fn expenses_count(config: Config) -> Result<Out<usize>> {
    let book = config.store().load().await?;
    let count = book.len();
    let message = if count == 0 {
        "No expenses yet!".to_string()
    } else {
        format!("You have {count} recorded expense(s)")
    };
    Ok(Out::new(message, count))
}

/// A selection of expenses plus its aggregates, in render order.
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseReport {
    pub expenses: Vec<Expense>,
    pub count: usize,
    pub total: Amount,
}

impl ExpenseReport {
    pub(crate) fn new(expenses: Vec<Expense>) -> Self {
        let total = Amount::new(
            expenses
                .iter()
                .map(|e| e.amount.value())
                .sum::<Decimal>(),
        );
        let count = expenses.len();
        Self {
            expenses,
            count,
            total,
        }
    }

    /// Renders the numbered, 1-indexed report lines.
    pub(crate) fn render(&self) -> String {
        let mut rendered = String::new();
        for (ix, e) in self.expenses.iter().enumerate() {
            let _ = writeln!(
                rendered,
                "{}. {} | {} | {} | {}",
                ix + 1,
                e.date,
                e.category.to_uppercase(),
                e.amount,
                e.description
            );
        }
        rendered
    }
}

/// Lists every recorded expense, most recent first, with the count and the
/// sum of all amounts.
///
/// Records are ordered by timestamp descending; records with identical
/// timestamps keep their original relative order (the sort is stable). This
/// is a read-only operation.
pub async fn all_expenses(config: Config) -> Result<Out<ExpenseReport>> {
    let book = config.store().load().await?;
    if book.is_empty() {
        return Ok(Out::new_message("No expenses recorded."));
    }

    let mut expenses = book.expenses().to_vec();
    expenses.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let report = ExpenseReport::new(expenses);
    let message = format!(
        "{}\nTotal: {} expense(s), {}",
        report.render().trim_end(),
        report.count,
        report.total
    );
    Ok(Out::new(message, report))
}
