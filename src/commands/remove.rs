//! The remove_expense command handler.

use crate::args::RemoveExpenseArgs;
use crate::commands::Out;
use crate::model::{Amount, Category, Expense};
use crate::{Config, Result};
use anyhow::{anyhow, bail};
use chrono::{Datelike, Month};

/// The parsed, validated removal criteria.
struct Criteria {
    category: Option<String>,
    amount: Option<Amount>,
    year: Option<i32>,
    month: Option<Month>,
}

impl Criteria {
    fn parse(args: &RemoveExpenseArgs) -> Result<Self> {
        if args.is_empty() {
            bail!(
                "Refusing to remove without criteria: supply at least one of \
                category, amount, year or month"
            );
        }
        let category = args
            .category
            .as_deref()
            .map(Category::require)
            .transpose()?
            .map(|c| c.to_string());
        // Removal is destructive, so unlike filtering, a month name that
        // cannot be parsed aborts the operation instead of matching nothing.
        let month = args
            .month
            .as_deref()
            .map(|name| {
                name.trim().parse::<Month>().map_err(|_| {
                    anyhow!("Unrecognized month '{name}': use the month name, e.g. 'january'")
                })
            })
            .transpose()?;
        Ok(Self {
            category,
            amount: args.amount,
            year: args.year,
            month,
        })
    }

    /// True when the record matches every supplied criterion.
    fn matches(&self, e: &Expense) -> bool {
        if let Some(category) = &self.category {
            if e.category != *category {
                return false;
            }
        }
        if let Some(amount) = self.amount {
            // Exact value equality, not a range. Decimal equality ignores
            // scale, so 45.5 matches a stored 45.50.
            if e.amount != amount {
                return false;
            }
        }
        if let Some(year) = self.year {
            if e.date.year() != year {
                return false;
            }
        }
        if let Some(month) = self.month {
            if e.date.month() != month.number_from_month() {
                return false;
            }
        }
        true
    }
}

/// Removes every expense matching all supplied criteria.
///
/// When no record matches, the store is left untouched — the backing file is
/// not rewritten.
///
/// # Errors
///
/// - Returns an error when no criterion is supplied at all.
/// - Returns an error for a category outside the recognized set, or a month
///   name that cannot be parsed.
pub async fn remove_expense(config: Config, args: RemoveExpenseArgs) -> Result<Out<usize>> {
    let criteria = Criteria::parse(&args)?;

    let store = config.store();
    let mut book = store.load().await?;
    let before = book.len();
    book.retain(|e| !criteria.matches(e));
    let removed = before - book.len();

    if removed == 0 {
        return Ok(Out::new_message("No matching expenses found."));
    }

    store.save(&book).await?;
    let message = format!("Removed {removed} expense(s). {} remaining", book.len());
    Ok(Out::new(message, removed))
}
