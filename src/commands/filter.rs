//! The filter_expenses command handler.

use crate::args::FilterExpensesArgs;
use crate::commands::{ExpenseReport, Out};
use crate::model::{Amount, Category, Expense};
use crate::{Config, Result};
use anyhow::Context;
use chrono::{Datelike, Month, NaiveDate};

/// The parsed, validated form of the optional filter arguments.
///
/// Validation happens here, at the boundary, before any records are read:
/// an unrecognized category or a malformed date bound aborts the operation
/// up front. The month filter is deliberately lenient instead; see
/// [`Filters::matches`].
struct Filters {
    category: Option<String>,
    month: Option<String>,
    year: Option<i32>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    min_amount: Option<Amount>,
    max_amount: Option<Amount>,
}

impl Filters {
    fn parse(args: &FilterExpensesArgs) -> Result<Self> {
        let category = args
            .category
            .as_deref()
            .map(Category::require)
            .transpose()?
            .map(|c| c.to_string());
        let start_date = args.start_date.as_deref().map(parse_date).transpose()?;
        let end_date = args.end_date.as_deref().map(parse_date).transpose()?;
        Ok(Self {
            category,
            month: args.month.clone(),
            year: args.year,
            start_date,
            end_date,
            min_amount: args.min_amount,
            max_amount: args.max_amount,
        })
    }

    /// True when the record satisfies every supplied filter.
    fn matches(&self, e: &Expense) -> bool {
        if let Some(category) = &self.category {
            if e.category != *category {
                return false;
            }
        }
        if let Some(month) = &self.month {
            // A month name that cannot be parsed matches nothing rather than
            // failing the operation: a bad filter narrows the result to zero.
            match month.trim().parse::<Month>() {
                Ok(m) => {
                    if e.date.month() != m.number_from_month() {
                        return false;
                    }
                }
                Err(_) => return false,
            }
        }
        if let Some(year) = self.year {
            if e.date.year() != year {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            if e.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if e.date > end {
                return false;
            }
        }
        if let Some(min) = self.min_amount {
            if e.amount < min {
                return false;
            }
        }
        if let Some(max) = self.max_amount {
            if e.amount > max {
                return false;
            }
        }
        true
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{s}': expected YYYY-MM-DD"))
}

/// Returns the expenses matching every supplied filter, with the sum of the
/// matched amounts.
///
/// A supplied category must be a member of the recognized set; lookup is
/// strict even though creation is not. Matches are reported in the order
/// they were loaded from disk — unlike `all_expenses`, no re-sort is
/// applied. Date bounds are inclusive, as are the amount bounds.
///
/// # Errors
///
/// - Returns an error for a category outside the recognized set, before any
///   records are scanned.
/// - Returns an error for a start or end date that is not YYYY-MM-DD.
pub async fn filter_expenses(
    config: Config,
    args: FilterExpensesArgs,
) -> Result<Out<ExpenseReport>> {
    let filters = Filters::parse(&args)?;

    let book = config.store().load().await?;
    let matches: Vec<Expense> = book
        .expenses()
        .iter()
        .filter(|e| filters.matches(e))
        .cloned()
        .collect();

    if matches.is_empty() {
        return Ok(Out::new_message("No expenses match the given filters."));
    }

    let report = ExpenseReport::new(matches);
    let message = format!(
        "{}\nTotal: {}",
        report.render().trim_end(),
        report.total
    );
    Ok(Out::new(message, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{expense_on, TestEnv};
    use std::str::FromStr;

    async fn seeded_env() -> TestEnv {
        let env = TestEnv::new().await;
        env.save(vec![
            expense_on("food", "45.50", "groceries", "2026-01-10"),
            expense_on("transport", "2.75", "bus fare", "2026-02-03"),
            expense_on("food", "12.00", "lunch", "2026-01-22"),
            expense_on("health", "80.00", "dentist", "2025-01-15"),
        ])
        .await;
        env
    }

    fn by_description(report: &ExpenseReport) -> Vec<&str> {
        report
            .expenses
            .iter()
            .map(|e| e.description.as_str())
            .collect()
    }

    #[tokio::test]
    async fn test_filter_by_month_matches_across_years() {
        let env = seeded_env().await;

        let args = FilterExpensesArgs {
            month: Some("January".to_string()),
            ..Default::default()
        };
        let out = filter_expenses(env.config(), args).await.unwrap();
        let report = out.structure().unwrap();
        assert_eq!(by_description(report), vec!["groceries", "lunch", "dentist"]);
    }

    #[tokio::test]
    async fn test_filter_by_month_and_year() {
        let env = seeded_env().await;

        let args = FilterExpensesArgs {
            month: Some("january".to_string()),
            year: Some(2026),
            ..Default::default()
        };
        let out = filter_expenses(env.config(), args).await.unwrap();
        let report = out.structure().unwrap();
        assert_eq!(by_description(report), vec!["groceries", "lunch"]);
        assert_eq!(report.total, Amount::from_str("57.50").unwrap());
    }

    #[tokio::test]
    async fn test_filter_unknown_category_fails_before_scanning() {
        let env = TestEnv::new().await;
        // No records at all: the category check must fire regardless.
        let args = FilterExpensesArgs {
            category: Some("bogus".to_string()),
            ..Default::default()
        };
        let err = filter_expenses(env.config(), args)
            .await
            .unwrap_err()
            .to_string();
        assert!(err.contains("'bogus'"));
        assert!(err.contains("doesn't exist"));
    }

    #[tokio::test]
    async fn test_filter_unrecognized_month_matches_nothing() {
        let env = seeded_env().await;

        let args = FilterExpensesArgs {
            month: Some("januberry".to_string()),
            ..Default::default()
        };
        let out = filter_expenses(env.config(), args).await.unwrap();
        assert_eq!(out.message(), "No expenses match the given filters.");
        assert!(out.structure().is_none());
    }

    #[tokio::test]
    async fn test_filter_malformed_date_bound_is_an_error() {
        let env = seeded_env().await;

        let args = FilterExpensesArgs {
            start_date: Some("01/10/2026".to_string()),
            ..Default::default()
        };
        let err = filter_expenses(env.config(), args)
            .await
            .unwrap_err()
            .to_string();
        assert!(err.contains("YYYY-MM-DD"));
    }

    #[tokio::test]
    async fn test_filter_date_bounds_are_inclusive() {
        let env = seeded_env().await;

        let args = FilterExpensesArgs {
            start_date: Some("2026-01-10".to_string()),
            end_date: Some("2026-01-22".to_string()),
            ..Default::default()
        };
        let out = filter_expenses(env.config(), args).await.unwrap();
        assert_eq!(by_description(out.structure().unwrap()), vec!["groceries", "lunch"]);
    }

    #[tokio::test]
    async fn test_filter_amount_bounds_are_inclusive() {
        let env = seeded_env().await;

        let args = FilterExpensesArgs {
            min_amount: Some(Amount::from_str("12.00").unwrap()),
            max_amount: Some(Amount::from_str("45.50").unwrap()),
            ..Default::default()
        };
        let out = filter_expenses(env.config(), args).await.unwrap();
        assert_eq!(by_description(out.structure().unwrap()), vec!["groceries", "lunch"]);
    }

    #[tokio::test]
    async fn test_adding_a_filter_never_grows_the_match_set() {
        let env = seeded_env().await;

        let broad = FilterExpensesArgs {
            category: Some("food".to_string()),
            ..Default::default()
        };
        let narrow = FilterExpensesArgs {
            category: Some("food".to_string()),
            min_amount: Some(Amount::from_str("20").unwrap()),
            ..Default::default()
        };

        let broad_count = filter_expenses(env.config(), broad)
            .await
            .unwrap()
            .structure()
            .unwrap()
            .count;
        let narrow_count = filter_expenses(env.config(), narrow)
            .await
            .unwrap()
            .structure()
            .unwrap()
            .count;
        assert_eq!(broad_count, 2);
        assert_eq!(narrow_count, 1);
    }

    #[tokio::test]
    async fn test_filter_preserves_load_order() {
        let env = seeded_env().await;

        // groceries (Jan 10) was stored before lunch (Jan 22); a date sort
        // would be the same here, so pit load order against amount order.
        let args = FilterExpensesArgs {
            category: Some("food".to_string()),
            ..Default::default()
        };
        let out = filter_expenses(env.config(), args).await.unwrap();
        assert_eq!(by_description(out.structure().unwrap()), vec!["groceries", "lunch"]);
    }

    #[tokio::test]
    async fn test_filter_with_no_filters_matches_everything() {
        let env = seeded_env().await;

        let out = filter_expenses(env.config(), FilterExpensesArgs::default())
            .await
            .unwrap();
        assert_eq!(out.structure().unwrap().count, 4);
    }
}
