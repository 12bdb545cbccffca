//! The add_expense command handler.

use crate::args::AddExpenseArgs;
use crate::commands::Out;
use crate::model::{Category, Expense};
use crate::{Config, Result};
use anyhow::bail;

/// Records a new expense.
///
/// The amount must be greater than zero. The category is lowercased before
/// storage and is not required to be a member of the recognized set: an
/// unrecognized category still produces a record, and the confirmation
/// message carries a note naming the valid set.
///
/// # Returns
///
/// On success, returns an `Out` containing:
/// - A confirmation stating the amount, description, category and the new
///   total record count.
/// - The created record.
///
/// # Errors
///
/// - Returns an error when the amount is zero or negative. Nothing is
///   written in that case.
pub async fn add_expense(config: Config, args: AddExpenseArgs) -> Result<Out<Expense>> {
    if !args.amount.is_positive() {
        bail!(
            "Invalid amount {}: the amount must be greater than zero",
            args.amount
        );
    }

    let expense = Expense::new(&args.category, args.amount, &args.description);

    let store = config.store();
    let mut book = store.load().await?;
    book.push(expense.clone());
    store.save(&book).await?;

    let mut message = format!(
        "Added expense: {} for '{}' in category '{}'. Total expenses: {}",
        expense.amount,
        expense.description,
        expense.category,
        book.len()
    );
    if !expense.has_known_category() {
        message.push_str(&format!(
            "\nNote: '{}' is not a recognized category. Valid categories are: {}",
            expense.category,
            Category::valid_list()
        ));
    }

    Ok(Out::new(message, expense))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;
    use crate::test::TestEnv;
    use std::str::FromStr;

    fn args(category: &str, amount: &str, description: &str) -> AddExpenseArgs {
        AddExpenseArgs {
            category: category.to_string(),
            amount: Amount::from_str(amount).unwrap(),
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_expense_confirms_and_persists() {
        let env = TestEnv::new().await;

        let out = add_expense(env.config(), args("food", "45.50", "groceries"))
            .await
            .unwrap();

        let message = out.message();
        assert!(message.contains("$45.50"));
        assert!(message.contains("groceries"));
        assert!(message.contains("'food'"));
        assert!(message.contains("Total expenses: 1"));
        assert!(!message.contains("not a recognized category"));

        let book = env.config().store().load().await.unwrap();
        assert_eq!(book.len(), 1);
        assert_eq!(book.expenses()[0].category, "food");
    }

    #[tokio::test]
    async fn test_add_expense_lowercases_the_category() {
        let env = TestEnv::new().await;

        let out = add_expense(env.config(), args("FOOD", "10", ""))
            .await
            .unwrap();
        assert_eq!(out.structure().unwrap().category, "food");
    }

    #[tokio::test]
    async fn test_add_expense_rejects_non_positive_amounts() {
        let env = TestEnv::new().await;

        let err = add_expense(env.config(), args("FOOD", "-5", "bad"))
            .await
            .unwrap_err()
            .to_string();
        assert!(err.contains("greater than zero"));

        let err = add_expense(env.config(), args("food", "0", "also bad"))
            .await
            .unwrap_err()
            .to_string();
        assert!(err.contains("greater than zero"));

        // Nothing was written.
        let book = env.config().store().load().await.unwrap();
        assert!(book.is_empty());
    }

    #[tokio::test]
    async fn test_add_expense_unknown_category_is_advisory() {
        let env = TestEnv::new().await;

        let out = add_expense(env.config(), args("Crypto", "99.99", "coins"))
            .await
            .unwrap();

        let message = out.message();
        assert!(message.contains("Added expense"));
        assert!(message.contains("'crypto' is not a recognized category"));
        assert!(message.contains("food, transport"));

        // The record was still created.
        let book = env.config().store().load().await.unwrap();
        assert_eq!(book.len(), 1);
    }

    #[tokio::test]
    async fn test_identical_adds_produce_distinct_records() {
        let env = TestEnv::new().await;

        let first = add_expense(env.config(), args("food", "45.50", "groceries"))
            .await
            .unwrap();
        let second = add_expense(env.config(), args("food", "45.50", "groceries"))
            .await
            .unwrap();

        let a = first.structure().unwrap();
        let b = second.structure().unwrap();
        assert_ne!(a.id, b.id);

        let book = env.config().store().load().await.unwrap();
        assert_eq!(book.len(), 2);
    }

    #[tokio::test]
    async fn test_add_expense_rounds_to_two_decimals() {
        let env = TestEnv::new().await;

        let out = add_expense(env.config(), args("food", "9.999", ""))
            .await
            .unwrap();
        assert_eq!(
            out.structure().unwrap().amount,
            Amount::from_str("10.00").unwrap()
        );
    }
}
