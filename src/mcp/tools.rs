//! MCP tool definitions for the expense operations.

use crate::args::{AddExpenseArgs, FilterExpensesArgs, RemoveExpenseArgs};
use crate::commands;
use crate::mcp::mcp_utils::tool_result;
use crate::mcp::ExpenseServer;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use rmcp::{tool, tool_router};
use tracing::info;

#[tool_router(vis = "pub(super)")]
impl ExpenseServer {
    #[tool]
    /// Initialize the expenses MCP service for this session and return usage instructions. You
    /// **MUST** call this **ONCE** before using other tools so that you have the full usage
    /// instructions. You **MAY** call it more than once if you have forgotten the usage
    /// instructions.
    async fn initialize_service(&self) -> Result<CallToolResult, McpError> {
        let mut initialized = self.initialized.lock().await;
        *initialized = true;
        Ok(CallToolResult::success(vec![rmcp::model::Content::text(
            include_str!("docs/INSTRUCTIONS.md"),
        )]))
    }

    /// Record a new expense.
    ///
    /// The record is stamped with the current date and time and persisted
    /// immediately.
    ///
    /// # Parameters
    ///
    /// - `category`: Case-insensitive, e.g. "food". A category outside the
    ///   recognized set is still accepted; the confirmation then carries a
    ///   note naming the valid categories.
    /// - `amount`: Must be greater than zero. A string like "45.50" or a
    ///   plain number; a `$` sign and commas are tolerated.
    /// - `description`: What the money was spent on. May be omitted.
    ///
    /// # Returns
    ///
    /// A confirmation naming the amount, description, category and the new
    /// total record count, plus the created record as JSON.
    ///
    /// # Example
    ///
    /// ```json
    /// {
    ///   "category": "food",
    ///   "amount": "45.50",
    ///   "description": "groceries"
    /// }
    /// ```
    #[tool]
    async fn add_expense(
        &self,
        Parameters(args): Parameters<AddExpenseArgs>,
    ) -> Result<CallToolResult, McpError> {
        require_init!(self);

        info!("MCP: add_expense called");
        let config = (*self.config).clone();
        let out = commands::add_expense(config, args).await;
        tool_result(out)
    }

    /// Get the total number of recorded expenses.
    #[tool]
    async fn get_expenses_count(&self) -> Result<CallToolResult, McpError> {
        require_init!(self);

        info!("MCP: get_expenses_count called");
        let config = (*self.config).clone();
        let out = commands::expenses_count(config).await;
        tool_result(out)
    }

    /// List every recorded expense, most recent first.
    ///
    /// Returns a numbered report showing date, category, amount and
    /// description for each record, followed by the record count and the sum
    /// of all amounts. Read-only.
    #[tool]
    async fn get_all_expenses(&self) -> Result<CallToolResult, McpError> {
        require_init!(self);

        info!("MCP: get_all_expenses called");
        let config = (*self.config).clone();
        let out = commands::all_expenses(config).await;
        tool_result(out)
    }

    /// List the expenses matching the given filters.
    ///
    /// All parameters are optional; a record must satisfy every supplied
    /// filter to be included (they are AND-ed). Matches are reported in the
    /// order they are stored, with the sum of the matched amounts.
    ///
    /// # Parameters
    ///
    /// - `category`: Must be one of the recognized categories; an
    ///   unrecognized one is an error.
    /// - `month`: By name, e.g. "january". Case-insensitive. An
    ///   unrecognized name matches nothing.
    /// - `year`: A calendar year, e.g. 2026.
    /// - `start_date` / `end_date`: Inclusive bounds, YYYY-MM-DD.
    /// - `min_amount` / `max_amount`: Inclusive bounds.
    ///
    /// # Example
    ///
    /// Food expenses of at least $20 from January 2026:
    ///
    /// ```json
    /// {
    ///   "category": "food",
    ///   "month": "january",
    ///   "year": 2026,
    ///   "min_amount": 20
    /// }
    /// ```
    #[tool]
    async fn filter_expenses(
        &self,
        Parameters(args): Parameters<FilterExpensesArgs>,
    ) -> Result<CallToolResult, McpError> {
        require_init!(self);

        info!("MCP: filter_expenses called");
        let config = (*self.config).clone();
        let out = commands::filter_expenses(config, args).await;
        tool_result(out)
    }

    /// Remove the expenses matching the given criteria.
    ///
    /// At least one criterion is required, and a record is removed only when
    /// it matches every supplied criterion (they are AND-ed). This operation
    /// cannot be undone.
    ///
    /// # Parameters
    ///
    /// - `category`: Must be one of the recognized categories.
    /// - `amount`: Exact amount to match, not a range.
    /// - `year`: A calendar year, e.g. 2026.
    /// - `month`: By name, e.g. "january". An unrecognized name is an
    ///   error — removal never guesses.
    ///
    /// # Returns
    ///
    /// The number of records removed, or a message saying nothing matched
    /// (in which case the store is left untouched).
    ///
    /// # Example
    ///
    /// Remove the $45.50 food expense:
    ///
    /// ```json
    /// {
    ///   "category": "food",
    ///   "amount": "45.50"
    /// }
    /// ```
    #[tool]
    async fn remove_expense(
        &self,
        Parameters(args): Parameters<RemoveExpenseArgs>,
    ) -> Result<CallToolResult, McpError> {
        require_init!(self);

        info!("MCP: remove_expense called");
        let config = (*self.config).clone();
        let out = commands::remove_expense(config, args).await;
        tool_result(out)
    }
}
