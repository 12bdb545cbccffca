//! These structs provide the CLI interface for the expenses tool, along with
//! the operation-argument structs that are shared between the CLI and the
//! MCP tools.

use crate::model::Amount;
use clap::{Parser, Subcommand};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// expenses: a personal expense tracker for the command line and for AI agents.
///
/// Records live in a single JSON file under the expenses home directory.
/// Every subcommand is also exposed as an MCP tool through the mcp
/// subcommand, so that an agent like Claude can record and query your
/// spending on your behalf.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the expenses home directory and initialize the configuration
    /// file.
    ///
    /// Running this first is optional: every other subcommand falls back to
    /// default settings and the data directory is created the first time a
    /// record is saved. Use init when you want the directory and config.json
    /// materialized explicitly.
    Init,
    /// Record a new expense.
    Add(AddExpenseArgs),
    /// Print the number of recorded expenses.
    Count,
    /// Print every recorded expense, most recent first, with the total.
    List,
    /// Print the expenses matching the given filters, with their total.
    Filter(FilterExpensesArgs),
    /// Remove the expenses matching the given criteria.
    Remove(RemoveExpenseArgs),
    /// Run the MCP server on stdio so an AI agent can call the expense tools.
    Mcp,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate
    /// for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where expense data and configuration are held.
    /// Defaults to ~/expenses
    #[arg(long, env = "EXPENSES_HOME", default_value_t = default_expenses_home())]
    expenses_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, expenses_home: PathBuf) -> Self {
        Self {
            log_level,
            expenses_home: expenses_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn expenses_home(&self) -> &DisplayPath {
        &self.expenses_home
    }
}

/// Arguments for recording a single expense.
#[derive(Debug, Clone, clap::Args, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "AddExpenseParams")]
pub struct AddExpenseArgs {
    /// The expense category, e.g. "food" or "transport". Case-insensitive.
    /// A category outside the recognized set is accepted, with a note in the
    /// confirmation naming the valid set.
    #[arg(long)]
    pub category: String,

    /// The amount spent. Must be greater than zero, e.g. 45.50 or "$45.50".
    #[arg(long)]
    pub amount: Amount,

    /// What the money was spent on. May be empty.
    #[arg(long, default_value = "")]
    #[serde(default)]
    pub description: String,
}

/// Filters for querying expenses. Omitted fields are not applied; a record
/// must satisfy every supplied filter to be included.
#[derive(Debug, Clone, Default, clap::Args, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "FilterExpensesParams")]
pub struct FilterExpensesArgs {
    /// Only include this category. Must be one of the recognized categories.
    #[arg(long)]
    pub category: Option<String>,

    /// Only include expenses from this month, by name, e.g. "january".
    /// Case-insensitive. An unrecognized name matches nothing.
    #[arg(long)]
    pub month: Option<String>,

    /// Only include expenses from this calendar year, e.g. 2026.
    #[arg(long)]
    pub year: Option<i32>,

    /// Only include expenses dated on or after this date (YYYY-MM-DD).
    #[arg(long)]
    pub start_date: Option<String>,

    /// Only include expenses dated on or before this date (YYYY-MM-DD).
    #[arg(long)]
    pub end_date: Option<String>,

    /// Only include expenses of at least this amount.
    #[arg(long)]
    pub min_amount: Option<Amount>,

    /// Only include expenses of at most this amount.
    #[arg(long)]
    pub max_amount: Option<Amount>,
}

/// Criteria for removing expenses. At least one must be supplied; a record
/// is removed only when it matches every supplied criterion.
#[derive(Debug, Clone, Default, clap::Args, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "RemoveExpenseParams")]
pub struct RemoveExpenseArgs {
    /// Remove only this category. Must be one of the recognized categories.
    #[arg(long)]
    pub category: Option<String>,

    /// Remove only expenses of exactly this amount.
    #[arg(long)]
    pub amount: Option<Amount>,

    /// Remove only expenses from this calendar year, e.g. 2026.
    #[arg(long)]
    pub year: Option<i32>,

    /// Remove only expenses from this month, by name, e.g. "january".
    /// Case-insensitive. An unrecognized name is an error.
    #[arg(long)]
    pub month: Option<String>,
}

impl RemoveExpenseArgs {
    /// True when no criterion was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.amount.is_none()
            && self.year.is_none()
            && self.month.is_none()
    }
}

fn default_expenses_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("expenses"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --expenses-home or EXPENSES_HOME instead of relying on the \
                default expenses home directory. If you continue using the program right now, you \
                may have problems!",
            );
            PathBuf::from("expenses")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
