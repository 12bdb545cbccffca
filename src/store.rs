//! Durable persistence of the expense collection.
//!
//! The whole collection is the unit of read and write: every operation loads
//! the full file and every mutation rewrites it completely. There is no
//! locking, so concurrent writers sharing one backing file are
//! last-writer-wins.

use crate::model::ExpenseBook;
use crate::{utils, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Owns the backing file that holds the expense collection.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the backing file into memory.
    ///
    /// A missing file is not an error: first use is expected to start from
    /// an empty collection. A file that exists but cannot be parsed is a
    /// hard error, since it means the persistence layer is broken.
    pub async fn load(&self) -> Result<ExpenseBook> {
        if !self.path.is_file() {
            debug!("No expense file at {}, starting empty", self.path.display());
            return Ok(ExpenseBook::default());
        }
        let contents = utils::read(&self.path).await?;
        serde_json::from_str(&contents).with_context(|| {
            format!(
                "The expense file at {} exists but could not be parsed",
                self.path.display()
            )
        })
    }

    /// Serializes the full collection and overwrites the backing file,
    /// creating the containing directory first when it does not exist yet.
    pub async fn save(&self, book: &ExpenseBook) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            utils::make_dir(dir).await?;
        }
        let json = serde_json::to_string_pretty(book)
            .context("Unable to serialize the expense collection")?;
        utils::write(&self.path, json).await?;
        debug!("Saved {} expense(s) to {}", book.len(), self.path.display());
        Ok(())
    }
}
