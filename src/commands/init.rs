//! The init command handler.

use crate::commands::Out;
use crate::{Config, Result};
use std::path::Path;

/// Creates the expenses home directory and writes the initial configuration
/// file. Running it on a directory that already exists is harmless.
pub async fn init(home: &Path) -> Result<Out<String>> {
    let config = Config::create(home).await?;
    let root = config.root().display().to_string();
    let message = format!("Initialized expenses home at {root}");
    Ok(Out::new(message, root))
}
