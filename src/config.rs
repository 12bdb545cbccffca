//! Configuration file handling.
//!
//! The configuration file is stored at `$EXPENSES_HOME/config.json` and the
//! expense records live in a JSON file under `$EXPENSES_HOME/data/`. The
//! `Config` object resolves those paths and owns the [`Store`].

use crate::store::Store;
use crate::{utils, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "expenses";
const CONFIG_VERSION: u8 = 1;
const DATA_DIR: &str = "data";
const CONFIG_JSON: &str = "config.json";
const EXPENSES_JSON: &str = "expenses.json";

/// The `Config` object represents the configuration of the app. You
/// instantiate it by providing the path to `$EXPENSES_HOME` and from there it
/// loads `$EXPENSES_HOME/config.json`. It provides the paths to everything
/// that lives inside the expenses home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    store: Store,
}

impl Config {
    /// Creates the home directory, its `data` subdirectory, and an initial
    /// `config.json` with default settings.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of the data directory,
    ///   e.g. `$HOME/expenses`.
    ///
    /// # Errors
    /// - Returns an error if any file operation fails.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative).await?;
        let root = utils::canonicalize(&maybe_relative).await?;
        utils::make_dir(root.join(DATA_DIR)).await?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile::default();
        config_file.save(&config_path).await?;

        Ok(Self::assemble(root, config_path, config_file))
    }

    /// Loads the configuration from the home directory.
    ///
    /// A missing directory or config file is treated as a first run and
    /// yields the defaults rather than an error; the store creates the data
    /// directory on demand the first time it saves. A config file that is
    /// present but unparseable is an error.
    pub async fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = home.into();
        let root = if maybe_relative.is_dir() {
            utils::canonicalize(&maybe_relative).await?
        } else {
            maybe_relative
        };

        let config_path = root.join(CONFIG_JSON);
        let config_file = if config_path.is_file() {
            ConfigFile::load(&config_path).await?
        } else {
            ConfigFile::default()
        };

        Ok(Self::assemble(root, config_path, config_file))
    }

    fn assemble(root: PathBuf, config_path: PathBuf, config_file: ConfigFile) -> Self {
        let store = Store::new(root.join(DATA_DIR).join(&config_file.data_file));
        Self {
            root,
            config_path,
            config_file,
            store,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
}

/// The serialized representation of `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    app_name: String,
    config_version: u8,
    /// Name of the JSON file under `data/` that holds the expense records.
    data_file: String,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            data_file: EXPENSES_JSON.to_string(),
        }
    }
}

impl ConfigFile {
    async fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        utils::write(path, json).await
    }

    async fn load(path: &Path) -> Result<Self> {
        utils::deserialize(path).await
    }
}
