//! Project settings loaded from `kconfgen.toml`.
//!
//! Every key is optional. A flag given on the command line always wins over
//! the settings file, which in turn wins over the built-in defaults.
//!
//! ```toml
//! [cmake]
//! config = ".config app.config"
//! output = "build/config.cmake"
//!
//! [catalog]
//! src = "src"
//! output = "build/cache/Kconfig"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{KconfError, Result};
use crate::verbose::vprintln;

/// Settings file looked up in the working directory when `--settings` is absent.
pub const DEFAULT_SETTINGS_FILE: &str = "kconfgen.toml";

/// Top-level `kconfgen.toml`.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub cmake: InputOutput,
    pub header: HeaderSettings,
    pub params: InputOutput,
    pub catalog: CatalogSettings,
}

/// `[cmake]` and `[params]` sections.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct InputOutput {
    /// Whitespace-separated input candidates.
    pub config: Option<String>,
    pub output: Option<PathBuf>,
}

/// `[header]` section.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderSettings {
    pub config: Option<String>,
    pub output: Option<PathBuf>,
    pub template: Option<PathBuf>,
}

/// `[catalog]` section.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogSettings {
    pub board: Option<PathBuf>,
    pub src: Option<PathBuf>,
    pub app: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl Settings {
    /// Load settings.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_SETTINGS_FILE`]
    /// is used if present and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit.unwrap_or(Path::new(DEFAULT_SETTINGS_FILE));
        match fs::read_to_string(path) {
            Ok(text) => {
                vprintln!("  settings: {}", path.display());
                Self::parse(path, &text)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound && explicit.is_none() => {
                Ok(Self::default())
            }
            Err(e) => Err(KconfError::io("read settings", path, e)),
        }
    }

    /// Parse settings text; `path` is only used for error reporting.
    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|source| KconfError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }
}
