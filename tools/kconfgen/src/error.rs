//! Error types for the generators.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures that abort a generator run.
///
/// Every variant is fatal to the invocation; the surrounding build is
/// expected to re-run the tool after fixing the cause.
#[derive(Debug, Error)]
pub enum KconfError {
    /// None of the candidate input files exist.
    #[error("no input files found (candidates: {candidates:?})")]
    NoInput { candidates: String },

    /// Reading or writing a specific path failed.
    #[error("failed to {action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A `CONFIG_` line without the `=` separator.
    #[error("{}:{line}: malformed declaration `{text}` (expected `CONFIG_<name>=<value>`)", .path.display())]
    MalformedDeclaration {
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        text: String,
    },

    /// The merged parameter set could not be encoded.
    #[error("failed to encode parameters as JSON")]
    Json(#[from] serde_json::Error),

    /// The settings file is not valid TOML or has unknown keys.
    #[error("failed to parse settings file {}", .path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl KconfError {
    pub(crate) fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, KconfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_the_path() {
        let err = KconfError::io(
            "read",
            Path::new("boards/t2/.config"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "failed to read boards/t2/.config");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn malformed_declaration_reports_location() {
        let err = KconfError::MalformedDeclaration {
            path: PathBuf::from("app.config"),
            line: 3,
            text: "CONFIG_BROKEN".into(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("app.config:3:"), "got: {msg}");
        assert!(msg.contains("CONFIG_BROKEN"));
    }
}
