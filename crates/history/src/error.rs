use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HistoryError>;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("can't open products file {}: {reason}", path.display())]
    CatalogUnreadable { path: PathBuf, reason: String },

    #[error("app '{keyword}' is not found in {}", path.display())]
    UnknownProduct { keyword: String, path: PathBuf },

    #[error("no preference folder matching '{token}' under {}", root.display())]
    NoPreferencesFolder { token: String, root: PathBuf },

    #[error("recent projects file not found: {}", path.display())]
    HistoryFileMissing { path: PathBuf },

    #[error("malformed recent projects XML: {0}")]
    Parse(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HistoryError {
    /// Listing failures that degrade to a placeholder item instead of
    /// aborting the invocation. Parse errors are deliberately excluded:
    /// they indicate corrupted external state.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            HistoryError::NoPreferencesFolder { .. } | HistoryError::HistoryFileMissing { .. }
        )
    }
}
