//! Product catalog and recent-project history access.
//!
//! The history file (`recentProjects.xml` in the newest versioned preference
//! folder) is owned by the external IDE process: this crate reads it for
//! listings and mutates it only for gated removals.

mod catalog;
mod error;
mod paths;
mod project;
mod source;
mod store;

pub use catalog::{Catalog, Product, DEFAULT_PREFERENCES_PATH};
pub use error::{HistoryError, Result};
pub use paths::expand_user;
pub use project::{abbreviate, ProjectRecord, BREAK_CHARACTERS};
pub use source::{
    read_recent_projects, recent_projects, recent_projects_file, USER_HOME_PLACEHOLDER,
};
pub use store::remove_entry;
