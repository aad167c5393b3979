//! Core domain logic for mdnov projects.
//! This crate is the single source of truth for the novel model, the
//! mdnov text format, and the word-count ledger.

pub mod json;
pub mod logging;
pub mod mdnov;
pub mod meta;
pub mod model;
pub mod project;
pub mod reconcile;
pub mod wc;

pub use logging::{default_log_level, init_logging, logging_status};
pub use mdnov::{read_mdnov_file, write_mdnov_file, FormatError, MdnovError};
pub use model::id::{Category, ElementId};
pub use model::novel::Novel;
pub use project::ProjectFile;
pub use reconcile::reconcile_references;
pub use wc::{WcLog, WordCount};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
