//! Error types for the editing core.
//!
//! Nothing in this crate is fatal: malformed input degrades to a safe
//! default shape, invalid gesture targets are dropped silently, and
//! persistence failures keep the optimistic local state. The only error
//! surfaced to callers is the persistence notification below.

use thiserror::Error;

/// Non-fatal errors reported to the embedding application.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Saving cabinet geometry to the persistence collaborator failed.
    /// Local state keeps the optimistic value; no retry is attempted.
    #[error("failed to persist cabinet geometry")]
    Persistence {
        #[source]
        source: anyhow::Error,
    },
}
