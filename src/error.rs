//! Error types for the TOC reconstruction library.
//!
//! Almost everything in this crate degrades gracefully: malformed links are
//! skipped, unresolved keys lower the coverage metric, and failed lookups or
//! extractions return `None`. The enum below covers the few remaining hard
//! failures.

/// Result type alias for TOC library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during TOC reconstruction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No TOC entries survived normalization, so no coverage ratio can be
    /// computed and no tree can be built.
    #[error("No table-of-contents entries found in document")]
    NoTocEntries,

    /// Cache blob could not be serialized or deserialized
    #[error("Cache serialization error: {0}")]
    Cache(#[from] serde_json::Error),
}
