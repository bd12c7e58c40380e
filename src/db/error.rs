use thiserror::Error;

/// Errors the persistence layer distinguishes beyond plain engine failures.
/// Surfaced through `anyhow::Result` and downcastable at the boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Stored text failed to decode back into its domain shape. Never
    /// silently defaulted: an empty value and an undecodable value are
    /// different things, and defaulting would mask loss of history.
    #[error("corrupted {column} data in {table}: {detail}")]
    Corrupted {
        table: &'static str,
        column: &'static str,
        detail: String,
    },

    /// Partial update addressed to a profile id that does not exist.
    #[error("profile not found: {0}")]
    ProfileNotFound(String),

    /// A partial-update struct with no fields set is a caller bug.
    #[error("update contains no fields to patch")]
    EmptyUpdate,
}
