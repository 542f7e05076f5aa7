//! Error types for the `revnroll-proximity` crate.

/// Errors returned by [`ProximityEventFilter`](crate::ProximityEventFilter).
///
/// Malformed candidate records never produce an error; they are dropped
/// from the result instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProximityError {
    /// The query itself cannot be evaluated (bad center or radius).
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}
