use thiserror::Error;

/// Errors raised while constructing protocol values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// A `Remove` diff whose removed id list disagrees with its count
    #[error("Count {count} != Removed ID list size {removed}")]
    RemoveCountMismatch { count: usize, removed: usize },
}

/// Errors raised while encoding or decoding protocol messages
#[derive(Debug, Error)]
pub enum CodecError {
    /// The payload was not valid JSON for the expected message shape
    #[error("Malformed protocol message: {0}")]
    Json(#[from] serde_json::Error),
}
