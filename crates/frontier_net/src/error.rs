//! Replication-layer error types.

/// Errors that can occur while encoding or decoding replication payloads.
///
/// A decode failure is fatal for that single message only: the caller rejects
/// the frame and decides recovery (typically by treating the session as
/// unsynced and requesting a fresh snapshot); it does not tear the session
/// down here.
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    /// Failed to encode a frame to JSON.
    #[error("failed to encode frame: {0}")]
    Encode(#[source] serde_json::Error),

    /// Failed to decode a frame from JSON — missing type tag, unknown tag,
    /// or malformed payload.
    #[error("failed to decode frame: {0}")]
    Decode(#[source] serde_json::Error),
}
