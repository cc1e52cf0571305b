//! Error types for sealing and opening tokens

use thiserror::Error;

use crate::Epoch;

/// Errors returned by channels and rings
///
/// None of these are retried or logged by the library; the caller decides
/// whether routing failures deserve different treatment from forgeries.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SealError {
    /// Key material does not match the cipher's key length
    #[error("bad key length: expected {expected}, got {actual}")]
    BadKeyLength { expected: usize, actual: usize },

    /// Token too short to hold a frame, or no channel registered for its epoch
    #[error("message authentication failed: malformed token")]
    BadToken,

    /// Token prefix names a different epoch than the decrypting channel
    #[error("unknown authentication epoch: {0}")]
    UnknownEpoch(Epoch),

    /// Tag did not verify under the channel key
    #[error("message authentication failed")]
    AuthenticationFailed,
}

impl SealError {
    /// True when the token was routed to a channel and then rejected by the AEAD
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, SealError::AuthenticationFailed)
    }
}

/// Result type for sealing operations
pub type SealResult<T> = Result<T, SealError>;
