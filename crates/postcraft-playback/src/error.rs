//! Media control errors.
//!
//! None of these reach the user: the coordinator logs them and carries on.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("playback rejected: {0}")]
    PlayRejected(String),
    #[error("media not ready: {0}")]
    NotReady(String),
    #[error("frame sampling failed: {0}")]
    Sampling(String),
}
