//! Mask errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MaskError {
    #[error("dimension mismatch: mask is {expected:?}, content is {got:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        got: (u32, u32),
    },
    #[error("failed to encode mask: {0}")]
    Encode(#[from] image::ImageError),
}
