//! Filter subsystem errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("unknown filter preset: {0}")]
    UnknownPreset(String),
}
