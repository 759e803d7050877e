//! Postcraft Mask - soft-edge brush masks
//!
//! Rasterizes an avatar's erase-stroke history into an alpha matte,
//! exports it as a PNG mask image and keeps per-overlay caches.

pub mod cache;
pub mod error;
pub mod raster;

pub use cache::{MaskCache, MaskStore};
pub use error::MaskError;
pub use raster::AlphaMask;
