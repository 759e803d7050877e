//! Postcraft Color: filter presets and manual color adjustments.
//!
//! Every preset is a fixed chain of CSS-equivalent filter functions, so the
//! same look can be rendered on the CPU or handed to a browser as a
//! `filter:` string.

pub mod error;
pub mod ops;
pub mod pipeline;
pub mod presets;

pub use error::FilterError;
pub use ops::FilterOp;
pub use pipeline::FilterPipeline;
pub use presets::FilterPreset;
