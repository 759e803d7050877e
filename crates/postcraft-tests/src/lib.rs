//! Integration test crate for Postcraft.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on every postcraft crate to verify they work together.

#[cfg(test)]
mod document;

#[cfg(test)]
mod editing;

#[cfg(test)]
mod masks;

#[cfg(test)]
mod playback;
