//! Chapter markup to reader-facing plain text.

pub mod entities;
mod normalize;

pub use normalize::normalize;
