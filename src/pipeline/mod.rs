//! Vector post-processing pipeline
//!
//! The deterministic transformation between a raw provider vector and the
//! vector handed back to the caller: prefix truncation or zero-padding to
//! the configured dimension followed by L2 normalization, plus the
//! all-or-nothing batch policy layered on top.

pub mod batch;
pub mod normalize;
pub mod validate;

pub use batch::BatchEncoder;
pub use normalize::normalize;
