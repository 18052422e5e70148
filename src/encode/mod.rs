//! Encoding sinks.
//!
//! Sinks consume rendered frames in animation order and are driven by
//! [`encode_sequence`](crate::encode_sequence).

/// Animated GIF output through the `gif` crate.
pub mod gif;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
