//! Grid data model plus the text log reader and writer.

/// [`Grid`](model::Grid) and [`GridSequence`](model::GridSequence).
pub mod model;
/// Marker-delimited log parsing.
pub mod parse;
/// Log output in the simulator layout.
pub mod write;
