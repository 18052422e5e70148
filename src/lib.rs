//! gridgif turns simulation iteration logs into looping animated GIFs.
//!
//! The input is a line-oriented text log: marker lines such as `Iteration 3` or
//! `Grid state after step 3:` separate blocks of space-separated integer rows, one block per
//! simulation step. Each block becomes one frame.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: text → [`GridSequence`] (single forward pass, see [`GridReader`])
//! 2. **Render**: [`Grid`] + [`Palette`] → [`FrameRGBA`] (nearest-neighbor cell upscaling)
//! 3. **Encode**: frames → [`FrameSink`] ([`GifSink`] for files, [`InMemorySink`] for tests)
//!
//! [`run_batch`] drives the pipeline over every file named in a [`ConvertConfig`], keeping
//! going past per-file failures.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod batch;
mod config;
/// Encoding sinks.
pub mod encode;
mod foundation;
/// Grid model and log parsing.
pub mod grid;
mod pipeline;
/// Palette mapping and rasterization.
pub mod render;

pub use crate::batch::{BatchReport, FileOutcome, run_batch};
pub use crate::config::ConvertConfig;
pub use crate::encode::gif::{GifSink, GifSinkOpts, ensure_parent_dir};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::foundation::core::{Fps, Rgb8};
pub use crate::foundation::error::{GridGifError, GridGifResult};
pub use crate::grid::model::{Grid, GridSequence};
pub use crate::grid::parse::{
    GridReader, ITERATION_MARKER, MarkerSet, STEP_MARKER, parse_path, parse_reader, parse_str,
};
pub use crate::grid::write::{to_log_string, write_log_file, write_sequence};
pub use crate::pipeline::{
    ConvertSummary, EncodeOpts, EncodeStats, OUTPUT_EXTENSION, convert_file, encode_sequence,
    encode_to_gif, output_path_for, render_frames, validate_sequence,
};
pub use crate::render::palette::{Palette, parse_color};
pub use crate::render::raster::{FrameRGBA, frame_dimensions, render_grid};
