use std::path::{Path, PathBuf};

use crate::{
    encode::{
        gif::{GifSink, GifSinkOpts},
        sink::{FrameSink, SinkConfig},
    },
    foundation::{
        core::Fps,
        error::{GridGifError, GridGifResult},
    },
    grid::{
        model::GridSequence,
        parse::{MarkerSet, parse_path},
    },
    render::{
        palette::Palette,
        raster::{FrameRGBA, frame_dimensions, render_grid},
    },
};

/// Extension given to converted files.
pub const OUTPUT_EXTENSION: &str = "gif";

/// Rendering and timing options for one animation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeOpts {
    /// Cell value to color mapping.
    pub palette: Palette,
    /// Playback rate.
    pub fps: Fps,
    /// Loop the animation forever.
    pub loop_forever: bool,
    /// Pixels per cell side.
    pub cell_size: u32,
}

impl Default for EncodeOpts {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            fps: Fps::default(),
            loop_forever: true,
            cell_size: 10,
        }
    }
}

/// What an encode produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeStats {
    /// Frames pushed to the sink.
    pub frames: usize,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

/// Check that every grid can be rendered and that all share one shape.
///
/// Runs before any sink is opened, so a bad palette never produces output.
pub fn validate_sequence(seq: &GridSequence, opts: &EncodeOpts) -> GridGifResult<(u32, u32)> {
    let Some(first) = seq.grids().first() else {
        return Err(GridGifError::EmptyInput);
    };
    let shape = first.shape();

    for (i, grid) in seq.iter().enumerate() {
        if grid.shape() != shape {
            return Err(GridGifError::validation(format!(
                "dimension mismatch: grid {i} is {}x{}, grid 0 is {}x{}",
                grid.rows(),
                grid.cols(),
                shape.0,
                shape.1
            )));
        }
        opts.palette.check_grid(i, grid)?;
    }

    frame_dimensions(first, opts.cell_size)
}

/// Render every grid to a frame, in order.
pub fn render_frames(seq: &GridSequence, opts: &EncodeOpts) -> GridGifResult<Vec<FrameRGBA>> {
    validate_sequence(seq, opts)?;
    seq.iter()
        .enumerate()
        .map(|(i, g)| render_grid(g, i, &opts.palette, opts.cell_size))
        .collect()
}

/// Validate, then stream one rendered frame per grid into `sink`.
pub fn encode_sequence(
    seq: &GridSequence,
    opts: &EncodeOpts,
    sink: &mut dyn FrameSink,
) -> GridGifResult<EncodeStats> {
    opts.fps.validate()?;
    let (width, height) = validate_sequence(seq, opts)?;

    sink.begin(SinkConfig {
        width,
        height,
        fps: opts.fps,
        loop_forever: opts.loop_forever,
        frame_count: seq.len(),
    })?;
    for (i, grid) in seq.iter().enumerate() {
        let frame = render_grid(grid, i, &opts.palette, opts.cell_size)?;
        sink.push_frame(i, &frame)?;
    }
    sink.end()?;

    Ok(EncodeStats {
        frames: seq.len(),
        width,
        height,
    })
}

/// Encode `seq` into a GIF at `out_path`.
pub fn encode_to_gif(
    seq: &GridSequence,
    opts: &EncodeOpts,
    out_path: impl Into<PathBuf>,
) -> GridGifResult<EncodeStats> {
    let mut sink = GifSink::new(GifSinkOpts::new(out_path));
    encode_sequence(seq, opts, &mut sink)
}

/// Output path for `input`: its final extension replaced by `.gif`, placed in `out_dir`
/// when given, otherwise next to the input.
pub fn output_path_for(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let renamed = input.with_extension(OUTPUT_EXTENSION);
    match (out_dir, renamed.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => renamed,
    }
}

/// Result of converting one log file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Source log.
    pub input: PathBuf,
    /// Written GIF.
    pub output: PathBuf,
    /// Frame statistics.
    pub stats: EncodeStats,
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    matches!((a.canonicalize(), b.canonicalize()), (Ok(a), Ok(b)) if a == b)
}

/// Parse `input` and write its animation to `output`.
///
/// Refuses to run when `output` is the input file itself.
#[tracing::instrument(skip_all, fields(input = %input.display()))]
pub fn convert_file(
    input: &Path,
    output: &Path,
    markers: &MarkerSet,
    opts: &EncodeOpts,
) -> GridGifResult<ConvertSummary> {
    if is_same_file(input, output) {
        return Err(GridGifError::validation(format!(
            "output '{}' would overwrite its own input",
            output.display()
        )));
    }
    let seq = parse_path(input, markers)?;
    tracing::debug!(grids = seq.len(), "parsed grid sequence");

    let stats = encode_to_gif(&seq, opts, output)?;
    tracing::info!(
        output = %output.display(),
        frames = stats.frames,
        width = stats.width,
        height = stats.height,
        "saved animation"
    );

    Ok(ConvertSummary {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        stats,
    })
}
