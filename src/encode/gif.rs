use std::path::{Path, PathBuf};

use ::gif::{DisposalMethod, Encoder, EncodingError, Repeat};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::Fps;
use crate::foundation::error::{GridGifError, GridGifResult};
use crate::render::raster::FrameRGBA;

/// NeuQuant speed used when a frame has more than 256 colors.
const QUANTIZE_SPEED: i32 = 10;

/// Options for [`GifSink`] output.
#[derive(Clone, Debug)]
pub struct GifSinkOpts {
    /// Output GIF file path.
    pub out_path: PathBuf,
    /// Overwrite the output file if it already exists.
    pub overwrite: bool,
}

impl GifSinkOpts {
    /// Create options for writing a GIF to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
        }
    }
}

/// GIF frame delay for `fps`, in centiseconds rounded to nearest.
///
/// Never zero, since many viewers replace a zero delay with their own default.
pub fn delay_centis(fps: Fps) -> u16 {
    let num = u64::from(fps.num.max(1));
    let cs = (u64::from(fps.den) * 100 + num / 2) / num;
    u16::try_from(cs.max(1)).unwrap_or(u16::MAX)
}

/// Sink that assembles frames into an animated GIF.
///
/// Each frame is LZW-encoded into an in-memory buffer as it arrives. The file is written in
/// one go from `end`, so a failed render never leaves a truncated GIF on disk.
pub struct GifSink {
    opts: GifSinkOpts,
    cfg: Option<SinkConfig>,
    encoder: Option<Encoder<Vec<u8>>>,
    delay: u16,
    pushed: usize,
    bytes_written: usize,
}

impl GifSink {
    /// Create a sink writing to `opts.out_path`.
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            cfg: None,
            encoder: None,
            delay: 10,
            pushed: 0,
            bytes_written: 0,
        }
    }

    /// Output path.
    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }

    /// Size of the written file; zero until `end` succeeds.
    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }
}

fn gif_err(what: &str, e: EncodingError) -> GridGifError {
    GridGifError::encode(format!("{what}: {e}"))
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> GridGifResult<()> {
        cfg.fps.validate()?;
        if cfg.width == 0 || cfg.height == 0 {
            return Err(GridGifError::validation(
                "gif sink width/height must be non-zero",
            ));
        }
        let (Ok(width), Ok(height)) = (u16::try_from(cfg.width), u16::try_from(cfg.height)) else {
            return Err(GridGifError::validation(format!(
                "gif frames are limited to {}x{} pixels, got {}x{}",
                u16::MAX,
                u16::MAX,
                cfg.width,
                cfg.height
            )));
        };
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(GridGifError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        let mut encoder = Encoder::new(Vec::new(), width, height, &[])
            .map_err(|e| gif_err("start gif stream", e))?;
        // Without a NETSCAPE loop extension viewers play the animation once.
        if cfg.loop_forever {
            encoder
                .set_repeat(Repeat::Infinite)
                .map_err(|e| gif_err("set gif repeat", e))?;
        }

        self.delay = delay_centis(cfg.fps);
        self.encoder = Some(encoder);
        self.pushed = 0;
        self.bytes_written = 0;
        self.cfg = Some(cfg);
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &FrameRGBA) -> GridGifResult<()> {
        let (Some(cfg), Some(encoder)) = (self.cfg.as_ref(), self.encoder.as_mut()) else {
            return Err(GridGifError::validation("gif sink used before begin"));
        };
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(GridGifError::validation(format!(
                "frame {idx} size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        if idx != self.pushed {
            return Err(GridGifError::validation(format!(
                "frame {idx} pushed out of order (expected {})",
                self.pushed
            )));
        }
        let expected_len = cfg.width as usize * cfg.height as usize * 4;
        if frame.data.len() != expected_len {
            return Err(GridGifError::validation(format!(
                "frame {idx} has {} bytes, expected {expected_len}",
                frame.data.len()
            )));
        }

        // Sizes were checked against u16 in `begin`.
        let mut rgba = frame.data.clone();
        let mut out = ::gif::Frame::from_rgba_speed(
            cfg.width as u16,
            cfg.height as u16,
            &mut rgba,
            QUANTIZE_SPEED,
        );
        out.delay = self.delay;
        out.dispose = DisposalMethod::Background;
        encoder
            .write_frame(&out)
            .map_err(|e| gif_err("encode gif frame", e))?;
        self.pushed += 1;
        Ok(())
    }

    fn end(&mut self) -> GridGifResult<()> {
        let (Some(cfg), Some(encoder)) = (self.cfg.take(), self.encoder.take()) else {
            return Err(GridGifError::validation("gif sink ended before begin"));
        };
        if self.pushed == 0 {
            return Err(GridGifError::EmptyInput);
        }
        let buf = encoder
            .into_inner()
            .map_err(|e| gif_err("finish gif stream", e))?;

        let path = &self.opts.out_path;
        ensure_parent_dir(path)?;
        std::fs::write(path, &buf).map_err(|e| GridGifError::io(path, e))?;
        self.bytes_written = buf.len();

        tracing::debug!(
            path = %path.display(),
            frames = cfg.frame_count,
            bytes = buf.len(),
            "gif written"
        );
        Ok(())
    }
}

/// Create the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> GridGifResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| GridGifError::io(parent, e))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
