use crate::foundation::core::Fps;
use crate::foundation::error::{GridGifError, GridGifResult};
use crate::render::raster::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Playback rate; every frame is shown for `1 / fps`.
    pub fps: Fps,
    /// Restart playback after the last frame, forever.
    pub loop_forever: bool,
    /// Number of frames that will be pushed.
    pub frame_count: usize,
}

/// Sink contract for consuming rendered frames in animation order.
///
/// Ordering contract: `push_frame` is called with indices `0, 1, 2, ...` between one `begin`
/// and one `end`.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> GridGifResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: usize, frame: &FrameRGBA) -> GridGifResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> GridGifResult<()>;
}

/// In-memory sink for tests and inspection.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<FrameRGBA>,
    finished: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Captured frames in order.
    pub fn frames(&self) -> &[FrameRGBA] {
        &self.frames
    }

    /// `true` once `end` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> GridGifResult<()> {
        self.frames.clear();
        self.frames.reserve(cfg.frame_count);
        self.cfg = Some(cfg);
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &FrameRGBA) -> GridGifResult<()> {
        if idx != self.frames.len() {
            return Err(GridGifError::validation(format!(
                "frame {idx} pushed out of order (expected {})",
                self.frames.len()
            )));
        }
        self.frames.push(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> GridGifResult<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
