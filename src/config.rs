use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::foundation::core::Fps;
use crate::foundation::error::{GridGifError, GridGifResult};
use crate::grid::parse::{ITERATION_MARKER, MarkerSet, STEP_MARKER};
use crate::pipeline::EncodeOpts;
use crate::render::palette::Palette;

/// Batch conversion settings.
///
/// This is the JSON-facing, human-edited form. Every field is optional:
///
/// ```json
/// {
///   "palette": { "0": "yellow", "1": "#0000ff" },
///   "fps": { "num": 1, "den": 1 },
///   "loop": true,
///   "markers": ["Iteration"],
///   "cell_size": 12,
///   "out_dir": "gifs",
///   "inputs": ["2D_Periodic_Moore_parity.txt"]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// Cell value to color mapping.
    pub palette: Palette,
    /// Playback rate.
    pub fps: Fps,
    /// Per-frame duration in milliseconds; takes precedence over `fps`.
    pub frame_ms: Option<u32>,
    /// Loop forever.
    #[serde(rename = "loop")]
    pub loop_forever: bool,
    /// Iteration-boundary line prefixes.
    pub markers: Vec<String>,
    /// Pixels per cell side.
    pub cell_size: u32,
    /// Directory for output GIFs; defaults to each input's directory.
    pub out_dir: Option<PathBuf>,
    /// Log files to convert, in order.
    pub inputs: Vec<PathBuf>,
    /// Convert files concurrently.
    pub parallel: bool,
    /// Worker threads for parallel mode.
    pub threads: Option<usize>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            fps: Fps::default(),
            frame_ms: None,
            loop_forever: true,
            markers: vec![ITERATION_MARKER.to_owned(), STEP_MARKER.to_owned()],
            cell_size: 10,
            out_dir: None,
            inputs: Vec::new(),
            parallel: false,
            threads: None,
        }
    }
}

impl ConvertConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> GridGifResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| GridGifError::validation(format!("parse config JSON: {e}")))?;
        Ok(cfg)
    }

    /// Parse a config from a JSON file on disk. Relative `inputs` and `out_dir` are resolved
    /// against the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> GridGifResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| GridGifError::io(path, e))?;
        let mut cfg = Self::from_reader(BufReader::new(f))?;

        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            for input in &mut cfg.inputs {
                if input.is_relative() {
                    *input = base.join(&*input);
                }
            }
            if let Some(dir) = cfg.out_dir.as_mut()
                && dir.is_relative()
            {
                *dir = base.join(&*dir);
            }
        }
        Ok(cfg)
    }

    /// Effective frame rate after applying `frame_ms`.
    pub fn effective_fps(&self) -> GridGifResult<Fps> {
        match self.frame_ms {
            Some(ms) => Fps::from_frame_ms(ms),
            None => {
                self.fps.validate()?;
                Ok(self.fps)
            }
        }
    }

    /// Marker set built from `markers`.
    pub fn marker_set(&self) -> GridGifResult<MarkerSet> {
        MarkerSet::new(self.markers.iter().cloned())
    }

    /// Options handed to the encoder.
    pub fn encode_opts(&self) -> GridGifResult<EncodeOpts> {
        Ok(EncodeOpts {
            palette: self.palette.clone(),
            fps: self.effective_fps()?,
            loop_forever: self.loop_forever,
            cell_size: self.cell_size,
        })
    }

    /// Check every setting that does not depend on input data.
    pub fn validate(&self) -> GridGifResult<()> {
        self.effective_fps()?;
        self.marker_set()?;
        if self.cell_size == 0 {
            return Err(GridGifError::validation("cell_size must be >= 1"));
        }
        if let Some(0) = self.threads {
            return Err(GridGifError::validation("threads must be >= 1 when set"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
