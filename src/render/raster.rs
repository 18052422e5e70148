use crate::foundation::error::{GridGifError, GridGifResult};
use crate::grid::model::Grid;
use crate::render::palette::Palette;

/// A rendered frame as opaque RGBA8 pixels, tightly packed and row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// RGBA at pixel `(x, y)`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Convert into an `image` buffer.
    pub fn to_image(&self) -> GridGifResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone()).ok_or_else(|| {
            GridGifError::validation("frame.data size mismatch with width*height*4")
        })
    }
}

/// Pixel size of a grid rendered at `cell_size` pixels per cell side.
pub fn frame_dimensions(grid: &Grid, cell_size: u32) -> GridGifResult<(u32, u32)> {
    if cell_size == 0 {
        return Err(GridGifError::validation("cell_size must be >= 1"));
    }
    let scale = |cells: usize, axis: &str| -> GridGifResult<u32> {
        u32::try_from(cells)
            .ok()
            .and_then(|c| c.checked_mul(cell_size))
            .ok_or_else(|| {
                GridGifError::validation(format!(
                    "frame {axis} overflows: {cells} cells at {cell_size}px"
                ))
            })
    };
    Ok((scale(grid.cols(), "width")?, scale(grid.rows(), "height")?))
}

/// Map every cell through `palette` and upscale by `cell_size` with nearest-neighbor
/// sampling. `grid_index` is only used for error reporting.
pub fn render_grid(
    grid: &Grid,
    grid_index: usize,
    palette: &Palette,
    cell_size: u32,
) -> GridGifResult<FrameRGBA> {
    let (width, height) = frame_dimensions(grid, cell_size)?;
    let cell = cell_size as usize;
    let stride = (width as usize) * 4;
    let mut data = vec![0u8; stride * (height as usize)];

    for (row, cells) in grid.iter_rows().enumerate() {
        // Build one scaled pixel row, then copy it `cell_size` times.
        let mut line = Vec::with_capacity(stride);
        for (col, &value) in cells.iter().enumerate() {
            let rgba = palette
                .get(value)
                .ok_or(GridGifError::PaletteLookup {
                    grid: grid_index,
                    row,
                    col,
                    value,
                })?
                .to_rgba();
            for _ in 0..cell {
                line.extend_from_slice(&rgba);
            }
        }

        let top = row * cell;
        for dy in 0..cell {
            let start = (top + dy) * stride;
            data[start..start + stride].copy_from_slice(&line);
        }
    }

    Ok(FrameRGBA {
        width,
        height,
        data,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
