//! Palette mapping and grid rasterization.

/// Cell-value to color mapping.
pub mod palette;
/// Grid to [`FrameRGBA`](raster::FrameRGBA) rasterization.
pub mod raster;
