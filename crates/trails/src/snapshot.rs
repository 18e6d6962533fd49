//! PNG output of a [`TrailCanvas`], behind the `png` feature.

use crate::canvas::TrailCanvas;
use crate::pixel::canvas_to_rgba;
use crate::style::TrailStyle;
use flowfield_core::FlowError;
use std::path::Path;

/// Writes the canvas as a PNG image colored by `style`.
///
/// Returns `FlowError::InvalidDimensions` if a side does not fit in `u32`,
/// or `FlowError::Io` on write failure.
pub fn write_png(canvas: &TrailCanvas, style: &TrailStyle, path: &Path) -> Result<(), FlowError> {
    let invalid = || FlowError::InvalidDimensions {
        width: canvas.width() as f64,
        height: canvas.height() as f64,
    };
    let w = u32::try_from(canvas.width()).map_err(|_| invalid())?;
    let h = u32::try_from(canvas.height()).map_err(|_| invalid())?;
    let img = image::RgbaImage::from_raw(w, h, canvas_to_rgba(canvas, style))
        .ok_or_else(|| FlowError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FlowError::Io(e.to_string()))
}
