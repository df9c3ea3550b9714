use crate::error::HostError;

use super::{ImageData, ImageSource, RasterFacility};

/// Rasterizes `image` on a fresh offscreen surface and reads it back with
/// `padding` transparent pixels on every side.
///
/// The returned buffer is `(w + 2p) x (h + 2p)` with the image at (`p`, `p`).
/// A zero-area read region fails with `ContextUnavailable`. Allocates one
/// surface per call.
pub fn extract_image_data(
    raster: &dyn RasterFacility,
    image: &dyn ImageSource,
    padding: u32,
) -> Result<ImageData, HostError> {
    let (width, height) = (image.width(), image.height());

    let read_w = width.saturating_add(padding.saturating_mul(2));
    let read_h = height.saturating_add(padding.saturating_mul(2));
    let offset = i32::try_from(padding).ok();

    let mut surface = raster.create_surface(width, height);
    let ctx = surface
        .context_2d()
        .ok_or(HostError::ContextUnavailable { width, height })?;

    // An empty or oversized read region is treated like a missing context
    // rather than truncated.
    let max = raster.max_dimension();
    let addressable = (1..=max).contains(&read_w) && (1..=max).contains(&read_h);
    let Some(offset) = offset.filter(|_| addressable) else {
        return Err(HostError::ContextUnavailable { width: read_w, height: read_h });
    };

    ctx.draw_image(image, 0, 0, width, height);
    Ok(ctx.get_image_data(-offset, -offset, read_w, read_h))
}
