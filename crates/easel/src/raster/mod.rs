//! Offscreen rasterization and pixel read-back.
//!
//! The host exposes a [`RasterFacility`] that hands out offscreen surfaces.
//! A surface may or may not be able to provide a [`Context2d`]; the context
//! follows canvas conventions:
//! - origin top-left, integer pixel coordinates
//! - surfaces start fully transparent
//! - reads outside the surface yield transparent black
//!
//! [`extract_image_data`] is the one-shot "draw then read back" operation
//! used by `HostCtx::get_image_data`.

mod extract;
mod image_data;
mod software;

use std::borrow::Cow;

use image::{DynamicImage, GenericImageView, RgbaImage};

pub use extract::extract_image_data;
pub use image_data::ImageData;
pub use software::{SoftwareRaster, DEFAULT_MAX_DIMENSION};

/// Image-like resource with intrinsic dimensions.
pub trait ImageSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Straight-alpha RGBA8 pixels at intrinsic size.
    fn rgba8(&self) -> Cow<'_, RgbaImage>;
}

impl ImageSource for RgbaImage {
    fn width(&self) -> u32 {
        GenericImageView::width(self)
    }

    fn height(&self) -> u32 {
        GenericImageView::height(self)
    }

    fn rgba8(&self) -> Cow<'_, RgbaImage> {
        Cow::Borrowed(self)
    }
}

impl ImageSource for DynamicImage {
    fn width(&self) -> u32 {
        GenericImageView::width(self)
    }

    fn height(&self) -> u32 {
        GenericImageView::height(self)
    }

    fn rgba8(&self) -> Cow<'_, RgbaImage> {
        match self.as_rgba8() {
            Some(img) => Cow::Borrowed(img),
            None => Cow::Owned(self.to_rgba8()),
        }
    }
}

/// 2D drawing context of an offscreen surface.
pub trait Context2d {
    /// Draws `image` scaled to `dw`x`dh` with its top-left at (`dx`, `dy`).
    fn draw_image(&mut self, image: &dyn ImageSource, dx: i32, dy: i32, dw: u32, dh: u32);

    /// Reads back the `sw`x`sh` rectangle whose top-left is (`sx`, `sy`).
    fn get_image_data(&mut self, sx: i32, sy: i32, sw: u32, sh: u32) -> ImageData;
}

/// Offscreen raster surface.
pub trait RasterSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// `None` when the host cannot back this surface with a 2D context.
    fn context_2d(&mut self) -> Option<&mut dyn Context2d>;
}

/// Host facility creating offscreen surfaces.
pub trait RasterFacility {
    fn create_surface(&self, width: u32, height: u32) -> Box<dyn RasterSurface>;

    /// Largest width or height a context can serve.
    fn max_dimension(&self) -> u32;
}
