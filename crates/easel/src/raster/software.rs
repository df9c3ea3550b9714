use image::imageops::{self, FilterType};
use image::RgbaImage;

use super::{Context2d, ImageData, ImageSource, RasterFacility, RasterSurface};

/// Largest surface edge the software rasterizer backs with a context.
///
/// Mirrors the common browser canvas limit.
pub const DEFAULT_MAX_DIMENSION: u32 = 16_384;

/// CPU raster facility backed by `image::RgbaImage`.
#[derive(Debug, Clone, Copy)]
pub struct SoftwareRaster {
    max_dimension: u32,
}

impl SoftwareRaster {
    pub fn new() -> Self {
        Self::with_max_dimension(DEFAULT_MAX_DIMENSION)
    }

    pub fn with_max_dimension(max_dimension: u32) -> Self {
        Self { max_dimension }
    }
}

impl Default for SoftwareRaster {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterFacility for SoftwareRaster {
    fn create_surface(&self, width: u32, height: u32) -> Box<dyn RasterSurface> {
        let ctx = (width <= self.max_dimension && height <= self.max_dimension).then(|| {
            SoftwareContext { pixels: RgbaImage::new(width, height) }
        });
        Box::new(SoftwareSurface { width, height, ctx })
    }

    fn max_dimension(&self) -> u32 {
        self.max_dimension
    }
}

struct SoftwareSurface {
    width: u32,
    height: u32,
    ctx: Option<SoftwareContext>,
}

impl RasterSurface for SoftwareSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn context_2d(&mut self) -> Option<&mut dyn Context2d> {
        self.ctx.as_mut().map(|c| c as &mut dyn Context2d)
    }
}

struct SoftwareContext {
    pixels: RgbaImage,
}

impl Context2d for SoftwareContext {
    fn draw_image(&mut self, image: &dyn ImageSource, dx: i32, dy: i32, dw: u32, dh: u32) {
        if dw == 0 || dh == 0 {
            return;
        }

        let src = image.rgba8();
        if src.dimensions() == (dw, dh) {
            imageops::overlay(&mut self.pixels, &*src, i64::from(dx), i64::from(dy));
        } else {
            let scaled = imageops::resize(&*src, dw, dh, FilterType::Triangle);
            imageops::overlay(&mut self.pixels, &scaled, i64::from(dx), i64::from(dy));
        }
    }

    fn get_image_data(&mut self, sx: i32, sy: i32, sw: u32, sh: u32) -> ImageData {
        let mut out = ImageData::transparent(sw, sh);
        let (w, h) = self.pixels.dimensions();
        out.copy_from(self.pixels.as_raw(), w, h, sx, sy);
        out
    }
}
