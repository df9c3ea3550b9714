use image::RgbaImage;

/// Raw read-back pixels: straight-alpha RGBA8, row-major, no row padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ImageData {
    /// Fully transparent black buffer.
    pub fn transparent(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * 4;
        Self { width, height, data: vec![0; len] }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// RGBA at (`x`, `y`), or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.data[i..i + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn to_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.data.clone())
    }

    /// Copies the part of `src` (tightly packed `src_w`x`src_h` RGBA8) that
    /// overlaps this buffer placed at (`sx`, `sy`) in source space.
    ///
    /// Pixels with no source counterpart are left untouched.
    pub(crate) fn copy_from(&mut self, src: &[u8], src_w: u32, src_h: u32, sx: i32, sy: i32) {
        let (sx, sy) = (i64::from(sx), i64::from(sy));
        let x0 = sx.max(0);
        let y0 = sy.max(0);
        let x1 = (sx + i64::from(self.width)).min(i64::from(src_w));
        let y1 = (sy + i64::from(self.height)).min(i64::from(src_h));
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let span = ((x1 - x0) * 4) as usize;
        let src_stride = i64::from(src_w) * 4;
        let dst_stride = i64::from(self.width) * 4;

        for y in y0..y1 {
            let s = (y * src_stride + x0 * 4) as usize;
            let d = ((y - sy) * dst_stride + (x0 - sx) * 4) as usize;
            self.data[d..d + span].copy_from_slice(&src[s..s + span]);
        }
    }
}
