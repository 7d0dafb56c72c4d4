use crate::error::{GlitchError, GlitchResult};

pub type Rgba8 = [u8; 4];

pub const OPAQUE_BLACK: Rgba8 = [0, 0, 0, 255];

/// Straight (non-premultiplied) RGBA8 pixels, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Raster {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> GlitchResult<Self> {
        let raster = Self {
            width,
            height,
            data,
        };
        raster.validate()?;
        Ok(raster)
    }

    /// Non-zero dimensions and a buffer of exactly `width*height*4` bytes.
    pub fn validate(&self) -> GlitchResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GlitchError::invalid_parameter(
                "raster width/height must be > 0",
            ));
        }
        let expected_len = (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| GlitchError::invalid_parameter("raster buffer size overflow"))?;
        if self.data.len() != expected_len {
            return Err(GlitchError::invalid_parameter(format!(
                "raster buffer must be width*height*4 = {expected_len} bytes (got {})",
                self.data.len()
            )));
        }
        Ok(())
    }

    pub fn filled(width: u32, height: u32, px: Rgba8) -> GlitchResult<Self> {
        let len = (width as usize) * (height as usize);
        Self::new(width, height, px.repeat(len))
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width() + x) * 4
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgba8 {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, px: Rgba8) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&px);
    }

    pub fn row(&self, y: usize) -> &[u8] {
        let start = self.offset(0, y);
        &self.data[start..start + self.width() * 4]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = self.offset(0, y);
        let len = self.width() * 4;
        &mut self.data[start..start + len]
    }

    pub fn pixels(&self) -> impl Iterator<Item = Rgba8> + '_ {
        self.data
            .chunks_exact(4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    pub fn from_rgba_image(img: image::RgbaImage) -> GlitchResult<Self> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    pub fn to_rgba_image(&self) -> GlitchResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| GlitchError::invalid_parameter("raster buffer does not match its size"))
    }
}

/// Transient rectangular copy of raster pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

/// Copy `[y0,y1) x [x0,x1)` out of `raster`. Bounds are the caller's job; no wrap.
pub fn extract_chunk(raster: &Raster, y0: usize, y1: usize, x0: usize, x1: usize) -> Chunk {
    let width = x1 - x0;
    let height = y1 - y0;
    let mut data = Vec::with_capacity(width * height * 4);
    for y in y0..y1 {
        data.extend_from_slice(&raster.row(y)[x0 * 4..x1 * 4]);
    }
    Chunk {
        width,
        height,
        data,
    }
}

/// Write `chunk` into `[y0,y1) x [x0,x1)`; the rectangle must match the chunk size.
pub fn place_chunk(raster: &mut Raster, chunk: &Chunk, y0: usize, y1: usize, x0: usize, x1: usize) {
    debug_assert_eq!(chunk.width, x1 - x0, "chunk width mismatch");
    debug_assert_eq!(chunk.height, y1 - y0, "chunk height mismatch");
    let stride = chunk.width * 4;
    if stride == 0 {
        return;
    }
    for (y, src) in (y0..y1).zip(chunk.data.chunks_exact(stride)) {
        raster.row_mut(y)[x0 * 4..x1 * 4].copy_from_slice(src);
    }
}
