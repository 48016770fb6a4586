use crate::error::{CoreError, Result};

/// Luma pondérée BT.601 : 0.299·R + 0.587·G + 0.114·B, arrondie.
///
/// # Example
/// ```
/// use bp_core::frame::luma;
/// assert_eq!(luma(255, 255, 255), 255);
/// assert_eq!(luma(0, 0, 0), 0);
/// assert_eq!(luma(255, 0, 0), 76);
/// ```
#[inline(always)]
#[must_use]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114 + 500) / 1000) as u8
}

/// Decoded image, RGBA row-major, 4 bytes per pixel.
///
/// Owned by the caller for the duration of one conversion and never mutated
/// by the encoders.
///
/// # Example
/// ```
/// use bp_core::frame::PixelBuffer;
/// let fb = PixelBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelBuffer {
    /// Crée un buffer noir transparent aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use bp_core::frame::PixelBuffer;
    /// let fb = PixelBuffer::new(100, 50);
    /// assert_eq!(fb.width, 100);
    /// assert_eq!(fb.height, 50);
    /// assert_eq!(fb.data.len(), 100 * 50 * 4);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Buffer where every pixel has the same RGBA value.
    ///
    /// # Example
    /// ```
    /// use bp_core::frame::PixelBuffer;
    /// let fb = PixelBuffer::filled(2, 4, [255, 255, 255, 255]);
    /// assert_eq!(fb.luminance(1, 3), Some(255));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * 4);
        for _ in 0..count {
            data.extend_from_slice(&rgba);
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Wrap a raw RGBA buffer, checking `data.len() == width * height * 4`.
    ///
    /// # Errors
    /// `InvalidDimension` for a zero width or height, `InvalidInput` when the
    /// byte count does not match.
    ///
    /// # Example
    /// ```
    /// use bp_core::frame::PixelBuffer;
    /// assert!(PixelBuffer::from_rgba(1, 1, vec![0, 0, 0, 255]).is_ok());
    /// assert!(PixelBuffer::from_rgba(2, 1, vec![0, 0, 0, 255]).is_err());
    /// ```
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimension {
                cols: width,
                rows: height,
            });
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(CoreError::InvalidInput(format!(
                "pixel data holds {} bytes, expected {expected} for {width}×{height} RGBA",
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// True when the buffer holds no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Accès au pixel (x, y) → (r, g, b, a). `None` hors limites.
    ///
    /// # Example
    /// ```
    /// use bp_core::frame::PixelBuffer;
    /// let fb = PixelBuffer::new(10, 10);
    /// assert_eq!(fb.pixel(0, 0), Some((0, 0, 0, 0)));
    /// assert_eq!(fb.pixel(10, 0), None);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some((px[0], px[1], px[2], px[3]))
    }

    /// Grayscale intensity of pixel (x, y). Alpha is ignored.
    #[inline(always)]
    #[must_use]
    pub fn luminance(&self, x: u32, y: u32) -> Option<u8> {
        self.pixel(x, y).map(|(r, g, b, _)| luma(r, g, b))
    }

    /// Composite every pixel over an opaque background, leaving alpha at 255.
    ///
    /// # Example
    /// ```
    /// use bp_core::frame::PixelBuffer;
    /// let fb = PixelBuffer::filled(1, 1, [0, 0, 0, 0]);
    /// let flat = fb.flatten_onto((255, 255, 255));
    /// assert_eq!(flat.pixel(0, 0), Some((255, 255, 255, 255)));
    /// ```
    #[must_use]
    pub fn flatten_onto(&self, background: (u8, u8, u8)) -> Self {
        let (br, bg, bb) = background;
        let mut data = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            let a = u32::from(px[3]);
            let blend = |c: u8, back: u8| -> u8 {
                ((u32::from(c) * a + u32::from(back) * (255 - a) + 127) / 255) as u8
            };
            data.extend_from_slice(&[blend(px[0], br), blend(px[1], bg), blend(px[2], bb), 255]);
        }
        Self {
            data,
            width: self.width,
            height: self.height,
        }
    }
}
