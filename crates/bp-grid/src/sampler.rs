use bp_core::config::SamplingStrategy;
use bp_core::frame::PixelBuffer;

/// Intensity returned for any query the sampler cannot answer.
pub const NEUTRAL_INTENSITY: u8 = 128;

/// The on/off rule shared by every encoder.
///
/// # Example
/// ```
/// use bp_grid::sampler::is_lit;
/// assert!(is_lit(200, 127, false));
/// assert!(!is_lit(127, 127, false));
/// assert!(is_lit(10, 127, true));
/// ```
#[inline(always)]
#[must_use]
pub fn is_lit(intensity: u8, threshold: u8, invert: bool) -> bool {
    if invert {
        intensity < threshold
    } else {
        intensity > threshold
    }
}

/// Maps a logical `cols × rows` grid onto a pixel buffer and answers
/// grayscale queries per grid position.
///
/// Total: positions outside the grid, or an empty buffer, yield
/// [`NEUTRAL_INTENSITY`].
///
/// # Example
/// ```
/// use bp_core::config::SamplingStrategy;
/// use bp_core::frame::PixelBuffer;
/// use bp_grid::sampler::PixelSampler;
///
/// let frame = PixelBuffer::filled(8, 8, [255, 255, 255, 255]);
/// let sampler = PixelSampler::new(&frame, 4, 4, SamplingStrategy::Nearest);
/// assert_eq!(sampler.intensity(3, 3), 255);
/// assert_eq!(sampler.intensity(4, 0), 128);
/// ```
pub struct PixelSampler<'a> {
    frame: &'a PixelBuffer,
    cols: u32,
    rows: u32,
    strategy: SamplingStrategy,
}

impl<'a> PixelSampler<'a> {
    #[must_use]
    pub fn new(frame: &'a PixelBuffer, cols: u32, rows: u32, strategy: SamplingStrategy) -> Self {
        Self {
            frame,
            cols,
            rows,
            strategy,
        }
    }

    #[must_use]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Grayscale intensity for logical cell `(gx, gy)`.
    #[inline]
    #[must_use]
    pub fn intensity(&self, gx: u32, gy: u32) -> u8 {
        if gx >= self.cols || gy >= self.rows || self.frame.is_empty() {
            return NEUTRAL_INTENSITY;
        }
        match self.strategy {
            SamplingStrategy::Nearest => self.nearest(gx, gy),
            SamplingStrategy::Averaged => self.averaged(gx, gy),
        }
    }

    fn nearest(&self, gx: u32, gy: u32) -> u8 {
        let (fw, fh) = (u64::from(self.frame.width), u64::from(self.frame.height));
        // Map grid coords to pixel coords
        let px = (u64::from(gx) * fw / u64::from(self.cols)).min(fw - 1) as u32;
        let py = (u64::from(gy) * fh / u64::from(self.rows)).min(fh - 1) as u32;
        self.frame.luminance(px, py).unwrap_or(NEUTRAL_INTENSITY)
    }

    fn averaged(&self, gx: u32, gy: u32) -> u8 {
        let (x0, x1) = span(gx, self.cols, self.frame.width);
        let (y0, y1) = span(gy, self.rows, self.frame.height);

        let mut sum = 0u64;
        let mut count = 0u64;
        for y in y0..y1 {
            for x in x0..x1 {
                if let Some(lum) = self.frame.luminance(x, y) {
                    sum += u64::from(lum);
                    count += 1;
                }
            }
        }
        if count == 0 {
            return NEUTRAL_INTENSITY;
        }
        ((sum + count / 2) / count) as u8
    }
}

/// Source range `[start, end)` covered by cell `index` of `cells` over
/// `extent` pixels. Never empty.
fn span(index: u32, cells: u32, extent: u32) -> (u32, u32) {
    let (i, n, e) = (u64::from(index), u64::from(cells), u64::from(extent));
    let start = (i * e / n).min(e - 1);
    let end = ((i + 1) * e).div_ceil(n).clamp(start + 1, e);
    (start as u32, end as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4×1 buffer: black, dark gray, light gray, white.
    fn ramp() -> PixelBuffer {
        let mut data = Vec::new();
        for v in [0u8, 60, 180, 255] {
            data.extend_from_slice(&[v, v, v, 255]);
        }
        PixelBuffer::from_rgba(4, 1, data).unwrap()
    }

    #[test]
    fn nearest_picks_mapped_pixel() {
        let frame = ramp();
        let s = PixelSampler::new(&frame, 2, 1, SamplingStrategy::Nearest);
        assert_eq!(s.intensity(0, 0), 0);
        assert_eq!(s.intensity(1, 0), 180);
    }

    #[test]
    fn averaged_means_the_cell_region() {
        let frame = ramp();
        let s = PixelSampler::new(&frame, 2, 1, SamplingStrategy::Averaged);
        assert_eq!(s.intensity(0, 0), 30);
        assert_eq!(s.intensity(1, 0), 218);
    }

    #[test]
    fn upsampling_repeats_pixels() {
        let frame = ramp();
        let s = PixelSampler::new(&frame, 8, 3, SamplingStrategy::Averaged);
        assert_eq!(s.intensity(0, 2), 0);
        assert_eq!(s.intensity(1, 0), 0);
        assert_eq!(s.intensity(7, 1), 255);
    }

    #[test]
    fn out_of_grid_is_neutral() {
        let frame = ramp();
        for strategy in [SamplingStrategy::Nearest, SamplingStrategy::Averaged] {
            let s = PixelSampler::new(&frame, 2, 1, strategy);
            assert_eq!(s.intensity(2, 0), NEUTRAL_INTENSITY);
            assert_eq!(s.intensity(0, 1), NEUTRAL_INTENSITY);
        }
    }

    #[test]
    fn empty_frame_is_neutral() {
        let frame = PixelBuffer::new(0, 0);
        let s = PixelSampler::new(&frame, 2, 2, SamplingStrategy::Nearest);
        assert_eq!(s.intensity(0, 0), NEUTRAL_INTENSITY);
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let frame = ramp();
        let s = PixelSampler::new(&frame, 3, 1, SamplingStrategy::Averaged);
        let a: Vec<u8> = (0..3).map(|x| s.intensity(x, 0)).collect();
        let b: Vec<u8> = (0..3).map(|x| s.intensity(x, 0)).collect();
        assert_eq!(a, b);
    }
}
