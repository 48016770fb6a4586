use bp_core::error::{CoreError, Result};

use crate::compose::join_rows;
use crate::sampler::{PixelSampler, is_lit};

/// Braille base codepoint (U+2800).
pub const BRAILLE_BASE: u32 = 0x2800;

/// Bit for sub-position `[dx][dy]` of a cell.
///
/// Braille dot numbering (column-major):
/// ```text
///  1 4
///  2 5
///  3 6
///  7 8
/// ```
/// dot `n` → bit `n - 1`.
const DOT_BITS: [[u8; 4]; 2] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];

/// Encode an 8-bit dot mask into a Braille Unicode character.
///
/// # Example
/// ```
/// use bp_grid::braille::encode_braille;
/// assert_eq!(encode_braille(0x00), '\u{2800}'); // empty
/// assert_eq!(encode_braille(0xFF), '\u{28FF}'); // full
/// ```
#[inline(always)]
#[must_use]
pub fn encode_braille(mask: u8) -> char {
    char::from_u32(BRAILLE_BASE + u32::from(mask)).unwrap_or('\u{2800}')
}

/// Recover the dot mask from a Braille character; `None` outside U+2800..U+28FF.
///
/// # Example
/// ```
/// use bp_grid::braille::{decode_braille, encode_braille};
/// assert_eq!(decode_braille(encode_braille(0x5A)), Some(0x5A));
/// assert_eq!(decode_braille('a'), None);
/// ```
#[must_use]
pub fn decode_braille(ch: char) -> Option<u8> {
    u8::try_from(u32::from(ch).checked_sub(BRAILLE_BASE)?).ok()
}

/// Bit contributed by sub-position `(dx, dy)`, `dx ∈ 0..2`, `dy ∈ 0..4`.
#[inline(always)]
#[must_use]
pub fn dot_bit(dx: u32, dy: u32) -> u8 {
    DOT_BITS[dx as usize & 1][dy as usize & 3]
}

/// Dot mask of the cell whose top-left logical position is `(bx, by)`.
///
/// Sub-positions outside `cols × rows` contribute no bit.
#[must_use]
pub fn cell_mask(
    sampler: &PixelSampler<'_>,
    bx: u32,
    by: u32,
    cols: u32,
    rows: u32,
    threshold: u8,
    invert: bool,
) -> u8 {
    let mut mask = 0u8;
    for dy in 0..4u32 {
        for dx in 0..2u32 {
            let (x, y) = (bx + dx, by + dy);
            if x >= cols || y >= rows {
                continue;
            }
            if is_lit(sampler.intensity(x, y), threshold, invert) {
                mask |= dot_bit(dx, dy);
            }
        }
    }
    mask
}

/// Render the logical `cols × rows` grid as Braille text.
///
/// Produces `ceil(rows / 4)` lines of `ceil(cols / 2)` characters. A dot is
/// raised when its intensity passes [`is_lit`].
///
/// # Errors
/// `InvalidDimension` when `cols` or `rows` is zero or differs from the
/// sampler's grid.
///
/// # Example
/// ```
/// use bp_core::config::SamplingStrategy;
/// use bp_core::frame::PixelBuffer;
/// use bp_grid::braille::process_braille;
/// use bp_grid::sampler::PixelSampler;
///
/// let frame = PixelBuffer::filled(2, 4, [255, 255, 255, 255]);
/// let sampler = PixelSampler::new(&frame, 2, 4, SamplingStrategy::Nearest);
/// let art = process_braille(&sampler, 2, 4, 127, false).unwrap();
/// assert_eq!(art, "\u{28FF}");
/// ```
pub fn process_braille(
    sampler: &PixelSampler<'_>,
    cols: u32,
    rows: u32,
    threshold: u8,
    invert: bool,
) -> Result<String> {
    if cols == 0 || rows == 0 || cols != sampler.cols() || rows != sampler.rows() {
        return Err(CoreError::InvalidDimension { cols, rows });
    }
    log::debug!(
        "Braille: {cols}×{rows} dots → {}×{} cells, threshold={threshold}, invert={invert}",
        cols.div_ceil(2),
        rows.div_ceil(4)
    );

    let mut lines = Vec::with_capacity(rows.div_ceil(4) as usize);
    for by in (0..rows).step_by(4) {
        let line: String = (0..cols)
            .step_by(2)
            .map(|bx| encode_braille(cell_mask(sampler, bx, by, cols, rows, threshold, invert)))
            .collect();
        lines.push(line);
    }
    Ok(join_rows(&lines))
}
