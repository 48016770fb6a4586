use bp_core::error::{CoreError, Result};
use bp_core::palette::Palette;

use crate::compose::join_rows;
use crate::sampler::{PixelSampler, is_lit};

/// Symbols used by the mosaic, one per logical cell.
#[derive(Clone, Copy, Debug)]
pub enum MosaicSymbols<'a> {
    /// Threshold rule picks `on` or `off`.
    Binary { on: &'a str, off: &'a str },
    /// Intensity bucketed into the palette.
    Gradient(&'a Palette),
}

/// Symbol for one cell.
///
/// # Example
/// ```
/// use bp_core::palette::Palette;
/// use bp_grid::emoji::{MosaicSymbols, mosaic_symbol};
///
/// let palette = Palette::named("default").unwrap();
/// let symbols = MosaicSymbols::Gradient(&palette);
/// assert_eq!(mosaic_symbol(symbols, 0, 127, false), "⬛");
/// assert_eq!(mosaic_symbol(symbols, 255, 127, false), "⬜");
/// ```
#[inline]
#[must_use]
pub fn mosaic_symbol<'a>(
    symbols: MosaicSymbols<'a>,
    intensity: u8,
    threshold: u8,
    invert: bool,
) -> &'a str {
    match symbols {
        MosaicSymbols::Binary { on, off } => {
            if is_lit(intensity, threshold, invert) {
                on
            } else {
                off
            }
        }
        MosaicSymbols::Gradient(palette) => {
            let lum = if invert { 255 - intensity } else { intensity };
            palette.symbol_for(lum)
        }
    }
}

/// Render the `cols × rows` grid with one symbol per cell.
///
/// In gradient mode `threshold` is unused and `invert` maps intensity `v` to
/// `255 - v` before bucketing. In binary mode a cell exactly at `threshold`
/// is off whether or not `invert` is set.
///
/// Rows are right-trimmed. A whitespace symbol (`" "` as the darkest palette
/// entry or as `off`) therefore vanishes at line ends, and an image made only
/// of such cells renders as an empty string.
///
/// # Errors
/// `InvalidDimension` for a zero side or a grid that differs from the
/// sampler's, `InvalidPalette` for an empty palette or an empty on/off symbol.
///
/// # Example
/// ```
/// use bp_core::config::SamplingStrategy;
/// use bp_core::frame::PixelBuffer;
/// use bp_grid::emoji::{MosaicSymbols, process_mosaic};
/// use bp_grid::sampler::PixelSampler;
///
/// let frame = PixelBuffer::filled(4, 2, [255, 255, 255, 255]);
/// let sampler = PixelSampler::new(&frame, 2, 1, SamplingStrategy::Nearest);
/// let symbols = MosaicSymbols::Binary { on: "🔥", off: "⚪" };
/// assert_eq!(process_mosaic(&sampler, 2, 1, symbols, 128, false).unwrap(), "🔥🔥");
/// ```
pub fn process_mosaic(
    sampler: &PixelSampler<'_>,
    cols: u32,
    rows: u32,
    symbols: MosaicSymbols<'_>,
    threshold: u8,
    invert: bool,
) -> Result<String> {
    if cols == 0 || rows == 0 || cols != sampler.cols() || rows != sampler.rows() {
        return Err(CoreError::InvalidDimension { cols, rows });
    }
    match symbols {
        MosaicSymbols::Binary { on, off } if on.is_empty() || off.is_empty() => {
            return Err(CoreError::InvalidPalette(
                "binary mode needs a non-empty on and off symbol".into(),
            ));
        }
        MosaicSymbols::Gradient(palette) if palette.is_empty() => {
            return Err(CoreError::InvalidPalette("palette is empty".into()));
        }
        MosaicSymbols::Gradient(palette) => {
            log::debug!("Mosaic: {cols}×{rows}, gradient of {} symbols", palette.len());
        }
        MosaicSymbols::Binary { .. } => {
            log::debug!("Mosaic: {cols}×{rows}, binary threshold={threshold} invert={invert}");
        }
    }

    let mut lines = Vec::with_capacity(rows as usize);
    for gy in 0..rows {
        let mut line = String::new();
        for gx in 0..cols {
            line.push_str(mosaic_symbol(symbols, sampler.intensity(gx, gy), threshold, invert));
        }
        lines.push(line);
    }
    Ok(join_rows(&lines))
}

#[cfg(test)]
mod tests {
    use bp_core::config::SamplingStrategy;
    use bp_core::frame::PixelBuffer;

    use super::*;

    fn checker(width: u32, height: u32) -> PixelBuffer {
        let mut data = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let v = if (x + y) % 2 == 0 { 230 } else { 20 };
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        PixelBuffer::from_rgba(width, height, data).unwrap()
    }

    fn binary(frame: &PixelBuffer, invert: bool) -> String {
        let sampler = PixelSampler::new(frame, 6, 4, SamplingStrategy::Nearest);
        let symbols = MosaicSymbols::Binary { on: "X", off: "o" };
        process_mosaic(&sampler, 6, 4, symbols, 128, invert).unwrap()
    }

    #[test]
    fn gradient_buckets_match_formula() {
        let palette = Palette::new((0..6).map(|i| i.to_string()).collect()).unwrap();
        let symbols = MosaicSymbols::Gradient(&palette);
        assert_eq!(mosaic_symbol(symbols, 0, 0, false), "0");
        assert_eq!(mosaic_symbol(symbols, 255, 0, false), "5");
        assert_eq!(mosaic_symbol(symbols, 128, 0, false), "2");
    }

    #[test]
    fn gradient_invert_reverses_palette() {
        let palette = Palette::new(vec!["a".into(), "b".into()]).unwrap();
        let symbols = MosaicSymbols::Gradient(&palette);
        assert_eq!(mosaic_symbol(symbols, 0, 0, true), "b");
        assert_eq!(mosaic_symbol(symbols, 255, 0, true), "a");
    }

    #[test]
    fn invert_swaps_binary_symbols() {
        let frame = checker(6, 4);
        let plain = binary(&frame, false);
        let inverted = binary(&frame, true);
        let swapped: String = plain
            .chars()
            .map(|c| match c {
                'X' => 'o',
                'o' => 'X',
                other => other,
            })
            .collect();
        assert_eq!(inverted, swapped);
    }

    #[test]
    fn one_symbol_per_cell() {
        let frame = checker(6, 4);
        let art = binary(&frame, false);
        let lines: Vec<&str> = art.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.chars().count() == 6));
        assert_eq!(lines[0], "XoXoXo");
    }

    #[test]
    fn tie_with_threshold_is_off_both_ways() {
        let frame = PixelBuffer::filled(2, 2, [128, 128, 128, 255]);
        let sampler = PixelSampler::new(&frame, 2, 1, SamplingStrategy::Nearest);
        let symbols = MosaicSymbols::Binary { on: "X", off: "o" };
        assert_eq!(process_mosaic(&sampler, 2, 1, symbols, 128, false).unwrap(), "oo");
        assert_eq!(process_mosaic(&sampler, 2, 1, symbols, 128, true).unwrap(), "oo");
        // One step either side and the two settings disagree again.
        assert_eq!(process_mosaic(&sampler, 2, 1, symbols, 127, false).unwrap(), "XX");
        assert_eq!(process_mosaic(&sampler, 2, 1, symbols, 129, true).unwrap(), "XX");
    }

    #[test]
    fn higher_threshold_never_adds_cells() {
        let mut data = Vec::new();
        for y in 0..12u32 {
            for x in 0..16u32 {
                let v = ((x * 16 + y * 5) % 256) as u8;
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        let frame = PixelBuffer::from_rgba(16, 12, data).unwrap();
        let sampler = PixelSampler::new(&frame, 16, 12, SamplingStrategy::Averaged);
        let symbols = MosaicSymbols::Binary { on: "X", off: "o" };

        let mut prev = usize::MAX;
        for threshold in (0..=255u8).step_by(15) {
            let art = process_mosaic(&sampler, 16, 12, symbols, threshold, false).unwrap();
            let lit = art.chars().filter(|&c| c == 'X').count();
            assert!(lit <= prev, "threshold {threshold}: {lit} > {prev}");
            prev = lit;
        }
    }

    #[test]
    fn blank_darkest_symbol_trims_away() {
        let frame = PixelBuffer::filled(3, 2, [0, 0, 0, 255]);
        let sampler = PixelSampler::new(&frame, 3, 2, SamplingStrategy::Nearest);
        let palette = Palette::new(vec![" ".into(), "#".into()]).unwrap();
        let art = process_mosaic(&sampler, 3, 2, MosaicSymbols::Gradient(&palette), 0, false);
        assert_eq!(art.unwrap(), "");
    }

    #[test]
    fn grid_mismatch_is_invalid_dimension() {
        let frame = PixelBuffer::filled(2, 2, [0, 0, 0, 255]);
        let sampler = PixelSampler::new(&frame, 2, 2, SamplingStrategy::Nearest);
        let symbols = MosaicSymbols::Binary { on: "X", off: "o" };
        let err = process_mosaic(&sampler, 4, 2, symbols, 127, false).unwrap_err();
        assert_eq!(err, CoreError::InvalidDimension { cols: 4, rows: 2 });
        assert_eq!(process_mosaic(&sampler, 2, 2, symbols, 127, false).unwrap(), "oo\noo");
    }

    #[test]
    fn binary_output_is_deterministic() {
        let frame = checker(9, 7);
        assert_eq!(binary(&frame, false), binary(&frame, false));
    }

    #[test]
    fn empty_on_symbol_is_invalid_palette() {
        let frame = checker(2, 2);
        let sampler = PixelSampler::new(&frame, 2, 2, SamplingStrategy::Nearest);
        let symbols = MosaicSymbols::Binary { on: "", off: "o" };
        let err = process_mosaic(&sampler, 2, 2, symbols, 128, false).unwrap_err();
        assert!(matches!(err, CoreError::InvalidPalette(_)));
    }

    #[test]
    fn zero_rows_is_invalid_dimension() {
        let frame = checker(2, 2);
        let sampler = PixelSampler::new(&frame, 2, 0, SamplingStrategy::Nearest);
        let palette = Palette::named("default").unwrap();
        let err =
            process_mosaic(&sampler, 2, 0, MosaicSymbols::Gradient(&palette), 128, false).unwrap_err();
        assert_eq!(err, CoreError::InvalidDimension { cols: 2, rows: 0 });
    }
}
