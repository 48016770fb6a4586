use std::collections::HashMap;

use crate::error::{CoreError, Result};

/// Built-in font names, in listing order.
pub const FONT_NAMES: &[&str] = &["block", "simple"];

/// 5×7, lettres pleines, lisibles en ASCII.
const BLOCK: &[(char, &[&str])] = &[
    ('A', &["01110", "10001", "10001", "11111", "10001", "10001", "10001"]),
    ('B', &["11110", "10001", "10001", "11110", "10001", "10001", "11110"]),
    ('C', &["01110", "10001", "10000", "10000", "10000", "10001", "01110"]),
    ('D', &["11110", "10001", "10001", "10001", "10001", "10001", "11110"]),
    ('E', &["11111", "10000", "10000", "11110", "10000", "10000", "11111"]),
    ('F', &["11111", "10000", "10000", "11110", "10000", "10000", "10000"]),
    ('G', &["01110", "10001", "10000", "10111", "10001", "10001", "01111"]),
    ('H', &["10001", "10001", "10001", "11111", "10001", "10001", "10001"]),
    ('I', &["11111", "00100", "00100", "00100", "00100", "00100", "11111"]),
    ('J', &["00111", "00010", "00010", "00010", "00010", "10010", "01100"]),
    ('K', &["10001", "10010", "10100", "11000", "10100", "10010", "10001"]),
    ('L', &["10000", "10000", "10000", "10000", "10000", "10000", "11111"]),
    ('M', &["10001", "11011", "10101", "10101", "10001", "10001", "10001"]),
    ('N', &["10001", "10001", "11001", "10101", "10011", "10001", "10001"]),
    ('O', &["01110", "10001", "10001", "10001", "10001", "10001", "01110"]),
    ('P', &["11110", "10001", "10001", "11110", "10000", "10000", "10000"]),
    ('Q', &["01110", "10001", "10001", "10001", "10101", "10010", "01101"]),
    ('R', &["11110", "10001", "10001", "11110", "10100", "10010", "10001"]),
    ('S', &["01111", "10000", "10000", "01110", "00001", "00001", "11110"]),
    ('T', &["11111", "00100", "00100", "00100", "00100", "00100", "00100"]),
    ('U', &["10001", "10001", "10001", "10001", "10001", "10001", "01110"]),
    ('V', &["10001", "10001", "10001", "10001", "10001", "01010", "00100"]),
    ('W', &["10001", "10001", "10001", "10101", "10101", "10101", "01010"]),
    ('X', &["10001", "10001", "01010", "00100", "01010", "10001", "10001"]),
    ('Y', &["10001", "10001", "01010", "00100", "00100", "00100", "00100"]),
    ('Z', &["11111", "00001", "00010", "00100", "01000", "10000", "11111"]),
    ('0', &["01110", "10001", "10011", "10101", "11001", "10001", "01110"]),
    ('1', &["00100", "01100", "00100", "00100", "00100", "00100", "01110"]),
    ('2', &["01110", "10001", "00001", "00010", "00100", "01000", "11111"]),
    ('3', &["11111", "00010", "00100", "00010", "00001", "10001", "01110"]),
    ('4', &["00010", "00110", "01010", "10010", "11111", "00010", "00010"]),
    ('5', &["11111", "10000", "11110", "00001", "00001", "10001", "01110"]),
    ('6', &["00110", "01000", "10000", "11110", "10001", "10001", "01110"]),
    ('7', &["11111", "00001", "00010", "00100", "01000", "01000", "01000"]),
    ('8', &["01110", "10001", "10001", "01110", "10001", "10001", "01110"]),
    ('9', &["01110", "10001", "10001", "01111", "00001", "00010", "01100"]),
    ('!', &["00100", "00100", "00100", "00100", "00100", "00000", "00100"]),
    ('?', &["01110", "10001", "00001", "00010", "00100", "00000", "00100"]),
    ('.', &["00000", "00000", "00000", "00000", "00000", "01100", "01100"]),
    (',', &["00000", "00000", "00000", "00000", "01100", "00100", "01000"]),
    ('-', &["00000", "00000", "00000", "11111", "00000", "00000", "00000"]),
    (':', &["00000", "01100", "01100", "00000", "01100", "01100", "00000"]),
    ('\'', &["00100", "00100", "01000", "00000", "00000", "00000", "00000"]),
    (' ', &["00000", "00000", "00000", "00000", "00000", "00000", "00000"]),
];

/// 5×5. Compact; the emoji text default since every cell is wide.
const SIMPLE: &[(char, &[&str])] = &[
    ('A', &["01110", "10001", "11111", "10001", "10001"]),
    ('B', &["11110", "10001", "11110", "10001", "11110"]),
    ('C', &["01111", "10000", "10000", "10000", "01111"]),
    ('D', &["11110", "10001", "10001", "10001", "11110"]),
    ('E', &["11111", "10000", "11100", "10000", "11111"]),
    ('F', &["11111", "10000", "11100", "10000", "10000"]),
    ('G', &["01111", "10000", "10111", "10001", "01110"]),
    ('H', &["10001", "10001", "11111", "10001", "10001"]),
    ('I', &["11111", "00100", "00100", "00100", "11111"]),
    ('J', &["11111", "00010", "00010", "10010", "01100"]),
    ('K', &["10010", "10100", "11000", "10100", "10010"]),
    ('L', &["10000", "10000", "10000", "10000", "11111"]),
    ('M', &["10001", "11011", "10101", "10001", "10001"]),
    ('N', &["10001", "11001", "10101", "10011", "10001"]),
    ('O', &["01110", "10001", "10001", "10001", "01110"]),
    ('P', &["11110", "10001", "11110", "10000", "10000"]),
    ('Q', &["01110", "10001", "10101", "10010", "01101"]),
    ('R', &["11110", "10001", "11110", "10100", "10010"]),
    ('S', &["01111", "10000", "01110", "00001", "11110"]),
    ('T', &["11111", "00100", "00100", "00100", "00100"]),
    ('U', &["10001", "10001", "10001", "10001", "01110"]),
    ('V', &["10001", "10001", "10001", "01010", "00100"]),
    ('W', &["10001", "10001", "10101", "11011", "10001"]),
    ('X', &["10001", "01010", "00100", "01010", "10001"]),
    ('Y', &["10001", "01010", "00100", "00100", "00100"]),
    ('Z', &["11111", "00010", "00100", "01000", "11111"]),
    ('0', &["01110", "10011", "10101", "11001", "01110"]),
    ('1', &["00100", "01100", "00100", "00100", "01110"]),
    ('2', &["11110", "00001", "01110", "10000", "11111"]),
    ('3', &["11110", "00001", "00110", "00001", "11110"]),
    ('4', &["10010", "10010", "11111", "00010", "00010"]),
    ('5', &["11111", "10000", "11110", "00001", "11110"]),
    ('6', &["01110", "10000", "11110", "10001", "01110"]),
    ('7', &["11111", "00001", "00010", "00100", "00100"]),
    ('8', &["01110", "10001", "01110", "10001", "01110"]),
    ('9', &["01110", "10001", "01111", "00001", "01110"]),
    ('!', &["00100", "00100", "00100", "00000", "00100"]),
    ('?', &["01110", "00001", "00110", "00000", "00100"]),
    ('.', &["00000", "00000", "00000", "00000", "00100"]),
    (',', &["00000", "00000", "00000", "00100", "01000"]),
    ('-', &["00000", "00000", "01110", "00000", "00000"]),
    (':', &["00000", "00100", "00000", "00100", "00000"]),
    ('\'', &["00100", "00100", "00000", "00000", "00000"]),
    (' ', &["00000", "00000", "00000", "00000", "00000"]),
];

/// One character's bitmap: `height` rows of `width` bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    rows: Vec<Vec<bool>>,
}

impl Glyph {
    fn blank(width: usize, height: usize) -> Self {
        Self {
            rows: vec![vec![false; width]; height],
        }
    }

    /// Bits of row `index`; empty past the last row.
    #[must_use]
    pub fn row(&self, index: usize) -> &[bool] {
        self.rows.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.rows.iter().flatten().all(|bit| !bit)
    }
}

/// Character → fixed-size glyph mapping.
///
/// Every glyph has the same row count and row length. Characters without a
/// glyph resolve to an all-off glyph of the same size.
///
/// # Example
/// ```
/// use bp_core::glyph::GlyphTable;
/// let font = GlyphTable::named("block").unwrap();
/// assert_eq!(font.height(), 7);
/// assert_eq!(font.width(), 5);
/// assert!(font.glyph('~').is_blank());
/// ```
#[derive(Clone, Debug)]
pub struct GlyphTable {
    name: String,
    width: usize,
    height: usize,
    glyphs: HashMap<char, Glyph>,
    fallback: Glyph,
}

impl GlyphTable {
    /// Build a table from bit-string rows (`'0'` / `'1'`).
    ///
    /// # Errors
    /// `InvalidInput` when the table is empty, a row contains another
    /// character, or glyph sizes disagree.
    ///
    /// # Example
    /// ```
    /// use bp_core::glyph::GlyphTable;
    /// let t = GlyphTable::new("tiny", &[('X', &["101", "010", "101"])]).unwrap();
    /// assert_eq!(t.width(), 3);
    /// assert!(GlyphTable::new("ragged", &[('X', &["101", "01"])]).is_err());
    /// ```
    pub fn new(name: &str, entries: &[(char, &[&str])]) -> Result<Self> {
        let Some((_, first)) = entries.first() else {
            return Err(CoreError::InvalidInput(format!("glyph table {name} is empty")));
        };
        let height = first.len();
        let width = first.first().map_or(0, |row| row.chars().count());
        if height == 0 || width == 0 {
            return Err(CoreError::InvalidInput(format!(
                "glyph table {name} has zero-sized glyphs"
            )));
        }

        let mut glyphs = HashMap::with_capacity(entries.len());
        for (ch, rows) in entries {
            if rows.len() != height {
                return Err(CoreError::InvalidInput(format!(
                    "glyph {ch:?} in {name} has {} rows, expected {height}",
                    rows.len()
                )));
            }
            let mut bits = Vec::with_capacity(height);
            for row in *rows {
                let parsed: Vec<bool> = row
                    .chars()
                    .map(|c| match c {
                        '1' => Ok(true),
                        '0' => Ok(false),
                        other => Err(CoreError::InvalidInput(format!(
                            "glyph {ch:?} in {name} contains {other:?}"
                        ))),
                    })
                    .collect::<Result<_>>()?;
                if parsed.len() != width {
                    return Err(CoreError::InvalidInput(format!(
                        "glyph {ch:?} in {name} has a row of width {}, expected {width}",
                        parsed.len()
                    )));
                }
                bits.push(parsed);
            }
            glyphs.insert(*ch, Glyph { rows: bits });
        }

        let fallback = glyphs
            .get(&' ')
            .cloned()
            .unwrap_or_else(|| Glyph::blank(width, height));

        Ok(Self {
            name: name.to_string(),
            width,
            height,
            glyphs,
            fallback,
        })
    }

    /// Built-in font by name (`"block"` or `"simple"`).
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        let entries = match name.to_ascii_lowercase().as_str() {
            "block" => BLOCK,
            "simple" => SIMPLE,
            _ => return None,
        };
        match Self::new(name, entries) {
            Ok(table) => Some(table),
            Err(e) => {
                log::warn!("Built-in font {name} rejected: {e}");
                None
            }
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Glyph for `ch`, or the blank fallback. Lookup is exact: callers
    /// upper-case first.
    #[must_use]
    pub fn glyph(&self, ch: char) -> &Glyph {
        self.glyphs.get(&ch).unwrap_or(&self.fallback)
    }

    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_fonts_load() {
        for name in FONT_NAMES {
            let font = GlyphTable::named(name).unwrap();
            assert_eq!(font.width(), 5, "{name}");
            for ch in ('A'..='Z').chain('0'..='9') {
                assert!(font.contains(ch), "{name} is missing {ch}");
            }
        }
        assert_eq!(GlyphTable::named("block").unwrap().height(), 7);
        assert_eq!(GlyphTable::named("simple").unwrap().height(), 5);
    }

    #[test]
    fn space_glyph_is_blank() {
        for name in FONT_NAMES {
            let font = GlyphTable::named(name).unwrap();
            assert!(font.glyph(' ').is_blank());
        }
    }

    #[test]
    fn fallback_is_synthesised_without_space() {
        let t = GlyphTable::new("dots", &[('O', &["11", "11"])]).unwrap();
        let g = t.glyph('?');
        assert!(g.is_blank());
        assert_eq!(g.row(0).len(), 2);
        assert_eq!(g.row(1).len(), 2);
    }

    #[test]
    fn row_count_mismatch_is_invalid_input() {
        let err = GlyphTable::new("bad", &[('A', &["1", "1"]), ('B', &["1"])]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn non_binary_row_is_invalid_input() {
        let err = GlyphTable::new("bad", &[('A', &["1x1"])]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn empty_table_is_invalid_input() {
        assert!(GlyphTable::new("none", &[]).is_err());
    }

    #[test]
    fn unknown_font_is_none() {
        assert!(GlyphTable::named("gothic").is_none());
    }
}
