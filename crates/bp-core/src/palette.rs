use crate::error::{CoreError, Result};

/// Gradient used when the caller explicitly asks for `"default"`.
/// Ordered darkest → lightest.
pub const DEFAULT_GRADIENT: &[&str] = &["⬛", "▪️", "🔸", "🔹", "◻️", "⬜"];

/// Built-in emoji sets, in listing order.
pub const EMOJI_SETS: &[(&str, &[&str])] = &[
    ("default", DEFAULT_GRADIENT),
    (
        "geometric",
        &[
            "⬛", "⬜", "🔲", "🔳", "◼️", "◻️", "▪️", "▫️", "🔸", "🔹", "🔶", "🔷", "🔴", "🟠", "🟡",
            "🟢",
        ],
    ),
    (
        "faces",
        &[
            "😀", "😃", "😄", "😁", "😆", "😅", "😂", "🤣", "😊", "😇", "🙂", "🙃", "😉", "😌", "😍",
            "🥰",
        ],
    ),
    (
        "hearts",
        &[
            "❤️", "🧡", "💛", "💚", "💙", "💜", "🖤", "🤍", "🤎", "💔", "❣️", "💕", "💞", "💓", "💗",
            "💖",
        ],
    ),
    (
        "nature",
        &[
            "🌸", "🌺", "🌻", "🌹", "🌷", "🌿", "🍀", "🌾", "🌵", "🌲", "🌳", "🌴", "🌱", "🍃",
        ],
    ),
    (
        "animals",
        &[
            "🐱", "🐶", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼", "🐨", "🐯", "🦁", "🐮", "🐷", "🐸", "🐙",
            "🦋",
        ],
    ),
    (
        "food",
        &[
            "🍎", "🍊", "🍋", "🍌", "🍉", "🍇", "🍓", "🍑", "🍒", "🥥", "🥝", "🍅", "🥑", "🍆", "🥕",
            "🌽",
        ],
    ),
    (
        "fire",
        &["🔥", "💥", "✨", "⭐", "🌟", "💫", "⚡", "🌈", "☀️", "🌞"],
    ),
    (
        "water",
        &["💧", "💦", "🌊", "🏊", "🚿", "🛁", "🌧️", "⛈️", "🌦️", "☔"],
    ),
];

/// Ordered, non-empty list of output symbols for gradient bucketing.
///
/// Index selection is monotonic in intensity and clamped to the last symbol.
///
/// # Example
/// ```
/// use bp_core::palette::Palette;
/// let p = Palette::new(vec![" ".into(), ".".into(), "#".into()]).unwrap();
/// assert_eq!(p.symbol_for(0), " ");
/// assert_eq!(p.symbol_for(255), "#");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    symbols: Vec<String>,
}

impl Palette {
    /// Build a palette from owned symbols.
    ///
    /// # Errors
    /// `InvalidPalette` when `symbols` is empty.
    pub fn new(symbols: Vec<String>) -> Result<Self> {
        if symbols.is_empty() {
            return Err(CoreError::InvalidPalette("palette is empty".into()));
        }
        Ok(Self { symbols })
    }

    /// Look up a built-in set. `"default"` is the only name that yields
    /// [`DEFAULT_GRADIENT`].
    ///
    /// # Example
    /// ```
    /// use bp_core::palette::Palette;
    /// assert_eq!(Palette::named("default").unwrap().len(), 6);
    /// assert!(Palette::named("plaid").is_none());
    /// ```
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        EMOJI_SETS
            .iter()
            .find(|(set, _)| set.eq_ignore_ascii_case(name))
            .map(|(_, symbols)| Self {
                symbols: symbols.iter().map(|s| (*s).to_string()).collect(),
            })
    }

    /// Parse a comma-separated custom list. Entries are trimmed, blanks dropped.
    ///
    /// # Errors
    /// `InvalidPalette` when nothing is left after trimming.
    ///
    /// # Example
    /// ```
    /// use bp_core::palette::Palette;
    /// let p = Palette::parse("🌑, 🌓 ,,🌕").unwrap();
    /// assert_eq!(p.symbols(), ["🌑", "🌓", "🌕"]);
    /// assert!(Palette::parse(" , ").is_err());
    /// ```
    pub fn parse(list: &str) -> Result<Self> {
        let symbols: Vec<String> = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        Self::new(symbols).map_err(|_| {
            CoreError::InvalidPalette(format!("no symbols in custom list {list:?}"))
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[must_use]
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// `floor(intensity / 255 · (len − 1))`, computed in integers.
    ///
    /// # Example
    /// ```
    /// use bp_core::palette::Palette;
    /// let p = Palette::named("default").unwrap();
    /// assert_eq!(p.index_for(0), 0);
    /// assert_eq!(p.index_for(128), 2);
    /// assert_eq!(p.index_for(255), 5);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn index_for(&self, intensity: u8) -> usize {
        let last = self.symbols.len().saturating_sub(1);
        (usize::from(intensity) * last / 255).min(last)
    }

    #[inline(always)]
    #[must_use]
    pub fn symbol_for(&self, intensity: u8) -> &str {
        &self.symbols[self.index_for(intensity)]
    }
}

/// Names of the built-in sets, in listing order.
#[must_use]
pub fn set_names() -> Vec<&'static str> {
    EMOJI_SETS.iter().map(|(name, _)| *name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_palette_is_rejected() {
        let err = Palette::new(Vec::new()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidPalette(_)));
    }

    #[test]
    fn index_is_monotonic_and_in_range() {
        for name in set_names() {
            let p = Palette::named(name).unwrap();
            let mut prev = 0usize;
            for i in 0..=255u8 {
                let idx = p.index_for(i);
                assert!(idx < p.len(), "{name}: index {idx} out of range");
                assert!(idx >= prev, "{name}: non monotone à intensité {i}");
                prev = idx;
            }
            assert_eq!(p.index_for(255), p.len() - 1);
        }
    }

    #[test]
    fn single_symbol_palette_always_picks_it() {
        let p = Palette::new(vec!["@".into()]).unwrap();
        assert_eq!(p.symbol_for(0), "@");
        assert_eq!(p.symbol_for(255), "@");
    }

    #[test]
    fn named_lookup_ignores_case() {
        assert!(Palette::named("Hearts").is_some());
    }

    #[test]
    fn every_set_is_non_empty() {
        for (name, symbols) in EMOJI_SETS {
            assert!(!symbols.is_empty(), "{name} is empty");
        }
    }
}
