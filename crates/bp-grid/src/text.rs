use bp_core::glyph::GlyphTable;

/// Symbols used to paint glyph bits.
///
/// # Example
/// ```
/// use bp_grid::text::TextStyle;
/// let style = TextStyle::ascii();
/// assert_eq!(style.on, "█");
/// assert_eq!(style.spacing, 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle<'a> {
    /// Painted for a `1` bit.
    pub on: &'a str,
    /// Painted for a `0` bit, and repeated `spacing` times between glyphs.
    pub off: &'a str,
    pub spacing: usize,
}

impl<'a> TextStyle<'a> {
    #[must_use]
    pub fn new(on: &'a str, off: &'a str) -> Self {
        Self {
            on,
            off,
            spacing: 1,
        }
    }

    /// Solid block on a blank background.
    #[must_use]
    pub fn ascii() -> TextStyle<'static> {
        TextStyle::new("█", " ")
    }

    #[must_use]
    pub fn with_spacing(mut self, spacing: usize) -> Self {
        self.spacing = spacing;
        self
    }
}

/// Render `text` in large letters.
///
/// Text is upper-cased first. Each of the table's `H` rows concatenates the
/// row bits of every character, separated by `spacing` off-symbols (none
/// after the last). Unknown characters render as the blank glyph. Rows are
/// right-trimmed; the result always has exactly `H` lines.
///
/// # Example
/// ```
/// use bp_core::glyph::GlyphTable;
/// use bp_grid::text::{TextStyle, render_text};
///
/// let font = GlyphTable::named("simple").unwrap();
/// let art = render_text("hi", &font, TextStyle::new("#", "."));
/// assert_eq!(art.lines().count(), 5);
/// assert_eq!(art.lines().next(), Some("#...#.#####"));
/// ```
#[must_use]
pub fn render_text(text: &str, table: &GlyphTable, style: TextStyle<'_>) -> String {
    let upper = text.to_uppercase();
    let glyphs: Vec<_> = upper.chars().map(|ch| table.glyph(ch)).collect();
    log::debug!(
        "Text: {} glyphs, font {} ({}×{})",
        glyphs.len(),
        table.name(),
        table.width(),
        table.height()
    );

    let separator = style.off.repeat(style.spacing);
    let mut lines = Vec::with_capacity(table.height());
    for row in 0..table.height() {
        let mut line = String::new();
        for (i, glyph) in glyphs.iter().enumerate() {
            if i > 0 {
                line.push_str(&separator);
            }
            for &bit in glyph.row(row) {
                line.push_str(if bit { style.on } else { style.off });
            }
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}
