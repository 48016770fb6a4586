use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Configuration complète d'une conversion.
///
/// Chargée depuis TOML (voir [`load_config`]) puis surchargée par requête.
///
/// # Example
/// ```
/// use bp_core::config::RenderConfig;
/// let config = RenderConfig::default();
/// assert_eq!(config.threshold, 127);
/// assert_eq!(config.grid_size().unwrap(), (40, 24));
/// ```
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct RenderConfig {
    // === Grille ===
    /// Logical columns (Braille: dot columns; emoji: cells).
    pub cols: u32,
    /// Logical rows. `None` = `floor(cols * aspect_ratio)`.
    pub rows: Option<u32>,
    /// Rows per column when `rows` is unset.
    pub aspect_ratio: f32,
    /// Upper bound accepted for `cols`.
    pub max_cols: u32,
    /// Upper bound accepted for `rows`.
    pub max_rows: u32,
    /// Seuil d'intensité [0, 255].
    pub threshold: u8,
    /// Inverser la règle on/off.
    pub invert: bool,
    /// How a logical cell reads the source image.
    pub sampling: SamplingStrategy,
    /// Composite alpha over this colour before sampling. `None` = ignore alpha.
    pub background: Option<(u8, u8, u8)>,

    // === Emoji ===
    pub mosaic_mode: MosaicMode,
    pub on_symbol: String,
    pub off_symbol: String,
    /// Named set from `palette::EMOJI_SETS`.
    pub emoji_set: String,
    /// Comma-separated list; overrides `emoji_set` when present.
    pub custom_emojis: Option<String>,

    // === Texte ===
    /// Font name from `glyph::FONT_NAMES`.
    pub font: String,
    /// Off-symbols between two glyphs.
    pub spacing: usize,
    pub border: bool,
    pub border_symbol: String,
    /// Deterministic top-to-bottom fade of the solid block symbol.
    pub gradient: bool,
    /// Random per-character substitution. Non-deterministic.
    pub scatter: bool,
}

/// What kind of art a request produces.
///
/// # Example
/// ```
/// use bp_core::config::RenderMode;
/// assert_eq!("emoji".parse::<RenderMode>().unwrap(), RenderMode::Emoji);
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Braille Unicode patterns (2×4 dots per character).
    #[default]
    Braille,
    /// One emoji per logical cell, or emoji text.
    Emoji,
    /// Block-letter text.
    Ascii,
}

/// Symbol selection for the emoji mosaic.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MosaicMode {
    /// Two symbols, on/off by threshold.
    Binary,
    /// Palette bucketed by intensity.
    #[default]
    Gradient,
}

/// Source-pixel sampling for one logical cell.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SamplingStrategy {
    /// The single mapped source pixel.
    #[default]
    Nearest,
    /// Mean luma over the cell's source rectangle.
    Averaged,
}

macro_rules! lowercase_from_str {
    ($ty:ty, $what:literal, { $($name:literal => $variant:expr),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $($name => Ok($variant),)+
                    other => Err(CoreError::InvalidInput(format!(
                        concat!("unknown ", $what, " {:?}"),
                        other
                    ))),
                }
            }
        }
    };
}

lowercase_from_str!(RenderMode, "render mode", {
    "braille" => RenderMode::Braille,
    "emoji" => RenderMode::Emoji,
    "ascii" => RenderMode::Ascii,
    "text" => RenderMode::Ascii,
});

lowercase_from_str!(MosaicMode, "mosaic mode", {
    "binary" => MosaicMode::Binary,
    "gradient" => MosaicMode::Gradient,
});

lowercase_from_str!(SamplingStrategy, "sampling strategy", {
    "nearest" => SamplingStrategy::Nearest,
    "averaged" => SamplingStrategy::Averaged,
});

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cols: 40,
            rows: None,
            aspect_ratio: 0.6,
            max_cols: 160,
            max_rows: 160,
            threshold: 127,
            invert: false,
            sampling: SamplingStrategy::Nearest,
            background: None,
            mosaic_mode: MosaicMode::Gradient,
            on_symbol: "🔥".to_string(),
            off_symbol: "⚪".to_string(),
            emoji_set: "default".to_string(),
            custom_emojis: None,
            font: "block".to_string(),
            spacing: 1,
            border: false,
            border_symbol: "█".to_string(),
            gradient: false,
            scatter: false,
        }
    }
}

impl RenderConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.aspect_ratio = self.aspect_ratio.clamp(0.1, 4.0);
        self.max_cols = self.max_cols.clamp(1, 1024);
        self.max_rows = self.max_rows.clamp(1, 1024);
        self.spacing = self.spacing.min(8);
        if self.border_symbol.is_empty() {
            self.border_symbol = "█".to_string();
        }
    }

    /// Rows to use: explicit, or derived from `cols` (never below 1).
    ///
    /// # Example
    /// ```
    /// use bp_core::config::RenderConfig;
    /// let config = RenderConfig { cols: 50, ..RenderConfig::default() };
    /// assert_eq!(config.resolved_rows(), 30);
    /// ```
    #[must_use]
    pub fn resolved_rows(&self) -> u32 {
        self.rows
            .unwrap_or_else(|| ((self.cols as f32 * self.aspect_ratio).floor() as u32).max(1))
    }

    /// Validated `(cols, rows)` for the encoders.
    ///
    /// # Errors
    /// `InvalidDimension` when either side is zero or above its cap.
    ///
    /// # Example
    /// ```
    /// use bp_core::config::RenderConfig;
    /// let config = RenderConfig { cols: 500, ..RenderConfig::default() };
    /// assert!(config.grid_size().is_err());
    /// ```
    pub fn grid_size(&self) -> std::result::Result<(u32, u32), CoreError> {
        let cols = self.cols;
        let rows = self.resolved_rows();
        if cols == 0 || rows == 0 || cols > self.max_cols || rows > self.max_rows {
            return Err(CoreError::InvalidDimension { cols, rows });
        }
        Ok((cols, rows))
    }
}

/// On-disk layout: three optional sections, each field optional.
#[derive(Deserialize)]
struct ConfigFile {
    grid: Option<GridSection>,
    emoji: Option<EmojiSection>,
    text: Option<TextSection>,
}

/// Grid section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct GridSection {
    cols: Option<u32>,
    rows: Option<u32>,
    aspect_ratio: Option<f32>,
    max_cols: Option<u32>,
    max_rows: Option<u32>,
    threshold: Option<u8>,
    invert: Option<bool>,
    sampling: Option<SamplingStrategy>,
    background: Option<(u8, u8, u8)>,
}

#[derive(Deserialize)]
struct EmojiSection {
    mode: Option<MosaicMode>,
    on_emoji: Option<String>,
    off_emoji: Option<String>,
    emoji_set: Option<String>,
    custom_emojis: Option<String>,
}

#[derive(Deserialize)]
struct TextSection {
    font: Option<String>,
    spacing: Option<usize>,
    border: Option<bool>,
    border_symbol: Option<String>,
    gradient: Option<bool>,
    scatter: Option<bool>,
}

/// Read a TOML file and layer it over [`RenderConfig::default`].
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use bp_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<RenderConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    parse_config(&content).with_context(|| format!("TOML parse error in {}", path.display()))
}

/// Same as [`load_config`] for an in-memory document.
///
/// # Errors
/// Returns an error if the document is not valid TOML for this schema.
///
/// # Example
/// ```
/// use bp_core::config::parse_config;
/// let config = parse_config("[grid]\ncols = 60\ninvert = true\n").unwrap();
/// assert_eq!(config.cols, 60);
/// assert!(config.invert);
/// assert_eq!(config.threshold, 127);
/// ```
pub fn parse_config(content: &str) -> Result<RenderConfig> {
    let file: ConfigFile = toml::from_str(content)?;
    let mut config = RenderConfig::default();

    if let Some(g) = file.grid {
        if let Some(v) = g.cols {
            config.cols = v;
        }
        if g.rows.is_some() {
            config.rows = g.rows;
        }
        if let Some(v) = g.aspect_ratio {
            config.aspect_ratio = v;
        }
        if let Some(v) = g.max_cols {
            config.max_cols = v;
        }
        if let Some(v) = g.max_rows {
            config.max_rows = v;
        }
        if let Some(v) = g.threshold {
            config.threshold = v;
        }
        if let Some(v) = g.invert {
            config.invert = v;
        }
        if let Some(v) = g.sampling {
            config.sampling = v;
        }
        if g.background.is_some() {
            config.background = g.background;
        }
    }

    if let Some(e) = file.emoji {
        if let Some(v) = e.mode {
            config.mosaic_mode = v;
        }
        if let Some(v) = e.on_emoji {
            config.on_symbol = v;
        }
        if let Some(v) = e.off_emoji {
            config.off_symbol = v;
        }
        if let Some(v) = e.emoji_set {
            config.emoji_set = v;
        }
        if e.custom_emojis.is_some() {
            config.custom_emojis = e.custom_emojis;
        }
    }

    if let Some(t) = file.text {
        if let Some(v) = t.font {
            config.font = v;
        }
        if let Some(v) = t.spacing {
            config.spacing = v;
        }
        if let Some(v) = t.border {
            config.border = v;
        }
        if let Some(v) = t.border_symbol {
            config.border_symbol = v;
        }
        if let Some(v) = t.gradient {
            config.gradient = v;
        }
        if let Some(v) = t.scatter {
            config.scatter = v;
        }
    }

    config.clamp_all();
    log::debug!(
        "Config: {}×{} threshold={} sampling={:?}",
        config.cols,
        config.resolved_rows(),
        config.threshold,
        config.sampling
    );
    Ok(config)
}
