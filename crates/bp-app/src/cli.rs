use std::path::PathBuf;

use bp_core::config::{MosaicMode, RenderConfig, SamplingStrategy};
use clap::{Args, Parser, Subcommand};

/// braillepixel: images and text to Braille, emoji mosaic and block-letter art.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file. Missing file = built-in defaults.
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level: error, warn, info, debug, trace.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert an image to Braille patterns.
    Braille {
        /// Image path or `data:` URI.
        image: String,
        #[command(flatten)]
        grid: GridArgs,
    },
    /// Convert an image to an emoji mosaic, or write text in emoji letters.
    Emoji {
        /// Image path or `data:` URI.
        #[arg(required_unless_present = "text")]
        image: Option<String>,
        /// Render this text instead of an image.
        #[arg(long, conflicts_with = "image")]
        text: Option<String>,
        #[command(flatten)]
        grid: GridArgs,
        #[command(flatten)]
        emoji: EmojiArgs,
        #[command(flatten)]
        style: TextArgs,
    },
    /// Write text in large block letters.
    Text {
        text: String,
        #[command(flatten)]
        style: TextArgs,
        /// Deterministic top-to-bottom fade.
        #[arg(long)]
        gradient: bool,
        /// Random character scatter (non-deterministic).
        #[arg(long)]
        scatter: bool,
        /// Frame the output.
        #[arg(long)]
        border: bool,
    },
    /// Read a JSON conversion request (file or stdin) and print the JSON response.
    Request {
        /// Request file. Reads stdin when absent or `-`.
        input: Option<PathBuf>,
    },
    /// List the built-in emoji sets.
    Sets {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Preview the built-in fonts.
    Fonts,
}

/// Grid options shared by the image commands.
#[derive(Args, Debug, Default)]
pub struct GridArgs {
    /// Logical columns.
    #[arg(long)]
    pub cols: Option<u32>,
    /// Logical rows. Derived from cols when absent.
    #[arg(long)]
    pub rows: Option<u32>,
    /// On/off threshold [0, 255].
    #[arg(long)]
    pub threshold: Option<u8>,
    /// Raise dots for dark pixels instead of bright ones.
    #[arg(long)]
    pub invert: bool,
    /// nearest or averaged.
    #[arg(long)]
    pub sampling: Option<SamplingStrategy>,
    /// Frame the output.
    #[arg(long)]
    pub border: bool,
}

impl GridArgs {
    pub fn apply(&self, config: &mut RenderConfig) {
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if self.rows.is_some() {
            config.rows = self.rows;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        config.invert |= self.invert;
        if let Some(sampling) = self.sampling {
            config.sampling = sampling;
        }
        config.border |= self.border;
    }
}

/// Mosaic options.
#[derive(Args, Debug, Default)]
pub struct EmojiArgs {
    /// binary or gradient.
    #[arg(long)]
    pub mode: Option<MosaicMode>,
    /// Named emoji set (see `sets`).
    #[arg(long)]
    pub set: Option<String>,
    /// Comma-separated custom palette, darkest first.
    #[arg(long)]
    pub custom: Option<String>,
}

impl EmojiArgs {
    pub fn apply(&self, config: &mut RenderConfig) {
        if let Some(mode) = self.mode {
            config.mosaic_mode = mode;
        }
        if let Some(set) = &self.set {
            config.emoji_set.clone_from(set);
        }
        if self.custom.is_some() {
            config.custom_emojis.clone_from(&self.custom);
        }
    }
}

/// Letter options shared by `text` and `emoji --text`.
#[derive(Args, Debug, Default)]
pub struct TextArgs {
    /// Font name (see `fonts`).
    #[arg(long)]
    pub font: Option<String>,
    /// Off symbols between letters.
    #[arg(long)]
    pub spacing: Option<usize>,
    /// Symbol for set bits and binary "on" cells.
    #[arg(long)]
    pub on: Option<String>,
    /// Symbol for clear bits and binary "off" cells.
    #[arg(long)]
    pub off: Option<String>,
}

impl TextArgs {
    pub fn apply(&self, config: &mut RenderConfig) {
        if let Some(font) = &self.font {
            config.font.clone_from(font);
        }
        if let Some(spacing) = self.spacing {
            config.spacing = spacing;
        }
        if let Some(on) = &self.on {
            config.on_symbol.clone_from(on);
        }
        if let Some(off) = &self.off {
            config.off_symbol.clone_from(off);
        }
        config.clamp_all();
    }
}
