/// Shared types for BraillePixel.
///
/// Pixel buffers, the error taxonomy, configuration, palettes and glyph
/// tables. Nothing in here does I/O except `config::load_config`.

pub mod config;
pub mod error;
pub mod frame;
pub mod glyph;
pub mod palette;

pub use config::RenderConfig;
pub use error::{CoreError, ErrorKind};
pub use frame::PixelBuffer;
pub use glyph::GlyphTable;
pub use palette::Palette;
