/// Character-grid encoders for BraillePixel.
///
/// Maps a pixel buffer onto a logical grid and writes it out as Braille
/// cells or an emoji mosaic. Also renders text with bitmap fonts.
pub mod braille;
pub mod compose;
pub mod emoji;
pub mod sampler;
pub mod text;

pub use braille::process_braille;
pub use emoji::{MosaicSymbols, process_mosaic};
pub use sampler::PixelSampler;
pub use text::{TextStyle, render_text};
