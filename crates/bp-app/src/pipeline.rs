use bp_core::config::{MosaicMode, RenderConfig, RenderMode};
use bp_core::error::{CoreError, Result};
use bp_core::frame::PixelBuffer;
use bp_core::glyph::GlyphTable;
use bp_core::palette::Palette;
use bp_grid::braille::process_braille;
use bp_grid::compose::{
    FADE_LEVELS, SCATTER_CHARS, add_border, apply_gradient, scatter_gradient,
};
use bp_grid::emoji::{MosaicSymbols, process_mosaic};
use bp_grid::sampler::PixelSampler;
use bp_grid::text::{TextStyle, render_text};

/// Font used for emoji text when the caller names none.
pub const EMOJI_TEXT_FONT: &str = "simple";

/// Palette for gradient mosaics: the custom list when one is given,
/// otherwise the named set.
///
/// # Errors
/// `InvalidPalette` for an unknown set name or a custom list with no symbols.
pub fn palette_for(config: &RenderConfig) -> Result<Palette> {
    if let Some(list) = config.custom_emojis.as_deref().filter(|l| !l.trim().is_empty()) {
        return Palette::parse(list);
    }
    Palette::named(&config.emoji_set).ok_or_else(|| {
        CoreError::InvalidPalette(format!("unknown emoji set {:?}", config.emoji_set))
    })
}

/// Image → Braille or emoji mosaic, with the configured border.
///
/// # Errors
/// `InvalidDimension` for an out-of-range grid, `InvalidPalette` for a bad
/// palette, `InvalidInput` for `RenderMode::Ascii` (text only).
pub fn render_image(frame: &PixelBuffer, mode: RenderMode, config: &RenderConfig) -> Result<String> {
    let (cols, rows) = config.grid_size()?;

    let flattened;
    let frame = match config.background {
        Some(bg) => {
            flattened = frame.flatten_onto(bg);
            &flattened
        }
        None => frame,
    };
    let sampler = PixelSampler::new(frame, cols, rows, config.sampling);

    let art = match mode {
        RenderMode::Braille => {
            process_braille(&sampler, cols, rows, config.threshold, config.invert)?
        }
        RenderMode::Emoji => match config.mosaic_mode {
            MosaicMode::Binary => {
                let symbols = MosaicSymbols::Binary {
                    on: &config.on_symbol,
                    off: &config.off_symbol,
                };
                process_mosaic(&sampler, cols, rows, symbols, config.threshold, config.invert)?
            }
            MosaicMode::Gradient => {
                let palette = palette_for(config)?;
                let symbols = MosaicSymbols::Gradient(&palette);
                process_mosaic(&sampler, cols, rows, symbols, config.threshold, config.invert)?
            }
        },
        RenderMode::Ascii => {
            return Err(CoreError::InvalidInput(
                "ascii mode renders text; use braille or emoji for images".into(),
            ));
        }
    };
    log::info!(
        "Rendered {}×{} image as {mode:?} ({cols}×{rows})",
        frame.width,
        frame.height
    );
    Ok(frame_art(art, config))
}

/// Text → block letters (`Ascii`) or emoji letters (`Emoji`).
///
/// `Ascii` paints `█` on blank and honours the fade and scatter flags;
/// `Emoji` paints the on/off symbols. Post-effects run before the border.
///
/// # Errors
/// `InvalidInput` for blank text, an unknown font or `RenderMode::Braille`.
pub fn render_text_art(
    text: &str,
    mode: RenderMode,
    config: &RenderConfig,
    rng: &mut fastrand::Rng,
) -> Result<String> {
    if text.trim().is_empty() {
        return Err(CoreError::InvalidInput("no text provided".into()));
    }
    let table = GlyphTable::named(&config.font)
        .ok_or_else(|| CoreError::InvalidInput(format!("unknown font {:?}", config.font)))?;

    let art = match mode {
        RenderMode::Ascii => {
            let style = TextStyle::ascii().with_spacing(config.spacing);
            let solid = style.on;
            let art = render_text(text, &table, style);
            if config.scatter {
                scatter_gradient(&art, SCATTER_CHARS, rng)
            } else if config.gradient {
                apply_gradient(&art, solid, FADE_LEVELS)
            } else {
                art
            }
        }
        RenderMode::Emoji => {
            if config.on_symbol.is_empty() || config.off_symbol.is_empty() {
                return Err(CoreError::InvalidPalette(
                    "emoji text needs a non-empty on and off symbol".into(),
                ));
            }
            let style =
                TextStyle::new(&config.on_symbol, &config.off_symbol).with_spacing(config.spacing);
            render_text(text, &table, style)
        }
        RenderMode::Braille => {
            return Err(CoreError::InvalidInput("braille mode needs an image".into()));
        }
    };
    log::info!(
        "Rendered {} chars of text as {mode:?} with font {}",
        text.chars().count(),
        table.name()
    );
    Ok(frame_art(art, config))
}

fn frame_art(art: String, config: &RenderConfig) -> String {
    if config.border {
        add_border(&art, &config.border_symbol)
    } else {
        art
    }
}

#[cfg(test)]
mod tests {
    use bp_core::config::SamplingStrategy;

    use super::*;

    fn small(cols: u32, rows: u32) -> RenderConfig {
        RenderConfig {
            cols,
            rows: Some(rows),
            ..RenderConfig::default()
        }
    }

    fn text(input: &str, mode: RenderMode, config: &RenderConfig) -> Result<String> {
        render_text_art(input, mode, config, &mut fastrand::Rng::new())
    }

    #[test]
    fn braille_white_block() {
        let frame = PixelBuffer::filled(2, 4, [255, 255, 255, 255]);
        let art = render_image(&frame, RenderMode::Braille, &small(2, 4)).unwrap();
        assert_eq!(art, "\u{28FF}");
    }

    #[test]
    fn transparent_pixels_follow_background() {
        let frame = PixelBuffer::filled(2, 4, [0, 0, 0, 0]);
        let mut config = small(2, 4);
        assert_eq!(render_image(&frame, RenderMode::Braille, &config).unwrap(), "\u{2800}");
        config.background = Some((255, 255, 255));
        assert_eq!(render_image(&frame, RenderMode::Braille, &config).unwrap(), "\u{28FF}");
    }

    #[test]
    fn emoji_binary_uses_on_off() {
        let frame = PixelBuffer::filled(4, 4, [255, 255, 255, 255]);
        let config = RenderConfig {
            mosaic_mode: MosaicMode::Binary,
            ..small(3, 2)
        };
        let art = render_image(&frame, RenderMode::Emoji, &config).unwrap();
        assert_eq!(art, "🔥🔥🔥\n🔥🔥🔥");
    }

    #[test]
    fn emoji_gradient_uses_named_set() {
        let frame = PixelBuffer::filled(4, 4, [0, 0, 0, 255]);
        let config = RenderConfig {
            emoji_set: "fire".into(),
            sampling: SamplingStrategy::Averaged,
            ..small(2, 1)
        };
        assert_eq!(render_image(&frame, RenderMode::Emoji, &config).unwrap(), "🔥🔥");
    }

    #[test]
    fn custom_emojis_override_set() {
        let frame = PixelBuffer::filled(4, 4, [255, 255, 255, 255]);
        let config = RenderConfig {
            custom_emojis: Some("🌑, 🌓 ,🌕".into()),
            ..small(1, 1)
        };
        assert_eq!(render_image(&frame, RenderMode::Emoji, &config).unwrap(), "🌕");
    }

    #[test]
    fn unknown_set_is_invalid_palette() {
        let config = RenderConfig {
            emoji_set: "nope".into(),
            ..RenderConfig::default()
        };
        assert!(matches!(palette_for(&config), Err(CoreError::InvalidPalette(_))));
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let frame = PixelBuffer::filled(4, 4, [0, 0, 0, 255]);
        let err = render_image(&frame, RenderMode::Braille, &small(500, 4)).unwrap_err();
        assert_eq!(err, CoreError::InvalidDimension { cols: 500, rows: 4 });
    }

    #[test]
    fn ascii_image_is_invalid_input() {
        let frame = PixelBuffer::filled(4, 4, [0, 0, 0, 255]);
        let err = render_image(&frame, RenderMode::Ascii, &small(2, 2)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn border_frames_image_output() {
        let frame = PixelBuffer::filled(2, 4, [255, 255, 255, 255]);
        let config = RenderConfig {
            border: true,
            border_symbol: "#".into(),
            ..small(2, 4)
        };
        let art = render_image(&frame, RenderMode::Braille, &config).unwrap();
        assert_eq!(art, "#####\n# \u{28FF} #\n#####");
    }

    #[test]
    fn ascii_text_has_font_height() {
        let config = RenderConfig::default();
        let art = text("Hi", RenderMode::Ascii, &config).unwrap();
        assert_eq!(art.split('\n').count(), 7);
        assert!(art.contains('█'));
    }

    #[test]
    fn fade_then_border_keeps_frame_solid() {
        let config = RenderConfig {
            font: "simple".into(),
            gradient: true,
            border: true,
            ..RenderConfig::default()
        };
        let art = text("I", RenderMode::Ascii, &config).unwrap();
        let lines: Vec<&str> = art.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].chars().all(|c| c == '█'));
        assert_eq!(lines[1], "█ █████ █");
        assert!(lines[5].contains('░'));
    }

    #[test]
    fn scatter_is_reproducible_with_seed() {
        let config = RenderConfig {
            scatter: true,
            ..RenderConfig::default()
        };
        let seeded = || fastrand::Rng::with_seed(9);
        let a = render_text_art("AB", RenderMode::Ascii, &config, &mut seeded()).unwrap();
        let b = render_text_art("AB", RenderMode::Ascii, &config, &mut seeded()).unwrap();
        assert_eq!(a, b);
        assert!(!a.contains('█'));
    }

    #[test]
    fn emoji_text_paints_symbols() {
        let config = RenderConfig {
            font: EMOJI_TEXT_FONT.into(),
            ..RenderConfig::default()
        };
        let art = text("i", RenderMode::Emoji, &config).unwrap();
        assert_eq!(art.lines().next(), Some("🔥🔥🔥🔥🔥"));
        assert_eq!(art.lines().count(), 5);
    }

    #[test]
    fn blank_text_is_invalid_input() {
        let config = RenderConfig::default();
        let err = text("  ", RenderMode::Ascii, &config).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn unknown_font_is_invalid_input() {
        let config = RenderConfig {
            font: "gothic".into(),
            ..RenderConfig::default()
        };
        let err = text("A", RenderMode::Ascii, &config).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }
}
