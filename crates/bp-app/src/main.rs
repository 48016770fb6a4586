use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use bp_app::cli::{Cli, Command};
use bp_app::pipeline::{EMOJI_TEXT_FONT, render_image, render_text_art};
use bp_app::request::{emoji_sets, handle_json};
use bp_core::config::{RenderConfig, RenderMode};
use bp_core::glyph::{FONT_NAMES, GlyphTable};
use bp_grid::text::{TextStyle, render_text};
use bp_source::ImageInput;
use clap::Parser;

fn main() -> Result<ExitCode> {
    // 1. CLI
    let cli = Cli::parse();

    // 2. Logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Config
    let mut config = resolve_config(&cli.config)?;
    let mut rng = fastrand::Rng::new();

    // 4. Dispatch
    match cli.command {
        Command::Braille { image, grid } => {
            grid.apply(&mut config);
            let frame = ImageInput::parse(&image).load()?;
            println!("{}", render_image(&frame, RenderMode::Braille, &config)?);
        }
        Command::Emoji {
            image,
            text,
            grid,
            emoji,
            style,
        } => {
            grid.apply(&mut config);
            emoji.apply(&mut config);
            if style.font.is_none() && text.is_some() {
                config.font = EMOJI_TEXT_FONT.to_string();
            }
            style.apply(&mut config);
            let art = match (text, image) {
                (Some(text), _) => render_text_art(&text, RenderMode::Emoji, &config, &mut rng)?,
                (None, Some(image)) => {
                    let frame = ImageInput::parse(&image).load()?;
                    render_image(&frame, RenderMode::Emoji, &config)?
                }
                (None, None) => anyhow::bail!("emoji needs an image or --text"),
            };
            println!("{art}");
        }
        Command::Text {
            text,
            style,
            gradient,
            scatter,
            border,
        } => {
            style.apply(&mut config);
            config.gradient |= gradient;
            config.scatter |= scatter;
            config.border |= border;
            println!("{}", render_text_art(&text, RenderMode::Ascii, &config, &mut rng)?);
        }
        Command::Request { input } => {
            let body = read_request(input.as_deref())?;
            let response = handle_json(&body, &config);
            println!("{}", serde_json::to_string_pretty(&response)?);
            if !response.is_ok() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Sets { json } => {
            let sets = emoji_sets();
            if json {
                println!("{}", serde_json::to_string_pretty(&sets)?);
            } else {
                for set in sets {
                    println!("{:<10} {}", set.name, set.emojis.join(" "));
                }
            }
        }
        Command::Fonts => {
            for name in FONT_NAMES {
                let Some(table) = GlyphTable::named(name) else {
                    continue;
                };
                println!("{name} ({}×{})", table.width(), table.height());
                println!("{}\n", render_text("ABC", &table, TextStyle::ascii()));
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Load the config file, or fall back to defaults when it does not exist.
fn resolve_config(path: &Path) -> Result<RenderConfig> {
    if path.exists() {
        bp_core::config::load_config(path)
    } else {
        log::warn!("Config not found: {}. Using defaults.", path.display());
        Ok(RenderConfig::default())
    }
}

fn read_request(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request {}", path.display())),
        _ => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("Failed to read request from stdin")?;
            Ok(body)
        }
    }
}
