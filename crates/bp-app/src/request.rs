use bp_core::config::{MosaicMode, RenderConfig, RenderMode, SamplingStrategy};
use bp_core::error::{CoreError, ErrorKind, Result};
use bp_core::palette::EMOJI_SETS;
use serde::{Deserialize, Serialize};

use crate::pipeline::{EMOJI_TEXT_FONT, render_image, render_text_art};

/// Largest accepted `image` payload, in bytes of base64 text.
pub const MAX_IMAGE_PAYLOAD: usize = 8 * 1024 * 1024;
/// Largest accepted `text`, in characters.
pub const MAX_TEXT_CHARS: usize = 256;

/// One conversion, as received over the wire. Every field is optional;
/// absent fields keep the base configuration.
///
/// `width` is accepted for `cols`, and `emoji` for `on_emoji`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ConversionRequest {
    /// `"braille"`, `"emoji"` or `"ascii"`. Inferred when absent: an image
    /// becomes Braille, text becomes ASCII letters.
    pub kind: Option<String>,
    /// `data:image/...;base64,...` or bare base64.
    pub image: Option<String>,
    pub text: Option<String>,
    #[serde(alias = "width")]
    pub cols: Option<i64>,
    pub rows: Option<i64>,
    pub threshold: Option<i64>,
    pub invert: Option<bool>,
    /// `"binary"`, `"gradient"`, or `"text"`/`"image"` to pick the emoji input.
    pub mode: Option<String>,
    pub font: Option<String>,
    pub spacing: Option<usize>,
    pub border: Option<bool>,
    pub gradient: Option<bool>,
    pub scatter: Option<bool>,
    #[serde(alias = "emoji")]
    pub on_emoji: Option<String>,
    pub off_emoji: Option<String>,
    pub emoji_set: Option<String>,
    pub custom_emojis: Option<String>,
    pub sampling: Option<String>,
    pub background: Option<(u8, u8, u8)>,
}

/// Result of [`handle`]: `result` on success, `error` and `kind` otherwise.
/// `status` follows HTTP conventions and is not serialized.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ConversionResponse {
    #[serde(skip)]
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
}

impl ConversionResponse {
    #[must_use]
    pub fn ok(result: String) -> Self {
        Self {
            status: 200,
            result: Some(result),
            error: None,
            kind: None,
        }
    }

    #[must_use]
    pub fn from_error(err: &CoreError) -> Self {
        let kind = err.kind();
        Self {
            status: status_for(kind),
            result: None,
            error: Some(err.to_string()),
            kind: Some(kind.as_str()),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Status signal for an error kind: decode failures are 422, the rest 400.
///
/// # Example
/// ```
/// use bp_app::request::status_for;
/// use bp_core::error::ErrorKind;
/// assert_eq!(status_for(ErrorKind::InvalidPalette), 400);
/// assert_eq!(status_for(ErrorKind::DecodeFailure), 422);
/// ```
#[must_use]
pub fn status_for(kind: ErrorKind) -> u16 {
    match kind {
        ErrorKind::InvalidInput | ErrorKind::InvalidDimension | ErrorKind::InvalidPalette => 400,
        ErrorKind::DecodeFailure => 422,
    }
}

/// A built-in emoji set, as listed to clients.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct EmojiSet {
    pub name: &'static str,
    pub emojis: Vec<&'static str>,
}

/// Symbols shown per set by [`emoji_sets`].
pub const SET_PREVIEW_LEN: usize = 10;

/// All built-in emoji sets, in listing order, each cut to its first
/// [`SET_PREVIEW_LEN`] symbols. Rendering always uses the full set.
#[must_use]
pub fn emoji_sets() -> Vec<EmojiSet> {
    EMOJI_SETS
        .iter()
        .map(|&(name, emojis)| EmojiSet {
            name,
            emojis: emojis.iter().take(SET_PREVIEW_LEN).copied().collect(),
        })
        .collect()
}

fn dimension(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(if value < 0 { 0 } else { u32::MAX })
}

fn nonempty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

impl ConversionRequest {
    /// Layer the request fields over `base`.
    ///
    /// # Errors
    /// `InvalidDimension` for a non-positive grid side, `InvalidInput` for
    /// an out-of-range threshold or an unknown mode/sampling name.
    pub fn apply(&self, base: &RenderConfig) -> Result<RenderConfig> {
        let mut config = base.clone();

        if self.cols.is_some() || self.rows.is_some() {
            let cols = self.cols.map_or(config.cols, dimension);
            let rows = self.rows.map(dimension);
            if cols == 0 || rows == Some(0) {
                return Err(CoreError::InvalidDimension {
                    cols,
                    rows: rows.unwrap_or_else(|| config.resolved_rows()),
                });
            }
            config.cols = cols;
            if rows.is_some() {
                config.rows = rows;
            }
        }
        if let Some(t) = self.threshold {
            config.threshold = u8::try_from(t).map_err(|_| {
                CoreError::InvalidInput(format!("threshold must be within 0-255, got {t}"))
            })?;
        }
        if let Some(invert) = self.invert {
            config.invert = invert;
        }
        if let Some(mode) = self.mode.as_deref() {
            match mode.to_ascii_lowercase().as_str() {
                "text" | "image" => {}
                other => config.mosaic_mode = other.parse::<MosaicMode>()?,
            }
        }
        if let Some(sampling) = self.sampling.as_deref() {
            config.sampling = sampling.parse::<SamplingStrategy>()?;
        }
        if let Some(font) = nonempty(self.font.as_deref()) {
            config.font = font.to_string();
        }
        if let Some(spacing) = self.spacing {
            config.spacing = spacing;
        }
        if let Some(border) = self.border {
            config.border = border;
        }
        if let Some(gradient) = self.gradient {
            config.gradient = gradient;
        }
        if let Some(scatter) = self.scatter {
            config.scatter = scatter;
        }
        if let Some(on) = &self.on_emoji {
            config.on_symbol.clone_from(on);
        }
        if let Some(off) = &self.off_emoji {
            config.off_symbol.clone_from(off);
        }
        if let Some(set) = nonempty(self.emoji_set.as_deref()) {
            config.emoji_set = set.to_string();
        }
        if let Some(list) = &self.custom_emojis {
            config.custom_emojis = Some(list.clone());
        }
        if let Some(bg) = self.background {
            config.background = Some(bg);
        }
        config.clamp_all();
        Ok(config)
    }

    /// Explicit `kind`, or the one implied by which input is present.
    ///
    /// # Errors
    /// `InvalidInput` for an unknown kind.
    pub fn render_mode(&self) -> Result<RenderMode> {
        match nonempty(self.kind.as_deref()) {
            Some(kind) => kind.parse(),
            None if nonempty(self.image.as_deref()).is_some() => Ok(RenderMode::Braille),
            None => Ok(RenderMode::Ascii),
        }
    }

    fn wants_text(&self, mode: RenderMode) -> bool {
        match mode {
            RenderMode::Ascii => true,
            RenderMode::Braille => false,
            RenderMode::Emoji => {
                let text_mode = self
                    .mode
                    .as_deref()
                    .is_some_and(|m| m.eq_ignore_ascii_case("text"));
                text_mode || nonempty(self.image.as_deref()).is_none()
            }
        }
    }
}

fn convert(
    request: &ConversionRequest,
    base: &RenderConfig,
    rng: &mut fastrand::Rng,
) -> Result<String> {
    let mode = request.render_mode()?;
    let mut config = request.apply(base)?;

    if request.wants_text(mode) {
        let text = nonempty(request.text.as_deref())
            .ok_or_else(|| CoreError::InvalidInput("no text provided".into()))?;
        if text.chars().count() > MAX_TEXT_CHARS {
            return Err(CoreError::InvalidInput(format!(
                "text is longer than {MAX_TEXT_CHARS} characters"
            )));
        }
        if mode == RenderMode::Emoji && nonempty(request.font.as_deref()).is_none() {
            config.font = EMOJI_TEXT_FONT.to_string();
        }
        return render_text_art(text, mode, &config, rng);
    }

    let image = nonempty(request.image.as_deref())
        .ok_or_else(|| CoreError::InvalidInput("no image data provided".into()))?;
    if image.len() > MAX_IMAGE_PAYLOAD {
        return Err(CoreError::InvalidInput(format!(
            "image payload exceeds {MAX_IMAGE_PAYLOAD} bytes"
        )));
    }
    let frame = bp_source::decode_data_uri(image)?;
    render_image(&frame, mode, &config)
}

/// Run one conversion. Never panics on malformed input; every failure
/// becomes an error response.
///
/// # Example
/// ```
/// use bp_app::request::{ConversionRequest, handle};
/// use bp_core::config::RenderConfig;
///
/// let request = ConversionRequest {
///     text: Some("ok".into()),
///     font: Some("simple".into()),
///     ..ConversionRequest::default()
/// };
/// let response = handle(&request, &RenderConfig::default());
/// assert_eq!(response.status, 200);
/// assert_eq!(response.result.unwrap().lines().count(), 5);
/// ```
#[must_use]
pub fn handle(request: &ConversionRequest, base: &RenderConfig) -> ConversionResponse {
    match convert(request, base, &mut fastrand::Rng::new()) {
        Ok(result) => ConversionResponse::ok(result),
        Err(err) => {
            log::warn!("Conversion rejected: {err}");
            ConversionResponse::from_error(&err)
        }
    }
}

/// [`handle`] for a raw JSON body. A body that does not parse is
/// `InvalidInput` (400).
#[must_use]
pub fn handle_json(body: &str, base: &RenderConfig) -> ConversionResponse {
    match serde_json::from_str::<ConversionRequest>(body) {
        Ok(request) => handle(&request, base),
        Err(e) => {
            log::warn!("Malformed request body: {e}");
            ConversionResponse::from_error(&CoreError::InvalidInput(format!(
                "malformed request: {e}"
            )))
        }
    }
}
