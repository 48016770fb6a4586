use std::path::{Path, PathBuf};

use anyhow::Context;
use base64::Engine;
use bp_core::error::{CoreError, Result};
use bp_core::frame::PixelBuffer;

fn into_buffer(img: &image::DynamicImage) -> PixelBuffer {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer {
        data: rgba.into_raw(),
        width,
        height,
    }
}

/// Load an image file into an RGBA buffer.
///
/// # Errors
/// Returns an error if the file cannot be read or decoded.
///
/// # Example
/// ```no_run
/// use bp_source::image::load_image;
/// use std::path::Path;
/// let frame = load_image(Path::new("photo.png")).unwrap();
/// ```
pub fn load_image(path: &Path) -> anyhow::Result<PixelBuffer> {
    let img =
        image::open(path).with_context(|| format!("Failed to load image {}", path.display()))?;
    let frame = into_buffer(&img);
    log::info!("Image loaded: {} ({}×{})", path.display(), frame.width, frame.height);
    Ok(frame)
}

/// Decode an in-memory encoded image (PNG, JPEG, BMP, GIF).
///
/// # Errors
/// `InvalidInput` for empty input, `DecodeFailure` when the format is not
/// recognised or the data is corrupt.
pub fn decode_bytes(bytes: &[u8]) -> Result<PixelBuffer> {
    if bytes.is_empty() {
        return Err(CoreError::InvalidInput("image data is empty".into()));
    }
    let img = image::load_from_memory(bytes).map_err(|e| CoreError::DecodeFailure(e.to_string()))?;
    let frame = into_buffer(&img);
    if frame.is_empty() {
        return Err(CoreError::DecodeFailure("image has no pixels".into()));
    }
    log::debug!("Decoded {} bytes → {}×{}", bytes.len(), frame.width, frame.height);
    Ok(frame)
}

/// Decode a base64 image, with or without a `data:image/...;base64,` prefix.
///
/// Everything up to and including the first comma is treated as the header.
///
/// # Errors
/// `InvalidInput` when there is no payload, `DecodeFailure` for bad base64
/// or undecodable image data.
pub fn decode_data_uri(uri: &str) -> Result<PixelBuffer> {
    let payload = uri.split_once(',').map_or(uri, |(_, body)| body).trim();
    if payload.is_empty() {
        return Err(CoreError::InvalidInput("image payload is empty".into()));
    }
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| CoreError::DecodeFailure(format!("invalid base64 data: {e}")))?;
    decode_bytes(&bytes)
}

/// Where a request's image comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageInput {
    /// `data:` URI or bare base64.
    Inline(String),
    Path(PathBuf),
}

impl ImageInput {
    /// Classify a request string: `data:` URIs are inline, anything else is a
    /// path.
    ///
    /// # Example
    /// ```
    /// use bp_source::image::ImageInput;
    /// assert!(matches!(ImageInput::parse("data:image/png;base64,AAAA"), ImageInput::Inline(_)));
    /// assert!(matches!(ImageInput::parse("cat.jpg"), ImageInput::Path(_)));
    /// ```
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.trim_start().starts_with("data:") {
            Self::Inline(value.to_string())
        } else {
            Self::Path(PathBuf::from(value))
        }
    }

    /// Load and decode the image.
    ///
    /// # Errors
    /// Inline data fails as in [`decode_data_uri`], files as in [`load_image`].
    pub fn load(&self) -> anyhow::Result<PixelBuffer> {
        match self {
            Self::Inline(uri) => Ok(decode_data_uri(uri)?),
            Self::Path(path) => load_image(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn png_bytes() -> Vec<u8> {
        let mut img = image::RgbaImage::new(3, 2);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, image::Rgba([0, 255, 0, 255]));
        img.put_pixel(2, 1, image::Rgba([255, 255, 255, 128]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn data_uri() -> String {
        let b64 = base64::engine::general_purpose::STANDARD.encode(png_bytes());
        format!("data:image/png;base64,{b64}")
    }

    #[test]
    fn decode_png_bytes() {
        let frame = decode_bytes(&png_bytes()).unwrap();
        assert_eq!((frame.width, frame.height), (3, 2));
        assert_eq!(frame.pixel(0, 0), Some((255, 0, 0, 255)));
        assert_eq!(frame.pixel(2, 1), Some((255, 255, 255, 128)));
    }

    #[test]
    fn empty_bytes_are_invalid_input() {
        assert!(matches!(decode_bytes(&[]), Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = decode_bytes(b"definitely not an image").unwrap_err();
        assert!(matches!(err, CoreError::DecodeFailure(_)));
    }

    #[test]
    fn data_uri_with_header() {
        let frame = decode_data_uri(&data_uri()).unwrap();
        assert_eq!((frame.width, frame.height), (3, 2));
    }

    #[test]
    fn bare_base64_is_accepted() {
        let b64 = base64::engine::general_purpose::STANDARD.encode(png_bytes());
        assert!(decode_data_uri(&b64).is_ok());
    }

    #[test]
    fn bad_base64_is_decode_failure() {
        let err = decode_data_uri("data:image/png;base64,@@not-base64@@").unwrap_err();
        assert!(matches!(err, CoreError::DecodeFailure(_)));
    }

    #[test]
    fn empty_payload_is_invalid_input() {
        let err = decode_data_uri("data:image/png;base64,").unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn load_image_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        std::fs::write(&path, png_bytes()).unwrap();

        let frame = load_image(&path).unwrap();
        assert_eq!((frame.width, frame.height), (3, 2));
        assert_eq!(ImageInput::Path(path).load().unwrap(), frame);
    }

    #[test]
    fn missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.png");
        let err = ImageInput::Path(path).load().unwrap_err();
        assert!(err.to_string().contains("absent.png"));
    }

    #[test]
    fn inline_input_loads() {
        let input = ImageInput::parse(&data_uri());
        assert_eq!(input.load().unwrap().width, 3);
    }

    #[test]
    fn inline_errors_keep_their_kind() {
        let err = ImageInput::parse("data:image/png;base64,").load().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::InvalidInput(_))
        ));
    }
}
