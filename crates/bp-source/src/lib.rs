/// Image sources for BraillePixel: files on disk, raw bytes and data URIs.

pub mod image;

pub use image::{ImageInput, decode_bytes, decode_data_uri, load_image};
