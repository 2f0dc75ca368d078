//! Decoding cached tile files into images.

use std::io;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageReader};
use thiserror::Error;

/// Errors from decoding a tile file.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to open tile {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to decode tile {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },

    /// Content rejected by a non-image decoder
    #[error("invalid tile data in {}: {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },
}

/// Turns a tile file on disk into a decoded image.
///
/// Decoding always reads from the file, never from downloaded bytes held in
/// memory, so a tile is only served once it is on disk.
pub trait TileDecoder: Send + Sync {
    type Image: Send;

    fn decode_file(&self, path: &Path) -> Result<Self::Image, DecodeError>;
}

/// Decoder backed by the `image` crate.
///
/// The format is sniffed from the content since cache files carry a neutral
/// extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageDecoder;

impl TileDecoder for ImageDecoder {
    type Image = DynamicImage;

    fn decode_file(&self, path: &Path) -> Result<DynamicImage, DecodeError> {
        let io_err = |source: io::Error| DecodeError::Io {
            path: path.to_path_buf(),
            source,
        };

        ImageReader::open(path)
            .map_err(io_err)?
            .with_guessed_format()
            .map_err(io_err)?
            .decode()
            .map_err(|source| DecodeError::Image {
                path: path.to_path_buf(),
                source,
            })
    }
}
