use std::{error, fmt, io};
use std::path::PathBuf;

use serde_json::Error as SerdeError;

/// Coarse classification of a [`MapError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A file could not be read or decoded into an image.
    File,
    /// A map or tileset document is structurally invalid.
    Parse,
    /// A tile id falls outside what a tileset can resolve.
    Lookup,
}

/// Error type for map loading, tileset building and tile lookup.
#[derive(Debug)]
pub enum MapError {
    /// File I/O error
    Io {
        /// Path that failed to read
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
    /// Image file could not be read or decoded
    Image {
        /// Path of the image
        path: PathBuf,
        /// Underlying decode error
        source: macroquad::Error,
    },
    /// JSON parse error
    Json {
        /// Path of the document (`<inline>` when parsed from a string)
        path: PathBuf,
        /// Underlying serde error
        source: SerdeError,
    },
    /// A layer's data length does not match width * height
    InvalidLayerSize {
        /// Name of the offending layer
        layer: String,
        /// `width * height`
        expected: usize,
        /// Length of `data`
        actual: usize,
    },
    /// A tileset descriptor matches neither known schema
    InvalidTileset {
        /// Path of the descriptor
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },
    /// Tile id not supplied by the tileset it was looked up in
    TileOutOfRange {
        /// Cleaned global id
        gid: u32,
        /// First global id of the tileset
        first_gid: u32,
        /// Number of tiles the tileset holds
        tile_count: u32,
    },
}

impl MapError {
    /// Which part of the taxonomy this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MapError::Io { .. } | MapError::Image { .. } => ErrorKind::File,
            MapError::Json { .. }
            | MapError::InvalidLayerSize { .. }
            | MapError::InvalidTileset { .. } => ErrorKind::Parse,
            MapError::TileOutOfRange { .. } => ErrorKind::Lookup,
        }
    }

    /// The file this error is about, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            MapError::Io { path, .. }
            | MapError::Image { path, .. }
            | MapError::Json { path, .. }
            | MapError::InvalidTileset { path, .. } => Some(path),
            MapError::InvalidLayerSize { .. } | MapError::TileOutOfRange { .. } => None,
        }
    }
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Io { path, source } => {
                write!(f, "I/O error reading {}: {}", path.display(), source)
            }
            MapError::Image { path, source } => {
                write!(f, "Failed to load image {}: {}", path.display(), source)
            }
            MapError::Json { path, source } => {
                write!(f, "Failed to parse JSON in {}: {}", path.display(), source)
            }
            MapError::InvalidLayerSize {
                layer,
                expected,
                actual,
            } => write!(
                f,
                "Invalid layer size for layer '{}': expected {} tiles, found {}",
                layer, expected, actual
            ),
            MapError::InvalidTileset { path, reason } => {
                write!(f, "Invalid tileset {}: {}", path.display(), reason)
            }
            MapError::TileOutOfRange {
                gid,
                first_gid,
                tile_count,
            } => write!(
                f,
                "Tile id {} is outside tileset starting at {} with {} tiles",
                gid, first_gid, tile_count
            ),
        }
    }
}

impl error::Error for MapError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            MapError::Io { source, .. } => Some(source),
            MapError::Image { source, .. } => Some(source),
            MapError::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}
