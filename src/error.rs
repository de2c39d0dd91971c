//! Error types for tile-map geometry building.

use std::fmt;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TileError>;

/// Why a nested row list could not become a [`TileMap`](crate::map::TileMap).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShapeFault {
    /// No rows, or rows with no columns.
    Empty,
    /// Row `row` holds `found` tiles where the first row held `expected`.
    RaggedRow { row: usize, expected: usize, found: usize },
}

/// Errors raised while validating inputs or loading them from disk.
#[derive(Debug)]
pub enum TileError {
    /// The tile grid is empty or not rectangular.
    InvalidMapShape(ShapeFault),
    /// A sheet dimension or the tile size is zero, or `columns * rows` overflows.
    InvalidSheetConfig { columns: u32, rows: u32, tile_size: u32 },
    /// The tile at `(x, y)` selects a cell outside `[0, capacity)`.
    TileIndexOutOfRange { index: i32, capacity: u32, x: usize, y: usize },
    /// A map of size `found` was handed to a cache built for `expected` (width, height).
    DimensionMismatch { expected: (usize, usize), found: (usize, usize) },
    /// More quads than a `u32` index stream can address.
    TooManyTiles { count: usize, max: usize },
    /// Sheet image could not be read.
    Image(image::ImageError),
    /// Map or config JSON could not be parsed.
    Json(serde_json::Error),
    /// Map or config file could not be read.
    Io(std::io::Error),
}

impl fmt::Display for ShapeFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "map has no tiles"),
            Self::RaggedRow { row, expected, found } => {
                write!(f, "row {} has {} tiles, expected {}", row, found, expected)
            }
        }
    }
}

impl fmt::Display for TileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMapShape(fault) => write!(f, "Invalid map shape: {}", fault),
            Self::InvalidSheetConfig { columns, rows, tile_size } => write!(
                f,
                "Invalid sheet config: {}x{} cells of {}px",
                columns, rows, tile_size
            ),
            Self::TileIndexOutOfRange { index, capacity, x, y } => write!(
                f,
                "Tile index {} at ({}, {}) is outside the sheet's {} cells",
                index, x, y, capacity
            ),
            Self::DimensionMismatch { expected, found } => write!(
                f,
                "Map is {}x{} but the cached geometry is {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            Self::TooManyTiles { count, max } => write!(
                f,
                "{} tiles exceed the {} addressable by 32-bit indices",
                count, max
            ),
            Self::Image(e) => write!(f, "Image error: {}", e),
            Self::Json(e) => write!(f, "JSON error: {}", e),
            Self::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for TileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Image(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for TileError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}

impl From<serde_json::Error> for TileError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<std::io::Error> for TileError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
