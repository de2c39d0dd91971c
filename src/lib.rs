pub mod cache;
pub mod config;
pub mod error;
pub mod geometry;
pub mod map;
pub mod sheet;
pub mod vertex;

pub use cache::TileGeometryCache;
pub use config::{BuildOptions, GeometryConfig, OutOfRangePolicy};
pub use error::{Result, ShapeFault, TileError};
pub use geometry::{build_index_stream, build_position_stream, build_quads, build_uv_stream, triangulate, Quad, MAX_INDEXED_TILES};
pub use map::{TileIndex, TileMap};
pub use sheet::{AtlasCell, TileSheet, UvRect};
pub use vertex::TileVertex;

/// Tile edge in pixels used when nothing else is configured.
pub const DEFAULT_TILE_SIZE: u32 = 32;
/// Columns of the default 512×512 ground sheet.
pub const DEFAULT_SHEET_COLUMNS: u32 = 16;
/// Rows of the default 512×512 ground sheet.
pub const DEFAULT_SHEET_ROWS: u32 = 16;
