use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShapeFault, TileError};

/// Index of a cell in the tile sheet.  Signed so that map files carrying
/// negative values load and are rejected (or wrapped) at build time.
pub type TileIndex = i32;

/// Rectangular grid of tile indices, stored flat in row-major order.
///
/// A `TileMap` is always non-empty and rectangular; the checks run once at
/// construction.  In JSON it is a nested array of rows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<TileIndex>>", into = "Vec<Vec<TileIndex>>")]
pub struct TileMap {
    width: usize,
    height: usize,
    tiles: Vec<TileIndex>,
}

impl TileMap {
    /// Build a map from nested rows.  Row 0 is the top of the map.
    pub fn from_rows<R: AsRef<[TileIndex]>>(rows: &[R]) -> Result<Self> {
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if width == 0 {
            return Err(TileError::InvalidMapShape(ShapeFault::Empty));
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(TileError::InvalidMapShape(ShapeFault::RaggedRow {
                    row: y,
                    expected: width,
                    found: row.len(),
                }));
            }
            tiles.extend_from_slice(row);
        }

        Ok(Self { width, height: rows.len(), tiles })
    }

    /// A `width × height` map with every cell set to `tile`.
    pub fn filled(width: usize, height: usize, tile: TileIndex) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(TileError::InvalidMapShape(ShapeFault::Empty));
        }
        Ok(Self { width, height, tiles: vec![tile; width * height] })
    }

    /// The 20×15 ground/path/water layout rendered by the demo driver.
    pub fn demo() -> Self {
        Self {
            width: DEMO_WIDTH,
            height: DEMO_HEIGHT,
            tiles: DEMO_TILES.iter().flatten().copied().collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `width * height`.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// All tiles, row-major.
    pub fn tiles(&self) -> &[TileIndex] {
        &self.tiles
    }

    pub fn rows(&self) -> impl Iterator<Item = &[TileIndex]> {
        self.tiles.chunks_exact(self.width)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<TileIndex> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.tiles[y * self.width + x])
    }

    /// Replace the tile at `(x, y)`, returning the previous value.
    /// Returns `None` and leaves the map untouched when out of bounds.
    pub fn set(&mut self, x: usize, y: usize, tile: TileIndex) -> Option<TileIndex> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(std::mem::replace(&mut self.tiles[y * self.width + x], tile))
    }
}

impl TryFrom<Vec<Vec<TileIndex>>> for TileMap {
    type Error = TileError;

    fn try_from(rows: Vec<Vec<TileIndex>>) -> Result<Self> {
        Self::from_rows(&rows)
    }
}

impl From<TileMap> for Vec<Vec<TileIndex>> {
    fn from(map: TileMap) -> Self {
        map.rows().map(<[TileIndex]>::to_vec).collect()
    }
}

// ── Demo layout ──────────────────────────────────────────────────────────────

const DEMO_WIDTH: usize = 20;
const DEMO_HEIGHT: usize = 15;

#[rustfmt::skip]
const DEMO_TILES: [[TileIndex; DEMO_WIDTH]; DEMO_HEIGHT] = [
    [17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17],
    [17,  0,  1,  1,  1, 33,  1,  1,  1,  1,  1,  1,  2, 33,  3, 17, 17, 17, 17, 17],
    [17, 16, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 16, 17, 19,  3, 17, 17, 17, 17],
    [17, 18, 17, 48, 49, 50, 48, 49, 50, 48, 49, 17, 16, 17, 16, 18, 17, 17, 17, 17],
    [17, 16, 17, 48, 49, 50, 48, 49, 50, 48, 49, 17, 16, 17, 16, 16, 17, 17, 17, 17],
    [17, 16, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 18, 17, 19, 35, 17, 17, 17, 17],
    [17, 32,  1,  1,  1,  1,  1,  1,  1,  1, 33,  1, 34,  1, 35, 17, 17, 17, 17, 17],
    [17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17],
    [51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51],
    [51, 51, 52, 52, 52, 51, 52, 52, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51],
    [51, 51, 52, 52, 52, 51, 51, 52, 51, 52, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51],
    [51, 51, 52, 52, 52, 51, 51, 51, 51, 51, 51, 52, 52, 51, 51, 51, 51, 51, 51, 51],
    [51, 51, 52, 52, 52, 51, 51, 51, 51, 51, 51, 52, 52, 51, 51, 51, 51, 51, 51, 51],
    [51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51],
    [51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51, 51],
];
