use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::map::TileMap;
use crate::sheet::TileSheet;
use crate::{DEFAULT_SHEET_COLUMNS, DEFAULT_SHEET_ROWS, DEFAULT_TILE_SIZE};

// ── OutOfRangePolicy ─────────────────────────────────────────────────────────

/// What to do with a tile index that does not name a cell of the sheet.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangePolicy {
    /// Fail the whole build with `TileIndexOutOfRange`.
    #[default]
    Reject,
    /// Fold the index into `[0, capacity)` with Euclidean remainder.
    Wrap,
}

// ── BuildOptions ─────────────────────────────────────────────────────────────

/// Per-build knobs shared by every geometry operation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Depth added per map row so lower rows draw over upper ones.
    pub z_bias: f32,
    /// Depth added to every vertex.  Use it to stack several maps.
    pub z_base: f32,
    pub out_of_range: OutOfRangePolicy,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            z_bias: 0.01,
            z_base: 0.0,
            out_of_range: OutOfRangePolicy::Reject,
        }
    }
}

impl BuildOptions {
    /// Depth of every vertex in map row `y`.
    #[inline]
    pub fn row_depth(&self, y: usize) -> f32 {
        self.z_base + y as f32 * self.z_bias
    }
}

// ── SheetLayout ──────────────────────────────────────────────────────────────

/// Sheet grid size used when no sheet image is configured.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    pub columns: u32,
    pub rows: u32,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self { columns: DEFAULT_SHEET_COLUMNS, rows: DEFAULT_SHEET_ROWS }
    }
}

// ── GeometryConfig ───────────────────────────────────────────────────────────

/// Everything the driver needs to build a map, loadable from JSON.
///
/// Every field has a default, so `{}` is a valid config: the built-in demo
/// map on a 16×16 sheet of 32 px tiles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Tile edge in pixels, both in the sheet and on screen.
    pub tile_size: u32,
    pub sheet: SheetLayout,
    /// When set, `sheet` is ignored and the layout is derived from the image size.
    pub sheet_image: Option<PathBuf>,
    /// JSON map file.  The demo map is used when unset.
    pub map: Option<PathBuf>,
    pub options: BuildOptions,
    /// Build rounds run by the driver.
    pub iterations: u32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            sheet: SheetLayout::default(),
            sheet_image: None,
            map: None,
            options: BuildOptions::default(),
            iterations: 300,
        }
    }
}

impl GeometryConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn resolve_sheet(&self) -> Result<TileSheet> {
        match &self.sheet_image {
            Some(path) => TileSheet::from_image_path(path, self.tile_size),
            None => TileSheet::new(self.sheet.columns, self.sheet.rows, self.tile_size),
        }
    }

    pub fn resolve_map(&self) -> Result<TileMap> {
        match &self.map {
            Some(path) => TileMap::load(path),
            None => Ok(TileMap::demo()),
        }
    }
}
