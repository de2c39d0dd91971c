use crate::config::BuildOptions;
use crate::error::{Result, ShapeFault, TileError};
use crate::geometry::{build_index_stream, build_position_stream, build_uv_stream};
use crate::map::{TileIndex, TileMap};
use crate::sheet::TileSheet;
use crate::vertex::TileVertex;

/// The map content and sheet layout a UV stream was built from.
#[derive(Clone, Debug, PartialEq, Eq)]
struct UvSource {
    layout: (u32, u32),
    tiles: Vec<TileIndex>,
}

impl UvSource {
    fn matches(&self, map: &TileMap, sheet: &TileSheet) -> bool {
        self.layout == (sheet.columns(), sheet.rows()) && self.tiles == map.tiles()
    }
}

/// Geometry for a fixed-size map, kept across frames.
///
/// Positions and indices are computed once in [`TileGeometryCache::new`].
/// [`TileGeometryCache::put_map`] rebuilds the UV stream only, and skips even
/// that when the map tiles and sheet layout equal the ones last put.
pub struct TileGeometryCache {
    width: usize,
    height: usize,
    options: BuildOptions,
    positions: Vec<f32>,
    indices: Vec<u32>,
    uvs: Vec<f32>,
    /// What the current `uvs` were built from; `None` until the first
    /// successful `put_map`.
    uv_source: Option<UvSource>,
}

impl TileGeometryCache {
    pub fn new(width: usize, height: usize, tile_size: u32, options: BuildOptions) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(TileError::InvalidMapShape(ShapeFault::Empty));
        }
        let positions = build_position_stream(width, height, tile_size, &options)?;
        let indices = build_index_stream(width * height)?;
        log::debug!(
            "geometry cache: {}x{} tiles, {} vertices, {} indices",
            width,
            height,
            positions.len() / 3,
            indices.len()
        );
        Ok(Self {
            width,
            height,
            options,
            positions,
            indices,
            uvs: Vec::new(),
            uv_source: None,
        })
    }

    /// Size the cache to `map` and load its UVs in one step.
    pub fn for_map(
        map: &TileMap,
        sheet: &TileSheet,
        tile_size: u32,
        options: BuildOptions,
    ) -> Result<Self> {
        let mut cache = Self::new(map.width(), map.height(), tile_size, options)?;
        cache.put_map(map, sheet)?;
        Ok(cache)
    }

    /// Refresh the UV stream for `map`.
    ///
    /// Returns `Ok(true)` when the UVs were rebuilt, `Ok(false)` when the
    /// content was unchanged.  On error the previous UVs stay in place.
    pub fn put_map(&mut self, map: &TileMap, sheet: &TileSheet) -> Result<bool> {
        if (map.width(), map.height()) != (self.width, self.height) {
            return Err(TileError::DimensionMismatch {
                expected: (self.width, self.height),
                found: (map.width(), map.height()),
            });
        }

        if self.uv_source.as_ref().is_some_and(|src| src.matches(map, sheet)) {
            return Ok(false);
        }

        self.uvs = build_uv_stream(map, sheet, &self.options)?;
        self.uv_source = Some(UvSource {
            layout: (sheet.columns(), sheet.rows()),
            tiles: map.tiles().to_vec(),
        });
        log::debug!("geometry cache: rebuilt {} uv floats", self.uvs.len());
        Ok(true)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// 12 floats per tile, fixed for the cache's lifetime.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// 8 floats per tile; empty until the first `put_map`.
    pub fn uvs(&self) -> &[f32] {
        &self.uvs
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Positions and UVs zipped into one vertex list for single-buffer upload.
    /// Empty until a map has been put.
    pub fn interleaved(&self) -> Vec<TileVertex> {
        self.positions
            .chunks_exact(3)
            .zip(self.uvs.chunks_exact(2))
            .map(|(p, uv)| TileVertex {
                position: [p[0], p[1], p[2]],
                uv: [uv[0], uv[1]],
            })
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
