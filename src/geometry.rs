// =============================================================================
// GEOMETRY.RS — Tile map to quad geometry
//
// Two ways to feed a renderer from the same UV math:
// - Immediate: `build_quads` recomputes every corner on each call.
// - Cached: `build_position_stream` + `build_index_stream` once per map size,
//   then `build_uv_stream` whenever the tile content changes.
// =============================================================================

use glam::Vec3;

use crate::config::{BuildOptions, OutOfRangePolicy};
use crate::error::{Result, TileError};
use crate::map::TileMap;
use crate::sheet::{AtlasCell, TileSheet};
use crate::vertex::TileVertex;

/// Floats per tile in a UV stream (4 corners × u, v).
pub const UV_FLOATS_PER_TILE: usize = 8;
/// Floats per tile in a position stream (4 corners × x, y, z).
pub const POSITION_FLOATS_PER_TILE: usize = 12;
/// Indices per tile in an index stream (two triangles).
pub const INDICES_PER_TILE: usize = 6;
/// Largest tile count whose corner indices still fit in `u32` (4 vertices per tile).
pub const MAX_INDEXED_TILES: usize = 1 << 30;

// =============================================================================
// QUAD
// =============================================================================

/// Four corners of one rendered tile, wound top-left, top-right,
/// bottom-right, bottom-left.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quad {
    pub corners: [TileVertex; 4],
}

impl Quad {
    pub fn top_left(&self) -> TileVertex {
        self.corners[0]
    }

    pub fn bottom_right(&self) -> TileVertex {
        self.corners[2]
    }

    /// The same quad shifted by `offset`, UVs untouched.
    pub fn translated(&self, offset: Vec3) -> Self {
        Self { corners: self.corners.map(|v| v.translated(offset)) }
    }

    /// Split into a two-triangle list: (tl, tr, br), (tl, br, bl).
    pub fn triangles(&self) -> [TileVertex; 6] {
        let [tl, tr, br, bl] = self.corners;
        [tl, tr, br, tl, br, bl]
    }
}

// =============================================================================
// IMMEDIATE BUILD
// =============================================================================

/// Build one quad per map cell, row-major.
///
/// `tile_size` is the on-screen edge of a tile in pixels.  Fails before
/// producing anything if `tile_size` is zero or, under
/// [`OutOfRangePolicy::Reject`], any tile index is outside the sheet.
pub fn build_quads(
    map: &TileMap,
    sheet: &TileSheet,
    tile_size: u32,
    options: &BuildOptions,
) -> Result<Vec<Quad>> {
    check_tile_size(sheet, tile_size)?;
    let cells = resolve_cells(map, sheet, options.out_of_range)?;

    let size = tile_size as f32;
    let quads = cells
        .iter()
        .enumerate()
        .map(|(i, &cell)| {
            let (x, y) = (i % map.width(), i / map.width());
            let corners = corner_positions(x, y, size, options.row_depth(y));
            let uvs = sheet.uv_rect_unchecked(cell).corners();
            Quad {
                corners: std::array::from_fn(|c| TileVertex { position: corners[c], uv: uvs[c] }),
            }
        })
        .collect();

    log::debug!(
        "built {} quads for {}x{} map",
        cells.len(),
        map.width(),
        map.height()
    );
    Ok(quads)
}

/// Flatten quads into a non-indexed triangle list, 6 vertices per quad.
pub fn triangulate(quads: &[Quad]) -> Vec<TileVertex> {
    let mut verts = Vec::with_capacity(quads.len() * 6);
    for q in quads {
        verts.extend_from_slice(&q.triangles());
    }
    verts
}

// =============================================================================
// CACHED-GEOMETRY STREAMS
// =============================================================================

/// Texture coordinates only, 8 floats per tile in the same corner order as
/// [`build_quads`].  Use it to refresh a UV buffer when the map content
/// changes but its size does not.
pub fn build_uv_stream(
    map: &TileMap,
    sheet: &TileSheet,
    options: &BuildOptions,
) -> Result<Vec<f32>> {
    let cells = resolve_cells(map, sheet, options.out_of_range)?;

    let mut uvs = Vec::with_capacity(cells.len() * UV_FLOATS_PER_TILE);
    for cell in cells {
        for [u, v] in sheet.uv_rect_unchecked(cell).corners() {
            uvs.push(u);
            uvs.push(v);
        }
    }
    Ok(uvs)
}

/// Corner positions for a `width × height` map, 12 floats per tile.
/// Depends only on the map size, never on its content.
pub fn build_position_stream(
    width: usize,
    height: usize,
    tile_size: u32,
    options: &BuildOptions,
) -> Result<Vec<f32>> {
    if tile_size == 0 {
        return Err(TileError::InvalidSheetConfig { columns: 0, rows: 0, tile_size });
    }

    let size = tile_size as f32;
    let mut positions = Vec::with_capacity(width * height * POSITION_FLOATS_PER_TILE);
    for y in 0..height {
        let z = options.row_depth(y);
        for x in 0..width {
            for p in corner_positions(x, y, size, z) {
                positions.extend_from_slice(&p);
            }
        }
    }
    Ok(positions)
}

/// Triangle-list indices for `tile_count` quads whose corners are stored
/// four at a time.  Fails past [`MAX_INDEXED_TILES`].
pub fn build_index_stream(tile_count: usize) -> Result<Vec<u32>> {
    if tile_count > MAX_INDEXED_TILES {
        return Err(TileError::TooManyTiles { count: tile_count, max: MAX_INDEXED_TILES });
    }

    let mut indices = Vec::with_capacity(tile_count * INDICES_PER_TILE);
    for b in (0..tile_count).map(|i| (i * 4) as u32) {
        indices.extend_from_slice(&[b, b + 1, b + 2, b, b + 2, b + 3]);
    }
    Ok(indices)
}

// =============================================================================
// HELPERS
// =============================================================================

fn check_tile_size(sheet: &TileSheet, tile_size: u32) -> Result<()> {
    if tile_size == 0 {
        return Err(TileError::InvalidSheetConfig {
            columns: sheet.columns(),
            rows: sheet.rows(),
            tile_size,
        });
    }
    Ok(())
}

/// Resolve every tile to its atlas cell up front so that a bad index fails
/// the call before any geometry exists.
fn resolve_cells(
    map: &TileMap,
    sheet: &TileSheet,
    policy: OutOfRangePolicy,
) -> Result<Vec<AtlasCell>> {
    let mut wrapped = 0usize;
    let mut cells = Vec::with_capacity(map.tile_count());

    for (i, &tile) in map.tiles().iter().enumerate() {
        let cell = match (sheet.cell(tile), policy) {
            (Some(cell), _) => cell,
            (None, OutOfRangePolicy::Wrap) => {
                wrapped += 1;
                sheet.cell_wrapped(tile)
            }
            (None, OutOfRangePolicy::Reject) => {
                return Err(TileError::TileIndexOutOfRange {
                    index: tile,
                    capacity: sheet.capacity(),
                    x: i % map.width(),
                    y: i / map.width(),
                });
            }
        };
        cells.push(cell);
    }

    if wrapped > 0 {
        log::warn!(
            "{} tile indices outside the {}-cell sheet were wrapped",
            wrapped,
            sheet.capacity()
        );
    }
    Ok(cells)
}

#[inline]
fn corner_positions(x: usize, y: usize, size: f32, z: f32) -> [[f32; 3]; 4] {
    let px = x as f32 * size;
    let py = y as f32 * size;
    [
        [px, py, z],
        [px + size, py, z],
        [px + size, py + size, z],
        [px, py + size, z],
    ]
}
