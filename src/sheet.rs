use std::io::Cursor;
use std::path::Path;

use crate::error::{Result, TileError};

// ── AtlasCell / UvRect ───────────────────────────────────────────────────────

/// Column/row position of one tile inside the sheet.  Row 0 is the bottom row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AtlasCell {
    pub col: u32,
    pub row: u32,
}

/// Normalised texture-space rectangle covering one atlas cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UvRect {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl UvRect {
    /// Corner UVs in quad winding order: top-left, top-right, bottom-right, bottom-left.
    ///
    /// The sheet's row 0 sits at v = 0, so the top edge of a cell is `max[1]`.
    pub fn corners(&self) -> [[f32; 2]; 4] {
        [
            [self.min[0], self.max[1]],
            [self.max[0], self.max[1]],
            [self.max[0], self.min[1]],
            [self.min[0], self.min[1]],
        ]
    }
}

// ── TileSheet ────────────────────────────────────────────────────────────────

/// Grid layout of a tile-sheet texture.  Immutable once built.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileSheet {
    columns: u32,
    rows: u32,
    tile_size: u32,
}

impl TileSheet {
    /// Validates that every dimension is non-zero and that `columns * rows`
    /// is addressable by an `i32` tile index.
    pub fn new(columns: u32, rows: u32, tile_size: u32) -> Result<Self> {
        let invalid = TileError::InvalidSheetConfig { columns, rows, tile_size };
        if columns == 0 || rows == 0 || tile_size == 0 {
            return Err(invalid);
        }
        match columns.checked_mul(rows) {
            Some(cap) if cap <= i32::MAX as u32 => Ok(Self { columns, rows, tile_size }),
            _ => Err(invalid),
        }
    }

    /// Derive the layout from a texture's pixel size.  Partial tiles along an
    /// edge are ignored.
    pub fn from_image_dimensions(width: u32, height: u32, tile_size: u32) -> Result<Self> {
        if tile_size == 0 {
            return Err(TileError::InvalidSheetConfig { columns: 0, rows: 0, tile_size });
        }
        Self::new(width / tile_size, height / tile_size, tile_size)
    }

    /// Read the dimensions from an encoded image without decoding its pixels.
    pub fn from_png(png_bytes: &[u8], tile_size: u32) -> Result<Self> {
        let (w, h) = image::ImageReader::new(Cursor::new(png_bytes))
            .with_guessed_format()?
            .into_dimensions()?;
        Self::from_image_dimensions(w, h, tile_size)
    }

    pub fn from_image_path(path: impl AsRef<Path>, tile_size: u32) -> Result<Self> {
        let (w, h) = image::image_dimensions(path)?;
        Self::from_image_dimensions(w, h, tile_size)
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Number of addressable cells, `columns * rows`.
    pub fn capacity(&self) -> u32 {
        self.columns * self.rows
    }

    /// Atlas cell for `index`, or `None` when it lies outside `[0, capacity)`.
    pub fn cell(&self, index: i32) -> Option<AtlasCell> {
        if index < 0 || (index as u32) >= self.capacity() {
            return None;
        }
        Some(self.cell_unchecked(index as u32))
    }

    /// Atlas cell for `index` folded into `[0, capacity)`.  Negative indices
    /// wrap from the end of the sheet.
    pub fn cell_wrapped(&self, index: i32) -> AtlasCell {
        let folded = index.rem_euclid(self.capacity() as i32);
        self.cell_unchecked(folded as u32)
    }

    fn cell_unchecked(&self, index: u32) -> AtlasCell {
        AtlasCell {
            col: index % self.columns,
            row: self.rows - 1 - index / self.columns,
        }
    }

    /// Whether `cell` lies inside this sheet's grid.
    pub fn contains(&self, cell: AtlasCell) -> bool {
        cell.col < self.columns && cell.row < self.rows
    }

    /// Inverse of [`TileSheet::cell`].  `None` for cells outside the sheet.
    pub fn index_of(&self, cell: AtlasCell) -> Option<i32> {
        if !self.contains(cell) {
            return None;
        }
        Some(((self.rows - 1 - cell.row) * self.columns + cell.col) as i32)
    }

    /// UV rectangle of `cell`, or `None` when the cell is outside the sheet.
    pub fn uv_rect(&self, cell: AtlasCell) -> Option<UvRect> {
        self.contains(cell).then(|| self.uv_rect_unchecked(cell))
    }

    /// Callers must pass a cell obtained from [`TileSheet::cell`] or
    /// [`TileSheet::cell_wrapped`].
    pub(crate) fn uv_rect_unchecked(&self, cell: AtlasCell) -> UvRect {
        let cols = self.columns as f32;
        let rows = self.rows as f32;
        UvRect {
            min: [cell.col as f32 / cols, cell.row as f32 / rows],
            max: [(cell.col + 1) as f32 / cols, (cell.row + 1) as f32 / rows],
        }
    }

    /// Recover the cell whose UV rectangle starts at `uv_min`.  `None` when
    /// either component is outside `[0, 1)` or not finite.
    pub fn cell_at_uv(&self, uv_min: [f32; 2]) -> Option<AtlasCell> {
        if !uv_min.iter().all(|v| (0.0..1.0).contains(v)) {
            return None;
        }
        let col = (uv_min[0] * self.columns as f32).round() as u32;
        let row = (uv_min[1] * self.rows as f32).round() as u32;
        let cell = AtlasCell { col, row };
        self.contains(cell).then_some(cell)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
