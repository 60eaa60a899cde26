//! Tile slicing for a single pyramid level.
//!
//! Tiles sit on a `tile_size` grid. Every tile reaches `overlap` pixels past
//! its grid cell into each neighbour, but never past the level's outer edge:
//!
//! ```text
//!          col 0           col 1           col 2
//!   x:  0 ────────── 254 ────────── 508 ──────── 600
//!       [0 ........ 255)
//!                 [253 ........ 509)
//!                               [507 ........ 600)
//! ```

/// Pixel rectangle of one tile within its level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRect {
    pub col: u32,
    pub row: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl TileRect {
    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// Dimensions and tile grid of one pyramid level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelPlan {
    level: u32,
    width: u32,
    height: u32,
    tile_size: u32,
    overlap: u32,
}

impl LevelPlan {
    /// Create a level plan. `tile_size` must be non-zero.
    pub fn new(level: u32, width: u32, height: u32, tile_size: u32, overlap: u32) -> Self {
        debug_assert!(tile_size > 0);
        Self {
            level,
            width,
            height,
            tile_size,
            overlap,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn columns(&self) -> u32 {
        self.width.div_ceil(self.tile_size)
    }

    pub fn rows(&self) -> u32 {
        self.height.div_ceil(self.tile_size)
    }

    pub fn tile_count(&self) -> u64 {
        self.columns() as u64 * self.rows() as u64
    }

    /// Rectangle for the tile at `(col, row)`, or `None` outside the grid.
    pub fn tile_rect(&self, col: u32, row: u32) -> Option<TileRect> {
        if col >= self.columns() || row >= self.rows() {
            return None;
        }

        let (x, width) = self.span(col, self.columns(), self.width);
        let (y, height) = self.span(row, self.rows(), self.height);
        Some(TileRect {
            col,
            row,
            x,
            y,
            width,
            height,
        })
    }

    /// Every tile in the level, column by column.
    pub fn tiles(&self) -> impl Iterator<Item = TileRect> + '_ {
        let rows = self.rows();
        (0..self.columns()).flat_map(move |col| {
            (0..rows).filter_map(move |row| self.tile_rect(col, row))
        })
    }

    /// Start and length along one axis for grid cell `index` of `count`.
    fn span(&self, index: u32, count: u32, extent: u32) -> (u32, u32) {
        let tile_size = self.tile_size as u64;
        let overlap = self.overlap as u64;
        let leading = if index > 0 { overlap } else { 0 };
        let trailing = if index + 1 < count { overlap } else { 0 };

        let start = index as u64 * tile_size - leading;
        let length = (tile_size + leading + trailing).min(extent as u64 - start);
        (start as u32, length as u32)
    }
}
