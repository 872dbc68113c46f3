//! View culling for the diamond grid.
//!
//! Tiles are walked in diagonal coordinates: diagonal row `i = col + row` (screen y) and
//! diagonal column `j = col - row` (screen x). Only pairs where `i` and `j` share parity are
//! real tiles, which is what [`DiamondLattice`] enumerates.

use crate::camera::Camera;
use crate::math::{PixelUnits, Vec2};
use crate::transform::TileIndex;

/// Extra diagonals scanned on every side of the computed range
pub const CULL_PADDING: i32 = 1;

/// Rectangle of diagonal coordinates, `start..start + num` on both axes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleRange {
    pub start_row: i32,
    pub num_rows: i32,
    pub start_col: i32,
    pub num_cols: i32,
}

impl VisibleRange {
    /// Every diagonal a `width` by `height` map occupies
    pub fn covering_map(width: i32, height: i32) -> Self {
        Self {
            start_row: 0,
            num_rows: (width + height - 1).max(0),
            start_col: -(height - 1),
            num_cols: (width + height - 1).max(0),
        }
    }

    /// Diagonals whose tile sprites (of `sprite` size at zoom 1) can overlap the viewport,
    /// limited to those the map occupies
    pub fn new(camera: &Camera, sprite: Vec2<f64, PixelUnits>, width: i32, height: i32) -> Self {
        let zoom = camera.zoom();
        let tile = camera.screen_tile_size();
        let viewport = camera.viewport();
        // Top-left of tile (i, j) is at origin + (j * tile, i * tile / 2)
        let origin = camera.world_to_screen(Vec2::default());

        let first_col = ((-sprite.x * zoom - origin.x) / tile).floor() as i32 - CULL_PADDING;
        let last_col = ((viewport.x - origin.x) / tile).ceil() as i32 + CULL_PADDING;
        let first_row = ((-sprite.y * zoom - origin.y) * 2. / tile).floor() as i32 - CULL_PADDING;
        let last_row = ((viewport.y - origin.y) * 2. / tile).ceil() as i32 + CULL_PADDING;

        let map = Self::covering_map(width, height);
        let start_row = first_row.max(map.start_row);
        let end_row = last_row.min(map.start_row + map.num_rows - 1);
        let start_col = first_col.max(map.start_col);
        let end_col = last_col.min(map.start_col + map.num_cols - 1);

        Self {
            start_row,
            num_rows: (end_row - start_row + 1).max(0),
            start_col,
            num_cols: (end_col - start_col + 1).max(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows == 0 || self.num_cols == 0
    }

    pub fn lattice(&self) -> DiamondLattice {
        DiamondLattice::new(*self)
    }
}

/// Tiles of a [`VisibleRange`], one diagonal row at a time from the back of the screen to the
/// front. Yields each grid cell at most once. Cells off the map are not filtered out.
#[derive(Clone, Debug)]
pub struct DiamondLattice {
    range: VisibleRange,
    i: i32,
    j: i32,
}

impl DiamondLattice {
    pub fn new(range: VisibleRange) -> Self {
        let i = range.start_row;
        Self { range, i, j: first_with_parity(i, range.start_col) }
    }
}

/// First diagonal column at or after `start` with the same parity as diagonal row `i`
fn first_with_parity(i: i32, start: i32) -> i32 {
    if (i - start).rem_euclid(2) == 0 { start } else { start + 1 }
}

impl Iterator for DiamondLattice {
    type Item = TileIndex;

    fn next(&mut self) -> Option<TileIndex> {
        let end_row = self.range.start_row + self.range.num_rows;
        let end_col = self.range.start_col + self.range.num_cols;
        if self.range.num_cols <= 0 {
            return None;
        }

        while self.i < end_row {
            if self.j < end_col {
                let (i, j) = (self.i, self.j);
                self.j += 2;
                return Some(TileIndex::new((i + j) / 2, (i - j) / 2));
            }
            self.i += 1;
            self.j = first_with_parity(self.i, self.range.start_col);
        }
        None
    }
}
