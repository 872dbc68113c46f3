//! Stateless conversions between cartesian map space, isometric space, and tile indices.
//!
//! Everything stays in f64 here. Positions are only floored once they become pixels
//! (see [`Vec2::to_pixels`]).

use crate::math::{CartPos, IsoPos, Vec2};

/// Integer grid coordinates into a [`crate::map::TileMap`]. May be out of bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TileIndex {
    pub col: i32,
    pub row: i32,
}

impl TileIndex {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Top-left corner of the tile in cartesian space, unzoomed
    pub fn origin(self, tile_size: u32) -> CartPos {
        Vec2::new(self.col as f64, self.row as f64) * tile_size as f64
    }
}

pub fn to_isometric(p: CartPos) -> IsoPos {
    Vec2::new(p.x - p.y, (p.x + p.y) / 2.)
}

pub fn to_cartesian(p: IsoPos) -> CartPos {
    Vec2::new((2. * p.y + p.x) / 2., (2. * p.y - p.x) / 2.)
}

/// `tile_size` is the on-screen size of a tile, so it is fractional once zoomed
pub fn pixel_to_tile_index(p: CartPos, tile_size: f64) -> TileIndex {
    TileIndex::new((p.x / tile_size).floor() as i32, (p.y / tile_size).floor() as i32)
}

/// Negative becomes positive and positive becomes negative. Zero stays zero.
///
/// Scrolling the camera one way moves the map the other way, so this is applied to
/// the x axis whenever a camera scroll crosses between cartesian and isometric space.
pub fn mirror_sign(v: f64) -> f64 {
    if v < 0. {
        v.abs()
    } else if v > 0. {
        -v.abs()
    } else {
        v
    }
}
