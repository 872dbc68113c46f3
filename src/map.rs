use crate::error::{CoreError, CoreResult};
use crate::sprites::NUM_ISOMETRIC_TILES;
use crate::transform::TileIndex;
use derived_deref::Deref;
use itertools::Itertools;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

/// Index of a cell in the tile sheet. Always `< NUM_ISOMETRIC_TILES`.
#[derive(Deref, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileKind(u8);

impl TileKind {
    pub const GRASS: TileKind = TileKind(1);
    pub const WATER: TileKind = TileKind(3);
    pub const ROCK: TileKind = TileKind(4);

    pub fn new(kind: u8) -> CoreResult<Self> {
        if (kind as usize) < NUM_ISOMETRIC_TILES {
            Ok(Self(kind))
        } else {
            Err(CoreError::InvalidTileKind(kind))
        }
    }

    pub fn clip_index(self) -> usize {
        self.0 as usize
    }
}

/// Largest map, in tiles
pub const MAX_TILES: i32 = 4096 * 4096;

/// Fixed-size grid of tile kinds, stored row by row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMap {
    width: i32,
    height: i32,
    tiles: Vec<TileKind>,
}

impl TileMap {
    pub fn filled(width: i32, height: i32, kind: TileKind) -> CoreResult<Self> {
        let count = check_dimensions(width, height)?;
        Ok(Self { width, height, tiles: vec![kind; count] })
    }

    /// Build from one `Vec` of raw kinds per row
    pub fn from_rows(rows: &[Vec<u8>]) -> CoreResult<Self> {
        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |r| r.len()) as i32;
        check_dimensions(width, height)?;
        if let Some(row) = rows.iter().position(|r| r.len() as i32 != width) {
            return Err(CoreError::MapSize(format!(
                "row {row} has {} tiles, expected {width}",
                rows[row].len()
            )));
        }

        let tiles =
            rows.iter().flatten().map(|&k| TileKind::new(k)).collect::<Result<Vec<_>, _>>()?;
        Ok(Self { width, height, tiles })
    }

    /// Grass covered in 2x2 blocks, some of which become rock (1 in 10) or water (1 in 10).
    /// Blocks touching the last four rows or columns always stay grass.
    pub fn generate(width: i32, height: i32, seed: u64) -> CoreResult<Self> {
        let mut map = Self::filled(width, height, TileKind::GRASS)?;
        let mut rng = Pcg64::seed_from_u64(seed);

        for (y, x) in (0..height).step_by(2).cartesian_product((0..width).step_by(2)) {
            let paint = match rng.gen_range(0..10) {
                9 => TileKind::ROCK,
                7 => TileKind::WATER,
                _ => continue,
            };
            if y < height - 4 && x < width - 4 {
                for (dy, dx) in (0..2).cartesian_product(0..2) {
                    map.set(TileIndex::new(x + dx, y + dy), paint);
                }
            }
        }

        log::info!("Generated {width}x{height} map from seed {seed}");
        Ok(map)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, tile: TileIndex) -> bool {
        tile.col >= 0 && tile.row >= 0 && tile.col < self.width && tile.row < self.height
    }

    /// `None` for anything off the map
    pub fn get(&self, tile: TileIndex) -> Option<TileKind> {
        self.contains(tile).then(|| self.tiles[(tile.row * self.width + tile.col) as usize])
    }

    /// Ignores anything off the map
    fn set(&mut self, tile: TileIndex, kind: TileKind) {
        if self.contains(tile) {
            self.tiles[(tile.row * self.width + tile.col) as usize] = kind;
        }
    }
}

/// Tile count for a `width` by `height` map
fn check_dimensions(width: i32, height: i32) -> CoreResult<usize> {
    if width <= 0 || height <= 0 {
        return Err(CoreError::MapSize(format!("{width}x{height}")));
    }
    match width.checked_mul(height) {
        Some(count) if count <= MAX_TILES => Ok(count as usize),
        _ => Err(CoreError::MapSize(format!("{width}x{height} is more than {MAX_TILES} tiles"))),
    }
}
