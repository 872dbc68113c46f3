use crate::math::{PixelUnits, Rect, Vec2};
use crate::misc::Direction;

pub const NUM_ISOMETRIC_TILES: usize = 5;
pub const NUM_CHARACTER_SPRITES: usize = 8;

/// Which of the two loaded sheets a draw call samples from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sheet {
    Tiles,
    Character,
}

/// Equal-size cells laid out left to right in a single row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SheetLayout {
    pub cell_width: u32,
    pub cell_height: u32,
    pub count: usize,
}

pub const TILE_SHEET: SheetLayout =
    SheetLayout { cell_width: 64, cell_height: 80, count: NUM_ISOMETRIC_TILES };

pub const CHARACTER_SHEET: SheetLayout =
    SheetLayout { cell_width: 70, cell_height: 102, count: NUM_CHARACTER_SPRITES };

impl SheetLayout {
    pub fn for_sheet(sheet: Sheet) -> Self {
        match sheet {
            Sheet::Tiles => TILE_SHEET,
            Sheet::Character => CHARACTER_SHEET,
        }
    }

    pub fn clip(&self, index: usize) -> Option<Rect<u32, PixelUnits>> {
        (index < self.count).then(|| {
            Rect::new(index as u32 * self.cell_width, 0, self.cell_width, self.cell_height)
        })
    }

    pub fn clips(&self) -> impl Iterator<Item = Rect<u32, PixelUnits>> + '_ {
        (0..self.count).filter_map(|i| self.clip(i))
    }

    /// Smallest image that holds every cell
    pub fn required_size(&self) -> Vec2<u32, PixelUnits> {
        Vec2::new(self.cell_width * self.count as u32, self.cell_height)
    }

    pub fn cell_size(&self) -> Vec2<f64, PixelUnits> {
        Vec2::new(self.cell_width as f64, self.cell_height as f64)
    }
}

/// Character sheet cell for a facing
pub fn character_clip_index(direction: Direction) -> usize {
    match direction {
        Direction::UpLeft => 0,
        Direction::Up => 1,
        Direction::UpRight => 2,
        Direction::Right => 3,
        Direction::DownRight => 4,
        Direction::Down => 5,
        Direction::DownLeft => 6,
        Direction::Left => 7,
    }
}
