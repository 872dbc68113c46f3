use crate::cull::VisibleRange;
use crate::game::GameState;
use crate::map::TileMap;
use crate::math::PixelPos;
use crate::picker;
use crate::sprites::{Sheet, SheetLayout, TILE_SHEET, character_clip_index};

/// Tile sheet cell drawn over the tile under the mouse
pub const MOUSE_HIGHLIGHT_CLIP: usize = 0;

/// One sprite copy, in the order it must be drawn
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawInstruction {
    pub sheet: Sheet,
    pub clip: usize,
    /// Top-left corner on screen
    pub position: PixelPos,
    pub scale: f64,
}

/// Whatever actually puts sprites on screen
pub trait DrawSink {
    fn draw(&mut self, instruction: &DrawInstruction) -> anyhow::Result<()>;
}

impl DrawSink for Vec<DrawInstruction> {
    fn draw(&mut self, instruction: &DrawInstruction) -> anyhow::Result<()> {
        self.push(*instruction);
        Ok(())
    }
}

/// A full frame: map back to front, then the character, then the mouse highlight, then the
/// last clicked tile swatch in the top-left corner
pub fn render(state: &GameState, map: &TileMap) -> Vec<DrawInstruction> {
    let camera = &state.camera;
    let scale = camera.zoom();
    let mut frame = Vec::new();

    // Map
    let range = VisibleRange::new(camera, TILE_SHEET.cell_size(), map.width(), map.height());
    if range.is_empty() {
        log::trace!("No map tiles in view");
    } else {
        for tile in range.lattice() {
            let Some(kind) = map.get(tile) else { continue };
            frame.push(DrawInstruction {
                sheet: Sheet::Tiles,
                clip: kind.clip_index(),
                position: camera.tile_to_screen(tile).to_pixels(),
                scale,
            });
        }
    }

    // Character
    frame.push(DrawInstruction {
        sheet: Sheet::Character,
        clip: character_clip_index(state.character.facing),
        position: camera.world_to_screen(state.character.position).to_pixels(),
        scale,
    });

    // Mouse highlight
    let hovered = picker::pick_tile(camera, state.mouse);
    frame.push(DrawInstruction {
        sheet: Sheet::Tiles,
        clip: MOUSE_HIGHLIGHT_CLIP,
        position: camera.tile_to_screen(hovered).to_pixels(),
        scale,
    });

    // Last clicked tile, unscaled
    if let Some(kind) = state.last_clicked {
        frame.push(DrawInstruction {
            sheet: Sheet::Tiles,
            clip: kind.clip_index(),
            position: PixelPos::default(),
            scale: 1.,
        });
    }

    frame
}

/// Hand a frame to a sink. Stops at the first failed draw.
pub fn submit(frame: &[DrawInstruction], sink: &mut impl DrawSink) -> anyhow::Result<()> {
    for instruction in frame {
        sink.draw(instruction)?;
    }
    Ok(())
}

/// Destination size of an instruction's sprite on screen
pub fn scaled_size(instruction: &DrawInstruction) -> (u32, u32) {
    let layout = SheetLayout::for_sheet(instruction.sheet);
    (
        (layout.cell_width as f64 * instruction.scale).round() as u32,
        (layout.cell_height as f64 * instruction.scale).round() as u32,
    )
}
