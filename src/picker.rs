//! Screen pixel back to the tile under it, the inverse of [`Camera::tile_to_screen`].

use crate::camera::Camera;
use crate::math::{CartPos, IsoPos, PixelPos, Vec2};
use crate::transform::{TileIndex, pixel_to_tile_index, to_cartesian, to_isometric};

/// The unzoomed isometric world point under a screen pixel
pub fn screen_to_world_iso(camera: &Camera, mouse: PixelPos) -> IsoPos {
    let zoom = camera.zoom();
    let world: CartPos = (to_cartesian(mouse.to_screen().cast_unit())
        - camera.scroll_isometric().cast_unit())
        / zoom;
    to_isometric(world)
}

/// The tile whose diamond contains the mouse. May lie outside the map.
pub fn pick_tile(camera: &Camera, mouse: PixelPos) -> TileIndex {
    let tile = camera.screen_tile_size();
    let scroll = camera.scroll_isometric();

    // The camera's offset into its current tile, and the whole tiles it has scrolled past.
    // The floored modulus keeps the shift non-negative for either sign of scroll.
    let tile_shift: IsoPos = Vec2::new(scroll.x.rem_euclid(tile), scroll.y.rem_euclid(tile));
    let whole_tiles = ((scroll - tile_shift) / tile).map(|v| v.round() as i32);

    // Stay in zoomed pixels so tile edges land on exact multiples of the tile size
    let corrected = to_cartesian(mouse.to_screen().cast_unit()) - tile_shift.cast_unit();
    let candidate = pixel_to_tile_index(corrected, tile);

    TileIndex::new(candidate.col - whole_tiles.x, candidate.row - whole_tiles.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::FocusMode;

    fn camera() -> Camera {
        Camera::new(32, 800, 600)
    }

    #[test]
    fn unscrolled_origin_is_tile_zero() {
        let camera = camera();
        assert_eq!(pick_tile(&camera, Vec2::new(0, 0)), TileIndex::new(0, 0));
        // One pixel left of the top corner belongs to the tile below-left
        assert_eq!(pick_tile(&camera, Vec2::new(-1, 0)), TileIndex::new(-1, 0));
        // Straight down the middle of tile (0, 0)
        assert_eq!(pick_tile(&camera, Vec2::new(0, 31)), TileIndex::new(0, 0));
        assert_eq!(pick_tile(&camera, Vec2::new(0, 32)), TileIndex::new(1, 1));
    }

    #[test]
    fn center_then_pick_at_viewport_center() {
        let mut camera = camera();
        let center = camera.viewport_center().to_pixels();
        for zoom in [1.0, 1.25, 1.5, 1.75, 2.0, 2.25, 2.5, 2.75, 3.0] {
            camera.set_zoom(zoom).unwrap();
            for col in [0, 1, 5, 17, 32, 63] {
                for row in [0, 2, 5, 31, 40, 63] {
                    let tile = TileIndex::new(col, row);
                    camera.center_on_tile(tile).unwrap();
                    assert_eq!(pick_tile(&camera, center), tile, "zoom {zoom}");
                }
            }
        }
    }

    #[test]
    fn picks_every_pixel_of_a_drawn_diamond() {
        // Scroll to awkward, non tile-aligned offsets of both signs
        for (sx, sy) in [(-37., 12.), (53., -81.), (5., 5.), (-200., 300.)] {
            for zoom in [1.0, 1.75, 3.0] {
                let mut camera = camera();
                camera.set_zoom(zoom).unwrap();
                camera.set_scroll_cartesian(Vec2::new(sx, sy)).unwrap();

                let tile = TileIndex::new(4, 9);
                let top = camera.tile_to_screen(tile);
                let size = camera.screen_tile_size();
                // Sample a few points well inside the diamond below the top corner
                let inside =
                    [(0., 2.), (0., size - 2.), (size / 2., size / 2.), (-size / 2., size / 2.)];
                for (dx, dy) in inside {
                    let p = Vec2::new((top.x + dx).floor() as i32, (top.y + dy).floor() as i32);
                    assert_eq!(pick_tile(&camera, p), tile, "scroll ({sx}, {sy}) zoom {zoom}");
                }
            }
        }
    }

    #[test]
    fn world_iso_point_matches_projection() {
        let mut camera = camera();
        camera.set_zoom(2.0).unwrap();
        camera.center_on(Vec2::new(96., 64.), FocusMode::Overview).unwrap();
        let iso = screen_to_world_iso(&camera, camera.viewport_center().to_pixels());
        assert_eq!(iso, to_isometric(Vec2::new(96., 64.)));
        assert!(camera.viewport_rect().contains(camera.world_to_screen(Vec2::new(96., 64.))));
    }
}
