use assert_approx_eq::assert_approx_eq;
use isoview::camera::{MAX_ZOOM, MIN_ZOOM};
use isoview::math::{PixelPos, ScreenPos, Vec2};
use isoview::picker::pick_tile;
use isoview::render::{DrawInstruction, render};
use isoview::sprites::Sheet;
use isoview::{Config, FocusMode, GameState, InputEvent, InputSnapshot, MoveKeys, TileIndex, TileMap};
use std::collections::HashSet;

fn setup() -> (GameState, TileMap) {
    let config = Config::default();
    let map = TileMap::generate(config.map_width, config.map_height, config.seed).unwrap();
    (GameState::new(&config), map)
}

fn at(mouse: PixelPos, events: &[InputEvent]) -> InputSnapshot {
    InputSnapshot { events: events.to_vec(), keys: MoveKeys::default(), mouse }
}

fn assert_within_pixel(actual: ScreenPos, expected: ScreenPos) {
    assert_approx_eq!(actual.x, expected.x, 1.0);
    assert_approx_eq!(actual.y, expected.y, 1.0);
}

#[test]
fn clicking_the_center_centers_the_clicked_tile() {
    let (mut state, map) = setup();
    assert_eq!(state.camera.scroll_cartesian(), Vec2::new(0., 0.));
    let center = state.camera.viewport_center();

    let clicked = pick_tile(&state.camera, center.to_pixels());
    state.update(&at(center.to_pixels(), &[InputEvent::Click]), &map);
    assert_within_pixel(state.camera.tile_to_screen(clicked), center);

    // Once tile (0, 0) is in the middle, clicking there keeps it there
    state.camera.center_on_tile(TileIndex::new(0, 0)).unwrap();
    state.update(&at(center.to_pixels(), &[InputEvent::Click]), &map);
    assert_eq!(state.camera.focus().point, Vec2::new(0., 0.));
    assert_within_pixel(state.camera.tile_to_screen(TileIndex::new(0, 0)), center);
}

#[test]
fn zooming_keeps_the_focused_tile_in_place() {
    let (mut state, map) = setup();
    let tile = TileIndex::new(5, 5);
    state.camera.center_on_tile(tile).unwrap();
    let before = state.camera.tile_to_screen(tile);
    let center = state.camera.viewport_center().to_pixels();

    state.update(&at(center, &[InputEvent::Wheel(1)]), &map);
    assert_eq!(state.camera.zoom(), 1.25);
    assert_within_pixel(state.camera.tile_to_screen(tile), before);
}

#[test]
fn zoom_stays_in_bounds_for_any_wheel_sequence() {
    let (mut state, map) = setup();
    let center = state.camera.viewport_center().to_pixels();
    let wheel = [3, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, -1, -7, -1, -1, -1, -1, -1, -1, -1, 2, 0];
    for delta in wheel {
        state.update(&at(center, &[InputEvent::Wheel(delta)]), &map);
        assert!((MIN_ZOOM..=MAX_ZOOM).contains(&state.camera.zoom()));
    }
}

#[test]
fn every_visible_tile_is_drawn() {
    let (mut state, map) = setup();
    let viewport = state.camera.viewport_rect();
    for zoom in [1.0, 2.0, 3.0] {
        state.camera.set_zoom(zoom).unwrap();
        for tile in [TileIndex::new(0, 0), TileIndex::new(31, 40), TileIndex::new(63, 63)] {
            state.camera.center_on_tile(tile).unwrap();
            let drawn: HashSet<PixelPos> = tiles_only(&render(&state, &map))
                .map(|d| d.position)
                .collect();

            for row in 0..map.height() {
                for col in 0..map.width() {
                    let top_left = state.camera.tile_to_screen(TileIndex::new(col, row));
                    if viewport.contains(top_left) {
                        assert!(drawn.contains(&top_left.to_pixels()), "({col}, {row}) missing");
                    }
                }
            }
        }
    }
}

fn tiles_only(frame: &[DrawInstruction]) -> impl Iterator<Item = &DrawInstruction> {
    // The mouse highlight and the swatch come after the character
    let character = frame.iter().position(|d| d.sheet == Sheet::Character).unwrap_or(frame.len());
    frame[..character].iter()
}

#[test]
fn walk_and_pick_in_object_focus() {
    let (mut state, map) = setup();
    let center = state.camera.viewport_center().to_pixels();
    state.update(&at(center, &[InputEvent::ToggleMode]), &map);
    assert_eq!(state.mode, FocusMode::ObjectFocus);

    let walk = InputSnapshot {
        keys: MoveKeys { down: true, right: true, ..Default::default() },
        mouse: center,
        ..Default::default()
    };
    for _ in 0..40 {
        state.update(&walk, &map);
    }
    assert_eq!(state.character.position, Vec2::new(200., 0.));

    let target = pick_tile(&state.camera, center);
    state.update(&at(center, &[InputEvent::Click]), &map);
    assert_eq!(state.last_clicked, map.get(target));

    let frame = render(&state, &map);
    let swatch = frame.last().unwrap();
    assert_eq!(swatch.position, Vec2::new(0, 0));
    assert_eq!(swatch.scale, 1.);

    state.update(&at(center, &[InputEvent::ToggleMode, InputEvent::Quit]), &map);
    assert_eq!(state.mode, FocusMode::Overview);
    assert!(!state.running);
}
