use crate::camera::{Camera, FocusMode};
use crate::config::Config;
use crate::map::{TileKind, TileMap};
use crate::math::{CartPos, PixelPos, Vec2};
use crate::misc::Direction;
use crate::picker;
use tap::TapFallible;

/// Discrete things that happened since the last frame, in the order they happened
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    ToggleMode,
    Click,
    /// Wheel delta, positive away from the user
    Wheel(i32),
}

/// Held state of the movement keys (W, A, S, D)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveKeys {
    /// Step in cartesian pixels and the resulting facing, or `None` if the combination of keys
    /// doesn't move the character
    pub fn step(self) -> Option<(CartPos, Direction)> {
        let MoveKeys { up, down, left, right } = self;
        let (dx, dy, direction) = match (up, down, left, right) {
            (false, true, false, false) => (5., 5., Direction::Down),
            (true, false, false, false) => (-5., -5., Direction::Up),
            (true, false, false, true) => (0., -5., Direction::UpRight),
            (true, false, true, false) => (-5., 0., Direction::UpLeft),
            (false, false, false, true) => (3., -3., Direction::Right),
            (false, false, true, false) => (-3., 3., Direction::Left),
            (false, true, true, false) => (0., 5., Direction::DownLeft),
            (false, true, false, true) => (5., 0., Direction::DownRight),
            _ => return None,
        };
        Some((Vec2::new(dx, dy), direction))
    }
}

/// Everything the loop gathers from the window for one frame
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub events: Vec<InputEvent>,
    pub keys: MoveKeys,
    pub mouse: PixelPos,
}

/// The sprite walking around the map
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Character {
    pub position: CartPos,
    pub facing: Direction,
}

/// All state owned by the loop. Mutated only by [`GameState::update`] between frames.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub camera: Camera,
    pub mode: FocusMode,
    pub character: Character,
    pub mouse: PixelPos,
    /// Kind of the tile last picked in object focus mode
    pub last_clicked: Option<TileKind>,
    pub running: bool,
    scroll_speed: f64,
    edge_margin: f64,
}

impl GameState {
    pub fn new(config: &Config) -> Self {
        Self {
            camera: Camera::new(config.tile_size, config.window_width, config.window_height),
            mode: FocusMode::Overview,
            character: Character::default(),
            mouse: PixelPos::default(),
            last_clicked: None,
            running: true,
            scroll_speed: config.scroll_speed,
            edge_margin: config.edge_margin,
        }
    }

    pub fn update(&mut self, input: &InputSnapshot, map: &TileMap) {
        self.mouse = input.mouse;

        for event in &input.events {
            match *event {
                InputEvent::Quit => self.running = false,
                InputEvent::ToggleMode => {
                    self.mode = self.mode.next();
                    log::info!("Switched to {:?} mode", self.mode);
                }
                InputEvent::Click => self.click(map),
                InputEvent::Wheel(delta) => self.wheel(delta),
            }
        }

        if let Some((step, facing)) = input.keys.step() {
            self.character.position += step;
            self.character.facing = facing;
        }

        match self.mode {
            FocusMode::ObjectFocus => self.follow_character(),
            FocusMode::Overview => self.scroll_with_mouse(),
        }
    }

    fn click(&mut self, map: &TileMap) {
        match self.mode {
            FocusMode::Overview => {
                let _ = self
                    .camera
                    .center_on_tile_under_mouse(self.mouse, map)
                    .tap_err(|e| log::error!(once = true; "Can't center on tile: {e}"));
            }
            FocusMode::ObjectFocus => {
                let tile = picker::pick_tile(&self.camera, self.mouse);
                if let Some(kind) = map.get(tile) {
                    log::info!("Picked tile ({}, {}) of kind {}", tile.col, tile.row, *kind);
                    self.last_clicked = Some(kind);
                }
            }
        }
    }

    fn wheel(&mut self, delta: i32) {
        match self.mode {
            // The character is the focus, even if it moved since the last frame
            FocusMode::ObjectFocus => self.follow_character(),
            // Keep the last focus point, but without the sprite offset
            FocusMode::Overview => self.camera.set_focus_mode(FocusMode::Overview),
        }
        self.camera.step_zoom(delta);
    }

    fn follow_character(&mut self) {
        let _ = self
            .camera
            .center_on(self.character.position, FocusMode::ObjectFocus)
            .tap_err(|e| log::error!(once = true; "Can't follow character: {e}"));
    }

    /// Pan while the mouse rests against an edge of the window
    fn scroll_with_mouse(&mut self) {
        let zoom = self.camera.zoom();
        let viewport = self.camera.viewport() / zoom;
        let mouse = self.mouse.to_screen() / zoom;
        let margin = self.edge_margin;

        let mut delta = CartPos::default();
        if mouse.x < margin {
            delta.x -= self.scroll_speed;
        }
        if mouse.x > viewport.x - margin {
            delta.x += self.scroll_speed;
        }
        if mouse.y < margin {
            delta.y += self.scroll_speed;
        }
        if mouse.y > viewport.y - margin {
            delta.y -= self.scroll_speed;
        }

        if delta != Vec2::default() {
            let _ = self
                .camera
                .pan_by(delta.x, delta.y)
                .tap_err(|e| log::error!(once = true; "Can't scroll: {e}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::TileIndex;

    fn setup() -> (GameState, TileMap) {
        (GameState::new(&Config::default()), TileMap::generate(64, 64, 1).unwrap())
    }

    fn input(events: &[InputEvent], mouse: (i32, i32)) -> InputSnapshot {
        InputSnapshot {
            events: events.to_vec(),
            keys: MoveKeys::default(),
            mouse: Vec2::new(mouse.0, mouse.1),
        }
    }

    fn keys(up: bool, down: bool, left: bool, right: bool) -> MoveKeys {
        MoveKeys { up, down, left, right }
    }

    #[test]
    fn movement_table() {
        let cases = [
            (keys(false, true, false, false), Some((5., 5., Direction::Down))),
            (keys(true, false, false, false), Some((-5., -5., Direction::Up))),
            (keys(true, false, false, true), Some((0., -5., Direction::UpRight))),
            (keys(true, false, true, false), Some((-5., 0., Direction::UpLeft))),
            (keys(false, false, false, true), Some((3., -3., Direction::Right))),
            (keys(false, false, true, false), Some((-3., 3., Direction::Left))),
            (keys(false, true, true, false), Some((0., 5., Direction::DownLeft))),
            (keys(false, true, false, true), Some((5., 0., Direction::DownRight))),
            (keys(false, false, false, false), None),
            (keys(true, true, false, false), None),
            (keys(false, false, true, true), None),
            (keys(true, true, true, true), None),
        ];
        for (keys, expected) in cases {
            let actual = keys.step().map(|(v, d)| (v.x, v.y, d));
            assert_eq!(actual, expected, "{keys:?}");
        }
    }

    #[test]
    fn quit_and_toggle() {
        let (mut state, map) = setup();
        state.update(&input(&[InputEvent::ToggleMode], (400, 300)), &map);
        assert_eq!(state.mode, FocusMode::ObjectFocus);
        assert!(state.running);
        state.update(&input(&[InputEvent::ToggleMode, InputEvent::Quit], (400, 300)), &map);
        assert_eq!(state.mode, FocusMode::Overview);
        assert!(!state.running);
    }

    #[test]
    fn overview_click_centers_on_tile_under_mouse() {
        let (mut state, map) = setup();
        state.camera.center_on_tile(TileIndex::new(20, 20)).unwrap();
        let under_mouse = picker::pick_tile(&state.camera, Vec2::new(500, 350));

        state.update(&input(&[InputEvent::Click], (500, 350)), &map);
        assert_eq!(state.camera.tile_to_screen(under_mouse), state.camera.viewport_center());
        assert_eq!(state.last_clicked, None);
    }

    #[test]
    fn object_focus_click_records_tile_kind() {
        let (mut state, map) = setup();
        state.mode = FocusMode::ObjectFocus;
        state.update(&input(&[], (400, 300)), &map);

        let tile = picker::pick_tile(&state.camera, Vec2::new(420, 330));
        state.update(&input(&[InputEvent::Click], (420, 330)), &map);
        assert_eq!(state.last_clicked, map.get(tile));
        assert!(state.last_clicked.is_some());
    }

    #[test]
    fn object_focus_follows_character() {
        let (mut state, map) = setup();
        state.mode = FocusMode::ObjectFocus;
        let snapshot = InputSnapshot {
            keys: keys(false, true, false, false),
            mouse: Vec2::new(400, 300),
            ..Default::default()
        };
        for _ in 0..10 {
            state.update(&snapshot, &map);
        }
        assert_eq!(state.character.position, Vec2::new(50., 50.));
        assert_eq!(state.character.facing, Direction::Down);
        let on_screen = state.camera.world_to_screen(state.character.position);
        let expected = state.camera.viewport_center() - crate::camera::OBJECT_FOCUS_OFFSET;
        assert_eq!(on_screen, expected);
    }

    #[test]
    fn wheel_zooms_and_keeps_focus() {
        let (mut state, map) = setup();
        let tile = TileIndex::new(5, 5);
        state.camera.center_on_tile(tile).unwrap();
        let before = state.camera.tile_to_screen(tile);

        state.update(&input(&[InputEvent::Wheel(1), InputEvent::Wheel(1)], (400, 300)), &map);
        assert_eq!(state.camera.zoom(), 1.5);
        assert_eq!(state.camera.tile_to_screen(tile), before);

        state.update(&input(&[InputEvent::Wheel(-1)], (400, 300)), &map);
        assert_eq!(state.camera.zoom(), 1.25);
    }

    #[test]
    fn mouse_at_edges_scrolls_overview() {
        let (mut state, map) = setup();
        let start = state.camera.scroll_cartesian();

        state.update(&input(&[], (0, 300)), &map);
        assert_eq!(state.camera.scroll_cartesian(), start + Vec2::new(-6., 0.));

        state.update(&input(&[], (799, 0)), &map);
        assert_eq!(state.camera.scroll_cartesian(), start + Vec2::new(0., 6.));

        // Nowhere near an edge
        state.update(&input(&[], (400, 300)), &map);
        assert_eq!(state.camera.scroll_cartesian(), start + Vec2::new(0., 6.));

        state.update(&input(&[], (400, 599)), &map);
        assert_eq!(state.camera.scroll_cartesian(), start);
    }

    #[test]
    fn edge_scrolling_is_off_in_object_focus() {
        let (mut state, map) = setup();
        state.mode = FocusMode::ObjectFocus;
        state.update(&input(&[], (0, 0)), &map);
        let followed = state.camera.scroll_cartesian();
        state.update(&input(&[], (0, 0)), &map);
        assert_eq!(state.camera.scroll_cartesian(), followed);
    }
}
