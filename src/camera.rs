use crate::error::{CoreResult, ensure_finite};
use crate::map::TileMap;
use crate::math::{CartPos, IsoPos, PixelPos, Rect, Screen, ScreenPos, Vec2};
use crate::picker;
use crate::transform::{TileIndex, mirror_sign, to_cartesian, to_isometric};
use derived_deref::Deref;

pub const DEFAULT_TILE_SIZE: u32 = 32;

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 3.0;
pub const ZOOM_STEP: f64 = 0.25;

/// Screen offset of the character sprite's anchor at zoom 1, applied in object focus mode
pub const OBJECT_FOCUS_OFFSET: Vec2<f64, Screen> = Vec2::new(45., 51.);

/// Uniform scale factor, always within `[MIN_ZOOM, MAX_ZOOM]` and a multiple of `ZOOM_STEP`
#[derive(Deref, Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Zoom(f64);

impl Zoom {
    /// Out of range levels are clamped, in between levels snap to the nearest step
    pub fn new(level: f64) -> CoreResult<Self> {
        ensure_finite("zoom", &[level])?;
        let snapped = (level / ZOOM_STEP).round() * ZOOM_STEP;
        Ok(Self(snapped.clamp(MIN_ZOOM, MAX_ZOOM)))
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self(MIN_ZOOM)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FocusMode {
    /// Free camera, scrolled with the mouse and centered on clicked tiles
    #[default]
    Overview,
    /// Camera follows the character
    ObjectFocus,
}

impl FocusMode {
    pub fn next(self) -> Self {
        match self {
            FocusMode::Overview => FocusMode::ObjectFocus,
            FocusMode::ObjectFocus => FocusMode::Overview,
        }
    }
}

/// What the camera was last centered on. Zoom changes re-center on it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Focus {
    pub point: CartPos,
    pub mode: FocusMode,
}

/// Cartesian camera scroll to the isometric scroll that gets added to zoomed world positions
/// before they are projected
pub fn camera_to_isometric(scroll: CartPos) -> IsoPos {
    let doubled: IsoPos = Vec2::new(mirror_sign(scroll.x * 2.), scroll.y);
    to_cartesian(doubled).cast_unit()
}

/// Inverse of [`camera_to_isometric`]
pub fn camera_to_cartesian(scroll: IsoPos) -> CartPos {
    let projected = to_isometric(scroll.cast_unit());
    Vec2::new(mirror_sign(projected.x / 2.), projected.y)
}

/// Scroll offset (kept in both cartesian and isometric form) plus zoom.
///
/// `scroll_cartesian` is what panning and centering work with, `scroll_isometric` is what the
/// projection needs. Both are private and every setter re-derives the other one.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    scroll_cartesian: CartPos,
    scroll_isometric: IsoPos,
    zoom: Zoom,
    tile_size: u32,
    viewport: Vec2<f64, Screen>,
    focus: Focus,
}

impl Camera {
    pub fn new(tile_size: u32, viewport_width: u32, viewport_height: u32) -> Self {
        let tile_size = if tile_size == 0 {
            log::warn!("Tile size can't be 0, using {DEFAULT_TILE_SIZE}");
            DEFAULT_TILE_SIZE
        } else {
            tile_size
        };

        Self {
            scroll_cartesian: CartPos::default(),
            scroll_isometric: IsoPos::default(),
            zoom: Zoom::default(),
            tile_size,
            viewport: Vec2::new(viewport_width as f64, viewport_height as f64),
            focus: Focus::default(),
        }
    }

    pub fn scroll_cartesian(&self) -> CartPos {
        self.scroll_cartesian
    }

    pub fn scroll_isometric(&self) -> IsoPos {
        self.scroll_isometric
    }

    pub fn zoom(&self) -> f64 {
        *self.zoom
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Size of a tile on screen at the current zoom
    pub fn screen_tile_size(&self) -> f64 {
        self.tile_size as f64 * *self.zoom
    }

    pub fn viewport(&self) -> Vec2<f64, Screen> {
        self.viewport
    }

    pub fn viewport_rect(&self) -> Rect<f64, Screen> {
        Rect::new(0., 0., self.viewport.x, self.viewport.y)
    }

    pub fn viewport_center(&self) -> ScreenPos {
        self.viewport / 2.
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Change how the focus point is centered on the next zoom, without moving the camera
    pub fn set_focus_mode(&mut self, mode: FocusMode) {
        self.focus.mode = mode;
    }

    // Scroll

    pub fn set_scroll_cartesian(&mut self, scroll: CartPos) -> CoreResult<()> {
        ensure_finite("scroll", &[scroll.x, scroll.y])?;
        self.scroll_cartesian = scroll;
        self.scroll_isometric = camera_to_isometric(scroll);
        log::trace!(
            "map x:{:.2}, map y:{:.2}, iso x:{:.2}, iso y:{:.2}",
            scroll.x,
            scroll.y,
            self.scroll_isometric.x,
            self.scroll_isometric.y
        );
        Ok(())
    }

    pub fn set_scroll_isometric(&mut self, scroll: IsoPos) -> CoreResult<()> {
        ensure_finite("scroll", &[scroll.x, scroll.y])?;
        self.set_scroll_cartesian(camera_to_cartesian(scroll))
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) -> CoreResult<()> {
        ensure_finite("pan delta", &[dx, dy])?;
        self.set_scroll_cartesian(self.scroll_cartesian + Vec2::new(dx, dy))
    }

    // Zoom

    /// Returns whether the zoom changed. If it did, the camera is re-centered on its focus.
    pub fn set_zoom(&mut self, level: f64) -> CoreResult<bool> {
        let zoom = Zoom::new(level)?;
        if zoom == self.zoom {
            return Ok(false);
        }
        log::debug!("Zoom {} -> {}", *self.zoom, *zoom);
        self.zoom = zoom;
        let Focus { point, mode } = self.focus;
        self.center_on(point, mode)?;
        Ok(true)
    }

    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(*self.zoom + ZOOM_STEP).unwrap_or(false)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(*self.zoom - ZOOM_STEP).unwrap_or(false)
    }

    /// One mouse wheel event. Positive zooms in, negative zooms out.
    pub fn step_zoom(&mut self, wheel_delta: i32) -> bool {
        match wheel_delta.signum() {
            1 => self.zoom_in(),
            -1 => self.zoom_out(),
            _ => false,
        }
    }

    // Centering

    /// Scroll so `point` lands in the middle of the viewport, and remember it as the focus
    pub fn center_on(&mut self, point: CartPos, mode: FocusMode) -> CoreResult<()> {
        ensure_finite("point", &[point.x, point.y])?;
        let zoom = *self.zoom;
        let offset = self.viewport / zoom / 2.;
        let iso = to_isometric(point);

        let mut scroll = Vec2::new(
            iso.x * zoom / 2. - offset.x * zoom / 2.,
            -iso.y * zoom + offset.y * zoom,
        );
        if mode == FocusMode::ObjectFocus {
            scroll.x += OBJECT_FOCUS_OFFSET.x * zoom / 2.;
            scroll.y -= OBJECT_FOCUS_OFFSET.y * zoom;
        }

        self.focus = Focus { point, mode };
        self.set_scroll_cartesian(scroll)
    }

    /// Center on the top-left corner of a tile. Does not check the tile against any map.
    pub fn center_on_tile(&mut self, tile: TileIndex) -> CoreResult<()> {
        log::debug!("Centering on tile ({}, {})", tile.col, tile.row);
        self.center_on(tile.origin(self.tile_size), FocusMode::Overview)
    }

    /// Returns the tile that was centered on, or `None` if the mouse isn't over the map
    pub fn center_on_tile_under_mouse(
        &mut self,
        mouse: PixelPos,
        map: &TileMap,
    ) -> CoreResult<Option<TileIndex>> {
        let tile = picker::pick_tile(self, mouse);
        if !map.contains(tile) {
            log::debug!("No tile under the mouse at ({}, {})", mouse.x, mouse.y);
            return Ok(None);
        }
        self.center_on_tile(tile)?;
        Ok(Some(tile))
    }

    // Projection

    /// Where a cartesian world point is drawn on screen
    pub fn world_to_screen(&self, point: CartPos) -> ScreenPos {
        to_isometric(point * *self.zoom + self.scroll_isometric.cast_unit()).cast_unit()
    }

    /// Where the top-left corner of a tile's sprite is drawn
    pub fn tile_to_screen(&self, tile: TileIndex) -> ScreenPos {
        self.world_to_screen(tile.origin(self.tile_size))
    }
}
