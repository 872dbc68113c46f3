use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Div, Mul, Sub};

/// Axis-aligned map space, in unzoomed pixels (tile `(c, r)` starts at `(c, r) * tile_size`)
pub struct Cartesian;
/// Diamond-projected space produced by `transform::to_isometric`
pub struct Isometric;
/// Window space, in (fractional) screen pixels
pub struct Screen;
/// Whole pixels, as handed to the renderer or read from the mouse
pub struct PixelUnits;

pub type CartPos = Vec2<f64, Cartesian>;
pub type IsoPos = Vec2<f64, Isometric>;
pub type ScreenPos = Vec2<f64, Screen>;
pub type PixelPos = Vec2<i32, PixelUnits>;

// Vec2

pub struct Vec2<T, U> {
    pub x: T,
    pub y: T,
    _unit: PhantomData<U>,
}

impl<T, U> Vec2<T, U> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y, _unit: PhantomData }
    }

    /// Relabel the space without touching the values
    pub fn cast_unit<V>(self) -> Vec2<T, V> {
        Vec2::new(self.x, self.y)
    }

    pub fn map<R>(self, f: impl Fn(T) -> R) -> Vec2<R, U> {
        Vec2::new(f(self.x), f(self.y))
    }
}

impl<T: Default, U> Default for Vec2<T, U> {
    fn default() -> Self {
        Self::new(T::default(), T::default())
    }
}

impl<T: Debug, U> Debug for Vec2<T, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vec2").field("x", &self.x).field("y", &self.y).finish()
    }
}

impl<T: Clone, U> Clone for Vec2<T, U> {
    fn clone(&self) -> Self {
        Self::new(self.x.clone(), self.y.clone())
    }
}

impl<T: Copy, U> Copy for Vec2<T, U> {}

impl<T: PartialEq, U> PartialEq for Vec2<T, U> {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl<T: Eq, U> Eq for Vec2<T, U> {}

impl<T: Hash, U> Hash for Vec2<T, U> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.hash(state);
        self.y.hash(state);
    }
}

impl<T: Add, U> Add for Vec2<T, U> {
    type Output = Vec2<T::Output, U>;

    fn add(self, rhs: Self) -> Self::Output {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Add<Output = T> + Copy, U> AddAssign for Vec2<T, U> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Sub, U> Sub for Vec2<T, U> {
    type Output = Vec2<T::Output, U>;

    fn sub(self, rhs: Self) -> Self::Output {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Mul + Copy, U> Mul<T> for Vec2<T, U> {
    type Output = Vec2<T::Output, U>;

    fn mul(self, rhs: T) -> Self::Output {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl<T: Div + Copy, U> Div<T> for Vec2<T, U> {
    type Output = Vec2<T::Output, U>;

    fn div(self, rhs: T) -> Self::Output {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl<U> Vec2<f64, U> {
    /// The only place fractional positions are truncated on their way to the renderer
    pub fn to_pixels(self) -> PixelPos {
        Vec2::new(self.x.floor() as i32, self.y.floor() as i32)
    }
}

impl PixelPos {
    pub fn to_screen(self) -> ScreenPos {
        Vec2::new(self.x as f64, self.y as f64)
    }
}

// Rect

pub struct Rect<T, U> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
    _unit: PhantomData<U>,
}

impl<T, U> Rect<T, U> {
    pub const fn new(x: T, y: T, width: T, height: T) -> Self {
        Self { x, y, width, height, _unit: PhantomData }
    }
}

impl<T: Debug, U> Debug for Rect<T, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rect")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl<T: Clone, U> Clone for Rect<T, U> {
    fn clone(&self) -> Self {
        Self::new(self.x.clone(), self.y.clone(), self.width.clone(), self.height.clone())
    }
}

impl<T: Copy, U> Copy for Rect<T, U> {}

impl<T: PartialEq, U> PartialEq for Rect<T, U> {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x
            && self.y == other.y
            && self.width == other.width
            && self.height == other.height
    }
}

impl<T: Eq, U> Eq for Rect<T, U> {}

impl<T: Copy + Add<Output = T>, U> Rect<T, U> {
    pub fn left(&self) -> T {
        self.x
    }

    pub fn right(&self) -> T {
        self.x + self.width
    }

    pub fn top(&self) -> T {
        self.y
    }

    pub fn bottom(&self) -> T {
        self.y + self.height
    }
}

impl<T: Copy + Add<Output = T> + PartialOrd, U> Rect<T, U> {
    /// Half-open: the right and bottom edges are outside
    pub fn contains(&self, point: Vec2<T, U>) -> bool {
        self.left() <= point.x
            && point.x < self.right()
            && self.top() <= point.y
            && point.y < self.bottom()
    }
}
