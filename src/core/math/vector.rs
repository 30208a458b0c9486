//=========================================================================
// 2D Vector
//=========================================================================
//
// Small value type for positions, deltas and pixel dimensions.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

//=== Vec2 ================================================================

/// Two-component vector.
///
/// Generic over the component type so the same type serves pixel
/// dimensions (`Vec2<u32>`) and continuous quantities (`Vec2<f64>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vec2<T = f64> {
    pub x: T,
    pub y: T,
}

/// Pixel dimension of a surface or window.
pub type Dimension = Vec2<u32>;

impl<T: Copy> Vec2<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Components swapped.
    pub fn yx(self) -> Self {
        Self::new(self.y, self.x)
    }

    pub fn xx(self) -> Self {
        Self::new(self.x, self.x)
    }

    pub fn yy(self) -> Self {
        Self::new(self.y, self.y)
    }
}

impl Dimension {
    /// Number of pixels covered by this dimension.
    pub fn area(self) -> usize {
        self.x as usize * self.y as usize
    }
}

//--- Operators -----------------------------------------------------------

impl<T: Add<Output = T>> Add for Vec2<T> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self { x: self.x + other.x, y: self.y + other.y }
    }
}

impl<T: Sub<Output = T>> Sub for Vec2<T> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self { x: self.x - other.x, y: self.y - other.y }
    }
}

impl<T: Mul<Output = T> + Copy> Mul<T> for Vec2<T> {
    type Output = Self;

    fn mul(self, factor: T) -> Self {
        Self { x: self.x * factor, y: self.y * factor }
    }
}

//--- Conversions ---------------------------------------------------------

impl<T> From<(T, T)> for Vec2<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

impl<T> From<Vec2<T>> for (T, T) {
    fn from(v: Vec2<T>) -> Self {
        (v.x, v.y)
    }
}

impl<T: fmt::Display> fmt::Display for Vec2<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
