//! Board geometry: absolute positions and relative vectors.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use thiserror::Error;

/// Errors raised by malformed coordinate literals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("position must have exactly 2 coordinates (x, y), got {0}")]
    Arity(usize),
}

/// A relative displacement on the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Vector {
    pub x: i32,
    pub y: i32,
}

impl Vector {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Vector { x, y }
    }

    /// Returns the vector with its components swapped.
    #[inline]
    pub const fn reversed(self) -> Self {
        Vector::new(self.y, self.x)
    }

    /// Returns the component-wise sign of the vector.
    ///
    /// For a vector along a cardinal line this is the unit step toward its end.
    #[inline]
    pub const fn signum(self) -> Self {
        Vector::new(self.x.signum(), self.y.signum())
    }

    /// Chebyshev length (number of king steps).
    #[inline]
    pub const fn chebyshev_len(self) -> i32 {
        let ax = self.x.abs();
        let ay = self.y.abs();
        if ax > ay {
            ax
        } else {
            ay
        }
    }
}

impl Add for Vector {
    type Output = Vector;

    #[inline]
    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Mul<i32> for Vector {
    type Output = Vector;

    #[inline]
    fn mul(self, rhs: i32) -> Vector {
        Vector::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    #[inline]
    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

impl fmt::Debug for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector({}, {})", self.x, self.y)
    }
}

/// An absolute board coordinate.
///
/// `x` is the column and `y` the row; `(0, 0)` is the top-left corner.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Returns true if the position lies on a `width` x `height` grid.
    #[inline]
    pub const fn in_bounds(self, width: usize, height: usize) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as usize) < width && (self.y as usize) < height
    }
}

impl Add<Vector> for Position {
    type Output = Position;

    #[inline]
    fn add(self, rhs: Vector) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign<Vector> for Position {
    #[inline]
    fn add_assign(&mut self, rhs: Vector) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub<Vector> for Position {
    type Output = Position;

    #[inline]
    fn sub(self, rhs: Vector) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Sub for Position {
    type Output = Vector;

    #[inline]
    fn sub(self, rhs: Position) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Position::new(x, y)
    }
}

impl TryFrom<&[i32]> for Position {
    type Error = GeometryError;

    fn try_from(coords: &[i32]) -> Result<Self, Self::Error> {
        match coords {
            [x, y] => Ok(Position::new(*x, *y)),
            _ => Err(GeometryError::Arity(coords.len())),
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_vector_arithmetic() {
        let p = Position::new(3, 4);
        let v = Vector::new(1, -2);
        assert_eq!(p + v, Position::new(4, 2));
        assert_eq!(p - v, Position::new(2, 6));
        assert_eq!((p + v) - p, v);
        assert_eq!(v * 3, Vector::new(3, -6));
        assert_eq!(-v, Vector::new(-1, 2));
    }

    #[test]
    fn reversed_and_signum() {
        assert_eq!(Vector::new(2, -5).reversed(), Vector::new(-5, 2));
        assert_eq!(Vector::new(0, -5).signum(), Vector::new(0, -1));
        assert_eq!(Vector::new(7, 0).signum(), Vector::new(1, 0));
    }

    #[test]
    fn bounds() {
        assert!(Position::new(0, 0).in_bounds(8, 8));
        assert!(Position::new(7, 7).in_bounds(8, 8));
        assert!(!Position::new(8, 0).in_bounds(8, 8));
        assert!(!Position::new(0, -1).in_bounds(8, 8));
    }

    #[test]
    fn arity_is_checked() {
        let ok: &[i32] = &[1, 2];
        assert_eq!(Position::try_from(ok), Ok(Position::new(1, 2)));
        let short: &[i32] = &[1];
        assert_eq!(Position::try_from(short), Err(GeometryError::Arity(1)));
        let long: &[i32] = &[1, 2, 3];
        assert_eq!(Position::try_from(long), Err(GeometryError::Arity(3)));
    }
}
