//! Direction vectors in a piece's own frame.
//!
//! Forward is `+y` and right is `+x` before orientation; a piece turns these
//! into board directions with its facing.

use crate::Vector;

pub const F: Vector = Vector::new(0, 1);
pub const B: Vector = Vector::new(0, -1);
pub const L: Vector = Vector::new(-1, 0);
pub const R: Vector = Vector::new(1, 0);

pub const FL: Vector = Vector::new(-1, 1);
pub const FR: Vector = Vector::new(1, 1);
pub const BL: Vector = Vector::new(-1, -1);
pub const BR: Vector = Vector::new(1, -1);

pub const CARDINAL: [Vector; 4] = [F, B, L, R];
pub const DIAGONAL: [Vector; 4] = [FL, FR, BL, BR];
pub const ALL: [Vector; 8] = [F, B, L, R, FL, FR, BL, BR];

/// The eight L-shaped leaps.
pub const KNIGHT: [Vector; 8] = [
    Vector::new(-1, 2),
    Vector::new(1, 2),
    Vector::new(2, 1),
    Vector::new(2, -1),
    Vector::new(-1, -2),
    Vector::new(1, -2),
    Vector::new(-2, 1),
    Vector::new(-2, -1),
];
