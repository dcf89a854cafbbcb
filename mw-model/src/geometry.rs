//! Coordinate helpers for laying out diagrams.

use crate::error::{Error, Result};
use crate::placement::{Flip, Placement};

/// Place an element halfway between `p1` and `p2`, oriented along the
/// line between them.
///
/// Mostly vertical lines rotate by 90 (upwards) or 270 (downwards) degrees;
/// mostly horizontal lines running right to left flip horizontally.
///
/// ```
/// use modelwright_model::geometry::position_between;
///
/// let p = position_between((0.0, 0.0), (0.0, 2.0));
/// assert_eq!(p.origin, (0.0, 1.0));
/// assert_eq!(p.rotation, Some(90.0));
/// ```
pub fn position_between(p1: (f64, f64), p2: (f64, f64)) -> Placement {
    let origin = ((p1.0 + p2.0) / 2.0, (p1.1 + p2.1) / 2.0);
    let dx = p2.0 - p1.0;
    let dy = p2.1 - p1.1;

    let placement = Placement::at(origin.0, origin.1);
    if dy.abs() > dx.abs() {
        placement.with_rotation(if dy > 0.0 { 90.0 } else { 270.0 })
    } else if dx < 0.0 {
        placement.with_flip(Flip::Horizontal)
    } else {
        placement
    }
}

/// Round to the nearest even integer; halfway cases go to the even half.
pub fn round_even(f: f64) -> i64 {
    (f / 2.0).round_ties_even() as i64 * 2
}

/// Round to an odd integer: `floor(f / 2) * 2 + 1`.
pub fn round_odd(f: f64) -> i64 {
    (f / 2.0).floor() as i64 * 2 + 1
}

/// Rounding applied by [`Map2d`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Even,
    Odd,
}

/// A bounding box as `((left, down), (right, up))`.
pub type BoundingBox = ((f64, f64), (f64, f64));

/// Linear map from one bounding box onto another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Map2d {
    m_x: f64,
    b_x: f64,
    m_y: f64,
    b_y: f64,
    rounding: Option<Rounding>,
}

impl Map2d {
    /// Fails if `src` has zero width or height.
    pub fn new(src: BoundingBox, dst: BoundingBox, rounding: Option<Rounding>) -> Result<Self> {
        let ((sx0, sy0), (sx1, sy1)) = src;
        let ((dx0, dy0), (dx1, dy1)) = dst;
        if sx0 == sx1 || sy0 == sy1 {
            return Err(Error::invariant(
                "source bounding box must have a non-zero width and height",
            ));
        }

        let m_x = (dx0 - dx1) / (sx0 - sx1);
        let m_y = (dy0 - dy1) / (sy0 - sy1);
        Ok(Self {
            m_x,
            b_x: dx0 - m_x * sx0,
            m_y,
            b_y: dy0 - m_y * sy0,
            rounding,
        })
    }

    pub fn apply(&self, (x, y): (f64, f64)) -> (f64, f64) {
        let x = self.m_x * x + self.b_x;
        let y = self.m_y * y + self.b_y;
        match self.rounding {
            Some(Rounding::Even) => (round_even(x) as f64, round_even(y) as f64),
            Some(Rounding::Odd) => (round_odd(x) as f64, round_odd(y) as f64),
            None => (x, y),
        }
    }
}
