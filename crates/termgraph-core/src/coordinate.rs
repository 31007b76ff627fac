//! Integer positions and terminal dimensions.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub};

/// An integer cell position.
///
/// Used both for absolute world positions and, once the camera offset has
/// been subtracted, for terminal-relative render positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    /// Creates a coordinate from its components.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The origin `{0, 0}`.
    pub const fn origin() -> Self {
        Self { x: 0, y: 0 }
    }
}

// Arithmetic saturates at the `i32` bounds. The camera is unclamped, so
// offsets can legitimately reach them.
impl Add for Coordinate {
    type Output = Coordinate;

    fn add(self, rhs: Coordinate) -> Coordinate {
        Coordinate::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl AddAssign for Coordinate {
    fn add_assign(&mut self, rhs: Coordinate) {
        *self = *self + rhs;
    }
}

impl Sub for Coordinate {
    type Output = Coordinate;

    fn sub(self, rhs: Coordinate) -> Coordinate {
        Coordinate::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Terminal dimensions in cells, as reported by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalSize {
    pub width: i32,
    pub height: i32,
}

impl TerminalSize {
    /// Creates a terminal size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// The terminal's visual center cell, `(floor(w/2), floor(h/2))`.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.width.div_euclid(2), self.height.div_euclid(2))
    }

    /// Returns true if the terminal-relative cell lies inside the screen.
    pub fn contains(&self, cell: Coordinate) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_arithmetic() {
        let mut a = Coordinate::new(3, -2);
        a += Coordinate::new(-1, 1);
        assert_eq!(a, Coordinate::new(2, -1));
        assert_eq!(a - Coordinate::new(2, 2), Coordinate::new(0, -3));
        assert_eq!(a + Coordinate::origin(), a);
    }

    #[test]
    fn test_coordinate_arithmetic_saturates() {
        let mut far = Coordinate::new(i32::MAX, i32::MIN);
        far += Coordinate::new(1, -1);
        assert_eq!(far, Coordinate::new(i32::MAX, i32::MIN));
        assert_eq!(
            Coordinate::new(5, -5) - Coordinate::new(i32::MIN, i32::MAX),
            Coordinate::new(i32::MAX, i32::MIN)
        );
    }

    #[test]
    fn test_terminal_center_floors() {
        assert_eq!(TerminalSize::new(81, 25).center(), Coordinate::new(40, 12));
        assert_eq!(TerminalSize::new(80, 24).center(), Coordinate::new(40, 12));
    }

    #[test]
    fn test_terminal_contains() {
        let size = TerminalSize::new(10, 5);
        assert!(size.contains(Coordinate::new(0, 0)));
        assert!(size.contains(Coordinate::new(9, 4)));
        assert!(!size.contains(Coordinate::new(10, 4)));
        assert!(!size.contains(Coordinate::new(-1, 2)));
    }
}
