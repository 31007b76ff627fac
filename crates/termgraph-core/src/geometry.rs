//! Orthogonal edge routing.
//!
//! Edges are drawn as L- or Z-shaped polylines made of unit steps, then
//! each cell of the polyline is given a box-drawing glyph based on the
//! directions the path enters and leaves it.
//!
//! Coordinates follow terminal conventions: `y` grows downward.

use crate::coordinate::Coordinate;

/// Box-drawing glyphs used for edge cells.
pub mod glyph {
    pub const HORIZONTAL: char = '─';
    pub const VERTICAL: char = '│';
    pub const DOWN_RIGHT: char = '┌';
    pub const DOWN_LEFT: char = '┐';
    pub const UP_RIGHT: char = '└';
    pub const UP_LEFT: char = '┘';
    /// Used for a cell with no usable direction, e.g. a one-point path.
    pub const FALLBACK: char = '·';
}

/// A single positioned glyph of a rendered path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathCell {
    pub position: Coordinate,
    pub glyph: char,
}

/// Routes from `source` to `target` using only horizontal and vertical
/// unit steps.
///
/// When the target lies right-and-below, the route runs horizontally to the
/// midpoint column, vertically to the target row, then horizontally into the
/// target. Every other quadrant (left-and-below, or anything above) runs
/// vertically to the midpoint row, horizontally to the target column, then
/// vertically into the target.
///
/// The first point is always `source`, the last is always `target`, and no
/// two consecutive points are equal.
pub fn orthogonal_path(source: Coordinate, target: Coordinate) -> Vec<Coordinate> {
    let mut route = Route::start(source);

    if target.x >= source.x && target.y >= source.y {
        let mid_x = source.x + half_rounded(target.x - source.x);
        route.horizontal_to(mid_x);
        route.vertical_to(target.y);
        route.horizontal_to(target.x);
    } else {
        let mid_y = source.y + half_rounded(target.y - source.y);
        route.vertical_to(mid_y);
        route.horizontal_to(target.x);
        route.vertical_to(target.y);
    }

    route.points
}

/// Assigns a glyph to every point of `path`.
///
/// Straight runs get a bar, turns get the corner joining the two directions
/// the path actually takes, endpoints take their single known direction.
/// A point equal to its predecessor looks one more step back, so a
/// zero-length segment does not break the glyph choice.
pub fn render_path(path: &[Coordinate]) -> Vec<PathCell> {
    path.iter()
        .enumerate()
        .map(|(i, &current)| {
            let mut prev = i.checked_sub(1).map(|p| path[p]);
            if prev == Some(current) {
                prev = i.checked_sub(2).map(|p| path[p]);
            }
            let next = path.get(i + 1).copied();

            let back = prev.and_then(|p| Direction::between(current, p));
            let ahead = next.and_then(|n| Direction::between(current, n));

            PathCell {
                position: current,
                glyph: glyph_for(back, ahead),
            }
        })
        .collect()
}

/// Routes and renders an edge in one go.
pub fn get_path(source: Coordinate, target: Coordinate) -> Vec<PathCell> {
    render_path(&orthogonal_path(source, target))
}

/// Half of `delta`, rounding halves toward positive infinity.
fn half_rounded(delta: i32) -> i32 {
    (delta + 1).div_euclid(2)
}

/// Accumulates unit steps from a starting point.
struct Route {
    points: Vec<Coordinate>,
    cursor: Coordinate,
}

impl Route {
    fn start(origin: Coordinate) -> Self {
        Self {
            points: vec![origin],
            cursor: origin,
        }
    }

    fn horizontal_to(&mut self, x: i32) {
        let step = (x - self.cursor.x).signum();
        while self.cursor.x != x {
            self.cursor.x += step;
            self.points.push(self.cursor);
        }
    }

    fn vertical_to(&mut self, y: i32) {
        let step = (y - self.cursor.y).signum();
        while self.cursor.y != y {
            self.cursor.y += step;
            self.points.push(self.cursor);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Direction pointing from `from` toward `to`, if they share a row or
    /// column and differ.
    fn between(from: Coordinate, to: Coordinate) -> Option<Self> {
        if from.y == to.y && from.x != to.x {
            Some(if to.x > from.x { Self::Right } else { Self::Left })
        } else if from.x == to.x && from.y != to.y {
            Some(if to.y > from.y { Self::Down } else { Self::Up })
        } else {
            None
        }
    }

    fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

fn glyph_for(back: Option<Direction>, ahead: Option<Direction>) -> char {
    use Direction::*;

    match (back, ahead) {
        (Some(a), Some(b)) => match (a, b) {
            (Left | Right, Left | Right) => glyph::HORIZONTAL,
            (Up | Down, Up | Down) => glyph::VERTICAL,
            (Down, Right) | (Right, Down) => glyph::DOWN_RIGHT,
            (Down, Left) | (Left, Down) => glyph::DOWN_LEFT,
            (Up, Right) | (Right, Up) => glyph::UP_RIGHT,
            (Up, Left) | (Left, Up) => glyph::UP_LEFT,
        },
        (Some(only), None) | (None, Some(only)) => {
            if only.is_horizontal() {
                glyph::HORIZONTAL
            } else {
                glyph::VERTICAL
            }
        }
        (None, None) => glyph::FALLBACK,
    }
}
