use std::fmt;

use super::constants::{GALAXY_SIZE, QUADRANT_SIZE};

/// A position within the 8x8 sector grid of a quadrant.
/// 0-based: (0,0) is upper-left, (7,7) is lower-right.
/// X increases left-to-right, Y increases top-to-bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

impl Coordinates {
    pub fn new(x: i32, y: i32) -> Self {
        Coordinates { x, y }
    }

    /// Whether this position lies inside the sector grid.
    /// The sole acceptability gate: `step` never bounds-checks its result.
    pub fn valid(&self) -> bool {
        (0..QUADRANT_SIZE).contains(&self.x) && (0..QUADRANT_SIZE).contains(&self.y)
    }

    /// The coordinate one step in the given compass direction.
    /// Pure and total; the result may be off-grid, never clamped or wrapped.
    pub fn step(&self, direction: Direction) -> Coordinates {
        let (dx, dy) = direction.offset();
        Coordinates {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Straight-line distance in sector units.
    pub fn distance_to(&self, other: Coordinates) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Whether the other position lies in this one's 8-neighborhood
    /// (or is the same sector).
    pub fn adjacent_to(&self, other: Coordinates) -> bool {
        (self.x - other.x).abs() <= 1 && (self.y - other.y).abs() <= 1
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// A position within the 8x8 galaxy map (quadrant coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuadrantPosition {
    pub x: i32,
    pub y: i32,
}

impl QuadrantPosition {
    pub fn new(x: i32, y: i32) -> Self {
        QuadrantPosition { x, y }
    }

    pub fn valid(&self) -> bool {
        (0..GALAXY_SIZE).contains(&self.x) && (0..GALAXY_SIZE).contains(&self.y)
    }

    /// Chebyshev distance in quadrant units, the warp energy metric.
    pub fn distance_to(&self, other: QuadrantPosition) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl fmt::Display for QuadrantPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// The eight compass directions an entity can step in.
/// North is up the grid (decreasing y).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Unit/diagonal (dx, dy) offset for one step.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }
}
