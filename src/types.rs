// Core board-geometry types shared by the engine, the observation encoder,
// and the scripted policies.

use serde::{Deserialize, Serialize};

/// 2D coordinate on the board
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// Manhattan distance to another coordinate
    pub fn manhattan_distance(&self, other: &Coord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Represents the four possible movement directions for a snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Number of discrete actions in the action space
pub const NUM_ACTIONS: u8 = 4;

impl Direction {
    /// Returns all possible directions
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Calculates the next coordinate when moving in this direction
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::Up => Coord { x: coord.x, y: coord.y + 1 },
            Direction::Down => Coord { x: coord.x, y: coord.y - 1 },
            Direction::Left => Coord { x: coord.x - 1, y: coord.y },
            Direction::Right => Coord { x: coord.x + 1, y: coord.y },
        }
    }

    /// Decodes a discrete action value from the action buffer.
    /// Returns `None` for values outside `0..NUM_ACTIONS`.
    pub fn from_index(index: u8) -> Option<Direction> {
        match index {
            0 => Some(Direction::Up),
            1 => Some(Direction::Down),
            2 => Some(Direction::Left),
            3 => Some(Direction::Right),
            _ => None,
        }
    }

    /// Encodes this direction as a discrete action value
    pub fn index(&self) -> u8 {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_round_trip() {
        for dir in Direction::all() {
            assert_eq!(Direction::from_index(dir.index()), Some(dir));
        }
        assert_eq!(Direction::from_index(NUM_ACTIONS), None);
        assert_eq!(Direction::from_index(255), None);
    }

    #[test]
    fn test_direction_apply() {
        let origin = Coord::new(5, 5);
        assert_eq!(Direction::Up.apply(&origin), Coord::new(5, 6));
        assert_eq!(Direction::Down.apply(&origin), Coord::new(5, 4));
        assert_eq!(Direction::Left.apply(&origin), Coord::new(4, 5));
        assert_eq!(Direction::Right.apply(&origin), Coord::new(6, 5));
    }

    #[test]
    fn test_manhattan_distance() {
        let a = Coord::new(0, 0);
        let b = Coord::new(3, 4);
        assert_eq!(a.manhattan_distance(&b), 7);
        assert_eq!(b.manhattan_distance(&a), 7);
        assert_eq!(a.manhattan_distance(&a), 0);
    }
}
