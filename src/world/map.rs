//! The square region grid and positions on it.

use super::regions::{RegionKind, WILD_REGIONS};
use crate::core::constants::GRID_SIZE;
use crate::core::dice::{pick, Roller};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Neighbouring position, or `None` if it would leave a `size × size` grid.
    pub fn step(self, direction: Direction, size: usize) -> Option<Position> {
        let (x, y) = match direction {
            Direction::North => (Some(self.x), self.y.checked_sub(1)),
            Direction::South => (Some(self.x), Some(self.y + 1)),
            Direction::West => (self.x.checked_sub(1), Some(self.y)),
            Direction::East => (Some(self.x + 1), Some(self.y)),
        };
        match (x, y) {
            (Some(x), Some(y)) if x < size && y < size => Some(Position { x, y }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }

    pub fn parse(input: &str) -> Option<Direction> {
        match input.trim().to_ascii_lowercase().as_str() {
            "n" | "north" | "up" => Some(Direction::North),
            "s" | "south" | "down" => Some(Direction::South),
            "e" | "east" | "right" => Some(Direction::East),
            "w" | "west" | "left" => Some(Direction::West),
            _ => None,
        }
    }
}

/// Immutable terrain, stored row-major (`tiles[y][x]`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct WorldMap {
    tiles: Vec<Vec<RegionKind>>,
}

impl WorldMap {
    /// Rolls a fresh `GRID_SIZE` map. The starting tile is always the village.
    pub fn generate(roller: &mut impl Roller) -> Self {
        let tiles: Vec<Vec<RegionKind>> = (0..GRID_SIZE)
            .map(|y| {
                (0..GRID_SIZE)
                    .map(|x| {
                        if x == 0 && y == 0 {
                            RegionKind::Village
                        } else {
                            pick(roller, &WILD_REGIONS)
                                .copied()
                                .unwrap_or(RegionKind::Forest)
                        }
                    })
                    .collect()
            })
            .collect();
        Self { tiles }
    }

    pub fn from_tiles(tiles: Vec<Vec<RegionKind>>) -> Self {
        Self { tiles }
    }

    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    pub fn region_at(&self, position: Position) -> Option<RegionKind> {
        self.tiles.get(position.y)?.get(position.x).copied()
    }

    pub fn rows(&self) -> &[Vec<RegionKind>] {
        &self.tiles
    }

    /// True when the grid is a non-empty square.
    pub fn is_square(&self) -> bool {
        let size = self.size();
        size > 0 && self.tiles.iter().all(|row| row.len() == size)
    }
}
