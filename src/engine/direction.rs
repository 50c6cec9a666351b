use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A direction to slide/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

/// Whether a move walks rows or columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left/Right: one line per row, `width` cells long.
    Horizontal,
    /// Up/Down: one line per column, `height` cells long.
    Vertical,
}

impl Move {
    /// All four directions in wire order (Up, Down, Left, Right).
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            Move::Left | Move::Right => Axis::Horizontal,
            Move::Up | Move::Down => Axis::Vertical,
        }
    }

    /// True when the far edge is the high index of the row/column, so lines
    /// are read back-to-front before the slide-left transform applies.
    #[inline]
    pub fn is_reversed(self) -> bool {
        matches!(self, Move::Right | Move::Down)
    }

    /// Compact wire encoding: Up=0, Down=1, Left=2, Right=3.
    #[inline]
    pub fn to_u8(self) -> u8 {
        match self {
            Move::Up => 0,
            Move::Down => 1,
            Move::Left => 2,
            Move::Right => 3,
        }
    }
}

impl TryFrom<u8> for Move {
    type Error = EngineError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Move::Up),
            1 => Ok(Move::Down),
            2 => Ok(Move::Left),
            3 => Ok(Move::Right),
            other => Err(EngineError::InvalidArgument(format!("bad direction byte {other}"))),
        }
    }
}

impl FromStr for Move {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Move::Up),
            "down" | "d" => Ok(Move::Down),
            "left" | "l" => Ok(Move::Left),
            "right" | "r" => Ok(Move::Right),
            _ => Err(EngineError::InvalidArgument(format!("bad direction '{s}'"))),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::Up => "UP",
            Move::Down => "DOWN",
            Move::Left => "LEFT",
            Move::Right => "RIGHT",
        };
        f.write_str(s)
    }
}
