use std::fmt;

use super::coordinates::Coordinates;
use super::sector::SectorKind;

/// Game-specific error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Coordinates outside the 8x8 grid. Always a caller bug; propagated,
    /// never recovered.
    OutOfBounds(Coordinates),
    /// No Empty sector exists anywhere in the quadrant.
    NoEmptySector,
    /// The bounded retry search found no legal destination.
    NoValidMove { attempts: u32 },
    /// Attempted to place an entity on a non-Empty sector.
    SectorOccupied {
        coordinates: Coordinates,
        kind: SectorKind,
    },
    /// Attempted to vacate a sector that holds nothing.
    SectorVacant(Coordinates),
}

/// Type alias for Results using GameError
pub type GameResult<T> = Result<T, GameError>;

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameError::OutOfBounds(c) => write!(f, "sector {} is outside the quadrant", c),
            GameError::NoEmptySector => write!(f, "no empty sector in the quadrant"),
            GameError::NoValidMove { attempts } => {
                write!(f, "no valid move found within {} attempts", attempts)
            }
            GameError::SectorOccupied { coordinates, kind } => {
                write!(f, "sector {} already holds {:?}", coordinates, kind)
            }
            GameError::SectorVacant(c) => write!(f, "sector {} holds nothing", c),
        }
    }
}

impl std::error::Error for GameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_sector() {
        let err = GameError::OutOfBounds(Coordinates::new(9, -1));
        assert!(err.to_string().contains("9,-1"));

        let err = GameError::SectorOccupied {
            coordinates: Coordinates::new(2, 3),
            kind: SectorKind::Star,
        };
        assert!(err.to_string().contains("2,3"));
        assert!(err.to_string().contains("Star"));
    }
}
