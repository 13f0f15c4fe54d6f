//! Common types for the reveal board: cell states, shot outcomes and errors.

use core::fmt;
use core::str::FromStr;

/// State of a single grid cell.
///
/// Cells only move forward: `Empty` to one of the resolved states. The only
/// way back to `Empty` is a full board reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Empty,
    Hit,
    Miss,
    Sunk,
}

impl CellState {
    /// Wire code of the state: 0 = empty, 1 = hit, 2 = miss, 3 = sunk.
    pub const fn code(self) -> u8 {
        match self {
            CellState::Empty => 0,
            CellState::Hit => 1,
            CellState::Miss => 2,
            CellState::Sunk => 3,
        }
    }

    /// Inverse of [`CellState::code`].
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(CellState::Empty),
            1 => Some(CellState::Hit),
            2 => Some(CellState::Miss),
            3 => Some(CellState::Sunk),
            _ => None,
        }
    }

    /// `true` once a shot has been resolved on this cell.
    pub fn is_resolved(self) -> bool {
        !matches!(self, CellState::Empty)
    }

    /// Outcome a shot at this cell already produced, if any.
    pub fn outcome(self) -> Option<ShotOutcome> {
        match self {
            CellState::Empty => None,
            CellState::Hit => Some(ShotOutcome::Hit),
            CellState::Miss => Some(ShotOutcome::Miss),
            CellState::Sunk => Some(ShotOutcome::Sunk),
        }
    }
}

/// Result of resolving one shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ShotOutcome {
    /// Shot struck a ship that is still afloat.
    Hit,
    /// Shot landed in open water.
    Miss,
    /// Shot finished off a ship.
    Sunk,
}

impl ShotOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            ShotOutcome::Hit => "hit",
            ShotOutcome::Miss => "miss",
            ShotOutcome::Sunk => "sunk",
        }
    }

    /// Cell state recorded for this outcome.
    pub fn cell_state(self) -> CellState {
        match self {
            ShotOutcome::Hit => CellState::Hit,
            ShotOutcome::Miss => CellState::Miss,
            ShotOutcome::Sunk => CellState::Sunk,
        }
    }

    /// Parse an asserted outcome label. Surrounding whitespace and case are
    /// ignored.
    pub fn parse_label(label: &str) -> Option<Self> {
        let label = label.trim();
        [ShotOutcome::Hit, ShotOutcome::Miss, ShotOutcome::Sunk]
            .into_iter()
            .find(|o| o.as_str().eq_ignore_ascii_case(label))
    }
}

impl FromStr for ShotOutcome {
    type Err = ShotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShotOutcome::parse_label(s).ok_or(ShotError::InvalidResult)
    }
}

impl fmt::Display for ShotOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Row or column is outside the grid.
    OutOfRange { row: usize, col: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfRange { row, col } => {
                write!(f, "Cell ({}, {}) is outside the board", row, col)
            }
        }
    }
}

/// Errors raised while building a ship layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A ship was declared without any cells.
    EmptyShip { ship: usize },
    /// A ship cell lies outside the grid.
    ShipOutOfBounds { ship: usize, row: usize, col: usize },
    /// Two ships (or one ship twice) claim the same cell.
    ShipsOverlap { row: usize, col: usize },
    /// Random placement gave up.
    UnableToPlaceShip { length: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::EmptyShip { ship } => write!(f, "Ship {} has no cells", ship),
            LayoutError::ShipOutOfBounds { ship, row, col } => {
                write!(f, "Ship {} cell ({}, {}) is out of bounds", ship, row, col)
            }
            LayoutError::ShipsOverlap { row, col } => {
                write!(f, "More than one ship occupies ({}, {})", row, col)
            }
            LayoutError::UnableToPlaceShip { length } => {
                write!(f, "Unable to place ship of length {}", length)
            }
        }
    }
}

/// Errors surfaced to callers of the shot resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShotError {
    /// Coordinates missing, not integers, or outside the grid.
    InvalidCoordinates,
    /// Asserted result is not one of hit/miss/sunk.
    InvalidResult,
    /// Unexpected failure while resolving the shot.
    InternalFault,
}

impl ShotError {
    /// `true` when the caller sent a bad request, `false` for server faults.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ShotError::InternalFault)
    }
}

impl From<BoardError> for ShotError {
    fn from(_: BoardError) -> Self {
        ShotError::InternalFault
    }
}

impl fmt::Display for ShotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotError::InvalidCoordinates => write!(f, "Invalid coordinates"),
            ShotError::InvalidResult => write!(f, "Invalid result"),
            ShotError::InternalFault => write!(f, "Server error processing shot"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
#[cfg(feature = "std")]
impl std::error::Error for LayoutError {}
#[cfg(feature = "std")]
impl std::error::Error for ShotError {}
