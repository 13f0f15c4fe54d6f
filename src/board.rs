//! Reveal board: a fixed grid of cell states plus the sunk markers.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::common::{BoardError, CellState, ShotError};
use crate::config::{COLS, ROWS};

/// Number of cells on the board.
pub const CELLS: usize = ROWS * COLS;

/// A validated grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    row: usize,
    col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Result<Self, BoardError> {
        if row >= ROWS || col >= COLS {
            return Err(BoardError::OutOfRange { row, col });
        }
        Ok(Self { row, col })
    }

    /// Validate caller-supplied coordinates, which may be negative.
    pub fn from_signed(row: i64, col: i64) -> Result<Self, ShotError> {
        let row = usize::try_from(row).map_err(|_| ShotError::InvalidCoordinates)?;
        let col = usize::try_from(col).map_err(|_| ShotError::InvalidCoordinates)?;
        Coord::new(row, col).map_err(|_| ShotError::InvalidCoordinates)
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn col(self) -> usize {
        self.col
    }

    /// Row-major index into the flat grid.
    pub fn index(self) -> usize {
        self.row * COLS + self.col
    }

    /// Human label: column letter then 1-based row, e.g. (3, 3) is `D4`.
    pub fn label(self) -> String {
        format!("{}{}", (b'A' + self.col as u8) as char, self.row + 1)
    }
}

/// Record of a confirmed sinking.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum SunkMarker {
    /// Index of a ship in the server's layout.
    Ship(usize),
    /// Coordinate label asserted by a client, e.g. `D4`.
    Cell(String),
}

/// Read-only copy of the board handed to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct BoardSnapshot {
    /// Cell codes, see [`CellState::code`].
    pub cell_states: [[u8; COLS]; ROWS],
    pub sunk_ships: Vec<SunkMarker>,
}

impl BoardSnapshot {
    pub fn cell(&self, row: usize, col: usize) -> Option<CellState> {
        self.cell_states
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|&code| CellState::from_code(code))
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [CellState; CELLS],
    sunk: Vec<SunkMarker>,
}

impl Board {
    /// Create a board with every cell empty and no sunk markers.
    pub fn new() -> Self {
        Board {
            cells: [CellState::Empty; CELLS],
            sunk: Vec::new(),
        }
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Result<CellState, BoardError> {
        let coord = Coord::new(row, col)?;
        Ok(self.cells[coord.index()])
    }

    /// Overwrite a cell. Whether overwriting is allowed is the resolver's call.
    pub fn set_cell(&mut self, row: usize, col: usize, state: CellState) -> Result<(), BoardError> {
        let coord = Coord::new(row, col)?;
        self.cells[coord.index()] = state;
        Ok(())
    }

    /// Record a sinking. Returns `false` if the marker was already present.
    pub fn mark_sunk(&mut self, marker: SunkMarker) -> bool {
        if self.sunk.contains(&marker) {
            return false;
        }
        self.sunk.push(marker);
        true
    }

    /// Sunk markers in the order they were recorded.
    pub fn sunk_markers(&self) -> &[SunkMarker] {
        &self.sunk
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// `true` when nothing has been recorded since creation or reset.
    pub fn is_pristine(&self) -> bool {
        self.sunk.is_empty() && self.cells.iter().all(|c| !c.is_resolved())
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from(self)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&Board> for BoardSnapshot {
    fn from(b: &Board) -> Self {
        let cell_states =
            core::array::from_fn(|r| core::array::from_fn(|c| b.cells[r * COLS + c].code()));
        BoardSnapshot {
            cell_states,
            sunk_ships: b.sunk.clone(),
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{ sunk: {:?} }}", self.sunk)?;
        fmt::Display::fmt(self, f)
    }
}

/// Plain text grid: `.` empty, `X` hit, `o` miss, `#` sunk.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for c in 0..COLS {
            write!(f, " {}", (b'A' + c as u8) as char)?;
        }
        writeln!(f)?;
        for r in 0..ROWS {
            write!(f, "{:2} ", r + 1)?;
            for c in 0..COLS {
                let symbol = match self.cells[r * COLS + c] {
                    CellState::Empty => '.',
                    CellState::Hit => 'X',
                    CellState::Miss => 'o',
                    CellState::Sunk => '#',
                };
                write!(f, " {}", symbol)?;
            }
            if r + 1 < ROWS {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
