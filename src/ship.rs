//! Ship definitions and the immutable layout used by the server-authoritative
//! resolver.

use alloc::vec::Vec;
use rand::Rng;

use crate::board::{Board, Coord, SunkMarker, CELLS};
use crate::common::{CellState, LayoutError};
use crate::config::{COLS, ROWS, STANDARD_LAYOUT};

/// Orientation used when placing a straight ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One vessel: an ordered, non-empty list of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    cells: Vec<Coord>,
}

impl Ship {
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Position of `(row, col)` within this ship, if it belongs to it.
    pub fn position(&self, row: usize, col: usize) -> Option<usize> {
        self.cells
            .iter()
            .position(|c| c.row() == row && c.col() == col)
    }
}

/// Ships known to the server, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipLayout {
    ships: Vec<Ship>,
}

impl ShipLayout {
    /// Build a layout from (row, col) lists. Every ship must be non-empty and
    /// inside the grid, and no cell may be claimed twice.
    pub fn new<S>(ships: &[S]) -> Result<Self, LayoutError>
    where
        S: AsRef<[(usize, usize)]>,
    {
        let mut occupied = [false; CELLS];
        let mut built = Vec::with_capacity(ships.len());
        for (i, cells) in ships.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.is_empty() {
                return Err(LayoutError::EmptyShip { ship: i });
            }
            let mut coords = Vec::with_capacity(cells.len());
            for &(row, col) in cells {
                let coord = Coord::new(row, col)
                    .map_err(|_| LayoutError::ShipOutOfBounds { ship: i, row, col })?;
                if occupied[coord.index()] {
                    return Err(LayoutError::ShipsOverlap { row, col });
                }
                occupied[coord.index()] = true;
                coords.push(coord);
            }
            built.push(Ship { cells: coords });
        }
        Ok(ShipLayout { ships: built })
    }

    /// The fixed layout served by default.
    pub fn standard() -> Result<Self, LayoutError> {
        ShipLayout::new(&STANDARD_LAYOUT[..])
    }

    /// Place straight, non-overlapping ships of the given lengths at random.
    pub fn random<R: Rng>(rng: &mut R, lengths: &[usize]) -> Result<Self, LayoutError> {
        let mut occupied = [false; CELLS];
        let mut ships = Vec::with_capacity(lengths.len());
        for &length in lengths {
            let cells = random_placement(rng, &occupied, length)?;
            for &(r, c) in &cells {
                occupied[r * COLS + c] = true;
            }
            ships.push(cells);
        }
        ShipLayout::new(ships.as_slice())
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// First ship occupying `(row, col)` and the cell's index within it.
    pub fn find_ship_at(&self, row: usize, col: usize) -> Option<(usize, usize)> {
        self.ships
            .iter()
            .enumerate()
            .find_map(|(i, ship)| ship.position(row, col).map(|j| (i, j)))
    }

    /// `true` iff every cell of the ship reads `Hit` on `board`.
    pub fn is_sunk(&self, ship_index: usize, board: &Board) -> bool {
        let Some(ship) = self.ships.get(ship_index) else {
            return false;
        };
        ship.cells()
            .iter()
            .all(|c| board.get_cell(c.row(), c.col()) == Ok(CellState::Hit))
    }

    /// `true` once every ship has been recorded as sunk on `board`.
    pub fn all_sunk(&self, board: &Board) -> bool {
        let markers = board.sunk_markers();
        (0..self.ships.len()).all(|i| markers.contains(&SunkMarker::Ship(i)))
    }
}

fn random_placement<R: Rng>(
    rng: &mut R,
    occupied: &[bool; CELLS],
    length: usize,
) -> Result<Vec<(usize, usize)>, LayoutError> {
    if length == 0 || (length > ROWS && length > COLS) {
        return Err(LayoutError::UnableToPlaceShip { length });
    }
    let mut attempts = 0;
    while attempts < 100 {
        attempts += 1;
        let orient = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let (max_r, max_c) = match orient {
            Orientation::Horizontal if length <= COLS => (ROWS - 1, COLS - length),
            Orientation::Vertical if length <= ROWS => (ROWS - length, COLS - 1),
            _ => continue,
        };
        let r = rng.random_range(0..=max_r);
        let c = rng.random_range(0..=max_c);
        let cells: Vec<(usize, usize)> = (0..length)
            .map(|i| match orient {
                Orientation::Horizontal => (r, c + i),
                Orientation::Vertical => (r + i, c),
            })
            .collect();
        if cells.iter().all(|&(r, c)| !occupied[r * COLS + c]) {
            return Ok(cells);
        }
    }
    Err(LayoutError::UnableToPlaceShip { length })
}
