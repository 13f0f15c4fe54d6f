//! Shot resolution: turns one shot into a board mutation and an outcome.

use alloc::string::String;
use log::{debug, info};

use crate::board::{Board, Coord, SunkMarker};
use crate::common::{CellState, ShotError, ShotOutcome};
use crate::config::ResolverMode;
use crate::ship::ShipLayout;

/// A shot as submitted by a caller, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shot {
    pub row: i64,
    pub col: i64,
    /// Outcome asserted by the caller; only read in client-authoritative mode.
    pub result: Option<String>,
}

impl Shot {
    pub fn at(row: i64, col: i64) -> Self {
        Self {
            row,
            col,
            result: None,
        }
    }

    pub fn asserting(row: i64, col: i64, result: impl Into<String>) -> Self {
        Self {
            row,
            col,
            result: Some(result.into()),
        }
    }
}

/// Strategy deciding the outcome of a shot and applying it to a board.
///
/// Implementations must validate before mutating: an `Err` return leaves the
/// board as it was.
pub trait ShotResolver: Send + Sync {
    fn mode(&self) -> ResolverMode;

    fn resolve(&self, board: &mut Board, shot: &Shot) -> Result<ShotOutcome, ShotError>;
}

/// The server owns the ship layout and decides every outcome.
#[derive(Debug, Clone)]
pub struct ServerAuthoritative {
    layout: ShipLayout,
}

impl ServerAuthoritative {
    pub fn new(layout: ShipLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ShipLayout {
        &self.layout
    }
}

impl ShotResolver for ServerAuthoritative {
    fn mode(&self) -> ResolverMode {
        ResolverMode::ServerAuthoritative
    }

    fn resolve(&self, board: &mut Board, shot: &Shot) -> Result<ShotOutcome, ShotError> {
        let coord = Coord::from_signed(shot.row, shot.col)?;
        let (row, col) = (coord.row(), coord.col());
        if let Some(asserted) = &shot.result {
            debug!("ignoring asserted result {:?} at {}", asserted, coord.label());
        }

        // resolved cells answer with their recorded outcome
        if let Some(outcome) = board.get_cell(row, col)?.outcome() {
            debug!("{} already resolved as {}", coord.label(), outcome);
            return Ok(outcome);
        }

        let Some((ship_index, _)) = self.layout.find_ship_at(row, col) else {
            board.set_cell(row, col, CellState::Miss)?;
            return Ok(ShotOutcome::Miss);
        };

        board.set_cell(row, col, CellState::Hit)?;
        if !self.layout.is_sunk(ship_index, board) {
            return Ok(ShotOutcome::Hit);
        }

        for cell in self.layout.ships()[ship_index].cells() {
            board.set_cell(cell.row(), cell.col(), CellState::Sunk)?;
        }
        board.mark_sunk(SunkMarker::Ship(ship_index));
        info!("ship {} sunk by shot at {}", ship_index, coord.label());
        Ok(ShotOutcome::Sunk)
    }
}

/// The caller is the authority: outcomes are recorded as asserted.
///
/// A `sunk` assertion only marks the submitted cell; without a layout the
/// server cannot tell which other cells belonged to the same ship. Later
/// assertions overwrite the cell but never retract a recorded marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientAuthoritative;

impl ShotResolver for ClientAuthoritative {
    fn mode(&self) -> ResolverMode {
        ResolverMode::ClientAuthoritative
    }

    fn resolve(&self, board: &mut Board, shot: &Shot) -> Result<ShotOutcome, ShotError> {
        let coord = Coord::from_signed(shot.row, shot.col)?;
        let outcome: ShotOutcome = shot
            .result
            .as_deref()
            .ok_or(ShotError::InvalidResult)?
            .parse()?;

        board.set_cell(coord.row(), coord.col(), outcome.cell_state())?;
        if outcome == ShotOutcome::Sunk && board.mark_sunk(SunkMarker::Cell(coord.label())) {
            info!("{} recorded as sunk", coord.label());
        }
        Ok(outcome)
    }
}
