//! The single live game: one board plus the resolver chosen at startup.

use alloc::boxed::Box;
use log::{info, warn};

use crate::board::{Board, BoardSnapshot};
use crate::common::{ShotError, ShotOutcome};
use crate::config::ResolverMode;
use crate::resolver::{Shot, ShotResolver};

/// Outcome of an applied shot together with the board it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotReport {
    pub outcome: ShotOutcome,
    pub board: BoardSnapshot,
}

/// Owns the board. Validation and rules live in the resolver.
pub struct GameSession {
    board: Board,
    resolver: Box<dyn ShotResolver>,
}

impl GameSession {
    pub fn new(resolver: Box<dyn ShotResolver>) -> Self {
        Self {
            board: Board::new(),
            resolver,
        }
    }

    pub fn mode(&self) -> ResolverMode {
        self.resolver.mode()
    }

    /// Discard the current board and start over with an empty one.
    pub fn reset(&mut self) -> BoardSnapshot {
        self.board = Board::new();
        info!("board reset");
        self.board.snapshot()
    }

    pub fn current(&self) -> &Board {
        &self.board
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    /// Resolve a shot against the live board.
    ///
    /// The resolver works on a copy that replaces the live board only on
    /// success, so a failed shot never leaves cells and sunk markers out of
    /// step with each other.
    pub fn apply_shot(&mut self, shot: &Shot) -> Result<ShotReport, ShotError> {
        let mut next = self.board.clone();
        match self.resolver.resolve(&mut next, shot) {
            Ok(outcome) => {
                self.board = next;
                info!("shot at ({}, {}) -> {}", shot.row, shot.col, outcome);
                Ok(ShotReport {
                    outcome,
                    board: self.board.snapshot(),
                })
            }
            Err(e) => {
                warn!("shot at ({}, {}) rejected: {}", shot.row, shot.col, e);
                Err(e)
            }
        }
    }
}

impl core::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameSession")
            .field("mode", &self.mode())
            .field("board", &self.board)
            .finish()
    }
}
