//! Attack and protection queries, and the static safety check built on them.

use crate::bits::IdSet;
use crate::board::Board;
use crate::piece::{Color, Piece};
use crate::structs::{CaptureRule, Velocity};
use crate::topology::EdgeConfig;
use crate::walker::Walker;

#[derive(Debug, Clone)]
pub struct VelocityEntry {
    pub velocity: Velocity,
    pub holders: IdSet,
}

/// The distinct effective velocities on a board, each with the ids of the
/// pieces currently holding it. Two pieces of one kind land in different
/// entries once a crossing has turned one of them.
#[derive(Debug, Clone, Default)]
pub struct VelocityTable {
    entries: Vec<VelocityEntry>,
}

impl VelocityTable {
    pub fn from_board(board: &Board) -> Self {
        let mut entries: Vec<VelocityEntry> = Vec::new();
        for piece in board.pieces() {
            for velocity in piece.velocities() {
                match entries.iter_mut().find(|e| e.velocity == velocity) {
                    Some(entry) => entry.holders.insert(piece.id),
                    None => {
                        let mut holders = IdSet::new();
                        holders.insert(piece.id);
                        entries.push(VelocityEntry { velocity, holders });
                    }
                }
            }
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[VelocityEntry] {
        &self.entries
    }
}

/// Attack oracle for one board snapshot.
pub struct Oracle<'a> {
    board: &'a Board,
    edges: &'a EdgeConfig,
    table: VelocityTable,
}

impl<'a> Oracle<'a> {
    pub fn new(board: &'a Board, edges: &'a EdgeConfig) -> Self {
        Self {
            board,
            edges,
            table: VelocityTable::from_board(board),
        }
    }

    pub fn table(&self) -> &VelocityTable {
        &self.table
    }

    /// True iff some piece of `piece`'s color (`by_own`) or of the opposite
    /// color can land on `piece`'s square along one of its current
    /// velocities. A scan that wraps all the way round counts, so a piece
    /// can protect itself.
    pub fn is_target(&self, piece: &Piece, by_own: bool) -> bool {
        let wanted = if by_own {
            piece.color()
        } else {
            piece.color().opposite()
        };
        for entry in self.table.entries() {
            if entry.velocity.capture == CaptureRule::NonCaptureOnly {
                continue;
            }
            for id in entry.holders.iter() {
                if id == piece.id && !by_own {
                    continue;
                }
                let Some(holder) = self.board.piece(id) else {
                    continue;
                };
                if holder.color() != wanted {
                    continue;
                }
                if Walker::new(self.board, self.edges, holder, entry.velocity).probe(piece.id, by_own) {
                    return true;
                }
            }
        }
        false
    }

    pub fn is_protected(&self, piece: &Piece) -> bool {
        self.is_target(piece, true)
    }

    pub fn is_attacked(&self, piece: &Piece) -> bool {
        self.is_target(piece, false)
    }

    /// No piece hangs: every attacked piece is protected, and no king is
    /// attacked at all, protected or not.
    pub fn position_is_safe(&self) -> bool {
        for piece in self.board.pieces() {
            if !piece.kind.is_king() && self.is_protected(piece) {
                continue;
            }
            if self.is_attacked(piece) {
                log::trace!(
                    "{} at ({}, {}) hangs",
                    piece.kind.to_char(),
                    piece.x,
                    piece.y
                );
                return false;
            }
        }
        true
    }

    pub fn king_endangered(&self, color: Color) -> bool {
        self.board
            .pieces()
            .filter(|p| p.kind.is_king() && p.color() == color)
            .any(|king| self.is_attacked(king))
    }
}

pub fn is_target(board: &Board, edges: &EdgeConfig, piece: &Piece, by_own: bool) -> bool {
    Oracle::new(board, edges).is_target(piece, by_own)
}

pub fn position_is_safe(board: &Board, edges: &EdgeConfig) -> bool {
    Oracle::new(board, edges).position_is_safe()
}

pub fn king_endangered(board: &Board, edges: &EdgeConfig, color: Color) -> bool {
    Oracle::new(board, edges).king_endangered(color)
}
