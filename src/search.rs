use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thousands::Separable;
use uuid::Uuid;

use crate::board::Board;
use crate::config::DEFAULT_REPORT_EVERY;
use crate::error::BoardError;
use crate::filters::{position_is_symmetric, SeenPositions};
use crate::oracle::Oracle;
use crate::permutations::Permutations;
use crate::piece::Piece;
use crate::structs::{Destination, PieceId, SearchStats};
use crate::topology::EdgeConfig;
use crate::walker;

type Cell = Option<Piece>;

/// Cells holding the same kind in the same orientation are interchangeable.
fn same_cell(a: &Cell, b: &Cell) -> bool {
    a.map(|p| (p.kind, p.orientation)) == b.map(|p| (p.kind, p.orientation))
}

/// Uniform shuffle of all cells by repeatedly drawing a random remaining one.
pub fn shuffle<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Board {
    let mut pool = board.cells().to_vec();
    let mut shuffled = Vec::with_capacity(pool.len());
    while !pool.is_empty() {
        let index = rng.random_range(0..pool.len());
        shuffled.push(pool.remove(index));
    }
    Board::from_cells(board.width(), board.height(), shuffled)
}

/// Every rearrangement of one shuffled board, filtered down to boards that
/// are symmetric, unseen and safe, checked in that order.
pub struct Candidates<'s> {
    permutations: Permutations<Cell, fn(&Cell, &Cell) -> bool>,
    width: i32,
    height: i32,
    edges: &'s EdgeConfig,
    seen: &'s SeenPositions,
    stats: &'s mut SearchStats,
    report_every: u64,
}

impl Iterator for Candidates<'_> {
    type Item = Board;

    fn next(&mut self) -> Option<Board> {
        for cells in self.permutations.by_ref() {
            self.stats.examined += 1;
            if self.report_every > 0 && self.stats.examined % self.report_every == 0 {
                log::info!(
                    "examined {} candidates, {} symmetric, {} accepted",
                    self.stats.examined.separate_with_commas(),
                    self.stats.symmetric.separate_with_commas(),
                    self.stats.accepted.separate_with_commas()
                );
            }

            let board = Board::from_cells(self.width, self.height, cells);
            if !position_is_symmetric(&board) {
                continue;
            }
            self.stats.symmetric += 1;
            log::debug!("symmetric candidate");

            if !self.seen.position_is_new(&board) {
                continue;
            }
            self.stats.fresh += 1;
            log::debug!("fresh position");

            if !Oracle::new(&board, self.edges).position_is_safe() {
                continue;
            }
            self.stats.accepted += 1;
            log::debug!("safe position, yielding");
            return Some(board);
        }
        None
    }
}

/// One search over arrangements of a fixed set of pieces. Owns everything
/// the search mutates, so independent sessions never interfere unless they
/// are handed the same [`SeenPositions`].
pub struct SearchSession<R = StdRng> {
    id: Uuid,
    layout: Board,
    edges: EdgeConfig,
    seen: SeenPositions,
    rng: R,
    report_every: u64,
    stats: SearchStats,
}

impl SearchSession<StdRng> {
    pub fn new(layout: Board, edges: EdgeConfig) -> Self {
        Self::with_rng(layout, edges, StdRng::from_os_rng())
    }

    pub fn seeded(layout: Board, edges: EdgeConfig, seed: u64) -> Self {
        Self::with_rng(layout, edges, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SearchSession<R> {
    pub fn with_rng(layout: Board, edges: EdgeConfig, rng: R) -> Self {
        Self {
            id: Uuid::new_v4(),
            layout,
            edges,
            seen: SeenPositions::new(),
            rng,
            report_every: DEFAULT_REPORT_EVERY,
            stats: SearchStats::default(),
        }
    }

    /// Shares novelty with every other session holding a clone of `seen`.
    pub fn with_seen(mut self, seen: SeenPositions) -> Self {
        self.seen = seen;
        self
    }

    /// Progress is logged every `report_every` candidates; zero turns it off.
    pub fn with_report_every(mut self, report_every: u64) -> Self {
        self.report_every = report_every;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn layout(&self) -> &Board {
        &self.layout
    }

    pub fn edges(&self) -> &EdgeConfig {
        &self.edges
    }

    pub fn seen(&self) -> &SeenPositions {
        &self.seen
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn set_layout(&mut self, layout: Board) {
        self.layout = layout;
    }

    /// Legal destinations for `piece` on the session's board.
    pub fn get_moves<'a>(&'a self, piece: &Piece) -> impl Iterator<Item = Destination> + 'a {
        walker::moves(&self.layout, &self.edges, piece)
    }

    pub fn apply_move(&mut self, id: PieceId, dest: &Destination) -> Result<Option<Piece>, BoardError> {
        self.layout.apply_move(id, dest)
    }

    pub fn position_is_safe(&self) -> bool {
        Oracle::new(&self.layout, &self.edges).position_is_safe()
    }

    /// Shuffles the layout and returns the filtered stream of its
    /// rearrangements. Dropping the stream cancels the search.
    pub fn candidates(&mut self) -> Candidates<'_> {
        let shuffled = shuffle(&self.layout, &mut self.rng);
        let (width, height) = (shuffled.width(), shuffled.height());
        Candidates {
            permutations: Permutations::new(shuffled.into_cells(), same_cell as fn(&Cell, &Cell) -> bool),
            width,
            height,
            edges: &self.edges,
            seen: &self.seen,
            stats: &mut self.stats,
            report_every: self.report_every,
        }
    }

    /// Pulls one accepted board from a fresh stream, or `None` once every
    /// acceptable arrangement has been handed out.
    pub fn new_position(&mut self) -> Option<Board> {
        let board = self.candidates().next();
        if board.is_none() {
            log::info!(
                "session {} exhausted after {} candidates",
                self.id,
                self.stats.examined.separate_with_commas()
            );
        }
        board
    }
}
