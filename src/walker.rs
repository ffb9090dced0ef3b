//! Walks one velocity of one piece across the glued board.
//!
//! In move mode the walker is an iterator of destinations. In probe mode it
//! answers whether the scan's first occupied square is a given piece.

use crate::board::Board;
use crate::piece::Piece;
use crate::structs::{rotate, CaptureRule, Destination, PieceId, Velocity};
use crate::topology::{wrap, EdgeConfig, Step};

/// Upper bound on distinct (square, orientation) states a scan can visit.
const ORIENTATION_STATES: i32 = 16;

pub struct Walker<'a> {
    board: &'a Board,
    edges: &'a EdgeConfig,
    piece: Piece,
    velocity: Velocity,
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    flip_x: bool,
    flip_y: bool,
    rotation: u8,
    steps: i32,
    max_steps: i32,
    done: bool,
}

impl<'a> Walker<'a> {
    pub fn new(board: &'a Board, edges: &'a EdgeConfig, piece: &Piece, velocity: Velocity) -> Self {
        Self {
            board,
            edges,
            piece: *piece,
            velocity,
            x: piece.x,
            y: piece.y,
            dx: velocity.dx,
            dy: velocity.dy,
            flip_x: false,
            flip_y: false,
            rotation: 0,
            steps: 0,
            max_steps: board.width() * board.height() * ORIENTATION_STATES,
            done: false,
        }
    }

    /// Takes one step, returning the landing square with the orientation
    /// accumulated so far. Stops the scan on a blocked edge, a gluing fault,
    /// or after a single step of a non-repeatable velocity.
    fn advance(&mut self) -> Option<Destination> {
        if self.done {
            return None;
        }
        if self.steps >= self.max_steps {
            log::debug!(
                "scan of {} from ({}, {}) along ({}, {}) cycles without returning",
                self.piece.kind.to_char(),
                self.piece.x,
                self.piece.y,
                self.velocity.dx,
                self.velocity.dy
            );
            self.done = true;
            return None;
        }
        self.steps += 1;

        let target = (self.x + self.dx, self.y + self.dy);
        let crossing = match wrap(
            self.board.width(),
            self.board.height(),
            (self.x, self.y),
            target,
            self.edges,
        ) {
            Step::Landed(crossing) => crossing,
            Step::Blocked => {
                self.done = true;
                return None;
            }
            Step::Fault { x, y } => {
                log::warn!(
                    "velocity result out of bounds: {} from ({}, {}) along ({}, {}) resolved to ({}, {}) with edges {}",
                    self.piece.kind.to_char(),
                    self.x,
                    self.y,
                    self.velocity.dx,
                    self.velocity.dy,
                    x,
                    y,
                    self.edges
                );
                self.done = true;
                return None;
            }
        };

        self.x = crossing.x;
        self.y = crossing.y;
        self.flip_x ^= crossing.flip_x;
        self.flip_y ^= crossing.flip_y;
        self.rotation = (self.rotation + crossing.rotation) % 4;

        // Next step: base components, flipped then turned by everything
        // crossed so far.
        let dx = if self.flip_x { -self.velocity.dx } else { self.velocity.dx };
        let dy = if self.flip_y { -self.velocity.dy } else { self.velocity.dy };
        (self.dx, self.dy) = rotate(dx, dy, self.rotation);

        if !self.velocity.repeatable {
            self.done = true;
        }

        Some(Destination {
            x: self.x,
            y: self.y,
            flip_x: self.flip_x,
            flip_y: self.flip_y,
            rotation: self.rotation,
        })
    }

    /// True iff the first occupied square of the scan holds piece `target`
    /// and it is of the walking piece's color (`by_own`) or of the other one.
    pub fn probe(mut self, target: PieceId, by_own: bool) -> bool {
        if self.velocity.capture == CaptureRule::NonCaptureOnly {
            return false;
        }
        while let Some(landing) = self.advance() {
            match self.board.get(landing.x, landing.y) {
                Some(occupant) => {
                    let same_color = occupant.color() == self.piece.color();
                    return occupant.id == target && same_color == by_own;
                }
                None if self.velocity.capture == CaptureRule::CaptureOnly => return false,
                None => {}
            }
        }
        false
    }
}

impl Iterator for Walker<'_> {
    type Item = Destination;

    fn next(&mut self) -> Option<Destination> {
        let landing = self.advance()?;
        match self.board.get(landing.x, landing.y) {
            Some(occupant) => {
                self.done = true;
                let capturable = occupant.color() != self.piece.color()
                    && self.velocity.capture != CaptureRule::NonCaptureOnly;
                capturable.then_some(landing)
            }
            None if self.velocity.capture == CaptureRule::CaptureOnly => {
                self.done = true;
                None
            }
            None => Some(landing),
        }
    }
}

/// Every destination of `piece` under the board's gluing, velocity by
/// velocity. Squares reachable along several velocities appear once per
/// velocity.
pub fn moves<'a>(board: &'a Board, edges: &'a EdgeConfig, piece: &Piece) -> impl Iterator<Item = Destination> + 'a {
    let piece = *piece;
    piece
        .kind
        .velocities()
        .iter()
        .map(move |v| v.oriented(piece.orientation))
        .flat_map(move |v| Walker::new(board, edges, &piece, v))
}
