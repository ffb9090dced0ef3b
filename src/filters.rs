use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use crate::board::Board;

/// True iff every cell matches its row-mirrored partner: both empty, or the
/// same shape in opposite colors. On an odd board the middle row is its own
/// partner, so it has to be empty.
pub fn position_is_symmetric(board: &Board) -> bool {
    let (width, height) = (board.width(), board.height());
    for y in 0..(height + 1) / 2 {
        for x in 0..width {
            match (board.get(x, y), board.get(x, height - 1 - y)) {
                (None, None) => {}
                (Some(a), Some(b)) if a.kind.shape == b.kind.shape && a.color() != b.color() => {}
                _ => return false,
            }
        }
    }
    true
}

/// Type-only serialization of a board: rows from the south joined by `|`.
/// Ids and orientations are ignored.
pub fn canonical_key(board: &Board) -> String {
    board.rows().collect::<Vec<_>>().join("|")
}

/// Canonical keys of every position handed out so far. Clones share the same
/// set, so parallel searches agree on what is new.
#[derive(Debug, Clone, Default)]
pub struct SeenPositions {
    keys: Arc<Mutex<HashSet<String>>>,
}

impl SeenPositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `board` and reports whether it had not been seen before.
    pub fn position_is_new(&self, board: &Board) -> bool {
        let key = canonical_key(board);
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key)
    }

    pub fn contains(&self, board: &Board) -> bool {
        let key = canonical_key(board);
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&key)
    }

    pub fn len(&self) -> usize {
        self.keys.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
