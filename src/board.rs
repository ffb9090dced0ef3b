use std::fmt;

use crate::error::{BoardError, ConfigError};
use crate::piece::{Color, Piece, PieceKind};
use crate::structs::{Destination, PieceId};

/// Rectangular grid of cells, row-major from the south-west corner.
///
/// Every occupied cell holds a piece whose `(x, y)` are that cell's
/// coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    cells: Vec<Option<Piece>>,
}

impl Board {
    /// # Panics
    ///
    /// Panics unless both extents are positive.
    pub fn empty(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "board needs positive extents");
        Self {
            width,
            height,
            cells: vec![None; (width * height) as usize],
        }
    }

    /// Builds a board from rows of piece characters written north first, as
    /// the board is seen from white's side. Ids are handed out row by row
    /// from the south.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, ConfigError> {
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        if rows.is_empty() || width == 0 {
            return Err(ConfigError::EmptyLayout);
        }
        for (row, line) in rows.iter().enumerate() {
            let found = line.as_ref().chars().count();
            if found != width {
                return Err(ConfigError::RaggedLayout {
                    row,
                    expected: width,
                    found,
                });
            }
        }

        let mut board = Board::empty(width as i32, rows.len() as i32);
        let mut next_id: PieceId = 0;
        for (y, line) in rows.iter().rev().enumerate() {
            for (x, c) in line.as_ref().chars().enumerate() {
                if c == '.' {
                    continue;
                }
                let kind = PieceKind::from_char(c)?;
                board.place(Piece::new(kind, next_id, x as i32, y as i32));
                next_id += 1;
            }
        }
        Ok(board)
    }

    /// Reassigns `cells` (row-major from the south) to a board of the given
    /// shape, moving each piece to the cell it was put in.
    ///
    /// # Panics
    ///
    /// Panics if `cells` does not hold exactly `width * height` entries.
    pub fn from_cells(width: i32, height: i32, cells: Vec<Option<Piece>>) -> Self {
        assert_eq!(cells.len(), (width * height) as usize, "cell count does not match board shape");
        let cells = cells
            .into_iter()
            .enumerate()
            .map(|(i, cell)| {
                cell.map(|mut piece| {
                    piece.x = i as i32 % width;
                    piece.y = i as i32 / width;
                    piece
                })
            })
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cells(&self) -> &[Option<Piece>] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<Option<Piece>> {
        self.cells
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Piece> {
        if !self.in_bounds(x, y) {
            return None;
        }
        self.cells[self.index(x, y)].as_ref()
    }

    /// Puts `piece` on its own `(x, y)`, returning whatever was there.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is off the board. Moves go through
    /// [`Board::apply_move`], which reports that as an error instead.
    pub fn place(&mut self, piece: Piece) -> Option<Piece> {
        assert!(self.in_bounds(piece.x, piece.y), "piece placed off the board");
        let i = self.index(piece.x, piece.y);
        self.cells[i].replace(piece)
    }

    pub fn take(&mut self, x: i32, y: i32) -> Option<Piece> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let i = self.index(x, y);
        self.cells[i].take()
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.cells.iter().flatten()
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces().find(|p| p.id == id)
    }

    pub fn king(&self, color: Color) -> Option<&Piece> {
        self.pieces()
            .find(|p| p.kind.is_king() && p.color() == color)
    }

    /// Moves piece `id` to `dest`, clearing its old cell and composing the
    /// destination's orientation change onto the piece. Returns the captured
    /// piece, if any.
    pub fn apply_move(&mut self, id: PieceId, dest: &Destination) -> Result<Option<Piece>, BoardError> {
        if !self.in_bounds(dest.x, dest.y) {
            return Err(BoardError::OutOfBounds {
                x: dest.x,
                y: dest.y,
            });
        }
        let (x, y) = self
            .piece(id)
            .map(|p| (p.x, p.y))
            .ok_or(BoardError::UnknownPiece(id))?;
        let mut piece = self.take(x, y).ok_or(BoardError::UnknownPiece(id))?;
        piece.x = dest.x;
        piece.y = dest.y;
        piece.orientation = piece.orientation.then(dest.orientation());
        Ok(self.place(piece))
    }

    /// Rows as piece characters, south row first.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells.chunks(self.width as usize).map(|row| {
            row.iter()
                .map(|cell| cell.map_or('.', |p| p.kind.to_char()))
                .collect()
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self.rows().collect();
        for row in rows.iter().rev() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
