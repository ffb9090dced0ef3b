use crate::error::ConfigError;
use crate::structs::{CaptureRule, Orientation, PieceId, Velocity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shape {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceKind {
    pub shape: Shape,
    pub color: Color,
}

impl PieceKind {
    pub const fn new(shape: Shape, color: Color) -> Self {
        Self { shape, color }
    }

    pub fn from_char(c: char) -> Result<Self, ConfigError> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let shape = match c.to_ascii_lowercase() {
            'p' => Shape::Pawn,
            'r' => Shape::Rook,
            'n' => Shape::Knight,
            'b' => Shape::Bishop,
            'q' => Shape::Queen,
            'k' => Shape::King,
            _ => return Err(ConfigError::UnknownPiece(c)),
        };
        Ok(Self { shape, color })
    }

    pub fn to_char(self) -> char {
        let c = match self.shape {
            Shape::Pawn => 'p',
            Shape::Rook => 'r',
            Shape::Knight => 'n',
            Shape::Bishop => 'b',
            Shape::Queen => 'q',
            Shape::King => 'k',
        };
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn is_king(self) -> bool {
        self.shape == Shape::King
    }

    /// Base velocities, with north up from white's side.
    pub fn velocities(self) -> &'static [Velocity] {
        match (self.shape, self.color) {
            (Shape::Pawn, Color::White) => &WHITE_PAWN,
            (Shape::Pawn, Color::Black) => &BLACK_PAWN,
            (Shape::Rook, _) => &ROOK,
            (Shape::Knight, _) => &KNIGHT,
            (Shape::Bishop, _) => &BISHOP,
            (Shape::Queen, _) => &QUEEN,
            (Shape::King, _) => &KING,
        }
    }
}

const WHITE_PAWN: [Velocity; 3] = [
    Velocity::step(0, 1).with_capture(CaptureRule::NonCaptureOnly),
    Velocity::step(1, 1).with_capture(CaptureRule::CaptureOnly),
    Velocity::step(-1, 1).with_capture(CaptureRule::CaptureOnly),
];

const BLACK_PAWN: [Velocity; 3] = [
    Velocity::step(0, -1).with_capture(CaptureRule::NonCaptureOnly),
    Velocity::step(1, -1).with_capture(CaptureRule::CaptureOnly),
    Velocity::step(-1, -1).with_capture(CaptureRule::CaptureOnly),
];

const ROOK: [Velocity; 4] = [
    Velocity::slide(1, 0),
    Velocity::slide(-1, 0),
    Velocity::slide(0, 1),
    Velocity::slide(0, -1),
];

const KNIGHT: [Velocity; 8] = [
    Velocity::step(1, 2),
    Velocity::step(2, 1),
    Velocity::step(-1, 2),
    Velocity::step(-2, 1),
    Velocity::step(1, -2),
    Velocity::step(2, -1),
    Velocity::step(-1, -2),
    Velocity::step(-2, -1),
];

const BISHOP: [Velocity; 4] = [
    Velocity::slide(1, 1),
    Velocity::slide(-1, 1),
    Velocity::slide(1, -1),
    Velocity::slide(-1, -1),
];

const QUEEN: [Velocity; 8] = [
    Velocity::slide(1, 0),
    Velocity::slide(-1, 0),
    Velocity::slide(0, 1),
    Velocity::slide(0, -1),
    Velocity::slide(1, 1),
    Velocity::slide(-1, 1),
    Velocity::slide(1, -1),
    Velocity::slide(-1, -1),
];

const KING: [Velocity; 8] = [
    Velocity::step(1, 0),
    Velocity::step(-1, 0),
    Velocity::step(0, 1),
    Velocity::step(0, -1),
    Velocity::step(1, 1),
    Velocity::step(-1, 1),
    Velocity::step(1, -1),
    Velocity::step(-1, -1),
];

/// A piece on the board. Kind and id never change; the position and the
/// orientation picked up from wrap crossings do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub id: PieceId,
    pub x: i32,
    pub y: i32,
    pub orientation: Orientation,
}

impl Piece {
    pub fn new(kind: PieceKind, id: PieceId, x: i32, y: i32) -> Self {
        Self {
            kind,
            id,
            x,
            y,
            orientation: Orientation::IDENTITY,
        }
    }

    pub fn color(&self) -> Color {
        self.kind.color
    }

    /// Base velocities seen through the piece's current orientation.
    pub fn velocities(&self) -> impl Iterator<Item = Velocity> + '_ {
        self.kind
            .velocities()
            .iter()
            .map(move |v| v.oriented(self.orientation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn characters_round_trip() {
        for c in "PRNBQKprnbqk".chars() {
            assert_eq!(PieceKind::from_char(c).unwrap().to_char(), c);
        }
        assert_eq!(PieceKind::from_char('x'), Err(ConfigError::UnknownPiece('x')));
    }

    #[test]
    fn pawns_move_towards_the_opponent() {
        let white = PieceKind::from_char('P').unwrap();
        let black = PieceKind::from_char('p').unwrap();
        assert!(white.velocities().iter().all(|v| v.dy == 1));
        assert!(black.velocities().iter().all(|v| v.dy == -1));
        assert_eq!(
            white.velocities()[0].capture,
            CaptureRule::NonCaptureOnly
        );
    }

    #[test]
    fn orientation_rewrites_effective_velocities() {
        let mut knight = Piece::new(PieceKind::new(Shape::Knight, Color::White), 0, 0, 0);
        knight.orientation = Orientation::from_flags(true, false, 0);
        let first = knight.velocities().next().unwrap();
        assert_eq!((first.dx, first.dy), (-1, 2));
        assert!(!first.repeatable);
    }
}
