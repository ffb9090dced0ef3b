use thiserror::Error;

use crate::structs::PieceId;
use crate::topology::Edge;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("malformed edge directive {directive:?} for the {edge} edge")]
    MalformedDirective { edge: Edge, directive: String },
    #[error("the {edge} edge cannot be glued to the {to} edge")]
    UnsupportedLink { edge: Edge, to: Edge },
    #[error("unknown edge preset {0:?}")]
    UnknownPreset(String),
    #[error("expected four edge directives, got {0}")]
    DirectiveCount(usize),
    #[error("layout is empty")]
    EmptyLayout,
    #[error("layout row {row} has {found} cells, expected {expected}")]
    RaggedLayout {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown piece character {0:?}")]
    UnknownPiece(char),
    #[error("invalid value {value:?} for {name}")]
    InvalidSetting { name: &'static str, value: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("no piece with id {0} on the board")]
    UnknownPiece(PieceId),
    #[error("destination ({x}, {y}) is off the board")]
    OutOfBounds { x: i32, y: i32 },
}
