pub mod bits;
pub mod board;
pub mod config;
pub mod error;
pub mod filters;
pub mod oracle;
pub mod permutations;
pub mod piece;
pub mod search;
pub mod structs;
pub mod topology;
pub mod util;
pub mod walker;

pub use board::Board;
pub use error::{BoardError, ConfigError};
pub use filters::SeenPositions;
pub use piece::{Color, Piece, PieceKind, Shape};
pub use search::SearchSession;
pub use structs::{Destination, Orientation, PieceId, SearchStats, Velocity};
pub use topology::{EdgeConfig, Preset};
