pub mod board;
pub mod config;
pub mod console;
pub mod error;
pub mod evaluation;
pub mod game;
pub mod movegen;
pub mod promotion;

pub use board::{Board, CastlingRights, Color, GameOutcome, LastMove, Piece, PieceType, Position};
pub use config::RulesConfig;
pub use error::GameError;
pub use game::{CapturedPieces, Game, GameSnapshot, PendingPromotion};
