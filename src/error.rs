use thiserror::Error;

use crate::board::{PieceType, Position};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("the game is over")]
    GameOver,
    #[error("a promotion choice is pending")]
    PromotionPending,
    #[error("no promotion is pending")]
    NoPendingPromotion,
    #[error("no piece at {0}")]
    NoPieceAt(Position),
    #[error("the piece at {0} does not belong to the side to move")]
    WrongTurn(Position),
    #[error("illegal move: {from} -> {to}")]
    IllegalMove { from: Position, to: Position },
    #[error("a pawn cannot promote to {0}")]
    InvalidPromotion(PieceType),
}
