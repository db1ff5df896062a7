use crate::board::{Board, Color, GameOutcome};
use crate::config::RulesConfig;
use crate::movegen::MoveGenerator;

/// Classifies a position for the side about to move.
pub struct Evaluator {
    move_generator: MoveGenerator,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::with_config(RulesConfig::default())
    }

    pub fn with_config(config: RulesConfig) -> Self {
        Self {
            move_generator: MoveGenerator::with_config(config),
        }
    }

    pub fn has_legal_move(&self, board: &Board, color: Color) -> bool {
        board.pieces_of(color).any(|(from, piece)| {
            !self
                .move_generator
                .legal_moves(&piece, from, board, None, false)
                .is_empty()
        })
    }

    /// Active while `color` can move; otherwise checkmate if its king is
    /// attacked and stalemate if not.
    pub fn check_endgame(&self, board: &Board, color: Color) -> GameOutcome {
        if self.has_legal_move(board, color) {
            GameOutcome::Active
        } else if self.move_generator.is_king_in_check(board, color) {
            GameOutcome::Checkmate
        } else {
            GameOutcome::Stalemate
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator::new()
    }
}
