//! The authoritative game: board, turn and all per-game bookkeeping.
//!
//! Every mutation goes through [`Game::commit_move`],
//! [`Game::resolve_pending_promotion`], [`Game::resign`] or [`Game::new_game`].
//! A rejected call returns an error and leaves the game untouched, and every
//! accepted call returns a fresh [`GameSnapshot`] for the presentation layer.

use crate::board::{Board, CastlingRights, Color, GameOutcome, LastMove, Piece, PieceType, Position};
use crate::config::RulesConfig;
use crate::error::GameError;
use crate::evaluation::Evaluator;
use crate::movegen::MoveGenerator;
use crate::promotion::{self, Demotion, Promotion};

/// A plain Pawn waiting on the last rank for its new type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    pub position: Position,
    pub piece: Piece,
}

/// Pieces taken off the board, or demoted away from their identity, keyed by
/// the color that took them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedPieces {
    by_top: Vec<Piece>,
    by_bottom: Vec<Piece>,
}

impl CapturedPieces {
    pub fn captured_by(&self, color: Color) -> &[Piece] {
        match color {
            Color::Top => &self.by_top,
            Color::Bottom => &self.by_bottom,
        }
    }

    fn record(&mut self, by: Color, piece: Piece) {
        match by {
            Color::Top => self.by_top.push(piece),
            Color::Bottom => self.by_bottom.push(piece),
        }
    }
}

/// Everything a renderer needs, detached from the live game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: Board,
    pub turn: Color,
    pub outcome: GameOutcome,
    pub winner: Option<Color>,
    pub last_move: Option<LastMove>,
    pub pending_promotion: Option<PendingPromotion>,
    pub captured: CapturedPieces,
    pub en_passant_target: Option<Position>,
    pub top_castling: CastlingRights,
    pub bottom_castling: CastlingRights,
}

pub struct Game {
    config: RulesConfig,
    move_generator: MoveGenerator,
    evaluator: Evaluator,
    board: Board,
    turn: Color,
    outcome: GameOutcome,
    winner: Option<Color>,
    last_move: Option<LastMove>,
    pending_promotion: Option<PendingPromotion>,
    en_passant_target: Option<Position>,
    top_castling: CastlingRights,
    bottom_castling: CastlingRights,
    captured: CapturedPieces,
}

impl Game {
    pub fn new() -> Self {
        Self::with_config(RulesConfig::default())
    }

    pub fn with_config(config: RulesConfig) -> Self {
        let board = Board::starting(config.super_pawn_column);
        Self::from_board_with_config(board, Color::Bottom, config)
    }

    /// Starts from an arbitrary position with `turn` to move. Castling rights
    /// are derived from the kings and rooks still on their home squares, and
    /// the outcome is evaluated for `turn` straight away.
    pub fn from_board(board: Board, turn: Color) -> Self {
        Self::from_board_with_config(board, turn, RulesConfig::default())
    }

    pub fn from_board_with_config(board: Board, turn: Color, config: RulesConfig) -> Self {
        let mut game = Self {
            config,
            move_generator: MoveGenerator::with_config(config),
            evaluator: Evaluator::with_config(config),
            board,
            turn,
            outcome: GameOutcome::Active,
            winner: None,
            last_move: None,
            pending_promotion: None,
            en_passant_target: None,
            top_castling: CastlingRights::from_board(&board, Color::Top),
            bottom_castling: CastlingRights::from_board(&board, Color::Bottom),
            captured: CapturedPieces::default(),
        };
        game.outcome = game.evaluator.check_endgame(&game.board, turn);
        if game.outcome == GameOutcome::Checkmate {
            game.winner = Some(turn.opposite());
        }
        game
    }

    /// Resets to the starting position with Bottom to move.
    pub fn new_game(&mut self) -> GameSnapshot {
        self.reset();
        self.snapshot()
    }

    fn reset(&mut self) {
        *self = Game::with_config(self.config);
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.pending_promotion
    }

    pub fn en_passant_target(&self) -> Option<Position> {
        self.en_passant_target
    }

    pub fn captured(&self) -> &CapturedPieces {
        &self.captured
    }

    pub fn castling_rights(&self, color: Color) -> CastlingRights {
        match color {
            Color::Top => self.top_castling,
            Color::Bottom => self.bottom_castling,
        }
    }

    fn castling_rights_mut(&mut self, color: Color) -> &mut CastlingRights {
        match color {
            Color::Top => &mut self.top_castling,
            Color::Bottom => &mut self.bottom_castling,
        }
    }

    pub fn is_king_in_check(&self, color: Color) -> bool {
        self.move_generator.is_king_in_check(&self.board, color)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board,
            turn: self.turn,
            outcome: self.outcome,
            winner: self.winner,
            last_move: self.last_move,
            pending_promotion: self.pending_promotion,
            captured: self.captured.clone(),
            en_passant_target: self.en_passant_target,
            top_castling: self.top_castling,
            bottom_castling: self.bottom_castling,
        }
    }

    /// Legal destinations of whatever stands on `from`; empty for an empty square.
    pub fn legal_moves(&self, from: Position) -> Vec<Position> {
        match self.board.piece_at(from) {
            Some(piece) => self.legal_moves_for(&piece, from),
            None => Vec::new(),
        }
    }

    /// King-safe destinations for `piece` on `from`, castling included.
    pub fn legal_moves_for(&self, piece: &Piece, from: Position) -> Vec<Position> {
        let mut moves = self.move_generator.legal_moves(
            piece,
            from,
            &self.board,
            self.en_passant_target,
            false,
        );
        moves.extend(self.castling_destinations(piece, from));
        moves
    }

    fn castling_destinations(&self, piece: &Piece, from: Position) -> Vec<Position> {
        if piece.kind != PieceType::King
            || from != Position::new(piece.color.back_rank(), 4)
            || self.is_king_in_check(piece.color)
        {
            return Vec::new();
        }
        let rights = self.castling_rights(piece.color);
        self.move_generator.castling_moves(piece.color, &rights, &self.board)
    }

    /// Plays `from -> to` for the side to move.
    ///
    /// If the move leaves a plain Pawn on the last rank the turn stays put
    /// until [`Game::resolve_pending_promotion`] is called.
    pub fn commit_move(&mut self, from: Position, to: Position) -> Result<GameSnapshot, GameError> {
        if self.outcome.is_terminal() {
            return Err(GameError::GameOver);
        }
        if self.pending_promotion.is_some() {
            return Err(GameError::PromotionPending);
        }
        let mover = self.board.piece_at(from).ok_or(GameError::NoPieceAt(from))?;
        if mover.color != self.turn {
            return Err(GameError::WrongTurn(from));
        }

        let is_castle = self.castling_destinations(&mover, from).contains(&to);
        let is_legal = is_castle
            || self
                .move_generator
                .legal_moves(&mover, from, &self.board, self.en_passant_target, false)
                .contains(&to);
        if !is_legal {
            return Err(GameError::IllegalMove { from, to });
        }

        self.apply_move(mover, from, to, is_castle);
        if self.pending_promotion.is_none() {
            self.finish_turn(mover.color);
        }
        Ok(self.snapshot())
    }

    /// Writes the chosen type onto the waiting Pawn and hands the turn over.
    pub fn resolve_pending_promotion(
        &mut self,
        choice: PieceType,
    ) -> Result<GameSnapshot, GameError> {
        let pending = self.pending_promotion.ok_or(GameError::NoPendingPromotion)?;
        if !PieceType::PROMOTION_CHOICES.contains(&choice) {
            return Err(GameError::InvalidPromotion(choice));
        }
        self.board.set_kind(pending.position, choice);
        self.last_move = Some(LastMove {
            from: pending.position,
            to: pending.position,
        });
        self.pending_promotion = None;
        self.finish_turn(pending.piece.color);
        Ok(self.snapshot())
    }

    /// `color` concedes; its opponent wins.
    pub fn resign(&mut self, color: Color) -> Result<GameSnapshot, GameError> {
        if self.outcome.is_terminal() {
            return Err(GameError::GameOver);
        }
        self.outcome = GameOutcome::Resignation;
        self.winner = Some(color.opposite());
        self.pending_promotion = None;
        Ok(self.snapshot())
    }

    fn apply_move(&mut self, mut mover: Piece, from: Position, to: Position, is_castle: bool) {
        let start_kind = mover.kind;
        let opponent = mover.color.opposite();
        let en_passant_target = self.en_passant_target.take();

        let self_demoted = match promotion::scan_demotions(&self.board, to, &mover) {
            Demotion::SelfDemote => {
                self.captured.record(opponent, mover);
                mover.kind = PieceType::Pawn;
                true
            }
            Demotion::Aura(targets) => {
                for pos in targets {
                    if let Some(victim) = self.board.piece_at(pos) {
                        self.captured.record(mover.color, victim);
                        self.board.set_kind(pos, PieceType::Pawn);
                        self.last_move = Some(LastMove { from: pos, to: pos });
                    }
                }
                false
            }
            Demotion::None => false,
        };

        let mut pending = None;
        if !self_demoted {
            match promotion::promotion_for(&mover, to) {
                Promotion::Auto(kind) => mover.kind = kind,
                Promotion::Pending => {
                    pending = Some(PendingPromotion {
                        position: to,
                        piece: mover,
                    })
                }
                Promotion::None => {}
            }
        }

        if start_kind.is_pawn_like() {
            let forward = mover.color.forward();
            if from.col != to.col && Some(to) == en_passant_target {
                self.clear_square(to.offset(-forward, 0), mover.color);
            }
            if (to.row - from.row).abs() == 2 {
                self.en_passant_target = Some(from.offset(forward, 0));
            }
        }

        if start_kind == PieceType::Rook {
            for pos in squares_between(from, to) {
                self.clear_square(pos, mover.color);
            }
        }

        if is_castle {
            self.castle_rook(mover.color, to);
        }

        self.clear_square(to, mover.color);
        self.board.set(from, None);
        self.board.set(to, Some(mover));
        self.last_move = Some(LastMove { from, to });
        self.update_castling_rights(start_kind, mover.color, from, to);
        self.pending_promotion = pending;
    }

    /// Empties `pos`, recording an opponent of `by` as captured.
    fn clear_square(&mut self, pos: Position, by: Color) {
        if let Some(piece) = self.board.take(pos) {
            if piece.color != by {
                self.captured.record(by, piece);
            }
        }
    }

    fn castle_rook(&mut self, color: Color, king_to: Position) {
        let row = king_to.row;
        let (rook_from, rook_to) = if king_to.col == 2 {
            (Position::new(row, 0), Position::new(row, 3))
        } else {
            (Position::new(row, 7), Position::new(row, 5))
        };
        if let Some(rook) = self.board.take(rook_from) {
            self.board.set(rook_to, Some(rook));
            self.last_move = Some(LastMove {
                from: rook_from,
                to: rook_to,
            });
        }
        self.update_castling_rights(PieceType::Rook, color, rook_from, rook_to);
    }

    fn update_castling_rights(
        &mut self,
        kind: PieceType,
        color: Color,
        from: Position,
        to: Position,
    ) {
        let home = color.back_rank();
        let rights = self.castling_rights_mut(color);
        match kind {
            PieceType::King => rights.king_moved = true,
            PieceType::Rook if from == Position::new(home, 0) => rights.queenside_rook_moved = true,
            PieceType::Rook if from == Position::new(home, 7) => rights.kingside_rook_moved = true,
            _ => {}
        }

        // A capture on an opposing corner takes that rook's right with it.
        let opponent = color.opposite();
        let their_home = opponent.back_rank();
        let theirs = self.castling_rights_mut(opponent);
        if to == Position::new(their_home, 0) {
            theirs.queenside_rook_moved = true;
        } else if to == Position::new(their_home, 7) {
            theirs.kingside_rook_moved = true;
        }
    }

    fn finish_turn(&mut self, mover: Color) {
        self.outcome = self.evaluator.check_endgame(&self.board, mover.opposite());
        match self.outcome {
            GameOutcome::Active => self.turn = mover.opposite(),
            GameOutcome::Checkmate | GameOutcome::Resignation => self.winner = Some(mover),
            GameOutcome::Stalemate => {}
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

/// Squares strictly between two squares on one rank, file or diagonal.
fn squares_between(from: Position, to: Position) -> Vec<Position> {
    let dr = (to.row - from.row).signum();
    let dc = (to.col - from.col).signum();
    let aligned = from.row == to.row
        || from.col == to.col
        || (to.row - from.row).abs() == (to.col - from.col).abs();
    if !aligned || from == to {
        return Vec::new();
    }
    let mut squares = Vec::new();
    let mut pos = from.offset(dr, dc);
    while pos != to {
        squares.push(pos);
        pos = pos.offset(dr, dc);
    }
    squares
}
