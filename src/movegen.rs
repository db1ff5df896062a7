use crate::board::{Board, CastlingRights, Color, Piece, PieceType, Position};
use crate::config::RulesConfig;

const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONALS: [(i8, i8); 4] = [(1, 1), (-1, -1), (1, -1), (-1, 1)];
const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0), (-1, 0), (0, 1), (0, -1),
    (1, 1), (-1, -1), (1, -1), (-1, 1),
];
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1), (1, 2), (-1, 2), (-2, 1),
    (-2, -1), (-1, -2), (1, -2), (2, -1),
];

pub struct MoveGenerator {
    pub config: RulesConfig,
}

impl MoveGenerator {
    pub fn new() -> Self {
        Self::with_config(RulesConfig::default())
    }

    pub fn with_config(config: RulesConfig) -> Self {
        Self { config }
    }

    /// Destinations for `piece` standing on `from`, filtered for the safety of
    /// its own king unless `skip_king_safety` is set. Castling is not included.
    pub fn legal_moves(
        &self,
        piece: &Piece,
        from: Position,
        board: &Board,
        en_passant: Option<Position>,
        skip_king_safety: bool,
    ) -> Vec<Position> {
        let moves = self.pseudo_legal_moves(piece, from, board, en_passant);
        if skip_king_safety {
            return moves;
        }
        moves
            .into_iter()
            .filter(|&to| self.is_move_safe(piece, from, to, board))
            .collect()
    }

    pub fn pseudo_legal_moves(
        &self,
        piece: &Piece,
        from: Position,
        board: &Board,
        en_passant: Option<Position>,
    ) -> Vec<Position> {
        let mut moves = Vec::new();
        match piece.kind {
            PieceType::Pawn | PieceType::SuperPawn => {
                self.pawn_moves(piece, from, board, en_passant, &mut moves)
            }
            PieceType::Knight => {
                self.step_moves(piece, from, board, &KNIGHT_OFFSETS, false, &mut moves)
            }
            PieceType::King | PieceType::Pope => {
                self.step_moves(piece, from, board, &ALL_DIRECTIONS, false, &mut moves)
            }
            PieceType::Bishop => {
                self.slide_moves(piece, from, board, &DIAGONALS, None, false, &mut moves);
                if self.config.bishop_orthogonal_step {
                    self.step_moves(piece, from, board, &ORTHOGONALS, true, &mut moves);
                }
            }
            PieceType::Rook => self.slide_moves(
                piece,
                from,
                board,
                &ORTHOGONALS,
                Some(self.config.rook_range),
                self.config.rook_passes_through_opponents,
                &mut moves,
            ),
            PieceType::Queen => {
                self.slide_moves(piece, from, board, &ALL_DIRECTIONS, None, false, &mut moves)
            }
        }
        moves
    }

    fn pawn_moves(
        &self,
        piece: &Piece,
        from: Position,
        board: &Board,
        en_passant: Option<Position>,
        moves: &mut Vec<Position>,
    ) {
        let dir = piece.color.forward();

        let one_step = from.offset(dir, 0);
        if board.is_empty(one_step) {
            moves.push(one_step);
            let two_step = from.offset(2 * dir, 0);
            if from.row == piece.color.pawn_rank() && board.is_empty(two_step) {
                moves.push(two_step);
            }
        }

        for dc in [-1, 1] {
            let target = from.offset(dir, dc);
            if !target.is_valid() {
                continue;
            }
            if board.is_opponent(target, piece) || Some(target) == en_passant {
                moves.push(target);
            }
        }
    }

    fn step_moves(
        &self,
        piece: &Piece,
        from: Position,
        board: &Board,
        offsets: &[(i8, i8)],
        require_empty: bool,
        moves: &mut Vec<Position>,
    ) {
        for &(dr, dc) in offsets {
            let to = from.offset(dr, dc);
            if !to.is_valid() || board.is_ally(to, piece) {
                continue;
            }
            if require_empty && !board.is_empty(to) {
                continue;
            }
            moves.push(to);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn slide_moves(
        &self,
        piece: &Piece,
        from: Position,
        board: &Board,
        directions: &[(i8, i8)],
        range: Option<usize>,
        pierce: bool,
        moves: &mut Vec<Position>,
    ) {
        for &(dr, dc) in directions {
            let mut to = from.offset(dr, dc);
            let mut travelled = 0;
            while to.is_valid() {
                if range.map_or(false, |limit| travelled >= limit) {
                    break;
                }
                if board.is_empty(to) {
                    moves.push(to);
                } else if board.is_opponent(to, piece) {
                    moves.push(to);
                    if !pierce {
                        break;
                    }
                } else {
                    break;
                }
                to = to.offset(dr, dc);
                travelled += 1;
            }
        }
    }

    /// Plays `from -> to` on a scratch copy (no side effects beyond moving the
    /// piece) and reports whether the mover's king is then out of check.
    pub fn is_move_safe(
        &self,
        piece: &Piece,
        from: Position,
        to: Position,
        board: &Board,
    ) -> bool {
        let mut scratch = *board;
        scratch.set(from, None);
        scratch.set(to, Some(*piece));
        !self.is_king_in_check(&scratch, piece.color)
    }

    /// Castling destinations for `color`'s king on its home square.
    pub fn castling_moves(
        &self,
        color: Color,
        rights: &CastlingRights,
        board: &Board,
    ) -> Vec<Position> {
        let mut moves = Vec::new();
        if rights.king_moved {
            return moves;
        }
        let row = color.back_rank();
        let home = Position::new(row, 4);
        let owns = |col: i8, kind: PieceType| {
            board
                .piece_at(Position::new(row, col))
                .map_or(false, |p| p.color == color && p.kind == kind)
        };
        if !owns(4, PieceType::King) {
            return moves;
        }
        let opponent = color.opposite();
        let path_is_clear = |cols: &[i8]| {
            cols.iter().all(|&col| {
                let pos = Position::new(row, col);
                board.is_empty(pos) && !self.is_square_threatened(board, pos, opponent)
            })
        };
        let home_is_safe = !self.is_square_threatened(board, home, opponent);

        if !rights.kingside_rook_moved
            && owns(7, PieceType::Rook)
            && home_is_safe
            && path_is_clear(&[5, 6])
        {
            moves.push(Position::new(row, 6));
        }
        if !rights.queenside_rook_moved
            && owns(0, PieceType::Rook)
            && home_is_safe
            && path_is_clear(&[3, 2, 1])
        {
            moves.push(Position::new(row, 2));
        }
        moves
    }

    pub fn is_square_threatened(
        &self,
        board: &Board,
        square: Position,
        attacker_color: Color,
    ) -> bool {
        board.pieces_of(attacker_color).any(|(from, piece)| {
            self.legal_moves(&piece, from, board, None, true).contains(&square)
        })
    }

    pub fn is_king_in_check(&self, board: &Board, color: Color) -> bool {
        match board.king_position(color) {
            Some(king_square) => self.is_square_threatened(board, king_square, color.opposite()),
            None => false, // No king found (shouldn't happen in a valid position)
        }
    }
}

impl Default for MoveGenerator {
    fn default() -> Self {
        MoveGenerator::new()
    }
}
