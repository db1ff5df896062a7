use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub fn is_valid(&self) -> bool {
        (0..8).contains(&self.row) && (0..8).contains(&self.col)
    }

    pub fn offset(&self, dr: i8, dc: i8) -> Position {
        Position::new(self.row + dr, self.col + dc)
    }

    /// The up to eight on-board squares touching this one.
    pub fn neighbours(&self) -> impl Iterator<Item = Position> + '_ {
        (-1..=1)
            .flat_map(|dr| (-1..=1).map(move |dc| (dr, dc)))
            .filter(|&(dr, dc)| dr != 0 || dc != 0)
            .map(move |(dr, dc)| self.offset(dr, dc))
            .filter(Position::is_valid)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
    SuperPawn,
    Pope,
}

impl PieceType {
    pub const PROMOTION_CHOICES: [PieceType; 4] =
        [PieceType::Queen, PieceType::Rook, PieceType::Bishop, PieceType::Knight];

    pub fn is_super(&self) -> bool {
        matches!(self, PieceType::SuperPawn | PieceType::Pope)
    }

    pub fn is_pawn_like(&self) -> bool {
        matches!(self, PieceType::Pawn | PieceType::SuperPawn)
    }

    fn symbol(&self) -> char {
        match self {
            PieceType::King => 'k',
            PieceType::Queen => 'q',
            PieceType::Rook => 'r',
            PieceType::Bishop => 'b',
            PieceType::Knight => 'n',
            PieceType::Pawn => 'p',
            PieceType::SuperPawn => 's',
            PieceType::Pope => 'x',
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            PieceType::King => "King",
            PieceType::Queen => "Queen",
            PieceType::Rook => "Rook",
            PieceType::Bishop => "Bishop",
            PieceType::Knight => "Knight",
            PieceType::Pawn => "Pawn",
            PieceType::SuperPawn => "SuperPawn",
            PieceType::Pope => "Pope",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Top,
    Bottom,
}

impl Color {
    pub fn opposite(&self) -> Color {
        match self {
            Color::Top => Color::Bottom,
            Color::Bottom => Color::Top,
        }
    }

    /// Row delta of a forward pawn step.
    pub fn forward(&self) -> i8 {
        match self {
            Color::Top => 1,
            Color::Bottom => -1,
        }
    }

    pub fn back_rank(&self) -> i8 {
        match self {
            Color::Top => 0,
            Color::Bottom => 7,
        }
    }

    /// The rank this color promotes on.
    pub fn last_rank(&self) -> i8 {
        self.opposite().back_rank()
    }

    pub fn pawn_rank(&self) -> i8 {
        self.back_rank() + self.forward()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::Top => f.write_str("Top"),
            Color::Bottom => f.write_str("Bottom"),
        }
    }
}

/// Opaque per-piece identity, stable across promotion and demotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId(u64);

impl PieceId {
    pub fn random() -> Self {
        PieceId(rand::random())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceType,
    pub color: Color,
    pub id: PieceId,
}

impl Piece {
    pub fn new(kind: PieceType, color: Color) -> Self {
        Self {
            kind,
            color,
            id: PieceId::random(),
        }
    }

    pub fn symbol(&self) -> char {
        match self.color {
            Color::Top => self.kind.symbol(),
            Color::Bottom => self.kind.symbol().to_ascii_uppercase(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Square {
    pub row: i8,
    pub col: i8,
    pub piece: Option<Piece>,
}

impl Square {
    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CastlingRights {
    pub king_moved: bool,
    pub kingside_rook_moved: bool,
    pub queenside_rook_moved: bool,
}

impl CastlingRights {
    /// Rights for an arbitrary position: a side keeps a right only while its
    /// king and the matching rook stand on their home squares.
    pub fn from_board(board: &Board, color: Color) -> Self {
        let row = color.back_rank();
        let holds = |col: i8, kind: PieceType| {
            board
                .piece_at(Position::new(row, col))
                .map_or(false, |p| p.kind == kind && p.color == color)
        };
        Self {
            king_moved: !holds(4, PieceType::King),
            kingside_rook_moved: !holds(7, PieceType::Rook),
            queenside_rook_moved: !holds(0, PieceType::Rook),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastMove {
    pub from: Position,
    pub to: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Active,
    Checkmate,
    Stalemate,
    Resignation,
}

impl GameOutcome {
    pub fn is_terminal(&self) -> bool {
        *self != GameOutcome::Active
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameOutcome::Active => f.write_str("Active"),
            GameOutcome::Checkmate => f.write_str("Checkmate"),
            GameOutcome::Stalemate => f.write_str("Stalemate"),
            GameOutcome::Resignation => f.write_str("Resignation"),
        }
    }
}

/// 8x8 grid with value semantics; copying it is the scratch board used for
/// legality simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub const BACK_ROW: [PieceType; 8] = [
        PieceType::Rook,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Queen,
        PieceType::King,
        PieceType::Bishop,
        PieceType::Knight,
        PieceType::Rook,
    ];

    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// Standard setup with a SuperPawn in place of the pawn on `super_pawn_column`.
    pub fn starting(super_pawn_column: usize) -> Self {
        let mut board = Board::empty();
        for color in [Color::Top, Color::Bottom] {
            for col in 0..8 {
                let pawn = if col == super_pawn_column {
                    PieceType::SuperPawn
                } else {
                    PieceType::Pawn
                };
                board.squares[color.pawn_rank() as usize][col] = Some(Piece::new(pawn, color));
                board.squares[color.back_rank() as usize][col] =
                    Some(Piece::new(Board::BACK_ROW[col], color));
            }
        }
        board
    }

    /// Builds a board from explicit placements; off-board entries are ignored
    /// and later placements win.
    pub fn from_placements<I>(placements: I) -> Self
    where
        I: IntoIterator<Item = (Position, Piece)>,
    {
        let mut board = Board::empty();
        for (pos, piece) in placements {
            board.set(pos, Some(piece));
        }
        board
    }

    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        if !pos.is_valid() {
            return None;
        }
        self.squares[pos.row as usize][pos.col as usize]
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        pos.is_valid() && self.piece_at(pos).is_none()
    }

    pub fn is_opponent(&self, pos: Position, of: &Piece) -> bool {
        self.piece_at(pos).map_or(false, |p| p.color != of.color)
    }

    pub fn is_ally(&self, pos: Position, of: &Piece) -> bool {
        self.piece_at(pos).map_or(false, |p| p.color == of.color)
    }

    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.pieces()
            .find(|(_, p)| p.kind == PieceType::King && p.color == color)
            .map(|(pos, _)| pos)
    }

    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        (0..8i8).flat_map(move |row| {
            (0..8i8).map(move |col| Square {
                row,
                col,
                piece: self.squares[row as usize][col as usize],
            })
        })
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.squares()
            .filter_map(|sq| sq.piece.map(|piece| (sq.position(), piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    pub(crate) fn set(&mut self, pos: Position, piece: Option<Piece>) {
        if pos.is_valid() {
            self.squares[pos.row as usize][pos.col as usize] = piece;
        }
    }

    pub(crate) fn take(&mut self, pos: Position) -> Option<Piece> {
        let piece = self.piece_at(pos);
        self.set(pos, None);
        piece
    }

    pub(crate) fn set_kind(&mut self, pos: Position, kind: PieceType) {
        if let Some(mut piece) = self.piece_at(pos) {
            piece.kind = kind;
            self.set(pos, Some(piece));
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut result = String::new();
        for row in 0..8 {
            for col in 0..8 {
                let symbol = self
                    .piece_at(Position::new(row, col))
                    .map_or('.', |p| p.symbol());
                result.push(symbol);
                if col < 7 {
                    result.push(' ');
                }
            }
            result.push('\n');
        }
        write!(f, "{}", result)
    }
}
