//! Identity-changing rules of the variant.
//!
//! Both scans are pure reads over the board as it stands before the mover
//! leaves its origin square; the game applies what they report.

use crate::board::{Board, Piece, PieceType, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Demotion {
    None,
    /// The mover lands next to an opposing super piece and becomes a Pawn.
    SelfDemote,
    /// The mover is a super piece; these adjacent opponents become Pawns.
    Aura(Vec<Position>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Promotion {
    None,
    Auto(PieceType),
    /// A plain Pawn reached the last rank and needs a choice.
    Pending,
}

fn is_demotable(kind: PieceType) -> bool {
    matches!(
        kind,
        PieceType::Queen | PieceType::Rook | PieceType::Bishop | PieceType::Knight
    )
}

pub fn scan_demotions(board: &Board, destination: Position, mover: &Piece) -> Demotion {
    if is_demotable(mover.kind) {
        let next_to_super = destination.neighbours().any(|pos| {
            board
                .piece_at(pos)
                .map_or(false, |p| p.color != mover.color && p.kind.is_super())
        });
        return if next_to_super {
            Demotion::SelfDemote
        } else {
            Demotion::None
        };
    }

    if mover.kind.is_super() {
        let targets: Vec<Position> = destination
            .neighbours()
            .filter(|&pos| {
                board
                    .piece_at(pos)
                    .map_or(false, |p| p.color != mover.color && is_demotable(p.kind))
            })
            .collect();
        if !targets.is_empty() {
            return Demotion::Aura(targets);
        }
    }

    Demotion::None
}

pub fn promotion_for(mover: &Piece, destination: Position) -> Promotion {
    if destination.row != mover.color.last_rank() {
        return Promotion::None;
    }
    match mover.kind {
        PieceType::Knight => Promotion::Auto(PieceType::Rook),
        PieceType::SuperPawn => Promotion::Auto(PieceType::Pope),
        PieceType::Pawn => Promotion::Pending,
        _ => Promotion::None,
    }
}
