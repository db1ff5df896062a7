use chess_two::movegen::MoveGenerator;
use chess_two::{Board, Color, Game, GameOutcome, PieceType, Position};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const SEEDS: u64 = 16;
const MAX_PLIES: usize = 120;

/// Replays `from -> to` on a fresh board built from the placements, with no
/// side effects beyond moving the piece.
fn simulate(board: &Board, from: Position, to: Position) -> Board {
    let moved = board.piece_at(from);
    Board::from_placements(
        board
            .pieces()
            .filter(|&(at, _)| at != from && at != to)
            .chain(moved.map(|piece| (to, piece))),
    )
}

fn all_moves(game: &Game) -> Vec<(Position, Position)> {
    game.board()
        .pieces_of(game.turn())
        .flat_map(|(from, _)| game.legal_moves(from).into_iter().map(move |to| (from, to)))
        .collect()
}

#[test]
fn legal_moves_never_leave_the_king_in_check() {
    let generator = MoveGenerator::new();

    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::new();

        for _ in 0..MAX_PLIES {
            if game.outcome() != GameOutcome::Active {
                break;
            }
            let mover = game.turn();
            let moves = all_moves(&game);
            assert!(!moves.is_empty(), "active game without moves (seed {})", seed);

            for &(from, to) in &moves {
                let after = simulate(game.board(), from, to);
                assert!(
                    !generator.is_king_in_check(&after, mover),
                    "seed {}: {} -> {} leaves {} in check",
                    seed,
                    from,
                    to,
                    mover
                );
            }

            let &(from, to) = moves.choose(&mut rng).unwrap();
            game.commit_move(from, to).unwrap();
            if game.pending_promotion().is_some() {
                let choice = *PieceType::PROMOTION_CHOICES.choose(&mut rng).unwrap();
                game.resolve_pending_promotion(choice).unwrap();
            }

            let board = game.board();
            assert_eq!(board.squares().count(), 64);
            for color in [Color::Top, Color::Bottom] {
                let kings = board
                    .pieces_of(color)
                    .filter(|(_, p)| p.kind == PieceType::King)
                    .count();
                assert!(kings <= 1);
            }
            if let Some(target) = game.en_passant_target() {
                assert!(target.row == 2 || target.row == 5);
            }
        }
    }
}

#[test]
fn rooks_never_travel_more_than_three_squares() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::new();

        for _ in 0..MAX_PLIES {
            if game.outcome() != GameOutcome::Active {
                break;
            }
            for (from, piece) in game.board().pieces() {
                if piece.kind != PieceType::Rook {
                    continue;
                }
                for to in game.legal_moves(from) {
                    let distance = (to.row - from.row).abs().max((to.col - from.col).abs());
                    assert!(distance <= 3, "seed {}: rook {} -> {}", seed, from, to);
                }
            }

            let moves = all_moves(&game);
            let &(from, to) = moves.choose(&mut rng).unwrap();
            game.commit_move(from, to).unwrap();
            if game.pending_promotion().is_some() {
                game.resolve_pending_promotion(PieceType::Queen).unwrap();
            }
        }
    }
}
