use crate::board::{Color, GameOutcome, PieceType, Position};
use crate::game::{Game, GameSnapshot};
use anyhow::{anyhow, bail, Context, Result};
use std::io::{self, BufRead, Write};

const HELP: &str = "\
commands:
  new                 start a new game
  board               show the board
  moves <square>      list legal destinations, e.g. `moves e1`
  move <from> <to>    play a move, e.g. `move g1 f3` or `g1f3`
  promote <q|r|b|n>   finish a pending promotion
  resign              resign for the side to move
  quit
";

/// Line-oriented driver for hot-seat play in a terminal.
pub struct ConsoleHandler {
    game: Game,
}

impl ConsoleHandler {
    pub fn new() -> Self {
        ConsoleHandler { game: Game::new() }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut reader = stdin.lock();
        let mut line = String::new();

        print!("{}", self.render());
        stdout.flush()?;
        while reader.read_line(&mut line)? > 0 {
            let command = line.trim();
            if command == "quit" {
                break;
            }
            match self.handle_command(command) {
                Ok(response) => print!("{}", response),
                Err(err) => println!("error: {:#}", err),
            }
            stdout.flush()?;
            line.clear();
        }
        Ok(())
    }

    pub fn handle_command(&mut self, command: &str) -> Result<String> {
        let parts: Vec<&str> = command.split_whitespace().collect();
        if parts.is_empty() {
            return Ok(String::new());
        }

        match parts[0] {
            "help" => Ok(HELP.to_string()),
            "new" => {
                self.game.new_game();
                Ok(self.render())
            }
            "board" => Ok(self.render()),
            "moves" => self.handle_moves(&parts[1..]),
            "move" => self.handle_move(&parts[1..]),
            "promote" => self.handle_promote(&parts[1..]),
            "resign" => {
                let snapshot = self.game.resign(self.game.turn())?;
                Ok(render_snapshot(&snapshot))
            }
            "quit" => Ok(String::new()),
            other if other.len() == 4 && other.is_ascii() => {
                self.handle_move(&[&other[..2], &other[2..]])
            }
            other => bail!("unknown command `{}` (try `help`)", other),
        }
    }

    fn handle_moves(&self, parts: &[&str]) -> Result<String> {
        let square = parts.first().ok_or_else(|| anyhow!("usage: moves <square>"))?;
        let from = parse_square(square)?;
        let moves: Vec<String> = self
            .game
            .legal_moves(from)
            .into_iter()
            .map(format_square)
            .collect();
        if moves.is_empty() {
            Ok(format!("{}: no legal moves\n", square))
        } else {
            Ok(format!("{}: {}\n", square, moves.join(" ")))
        }
    }

    fn handle_move(&mut self, parts: &[&str]) -> Result<String> {
        if parts.len() != 2 {
            bail!("usage: move <from> <to>");
        }
        let from = parse_square(parts[0])?;
        let to = parse_square(parts[1])?;
        let snapshot = self
            .game
            .commit_move(from, to)
            .with_context(|| format!("cannot play {}{}", parts[0], parts[1]))?;
        Ok(render_snapshot(&snapshot))
    }

    fn handle_promote(&mut self, parts: &[&str]) -> Result<String> {
        let choice = match parts.first().copied() {
            Some("q") => PieceType::Queen,
            Some("r") => PieceType::Rook,
            Some("b") => PieceType::Bishop,
            Some("n") => PieceType::Knight,
            _ => bail!("usage: promote <q|r|b|n>"),
        };
        let snapshot = self.game.resolve_pending_promotion(choice)?;
        Ok(render_snapshot(&snapshot))
    }

    fn render(&self) -> String {
        render_snapshot(&self.game.snapshot())
    }
}

impl Default for ConsoleHandler {
    fn default() -> Self {
        ConsoleHandler::new()
    }
}

fn side_name(color: Color) -> &'static str {
    match color {
        Color::Bottom => "White",
        Color::Top => "Black",
    }
}

fn render_snapshot(snapshot: &GameSnapshot) -> String {
    let mut out = String::new();
    for (row, line) in snapshot.board.to_string().lines().enumerate() {
        out.push_str(&format!("{} {}\n", 8 - row, line));
    }
    out.push_str("  a b c d e f g h\n");

    if let Some(last) = snapshot.last_move {
        out.push_str(&format!(
            "last move: {}{}\n",
            format_square(last.from),
            format_square(last.to)
        ));
    }
    for color in [Color::Bottom, Color::Top] {
        let captured: String = snapshot
            .captured
            .captured_by(color)
            .iter()
            .map(|p| p.symbol())
            .collect();
        if !captured.is_empty() {
            out.push_str(&format!("{} captured: {}\n", side_name(color), captured));
        }
    }

    match snapshot.outcome {
        GameOutcome::Active => {
            if let Some(pending) = snapshot.pending_promotion {
                out.push_str(&format!(
                    "pawn on {} promotes: choose q, r, b or n\n",
                    format_square(pending.position)
                ));
            } else {
                out.push_str(&format!("{} to move\n", side_name(snapshot.turn)));
            }
        }
        GameOutcome::Stalemate => out.push_str("Stalemate\n"),
        outcome => {
            let winner = snapshot.winner.map_or("nobody", side_name);
            out.push_str(&format!("{}: {} wins\n", outcome, winner));
        }
    }
    out
}

/// Parses `a1`..`h8`; rank 1 is Bottom's back rank.
pub fn parse_square(s: &str) -> Result<Position> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        bail!("invalid square `{}`", s);
    }
    let col = match bytes[0] {
        b'a'..=b'h' => (bytes[0] - b'a') as i8,
        _ => bail!("invalid file in `{}`", s),
    };
    let row = match bytes[1] {
        b'1'..=b'8' => 7 - (bytes[1] - b'1') as i8,
        _ => bail!("invalid rank in `{}`", s),
    };
    Ok(Position::new(row, col))
}

pub fn format_square(pos: Position) -> String {
    let mut result = String::new();
    result.push((b'a' + pos.col as u8) as char);
    result.push((b'1' + (7 - pos.row) as u8) as char);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_names() {
        assert_eq!(parse_square("a1").unwrap(), Position::new(7, 0));
        assert_eq!(parse_square("h8").unwrap(), Position::new(0, 7));
        assert_eq!(parse_square("e2").unwrap(), Position::new(6, 4));
        assert!(parse_square("i1").is_err());
        assert!(parse_square("a9").is_err());
        assert!(parse_square("a").is_err());
        assert_eq!(format_square(Position::new(5, 2)), "c3");
    }

    #[test]
    fn test_knight_move_command() {
        let mut console = ConsoleHandler::new();
        let response = console.handle_command("move b1 c3").unwrap();
        assert!(response.contains("Black to move"));
        assert_eq!(console.game().turn(), Color::Top);

        let response = console.handle_command("g8f6").unwrap();
        assert!(response.contains("White to move"));
    }

    #[test]
    fn test_moves_command_lists_destinations() {
        let mut console = ConsoleHandler::new();
        let response = console.handle_command("moves b1").unwrap();
        assert_eq!(response, "b1: c3 a3\n");
        let response = console.handle_command("moves e4").unwrap();
        assert_eq!(response, "e4: no legal moves\n");
    }

    #[test]
    fn test_rejected_commands() {
        let mut console = ConsoleHandler::new();
        assert!(console.handle_command("move e2 e5").is_err());
        assert!(console.handle_command("move e7 e5").is_err());
        assert!(console.handle_command("promote q").is_err());
        assert!(console.handle_command("castle").is_err());
        assert_eq!(console.game().turn(), Color::Bottom);
    }

    #[test]
    fn test_resign_command() {
        let mut console = ConsoleHandler::new();
        let response = console.handle_command("resign").unwrap();
        assert!(response.contains("Resignation: Black wins"));
        assert!(console.handle_command("e2e4").is_err());
    }
}
