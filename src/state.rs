//! Client-side game state.
//! Holds selection, side to move, game status, move history and piece placement.
//! Owned exclusively by the sync controller; the server is authoritative for
//! everything except the selection.

use crate::board::Square;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    White,
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// Only `Active` is produced locally; the rest arrive from the server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Active,
    Check,
    Checkmate,
    Stalemate,
    Draw,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameStatus::Active => "active",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
            GameStatus::Draw => "draw",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl FromStr for PieceKind {
    type Err = String;

    /// Case-insensitive piece name, e.g. `knight`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pawn" => Ok(PieceKind::Pawn),
            "rook" => Ok(PieceKind::Rook),
            "knight" => Ok(PieceKind::Knight),
            "bishop" => Ok(PieceKind::Bishop),
            "queen" => Ok(PieceKind::Queen),
            "king" => Ok(PieceKind::King),
            _ => Err(format!("unknown piece `{}`", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub fn icon(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::King) => '♔',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::King) => '♚',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Pawn) => '♟',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct MoveRecord {
    #[serde(deserialize_with = "deserialize_square")]
    pub from: Square,
    #[serde(deserialize_with = "deserialize_square")]
    pub to: Square,
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Parses a coordinate string, reporting the bad identifier on failure.
pub(crate) fn deserialize_square<'de, D>(deserializer: D) -> Result<Square, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Square::try_from(raw).map_err(serde::de::Error::custom)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameState {
    pub selected_square: Option<Square>,
    pub current_turn: Color,
    pub game_status: GameStatus,
    /// Chronological, oldest first.
    pub move_history: Vec<MoveRecord>,
    pub pieces: BTreeMap<Square, Piece>,
}

impl GameState {
    /// Fresh state: nothing selected, white to move, active, empty history.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.pieces.get(&square).copied()
    }

    /// Full-move number, starting at 1 and bumped after every black move.
    pub fn move_number(&self) -> usize {
        self.move_history.len() / 2 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = GameState::new();
        assert_eq!(state.selected_square, None);
        assert_eq!(state.current_turn, Color::White);
        assert_eq!(state.game_status, GameStatus::Active);
        assert!(state.move_history.is_empty());
        assert!(state.pieces.is_empty());
        assert_eq!(state.move_number(), 1);
    }

    #[test]
    fn test_move_number_counts_full_moves() {
        let mv = MoveRecord {
            from: "e2".parse().unwrap(),
            to: "e4".parse().unwrap(),
        };
        let mut state = GameState::new();
        state.move_history.push(mv);
        assert_eq!(state.move_number(), 1);
        state.move_history.push(mv);
        assert_eq!(state.move_number(), 2);
    }

    #[test]
    fn test_move_record_rejects_bad_square() {
        let ok: MoveRecord = serde_json::from_str(r#"{"from":"g1","to":"f3"}"#).unwrap();
        assert_eq!(ok.to_string(), "g1f3");

        let err = serde_json::from_str::<MoveRecord>(r#"{"from":"g1","to":"z9"}"#).unwrap_err();
        assert!(err.to_string().contains("z9"));
    }

    #[test]
    fn test_piece_kind_from_name() {
        assert_eq!("knight".parse::<PieceKind>(), Ok(PieceKind::Knight));
        assert_eq!("Queen".parse::<PieceKind>(), Ok(PieceKind::Queen));
        assert!("wizard".parse::<PieceKind>().unwrap_err().contains("wizard"));
    }

    #[test]
    fn test_piece_icons_differ_by_color() {
        let white = Piece { kind: PieceKind::Knight, color: Color::White };
        let black = Piece { kind: PieceKind::Knight, color: Color::Black };
        assert_ne!(white.icon(), black.icon());
    }
}
