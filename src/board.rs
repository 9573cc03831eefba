//! Board model.
//! Maps logical chess coordinates (file a-h, rank 1-8) onto the 8x8 visual grid.
//! Rank 8 is the first (top) row, file a the first (left) column.
//! Produces the 64 cell descriptors a renderer consumes: grid position,
//! light/dark shade and the edge coordinate labels.
//! Stateless: every function here is pure.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const BOARD_SIZE: u8 = 8;
const FILE_LETTERS: &[u8; 8] = b"abcdefgh";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid square coordinate `{0}`, expected a file a-h followed by a rank 1-8")]
    InvalidCoordinate(String),
}

// *************** Square ***************

/// One of the 64 board squares.
/// `file` and `rank` are stored as 0-based indices (a = 0, rank 1 = 0).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Builds a square from a file letter and a rank number (1-8).
    /// The file letter is case-insensitive.
    pub fn new(file: char, rank: u8) -> Result<Self, BoardError> {
        let invalid = || BoardError::InvalidCoordinate(format!("{}{}", file, rank));
        let file_index = FILE_LETTERS
            .iter()
            .position(|&l| l as char == file.to_ascii_lowercase())
            .ok_or_else(invalid)?;
        if !(1..=BOARD_SIZE).contains(&rank) {
            return Err(invalid());
        }
        Ok(Square {
            file: file_index as u8,
            rank: rank - 1,
        })
    }

    /// Square rendered at the given 0-indexed grid cell.
    pub fn from_grid(row: u8, col: u8) -> Result<Self, BoardError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(BoardError::InvalidCoordinate(format!("grid({}, {})", row, col)));
        }
        Ok(Square {
            file: col,
            rank: BOARD_SIZE - 1 - row,
        })
    }

    /// All 64 squares in render order: ranks 8 down to 1, files a to h.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Square {
            file: col,
            rank: BOARD_SIZE - 1 - row,
        }))
    }

    pub fn file_letter(self) -> char {
        FILE_LETTERS[self.file as usize] as char
    }

    pub fn rank_number(self) -> u8 {
        self.rank + 1
    }

    pub fn grid_position(self) -> GridPosition {
        GridPosition {
            row: BOARD_SIZE - 1 - self.rank,
            col: self.file,
        }
    }

    pub fn shade(self) -> Shade {
        self.grid_position().shade()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_letter(), self.rank_number())
    }
}

impl FromStr for Square {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BoardError::InvalidCoordinate(s.to_string());
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let rank = rank.to_digit(10).ok_or_else(invalid)? as u8;
        Square::new(file, rank).map_err(|_| invalid())
    }
}

impl TryFrom<String> for Square {
    type Error = BoardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for Square {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// *************** Grid geometry ***************

/// 0-indexed visual cell, row 0 at the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct GridPosition {
    pub row: u8,
    pub col: u8,
}

impl GridPosition {
    /// Light when `row + col` is even. This puts a1 on a dark square and h1 on a light one.
    pub fn shade(self) -> Shade {
        if (self.row + self.col) % 2 == 0 {
            Shade::Light
        } else {
            Shade::Dark
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shade {
    Light,
    Dark,
}

impl Shade {
    /// Class name the view attaches to the cell.
    pub fn class_name(self) -> &'static str {
        match self {
            Shade::Light => "light",
            Shade::Dark => "dark",
        }
    }
}

impl fmt::Display for Shade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

// *************** Cell descriptors ***************

/// Renderer-facing description of a single square.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellDescriptor {
    pub square: Square,
    pub position: GridPosition,
    pub shade: Shade,
    /// Rank number, only on the leftmost column.
    pub rank_label: Option<u8>,
    /// File letter, only on the bottom row.
    pub file_label: Option<char>,
}

impl CellDescriptor {
    fn for_square(square: Square) -> Self {
        let position = square.grid_position();
        CellDescriptor {
            square,
            position,
            shade: position.shade(),
            rank_label: (position.col == 0).then(|| square.rank_number()),
            file_label: (position.row == BOARD_SIZE - 1).then(|| square.file_letter()),
        }
    }
}

/// The 64 cell descriptors in render order (row-major from the top-left a8 cell).
pub fn cells() -> Vec<CellDescriptor> {
    Square::all().map(CellDescriptor::for_square).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn label_count(cell: &CellDescriptor) -> usize {
        cell.rank_label.is_some() as usize + cell.file_label.is_some() as usize
    }

    #[test]
    fn test_cells_cover_every_square_once() {
        let cells = cells();
        assert_eq!(cells.len(), 64);

        let squares: HashSet<Square> = cells.iter().map(|c| c.square).collect();
        assert_eq!(squares.len(), 64);

        let positions: HashSet<(u8, u8)> =
            cells.iter().map(|c| (c.position.row, c.position.col)).collect();
        assert_eq!(positions.len(), 64);
        assert!(positions.iter().all(|&(r, c)| r < 8 && c < 8));
    }

    #[test]
    fn test_render_order_starts_at_a8() {
        let cells = cells();
        assert_eq!(cells[0].square, sq("a8"));
        assert_eq!(cells[7].square, sq("h8"));
        assert_eq!(cells[56].square, sq("a1"));
        assert_eq!(cells[63].square, sq("h1"));
        for (i, cell) in cells.iter().enumerate() {
            assert_eq!(cell.position.row as usize, i / 8);
            assert_eq!(cell.position.col as usize, i % 8);
        }
    }

    #[test]
    fn test_grid_mapping_round_trips_through_from_grid() {
        for square in Square::all() {
            let pos = square.grid_position();
            assert_eq!(Square::from_grid(pos.row, pos.col).unwrap(), square);
        }
        assert!(Square::from_grid(8, 0).is_err());
        assert!(Square::from_grid(0, 8).is_err());
    }

    #[test]
    fn test_corner_shades() {
        assert_eq!(sq("a1").shade(), Shade::Dark);
        assert_eq!(sq("h1").shade(), Shade::Light);
        assert_eq!(sq("a8").shade(), Shade::Light);
        assert_eq!(sq("h8").shade(), Shade::Dark);
    }

    #[test]
    fn test_edge_adjacent_squares_differ_in_shade() {
        let cells = cells();
        let shade_at = |r: u8, c: u8| cells[(r * 8 + c) as usize].shade;
        for r in 0..8u8 {
            for c in 0..8u8 {
                if c + 1 < 8 {
                    assert_ne!(shade_at(r, c), shade_at(r, c + 1));
                }
                if r + 1 < 8 {
                    assert_ne!(shade_at(r, c), shade_at(r + 1, c));
                }
            }
        }
    }

    #[test]
    fn test_label_placement() {
        let cells = cells();
        let ranks: Vec<_> = cells.iter().filter(|c| c.rank_label.is_some()).collect();
        let files: Vec<_> = cells.iter().filter(|c| c.file_label.is_some()).collect();
        assert_eq!(ranks.len(), 8);
        assert_eq!(files.len(), 8);
        assert!(ranks.iter().all(|c| c.position.col == 0));
        assert!(files.iter().all(|c| c.position.row == 7));

        let both: Vec<_> = cells.iter().filter(|c| label_count(c) == 2).collect();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].square, sq("a1"));
        assert_eq!(both[0].rank_label, Some(1));
        assert_eq!(both[0].file_label, Some('a'));
    }

    #[test]
    fn test_square_parsing() {
        assert_eq!(sq("e4").to_string(), "e4");
        assert_eq!(sq("E4"), sq("e4"));
        assert_eq!(sq("h8").grid_position(), GridPosition { row: 0, col: 7 });

        for bad in ["", "e", "e9", "i1", "a0", "e44", "4e", "ee"] {
            assert_eq!(
                bad.parse::<Square>(),
                Err(BoardError::InvalidCoordinate(bad.to_string())),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_cell_descriptor_serializes_for_renderer() {
        let a1 = cells().into_iter().find(|c| c.square == sq("a1")).unwrap();
        let json = serde_json::to_value(&a1).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "square": "a1",
                "position": { "row": 7, "col": 0 },
                "shade": "dark",
                "rankLabel": 1,
                "fileLabel": "a",
            })
        );
    }
}
