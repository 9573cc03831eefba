//! View binding.
//! The controller drives any `View`: clear it, hand it the 64 cell descriptors,
//! then the game state to overlay (pieces, selection).
//! `TextView` renders the board to a terminal grid; errors are kept as the
//! user-visible message and printed below the board.

use std::fmt;

use crate::board::{CellDescriptor, Shade, BOARD_SIZE};
use crate::error::SyncError;
use crate::state::GameState;

pub trait View {
    fn clear(&mut self);
    fn render_cell(&mut self, cell: &CellDescriptor);
    fn render_state(&mut self, state: &GameState);
    fn report_error(&mut self, error: &SyncError);
}

#[derive(Default)]
pub struct TextView {
    cells: Vec<CellDescriptor>,
    state: Option<GameState>,
    error: Option<String>,
}

impl TextView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> &[CellDescriptor] {
        &self.cells
    }

    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn glyph(&self, cell: &CellDescriptor) -> char {
        let piece = self.state.as_ref().and_then(|s| s.piece_at(cell.square));
        match piece {
            Some(p) => p.icon(),
            None if cell.shade == Shade::Dark => '·',
            None => ' ',
        }
    }

    fn is_selected(&self, cell: &CellDescriptor) -> bool {
        self.state
            .as_ref()
            .is_some_and(|s| s.selected_square == Some(cell.square))
    }
}

impl View for TextView {
    fn clear(&mut self) {
        self.cells.clear();
        self.state = None;
        self.error = None;
    }

    fn render_cell(&mut self, cell: &CellDescriptor) {
        self.cells.push(cell.clone());
    }

    fn render_state(&mut self, state: &GameState) {
        self.state = Some(state.clone());
    }

    fn report_error(&mut self, error: &SyncError) {
        self.error = Some(error.to_string());
    }
}

impl fmt::Display for TextView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..BOARD_SIZE {
            let mut row: Vec<&CellDescriptor> =
                self.cells.iter().filter(|c| c.position.row == r).collect();
            if row.is_empty() {
                continue;
            }
            row.sort_by_key(|c| c.position.col);

            let mut line = String::new();
            let mut files = String::from("  ");
            for cell in &row {
                if let Some(rank) = cell.rank_label {
                    line.push_str(&format!("{} ", rank));
                }
                let (open, close) = if self.is_selected(cell) { ('[', ']') } else { (' ', ' ') };
                line.push(open);
                line.push(self.glyph(cell));
                line.push(close);
                if let Some(file) = cell.file_label {
                    files.push_str(&format!(" {} ", file));
                }
            }
            writeln!(f, "{}", line.trim_end())?;
            if !files.trim().is_empty() {
                writeln!(f, "{}", files.trim_end())?;
            }
        }

        if let Some(state) = &self.state {
            writeln!(
                f,
                "Move {}: {} to play ({})",
                state.move_number(),
                state.current_turn,
                state.game_status
            )?;
        }
        if let Some(error) = &self.error {
            writeln!(f, "Error: {}", error)?;
        }
        Ok(())
    }
}
