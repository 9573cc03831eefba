//! Board sync controller.
//! Owns the `GameState` and runs refresh cycles against a `View` and a `StateSource`:
//! Idle -> Rendering (clear view, render 64 cells) -> AwaitingServerState (fetch)
//! -> Idle (merge and re-render, or surface the failure).
//! Methods take `&mut self`, so cycles on one controller never overlap.
//! Dropping a cycle mid-fetch cancels the fetch; the next call restarts from Rendering.

use log::{debug, error, info, warn};

use crate::board::{self, Square};
use crate::error::SyncError;
use crate::server::{BoardPayload, StateSource};
use crate::state::GameState;
use crate::view::View;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Rendering,
    AwaitingServerState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitOutcome {
    Synced,
    /// The controller already completed its initial cycle; nothing was done.
    AlreadyInitialized,
}

pub struct BoardSync<S, V> {
    source: S,
    view: V,
    state: GameState,
    phase: Phase,
    initialized: bool,
}

impl<S: StateSource, V: View> BoardSync<S, V> {
    pub fn new(source: S, view: V) -> Self {
        Self {
            source,
            view,
            state: GameState::new(),
            phase: Phase::Idle,
            initialized: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Initial render and sync for a freshly loaded view. Runs once; later calls are ignored.
    pub async fn initialize(&mut self) -> Result<InitOutcome, SyncError> {
        if self.initialized {
            debug!("initialize() called again, ignoring");
            return Ok(InitOutcome::AlreadyInitialized);
        }
        let result = self.refresh().await;
        // A failed fetch still completes the cycle.
        self.initialized = true;
        result.map(|()| InitOutcome::Synced)
    }

    /// Re-renders the board and re-syncs with the server.
    pub async fn refresh(&mut self) -> Result<(), SyncError> {
        if self.phase != Phase::Idle {
            warn!("Restarting abandoned refresh cycle (was {:?})", self.phase);
        }

        self.phase = Phase::Rendering;
        self.view.clear();
        let cells = board::cells();
        for cell in &cells {
            self.view.render_cell(cell);
        }
        self.view.render_state(&self.state);
        debug!("Rendered {} cells", cells.len());

        self.phase = Phase::AwaitingServerState;
        let fetched = self.source.fetch_state().await;
        self.phase = Phase::Idle;

        match fetched {
            Ok(raw) => self.apply_server_state(&raw),
            Err(e) => {
                let err = SyncError::FetchFailure(e);
                self.surface(&err);
                Err(err)
            }
        }
    }

    /// Replaces turn, status, history and piece placement from a server payload.
    /// A malformed payload leaves the state untouched.
    pub fn apply_server_state(&mut self, raw: &str) -> Result<(), SyncError> {
        let payload = match BoardPayload::parse(raw) {
            Ok(p) => p,
            Err(err) => {
                self.surface(&err);
                return Err(err);
            }
        };

        self.state.current_turn = payload.current_turn;
        self.state.game_status = payload.game_status;
        self.state.move_history = payload.move_history;
        self.state.pieces = payload.pieces;
        info!(
            "Synced board: {} to move, {}, {} moves played",
            self.state.current_turn,
            self.state.game_status,
            self.state.move_history.len()
        );

        self.view.render_state(&self.state);
        Ok(())
    }

    pub fn select_square(&mut self, id: &str) -> Result<(), SyncError> {
        let square = id.parse::<Square>().map_err(|e| {
            let err = SyncError::from(e);
            self.surface(&err);
            err
        })?;
        self.state.selected_square = Some(square);
        self.view.render_state(&self.state);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.state.selected_square = None;
        self.view.render_state(&self.state);
    }

    fn surface(&mut self, err: &SyncError) {
        error!("{}", err);
        self.view.report_error(err);
    }
}
