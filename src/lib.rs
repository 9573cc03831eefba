//! Chessboard view model and server sync.
//! `board` maps chess coordinates to the rendered 8x8 grid; `sync` keeps the
//! client-side game state in step with the server.

pub mod board;
pub mod config;
pub mod error;
pub mod server;
pub mod state;
pub mod sync;
pub mod view;

pub use board::{cells, CellDescriptor, Square};
pub use error::SyncError;
pub use state::GameState;
pub use sync::{BoardSync, InitOutcome, Phase};
