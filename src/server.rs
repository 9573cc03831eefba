//! Server state collaborator.
//! The server is authoritative for the board: one read operation returns the
//! current position, side to move, status and move history.
//! `StateSource` is the asynchronous call-and-response boundary; `HttpStateSource`
//! implements it with a plain GET. The body is returned raw so that transport
//! failures and malformed payloads stay distinguishable.
//! Not retried here: a failed fetch abandons the refresh cycle.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use crate::board::Square;
use crate::error::SyncError;
use crate::state::{deserialize_square, Color, GameStatus, MoveRecord, Piece, PieceKind};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// *************** State source ***************

pub trait StateSource {
    /// Fetches the current board state as a raw payload.
    fn fetch_state(&self) -> impl Future<Output = Result<String>>;
}

pub struct HttpStateSource {
    client: Client,
    url: String,
}

impl HttpStateSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl StateSource for HttpStateSource {
    async fn fetch_state(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", self.url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Board server error {}: {}", status, body);
        }

        response
            .text()
            .await
            .context("Failed to read board server response")
    }
}

// *************** Payload ***************

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePayload {
    current_turn: Color,
    game_status: GameStatus,
    move_history: Vec<MoveRecord>,
    #[serde(default)]
    pieces: Vec<WirePiece>,
}

/// `name` is either the bare kind (`rook`) or the engine's color-prefixed form (`whiterook`).
#[derive(Deserialize)]
struct WirePiece {
    name: String,
    color: Color,
    #[serde(alias = "str_position", deserialize_with = "deserialize_square")]
    square: Square,
}

/// A validated server snapshot, ready to be merged into `GameState`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardPayload {
    pub current_turn: Color,
    pub game_status: GameStatus,
    pub move_history: Vec<MoveRecord>,
    pub pieces: BTreeMap<Square, Piece>,
}

impl BoardPayload {
    /// Decodes a JSON payload. Any invalid field rejects the whole payload.
    pub fn parse(raw: &str) -> Result<Self, SyncError> {
        let wire: WirePayload =
            serde_json::from_str(raw).map_err(|e| SyncError::MalformedPayload(e.to_string()))?;

        let mut pieces = BTreeMap::new();
        for p in wire.pieces {
            let piece = Piece {
                kind: piece_kind(&p.name, p.color)?,
                color: p.color,
            };
            if pieces.insert(p.square, piece).is_some() {
                return Err(SyncError::MalformedPayload(format!(
                    "more than one piece on {}",
                    p.square
                )));
            }
        }

        Ok(BoardPayload {
            current_turn: wire.current_turn,
            game_status: wire.game_status,
            move_history: wire.move_history,
            pieces,
        })
    }
}

/// Resolves a piece name, checking any color prefix against the piece's color.
fn piece_kind(name: &str, color: Color) -> Result<PieceKind, SyncError> {
    let lowered = name.to_ascii_lowercase();
    let bare = [Color::White, Color::Black].into_iter().find_map(|prefix| {
        lowered
            .strip_prefix(prefix.to_string().as_str())
            .map(|rest| (prefix, rest))
    });
    let kind = match bare {
        Some((prefix, _)) if prefix != color => {
            return Err(SyncError::MalformedPayload(format!(
                "piece `{}` is listed as {}",
                name, color
            )));
        }
        Some((_, rest)) => rest,
        None => lowered.as_str(),
    };
    kind.parse().map_err(SyncError::MalformedPayload)
}
