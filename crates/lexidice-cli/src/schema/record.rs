use chrono::{DateTime, Utc};
use lexidice_engine::{Board, BoardSize, DiceSeed, SessionSummary};
use serde::{Deserialize, Serialize};

/// A rolled board, as printed by `roll --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolledBoard {
    /// Timestamp when the board was rolled (ISO 8601 format)
    pub recorded_at: DateTime<Utc>,
    /// Seed that reproduces this board with the same catalog
    pub seed: DiceSeed,
    pub size: BoardSize,
    pub vowels: usize,
    pub board: Board,
}

/// A finished game with the seed of its board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedGame {
    /// Timestamp when the game ended (ISO 8601 format)
    pub recorded_at: DateTime<Utc>,
    /// Random seed used for board generation
    pub seed: DiceSeed,
    /// Final state of the session
    pub summary: SessionSummary,
}
