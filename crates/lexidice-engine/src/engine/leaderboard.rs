use std::{cmp::Reverse, collections::HashMap, fmt};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::board::BoardSize;

use super::{game_session::GameSession, time_budget::TimeBudget};

/// Scores are ranked separately for each board size and time budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeaderboardCategory {
    pub board_size: BoardSize,
    pub time_budget: TimeBudget,
}

impl LeaderboardCategory {
    #[must_use]
    pub const fn new(board_size: BoardSize, time_budget: TimeBudget) -> Self {
        Self {
            board_size,
            time_budget,
        }
    }

    /// Category of a session, or `None` before a board is assigned.
    #[must_use]
    pub fn for_session(session: &GameSession) -> Option<Self> {
        let board = session.board()?;
        Some(Self::new(board.size(), session.time_budget()))
    }
}

impl fmt::Display for LeaderboardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.board_size, self.time_budget)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_id: String,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum LeaderboardError {
    #[display("leaderboard is unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Remote (or local) score ranking service.
pub trait Leaderboard {
    /// Reports a finished game's score for the local player.
    fn report_score(
        &self,
        category: &LeaderboardCategory,
        value: u32,
    ) -> Result<(), LeaderboardError>;

    /// Returns at most `limit` entries, best first.
    fn fetch_top_scores(
        &self,
        category: &LeaderboardCategory,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>, LeaderboardError>;
}

/// Process-local leaderboard keeping each player's best score.
#[derive(Debug)]
pub struct InMemoryLeaderboard {
    player_id: String,
    scores: Mutex<HashMap<LeaderboardCategory, HashMap<String, u32>>>,
}

impl InMemoryLeaderboard {
    /// Creates an empty leaderboard reporting as `player_id`.
    pub fn new(player_id: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            scores: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    /// Records `value` for `player_id`, keeping only the player's best.
    pub fn record(&self, category: &LeaderboardCategory, player_id: &str, value: u32) {
        let mut scores = self.scores.lock();
        let best = scores
            .entry(*category)
            .or_default()
            .entry(player_id.to_owned())
            .or_insert(value);
        *best = (*best).max(value);
    }
}

impl Leaderboard for InMemoryLeaderboard {
    fn report_score(
        &self,
        category: &LeaderboardCategory,
        value: u32,
    ) -> Result<(), LeaderboardError> {
        tracing::debug!(%category, value, player = %self.player_id, "reporting score");
        self.record(category, &self.player_id, value);
        Ok(())
    }

    fn fetch_top_scores(
        &self,
        category: &LeaderboardCategory,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let scores = self.scores.lock();
        let Some(players) = scores.get(category) else {
            return Ok(vec![]);
        };
        let mut entries = players
            .iter()
            .map(|(player_id, value)| LeaderboardEntry {
                player_id: player_id.clone(),
                value: *value,
            })
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| {
            Reverse(a.value)
                .cmp(&Reverse(b.value))
                .then_with(|| a.player_id.cmp(&b.player_id))
        });
        entries.truncate(limit);
        Ok(entries)
    }
}
