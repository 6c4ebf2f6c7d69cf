use std::sync::Arc;

use crate::{
    GenerateError, SessionError,
    core::{board::Board, catalog::FaceSet},
};

use super::{
    board_generator::BoardGenerator,
    game_session::GameSession,
    random::RandomSource,
    score_table::{ScoreTable, ScoringRule},
    time_budget::TimeBudget,
    validator::SharedValidator,
};

/// Creates sessions that share one score table and dictionary.
#[derive(Clone)]
pub struct SessionFactory {
    score_table: Arc<ScoreTable>,
    validator: SharedValidator,
    generator: BoardGenerator,
    scoring_rule: ScoringRule,
}

impl std::fmt::Debug for SessionFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionFactory")
            .field("generator", &self.generator)
            .field("scoring_rule", &self.scoring_rule)
            .finish_non_exhaustive()
    }
}

impl SessionFactory {
    #[must_use]
    pub fn new(
        score_table: Arc<ScoreTable>,
        validator: SharedValidator,
        generator: BoardGenerator,
    ) -> Self {
        Self {
            score_table,
            validator,
            generator,
            scoring_rule: ScoringRule::default(),
        }
    }

    #[must_use]
    pub fn with_scoring_rule(mut self, rule: ScoringRule) -> Self {
        self.scoring_rule = rule;
        self
    }

    #[must_use]
    pub fn score_table(&self) -> &Arc<ScoreTable> {
        &self.score_table
    }

    #[must_use]
    pub fn validator(&self) -> &SharedValidator {
        &self.validator
    }

    /// Rolls a board from `face_sets` and returns an active session on it.
    pub fn create_session<R>(
        &self,
        budget: TimeBudget,
        face_sets: &[FaceSet],
        random: &mut R,
        min_vowels: usize,
    ) -> Result<GameSession, GenerateError>
    where
        R: RandomSource + ?Sized,
    {
        let board = self.generator.generate(face_sets, random, min_vowels)?;
        tracing::debug!(size = %board.size(), %budget, "created session");
        Ok(self.session_on(budget, Arc::new(board)))
    }

    /// Returns an active session on `board` with this factory's scoring.
    #[must_use]
    pub fn session_on(&self, budget: TimeBudget, board: Arc<Board>) -> GameSession {
        let mut session = GameSession::new(
            budget,
            Arc::clone(&self.score_table),
            Arc::clone(&self.validator),
        )
        .with_scoring_rule(self.scoring_rule);
        // A fresh session is always waiting for its board.
        if let Err(err) = session.assign_board(board) {
            tracing::error!(%err, "failed to assign board to new session");
        }
        session
    }

    /// Starts a new session on the same board as `previous`.
    ///
    /// See [`GameSession::replay_of`].
    pub fn replay_session(&self, previous: &GameSession) -> Result<GameSession, SessionError> {
        let session = GameSession::replay_of(previous)?;
        tracing::debug!(replay_count = session.replay_count(), "replaying board");
        Ok(session)
    }
}
