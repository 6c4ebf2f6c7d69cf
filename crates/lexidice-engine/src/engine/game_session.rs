use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{SessionError, core::board::Board};

use super::{
    game_stats::GameStats,
    score_table::{ScoreTable, ScoringRule},
    time_budget::{SessionClock, TimeBudget},
    validator::SharedValidator,
};

/// Lifecycle of a [`GameSession`].
///
/// ```text
/// WaitingForMatch --assign_board--> Active <--pause/resume--> Paused
///                                     |
///                                     +--time up / end_game--> Done
/// (any non-final state) --terminate--> Terminated
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum SessionState {
    #[display("waiting for match")]
    WaitingForMatch,
    #[display("active")]
    Active,
    #[display("paused")]
    Paused,
    #[display("done")]
    Done,
    #[display("terminated")]
    Terminated,
}

impl SessionState {
    /// Only an active session accepts words and board rotations.
    #[must_use]
    pub const fn allows_user_interaction(self) -> bool {
        matches!(self, Self::Active)
    }

    /// `Done` and `Terminated` are final: nothing mutates the session after.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Done | Self::Terminated)
    }
}

/// Outcome of a word submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
pub enum WordResult {
    Accepted { score: u32 },
    Duplicate,
    Invalid,
}

/// Receives session events synchronously, on the thread that caused them.
///
/// Every method has an empty default so listeners implement only what they
/// need.
pub trait GameSessionListener: Send {
    fn on_word_accepted(&mut self, _word: &str, _score: u32) {}
    fn on_score_changed(&mut self, _score: u32) {}
    fn on_state_changed(&mut self, _from: SessionState, _to: SessionState) {}
    fn on_game_ended(&mut self, _summary: &SessionSummary) {}
}

/// Snapshot of a session, suitable for display or export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub state: SessionState,
    pub board: Option<Board>,
    pub time_budget: TimeBudget,
    pub elapsed_seconds: u32,
    pub remaining_seconds: Option<u32>,
    pub scoring_rule: ScoringRule,
    pub stats: GameStats,
    pub longest_word_length: usize,
    pub is_replay: bool,
    pub replay_count: u32,
}

/// One played (or replayed) game against a single board.
///
/// A session starts in [`SessionState::WaitingForMatch`] without a board
/// and becomes [`SessionState::Active`] once [`Self::assign_board`] is
/// called. Words are accepted only while active. [`Self::tick`] is called
/// once per second by whoever drives the clock (see
/// [`SessionTimer`](super::SessionTimer)); a finite budget ends the game
/// when it runs out.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use lexidice_engine::{
///     Board, Die, GameSession, ScoreTable, SessionState, TimeBudget, WordList, WordResult,
/// };
///
/// let table = ScoreTable::from_json(r#"{"letters": {"c": 3, "a": 1, "b": 3}}"#).unwrap();
/// let dice = (0..16).map(|_| Die::new(vec!["A".into()], 0).unwrap()).collect();
///
/// let mut session = GameSession::new(
///     TimeBudget::Custom(2),
///     Arc::new(table),
///     Arc::new(WordList::from_words(["cab"])),
/// );
/// session.assign_board(Arc::new(Board::new(dice).unwrap())).unwrap();
///
/// assert_eq!(session.submit_word("cab").unwrap(), WordResult::Accepted { score: 7 });
/// assert_eq!(session.submit_word("cab").unwrap(), WordResult::Duplicate);
/// assert_eq!(session.submit_word("xyz").unwrap(), WordResult::Invalid);
///
/// session.tick();
/// session.tick();
/// assert_eq!(session.state(), SessionState::Done);
/// assert!(session.submit_word("cab").is_err());
/// ```
pub struct GameSession {
    board: Option<Arc<Board>>,
    score_table: Arc<ScoreTable>,
    validator: SharedValidator,
    scoring_rule: ScoringRule,
    clock: SessionClock,
    stats: GameStats,
    state: SessionState,
    is_replay: bool,
    replay_count: u32,
    listeners: Vec<Box<dyn GameSessionListener>>,
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("board", &self.board)
            .field("scoring_rule", &self.scoring_rule)
            .field("clock", &self.clock)
            .field("stats", &self.stats)
            .field("state", &self.state)
            .field("is_replay", &self.is_replay)
            .field("replay_count", &self.replay_count)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Creates a session waiting for its board.
    #[must_use]
    pub fn new(
        budget: TimeBudget,
        score_table: Arc<ScoreTable>,
        validator: SharedValidator,
    ) -> Self {
        Self {
            board: None,
            score_table,
            validator,
            scoring_rule: ScoringRule::default(),
            clock: SessionClock::new(budget),
            stats: GameStats::new(),
            state: SessionState::WaitingForMatch,
            is_replay: false,
            replay_count: 0,
            listeners: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_scoring_rule(mut self, rule: ScoringRule) -> Self {
        self.scoring_rule = rule;
        self
    }

    /// Creates a fresh session on `previous`'s board with the same budget,
    /// scoring and dictionary, counting as one more replay.
    ///
    /// Listeners are not carried over.
    pub fn replay_of(previous: &Self) -> Result<Self, SessionError> {
        let board = previous.board.clone().ok_or(SessionError::InvalidState {
            operation: "replay",
            state: previous.state,
        })?;
        let mut session = Self::new(
            previous.time_budget(),
            Arc::clone(&previous.score_table),
            Arc::clone(&previous.validator),
        )
        .with_scoring_rule(previous.scoring_rule);
        session.is_replay = true;
        session.replay_count = previous.replay_count.saturating_add(1);
        session.assign_board(board)?;
        Ok(session)
    }

    pub fn add_listener(&mut self, listener: Box<dyn GameSessionListener>) {
        self.listeners.push(listener);
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn allows_user_interaction(&self) -> bool {
        self.state.allows_user_interaction()
    }

    /// The board, once assigned.
    #[must_use]
    pub fn board(&self) -> Option<&Arc<Board>> {
        self.board.as_ref()
    }

    /// The board as the player currently sees it, after rotations.
    #[must_use]
    pub fn oriented_board(&self) -> Option<Board> {
        let quarter_turns = usize::try_from(self.stats.rotations() % 4).unwrap_or_default();
        self.board.as_deref().map(|board| board.rotated(quarter_turns))
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.stats.score()
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        self.stats.words()
    }

    #[must_use]
    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    #[must_use]
    pub fn time_budget(&self) -> TimeBudget {
        self.clock.budget()
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u32 {
        self.clock.elapsed()
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> Option<u32> {
        self.clock.remaining()
    }

    #[must_use]
    pub fn scoring_rule(&self) -> ScoringRule {
        self.scoring_rule
    }

    #[must_use]
    pub fn is_replay(&self) -> bool {
        self.is_replay
    }

    #[must_use]
    pub fn replay_count(&self) -> u32 {
        self.replay_count
    }

    #[must_use]
    pub fn longest_word_length(&self) -> usize {
        self.stats.longest_word_length()
    }

    #[must_use]
    pub fn already_guessed(&self, word: &str) -> bool {
        self.stats.already_guessed(word)
    }

    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            state: self.state,
            board: self.board.as_deref().cloned(),
            time_budget: self.time_budget(),
            elapsed_seconds: self.clock.elapsed(),
            remaining_seconds: self.clock.remaining(),
            scoring_rule: self.scoring_rule,
            stats: self.stats.clone(),
            longest_word_length: self.longest_word_length(),
            is_replay: self.is_replay,
            replay_count: self.replay_count,
        }
    }

    /// Attaches the board and starts the clock.
    pub fn assign_board(&mut self, board: Arc<Board>) -> Result<(), SessionError> {
        self.ensure_state("assign a board", SessionState::WaitingForMatch)?;
        self.board = Some(board);
        self.clock = SessionClock::new(self.clock.budget());
        self.transition(SessionState::Active);
        if self.clock.is_expired() {
            // A zero budget has no playable time.
            self.transition(SessionState::Done);
        }
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), SessionError> {
        self.ensure_state("pause", SessionState::Active)?;
        self.transition(SessionState::Paused);
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), SessionError> {
        self.ensure_state("resume", SessionState::Paused)?;
        self.transition(SessionState::Active);
        Ok(())
    }

    /// Ends the game before the clock runs out.
    ///
    /// Only an active game can end; a paused one must be resumed first.
    pub fn end_game(&mut self) -> Result<(), SessionError> {
        self.ensure_state("end the game", SessionState::Active)?;
        self.transition(SessionState::Done);
        Ok(())
    }

    /// Abandons the session, e.g. when the player leaves mid-game.
    ///
    /// Terminating an already terminated session is a no-op.
    pub fn terminate(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Terminated => Ok(()),
            SessionState::Done => Err(self.invalid_state("terminate")),
            _ => {
                self.transition(SessionState::Terminated);
                Ok(())
            }
        }
    }

    /// Submits a guessed word.
    ///
    /// The word is trimmed and compared in uppercase. A word already found
    /// in this session is a [`WordResult::Duplicate`]; a word the validator
    /// rejects is [`WordResult::Invalid`]; otherwise it is scored and
    /// appended to the word list.
    pub fn submit_word(&mut self, word: &str) -> Result<WordResult, SessionError> {
        self.ensure_state("submit a word", SessionState::Active)?;
        let word = word.trim().to_uppercase();

        if self.stats.already_guessed(&word) {
            self.stats.record_duplicate();
            tracing::debug!(%word, "duplicate word");
            return Ok(WordResult::Duplicate);
        }
        if word.is_empty() || !self.validator.is_valid_word(&word) {
            self.stats.record_invalid();
            tracing::debug!(%word, "invalid word");
            return Ok(WordResult::Invalid);
        }

        let score = self.score_table.score_word_with(self.scoring_rule, &word);
        self.stats.record_accepted(word.clone(), score);
        tracing::debug!(%word, score, total = self.stats.score(), "accepted word");

        let total = self.stats.score();
        for listener in &mut self.listeners {
            listener.on_word_accepted(&word, score);
            listener.on_score_changed(total);
        }
        Ok(WordResult::Accepted { score })
    }

    /// Turns the board a quarter turn clockwise.
    pub fn rotate_board(&mut self) -> Result<(), SessionError> {
        self.ensure_state("rotate the board", SessionState::Active)?;
        self.stats.record_rotation();
        Ok(())
    }

    /// Clears words, score and counters and restarts the clock with the
    /// same budget. The board is kept.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if self.state.is_finished() {
            return Err(self.invalid_state("reset"));
        }
        let had_score = self.stats.score() > 0;
        self.stats = GameStats::new();
        self.clock = SessionClock::new(self.clock.budget());
        tracing::debug!(state = %self.state, "session reset");
        if had_score {
            for listener in &mut self.listeners {
                listener.on_score_changed(0);
            }
        }
        Ok(())
    }

    /// Advances the clock by one second.
    ///
    /// Does nothing unless the session is active. Returns `true` if the
    /// tick was applied.
    pub fn tick(&mut self) -> bool {
        if !self.state.is_active() {
            return false;
        }
        self.clock.tick();
        if self.clock.is_expired() {
            tracing::debug!(elapsed = self.clock.elapsed(), "time budget exhausted");
            self.transition(SessionState::Done);
        }
        true
    }

    fn ensure_state(
        &self,
        operation: &'static str,
        expected: SessionState,
    ) -> Result<(), SessionError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(self.invalid_state(operation))
        }
    }

    fn invalid_state(&self, operation: &'static str) -> SessionError {
        SessionError::InvalidState {
            operation,
            state: self.state,
        }
    }

    fn transition(&mut self, to: SessionState) {
        let from = self.state;
        self.state = to;
        tracing::debug!(%from, %to, "session state changed");
        for listener in &mut self.listeners {
            listener.on_state_changed(from, to);
        }
        if to.is_finished() {
            let summary = self.summary();
            for listener in &mut self.listeners {
                listener.on_game_ended(&summary);
            }
        }
    }
}
