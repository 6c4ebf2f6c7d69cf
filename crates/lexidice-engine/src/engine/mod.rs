//! Game rules and session management.
//!
//! This module builds on the passive data in [`crate::core`] to implement a
//! round of the game:
//!
//! - [`DiceRng`] / [`RandomSource`] - Seeded randomness behind every roll
//! - [`BoardGenerator`] - Shuffles and rolls dice until enough vowels show
//! - [`ScoreTable`] - Letter points and length factors
//! - [`WordValidator`] - Dictionary lookup, optionally constrained to the board
//! - [`GameSession`] - State machine with words, score and clock
//! - [`SessionFactory`] - Creates sessions and replays of a board
//! - [`SessionTimer`] - Background ticker for a [`SharedSession`]
//! - [`Leaderboard`] - Score ranking per board size and time budget
//! - [`GameConfig`] - Defaults for all of the above
//!
//! # Game Flow
//!
//! 1. Roll a board with [`SessionFactory::create_session`]
//! 2. Start a [`SessionTimer`], or call [`GameSession::tick`] once a second
//! 3. Submit words with [`GameSession::submit_word`] until time runs out
//! 4. Report the [`SessionSummary`] and optionally replay the same board

pub use self::{
    board_generator::*, config::*, game_session::*, game_stats::*, leaderboard::*, random::*,
    score_table::*, session_factory::*, session_timer::*, time_budget::*, validator::*,
};

mod board_generator;
mod config;
mod game_session;
mod game_stats;
mod leaderboard;
mod random;
mod score_table;
mod session_factory;
mod session_timer;
mod time_budget;
mod validator;
