//! Board generation, scoring and session state for a letter-dice word game.
//!
//! - [`core`] holds the passive data: [`Die`], [`Board`], [`DiceCatalog`]
//!   and word path tracing over a board.
//! - [`engine`] holds the behavior: seeded randomness, the vowel-constrained
//!   [`BoardGenerator`], the [`ScoreTable`], the [`GameSession`] state
//!   machine and the [`SessionFactory`] that wires them together.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use lexidice_engine::{
//!     BoardGenerator, BoardSize, DiceCatalog, DiceRng, ScoreTable, SessionFactory, TimeBudget,
//!     WordList, WordResult,
//! };
//!
//! let catalog = DiceCatalog::builtin().unwrap();
//! let factory = SessionFactory::new(
//!     Arc::new(ScoreTable::builtin()),
//!     Arc::new(WordList::from_words(["cab", "quest"])),
//!     BoardGenerator::default(),
//! );
//!
//! let mut rng = DiceRng::from_u64(42);
//! let face_sets = catalog.face_sets(BoardSize::Four).unwrap();
//! let mut session = factory
//!     .create_session(TimeBudget::Default, face_sets, &mut rng, 3)
//!     .unwrap();
//!
//! assert!(matches!(session.submit_word("cab").unwrap(), WordResult::Accepted { .. }));
//! assert_eq!(session.submit_word("CAB").unwrap(), WordResult::Duplicate);
//! ```

use std::path::PathBuf;

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("random bound must be positive, got {bound}")]
pub struct InvalidBoundError {
    pub bound: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DieError {
    #[display("die must have at least one face")]
    NoFaces,
    #[display("face index {index} out of range for a die with {len} faces")]
    FaceOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    #[display("unsupported die count {count} (expected 16, 25 or 36)")]
    UnsupportedDieCount { count: usize },
    #[display("unknown board size {label:?} (expected 4x4, 5x5 or 6x6)")]
    UnknownSize { label: String },
    #[display("{_0}")]
    Die(DieError),
}

impl From<DieError> for BoardError {
    fn from(err: DieError) -> Self {
        Self::Die(err)
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum DataLoadError {
    #[display("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[display("malformed {kind} data: {source}")]
    Json {
        kind: &'static str,
        source: serde_json::Error,
    },
    #[display("invalid {kind} data: {reason}")]
    Invalid { kind: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GenerateError {
    #[display("catalog contains no dice")]
    EmptyCatalog,
    #[display("no board with at least {min_vowels} vowels after {attempts} attempts")]
    BoardUnplayable { attempts: usize, min_vowels: usize },
    #[display("{_0}")]
    InvalidBound(InvalidBoundError),
    #[display("{_0}")]
    Board(BoardError),
}

impl From<InvalidBoundError> for GenerateError {
    fn from(err: InvalidBoundError) -> Self {
        Self::InvalidBound(err)
    }
}

impl From<BoardError> for GenerateError {
    fn from(err: BoardError) -> Self {
        Self::Board(err)
    }
}

impl From<DieError> for GenerateError {
    fn from(err: DieError) -> Self {
        Self::Board(BoardError::Die(err))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SessionError {
    #[display("cannot {operation} while session is {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },
}
