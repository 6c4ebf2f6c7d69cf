use serde::{Deserialize, Serialize};

/// Per-session word statistics.
///
/// Tracks what a player has done during one session:
///
/// - **Score**: sum of the scores of accepted words
/// - **Words**: accepted words in the order they were found, normalized to
///   uppercase and never repeated
/// - **Invalid guesses**: submissions rejected by the dictionary
/// - **Duplicate guesses**: submissions of an already accepted word
/// - **Rotations**: how many times the board was turned
///
/// # Example
///
/// ```
/// use lexidice_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.record_accepted("CAB".to_owned(), 7);
/// stats.record_duplicate();
///
/// assert_eq!(stats.score(), 7);
/// assert!(stats.already_guessed("cab"));
/// assert_eq!(stats.duplicate_guesses(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    score: u32,
    words: Vec<String>,
    invalid_guesses: u32,
    duplicate_guesses: u32,
    rotations: u32,
}

impl GameStats {
    /// Creates a tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            words: Vec::new(),
            invalid_guesses: 0,
            duplicate_guesses: 0,
            rotations: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Accepted words in insertion order.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub const fn invalid_guesses(&self) -> u32 {
        self.invalid_guesses
    }

    #[must_use]
    pub const fn duplicate_guesses(&self) -> u32 {
        self.duplicate_guesses
    }

    #[must_use]
    pub const fn rotations(&self) -> u32 {
        self.rotations
    }

    /// Length in characters of the longest accepted word, or 0.
    #[must_use]
    pub fn longest_word_length(&self) -> usize {
        self.words
            .iter()
            .map(|w| w.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Case-insensitive membership test against the accepted words.
    #[must_use]
    pub fn already_guessed(&self, word: &str) -> bool {
        let word = word.trim().to_uppercase();
        self.words.iter().any(|w| *w == word)
    }

    /// Appends an accepted word and adds its score.
    ///
    /// Callers check [`Self::already_guessed`] first; a repeated word is
    /// counted as a duplicate here instead of being added twice.
    pub fn record_accepted(&mut self, word: String, score: u32) {
        if self.already_guessed(&word) {
            self.record_duplicate();
            return;
        }
        self.words.push(word.trim().to_uppercase());
        self.score = self.score.saturating_add(score);
    }

    pub const fn record_invalid(&mut self) {
        self.invalid_guesses += 1;
    }

    pub const fn record_duplicate(&mut self) {
        self.duplicate_guesses += 1;
    }

    pub const fn record_rotation(&mut self) {
        self.rotations += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let stats = GameStats::new();
        assert_eq!(stats, GameStats::default());
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.word_count(), 0);
        assert_eq!(stats.longest_word_length(), 0);
    }

    #[test]
    fn test_words_keep_insertion_order() {
        let mut stats = GameStats::new();
        stats.record_accepted("zoo".to_owned(), 1);
        stats.record_accepted("Ant".to_owned(), 2);
        stats.record_accepted("MOTH".to_owned(), 3);
        assert_eq!(stats.words(), ["ZOO", "ANT", "MOTH"]);
        assert_eq!(stats.score(), 6);
        assert_eq!(stats.longest_word_length(), 4);
    }

    #[test]
    fn test_repeated_accept_counts_as_duplicate() {
        let mut stats = GameStats::new();
        stats.record_accepted("cab".to_owned(), 7);
        stats.record_accepted("CAB".to_owned(), 7);
        assert_eq!(stats.words(), ["CAB"]);
        assert_eq!(stats.score(), 7);
        assert_eq!(stats.duplicate_guesses(), 1);
    }

    #[test]
    fn test_counters() {
        let mut stats = GameStats::new();
        stats.record_invalid();
        stats.record_invalid();
        stats.record_duplicate();
        stats.record_rotation();
        assert_eq!(stats.invalid_guesses(), 2);
        assert_eq!(stats.duplicate_guesses(), 1);
        assert_eq!(stats.rotations(), 1);
    }
}
