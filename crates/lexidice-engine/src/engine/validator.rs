use std::{collections::HashSet, fs, path::Path, sync::Arc};

use crate::{DataLoadError, core::board::Board};

/// Dictionary check consulted for every submitted word.
///
/// Lookups are case-insensitive.
pub trait WordValidator {
    fn is_valid_word(&self, word: &str) -> bool;
}

impl<F> WordValidator for F
where
    F: Fn(&str) -> bool,
{
    fn is_valid_word(&self, word: &str) -> bool {
        self(word)
    }
}

/// Shared handle to a validator, as held by sessions.
pub type SharedValidator = Arc<dyn WordValidator + Send + Sync>;

/// In-memory word list with O(1) lookup.
///
/// # Example
///
/// ```
/// use lexidice_engine::{WordList, WordValidator as _};
///
/// let words = WordList::from_text("cab\nQuest\n\n# comment\n");
/// assert!(words.is_valid_word("CAB"));
/// assert!(words.is_valid_word("quest"));
/// assert!(!words.is_valid_word("comment"));
/// assert_eq!(words.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Parses one word per line. Blank lines and `#` comments are skipped.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::from_words(text.lines().filter(|line| !line.trim_start().starts_with('#')))
    }

    pub fn load<P>(path: P) -> Result<Self, DataLoadError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DataLoadError::Io {
            path: path.to_owned(),
            source,
        })?;
        let list = Self::from_text(&text);
        tracing::debug!(path = %path.display(), words = list.len(), "loaded word list");
        Ok(list)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordValidator for WordList {
    fn is_valid_word(&self, word: &str) -> bool {
        self.words.contains(&word.trim().to_lowercase())
    }
}

/// Accepts a word only if it can be traced on `board` and the inner
/// validator knows it.
///
/// Used where input is typed rather than picked from the board, so nothing
/// else guarantees the word is on the board.
#[derive(Clone)]
pub struct BoardWordValidator {
    board: Arc<Board>,
    dictionary: SharedValidator,
}

impl std::fmt::Debug for BoardWordValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardWordValidator")
            .field("board", &self.board)
            .finish_non_exhaustive()
    }
}

impl BoardWordValidator {
    #[must_use]
    pub fn new(board: Arc<Board>, dictionary: SharedValidator) -> Self {
        Self { board, dictionary }
    }
}

impl WordValidator for BoardWordValidator {
    fn is_valid_word(&self, word: &str) -> bool {
        self.board.contains_word(word) && self.dictionary.is_valid_word(word)
    }
}

#[cfg(test)]
mod tests {
    use crate::Die;

    use super::*;

    #[test]
    fn test_case_insensitive() {
        let words = WordList::from_words(["Hello", "WORLD"]);
        assert!(words.is_valid_word("hello"));
        assert!(words.is_valid_word("HELLO"));
        assert!(words.is_valid_word("World"));
        assert!(!words.is_valid_word("help"));
    }

    #[test]
    fn test_skips_blank_entries() {
        let words = WordList::from_words(["", "  ", "ok"]);
        assert_eq!(words.len(), 1);
        assert!(!words.is_valid_word(""));
    }

    #[test]
    fn test_closure_validator() {
        let validator = |word: &str| word.len() >= 3;
        assert!(validator.is_valid_word("cab"));
        assert!(!validator.is_valid_word("ab"));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            WordList::load("/nonexistent/lexidice/words.txt"),
            Err(DataLoadError::Io { .. })
        ));
    }

    #[test]
    fn test_board_validator_requires_path_and_dictionary() {
        let dice = "CABXXXXXXXXXXXXT"
            .chars()
            .map(|c| Die::new(vec![c.to_string()], 0).unwrap())
            .collect();
        let board = Arc::new(Board::new(dice).unwrap());
        let dictionary: SharedValidator = Arc::new(WordList::from_words(["cab", "bat", "xx"]));
        let validator = BoardWordValidator::new(board, dictionary);

        assert!(validator.is_valid_word("cab"));
        assert!(validator.is_valid_word("XX"));
        // In the dictionary but T is not next to A.
        assert!(!validator.is_valid_word("bat"));
        // On the board but not a word.
        assert!(!validator.is_valid_word("bac"));
    }
}
