use std::{
    collections::{BTreeMap, HashMap},
    fmt, fs,
    path::Path,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::DataLoadError;

static BUILTIN_SCORES: &str = include_str!("../../data/scores.json");

/// How a word's letter points are turned into its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringRule {
    /// Sum of letter points.
    #[default]
    LetterSum,
    /// Sum of letter points multiplied by the length factor.
    LengthMultiplied,
}

impl ScoringRule {
    const NAMES: [(Self, &'static str); 2] = [
        (Self::LetterSum, "letter-sum"),
        (Self::LengthMultiplied, "length-multiplied"),
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(rule, _)| *rule == self)
            .map_or("letter-sum", |(_, name)| name)
    }
}

impl fmt::Display for ScoringRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScoringRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::NAMES
            .into_iter()
            .find(|(_, name)| *name == s)
            .map(|(rule, _)| rule)
            .ok_or_else(|| {
                format!("unknown scoring rule {s:?} (expected letter-sum or length-multiplied)")
            })
    }
}

/// Letter point values and word length factors.
///
/// Loaded from a JSON resource with two mappings:
///
/// ```json
/// { "letters": { "a": 1, "qu": 10 }, "lengths": { "3": 1, "8": 11 } }
/// ```
///
/// Letter keys are case-insensitive. `q` is never scored alone: it always
/// takes the following letter with it and is looked up as `"qu"`, because
/// the dice only ever show the pair.
///
/// # Example
///
/// ```
/// use lexidice_engine::ScoreTable;
///
/// let table = ScoreTable::from_json(
///     r#"{"letters": {"qu": 10, "e": 1, "s": 1, "t": 1}, "lengths": {}}"#,
/// )
/// .unwrap();
/// assert_eq!(table.score_word("QUEST"), 13);
/// assert_eq!(table.score_word(""), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTable {
    #[serde(default)]
    letters: HashMap<String, u32>,
    #[serde(default)]
    lengths: BTreeMap<usize, u32>,
}

impl ScoreTable {
    const KIND: &'static str = "score table";

    /// Creates a table from explicit mappings.
    pub fn new<L, N>(letters: L, lengths: N) -> Self
    where
        L: IntoIterator<Item = (String, u32)>,
        N: IntoIterator<Item = (usize, u32)>,
    {
        Self {
            letters: letters
                .into_iter()
                .map(|(key, points)| (key.to_lowercase(), points))
                .collect(),
            lengths: lengths.into_iter().collect(),
        }
    }

    /// Parses the table embedded in the crate.
    ///
    /// Falls back to an empty table (every word scores 0) if the embedded
    /// data cannot be parsed.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_SCORES).unwrap_or_else(|err| {
            tracing::error!(%err, "failed to parse built-in score table, scores will be 0");
            Self::default()
        })
    }

    pub fn from_json(json: &str) -> Result<Self, DataLoadError> {
        let table: Self = serde_json::from_str(json).map_err(|source| DataLoadError::Json {
            kind: Self::KIND,
            source,
        })?;
        Ok(Self::new(table.letters, table.lengths))
    }

    pub fn load<P>(path: P) -> Result<Self, DataLoadError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| DataLoadError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Like [`Self::load`], but logs the failure and returns an empty table.
    #[must_use]
    pub fn load_or_empty<P>(path: P) -> Self
    where
        P: AsRef<Path>,
    {
        Self::load(path).unwrap_or_else(|err| {
            tracing::warn!(%err, "using empty score table");
            Self::default()
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Points for a letter sequence (`"a"`, `"qu"`), or 0 if unknown.
    #[must_use]
    pub fn letter_score(&self, key: &str) -> u32 {
        if let Some(points) = self.letters.get(key) {
            return *points;
        }
        tracing::warn!(key, "no score for letter sequence");
        0
    }

    /// Factor for a word of `len` letters.
    ///
    /// Lengths above the largest listed length use the largest listed factor.
    /// Lengths below every listed length use 1.
    #[must_use]
    pub fn length_factor(&self, len: usize) -> u32 {
        self.lengths
            .range(..=len)
            .next_back()
            .map_or(1, |(_, factor)| *factor)
    }

    /// Raw score of `word`: the sum of its letter points.
    #[must_use]
    pub fn score_word(&self, word: &str) -> u32 {
        let word = word.to_lowercase();
        let mut chars = word.chars();
        let mut total = 0u32;
        let mut buf = [0u8; 4];
        while let Some(c) = chars.next() {
            let points = if c == 'q' {
                chars.next();
                self.letter_score("qu")
            } else {
                self.letter_score(c.encode_utf8(&mut buf))
            };
            total = total.saturating_add(points);
        }
        total
    }

    /// Scores `word` under `rule`.
    #[must_use]
    pub fn score_word_with(&self, rule: ScoringRule, word: &str) -> u32 {
        let raw = self.score_word(word);
        match rule {
            ScoringRule::LetterSum => raw,
            ScoringRule::LengthMultiplied => {
                raw.saturating_mul(self.length_factor(word.chars().count()))
            }
        }
    }
}
