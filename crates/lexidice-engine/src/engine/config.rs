use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{DataLoadError, core::board::BoardSize};

use super::{board_generator::BoardGenerator, score_table::ScoringRule, time_budget::TimeBudget};

/// Game defaults, loadable from JSON.
///
/// Missing fields take their default values:
///
/// ```
/// use lexidice_engine::{BoardSize, GameConfig, TimeBudget};
///
/// let config = GameConfig::from_json(r#"{"board_size": "5x5", "time_budget": "short"}"#).unwrap();
/// assert_eq!(config.board_size, BoardSize::Five);
/// assert_eq!(config.time_budget, TimeBudget::Short);
/// assert_eq!(config.min_vowels, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: BoardSize,
    pub time_budget: TimeBudget,
    pub min_vowels: usize,
    pub max_attempts: usize,
    pub scoring_rule: ScoringRule,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BoardSize::default(),
            time_budget: TimeBudget::default(),
            min_vowels: 3,
            max_attempts: BoardGenerator::DEFAULT_MAX_ATTEMPTS,
            scoring_rule: ScoringRule::default(),
        }
    }
}

impl GameConfig {
    const KIND: &'static str = "game config";

    pub fn from_json(json: &str) -> Result<Self, DataLoadError> {
        serde_json::from_str(json).map_err(|source| DataLoadError::Json {
            kind: Self::KIND,
            source,
        })
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
        let config = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), ?config, "loaded game config");
        Ok(config)
    }

    #[must_use]
    pub fn generator(&self) -> BoardGenerator {
        BoardGenerator::new(self.max_attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(GameConfig::from_json("{}").unwrap(), GameConfig::default());
    }

    #[test]
    fn test_full_config() {
        let config = GameConfig::from_json(
            r#"{
                "board_size": "6x6",
                "time_budget": {"custom": 75},
                "min_vowels": 6,
                "max_attempts": 50,
                "scoring_rule": "length-multiplied"
            }"#,
        )
        .unwrap();
        assert_eq!(
            config,
            GameConfig {
                board_size: BoardSize::Six,
                time_budget: TimeBudget::Custom(75),
                min_vowels: 6,
                max_attempts: 50,
                scoring_rule: ScoringRule::LengthMultiplied,
            }
        );
        assert_eq!(config.generator().max_attempts(), 50);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            GameConfig::from_json(r#"{"board_size": "7x7"}"#),
            Err(DataLoadError::Json { .. })
        ));
        assert!(matches!(
            GameConfig::load("/nonexistent/lexidice/config.json"),
            Err(DataLoadError::Io { .. })
        ));
    }
}
