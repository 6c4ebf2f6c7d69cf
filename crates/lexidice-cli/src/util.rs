use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use lexidice_engine::{DiceCatalog, DiceSeed, GameConfig, ScoreTable, WordList};
use rand::Rng as _;

static BUILTIN_WORDS: &str = include_str!("../data/words.txt");

/// Seed selection shared by every command that rolls dice.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SeedArg {
    /// Seed as 32 hex digits (random if omitted)
    #[arg(long, conflicts_with = "seed_u64")]
    seed: Option<DiceSeed>,
    /// Seed as a plain integer
    #[arg(long)]
    seed_u64: Option<u64>,
}

impl SeedArg {
    pub(crate) fn seed(&self) -> DiceSeed {
        match (self.seed, self.seed_u64) {
            (Some(seed), _) => seed,
            (None, Some(value)) => DiceSeed::from_u64(value),
            (None, None) => rand::rng().random(),
        }
    }
}

/// Data files overriding the built-in resources.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ResourceArg {
    /// Dice catalog JSON file
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Letter score JSON file
    #[arg(long)]
    scores: Option<PathBuf>,
    /// Word list, one word per line
    #[arg(long)]
    words: Option<PathBuf>,
}

impl ResourceArg {
    pub(crate) fn catalog(&self) -> anyhow::Result<DiceCatalog> {
        load_catalog(self.catalog.as_deref())
    }

    pub(crate) fn score_table(&self) -> ScoreTable {
        load_score_table(self.scores.as_deref())
    }

    pub(crate) fn word_list(&self) -> anyhow::Result<WordList> {
        let words = match &self.words {
            Some(path) => WordList::load(path)
                .with_context(|| format!("Failed to load word list: {}", path.display()))?,
            None => WordList::from_text(BUILTIN_WORDS),
        };
        if words.is_empty() {
            tracing::warn!("word list is empty, every word will be rejected");
        }
        Ok(words)
    }
}

/// A broken catalog file falls back to the built-in dice.
pub(crate) fn load_catalog(path: Option<&Path>) -> anyhow::Result<DiceCatalog> {
    let catalog = match path {
        Some(path) => DiceCatalog::load_or_builtin(path),
        None => DiceCatalog::builtin(),
    };
    catalog.context("Failed to parse built-in dice catalog")
}

/// A broken score file does not stop the game: every word then scores 0.
pub(crate) fn load_score_table(path: Option<&Path>) -> ScoreTable {
    match path {
        Some(path) => ScoreTable::load_or_empty(path),
        None => ScoreTable::builtin(),
    }
}

pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    GameConfig::load(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

#[derive(Debug)]
pub(crate) enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub(crate) fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = match output_path {
            Some(path) => Output::create(path)?,
            None => Output::Stdout {
                writer: io::stdout().lock(),
            },
        };
        output.write_json(value)?;
        if let Output::File { path, .. } = &output {
            eprintln!("Saved to {}", path.display());
        }
        Ok(())
    }

    fn create(path: PathBuf) -> anyhow::Result<Self> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_owned(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self)
            .and_then(|()| self.flush())
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

#[cfg(test)]
mod tests {
    use lexidice_engine::WordValidator as _;

    use super::*;

    #[test]
    fn test_seed_arg() {
        let arg = SeedArg {
            seed: None,
            seed_u64: Some(42),
        };
        assert_eq!(arg.seed(), DiceSeed::from_u64(42));

        let seed = DiceSeed::from_u64(7);
        let arg = SeedArg {
            seed: Some(seed),
            seed_u64: None,
        };
        assert_eq!(arg.seed(), seed);
    }

    #[test]
    fn test_builtin_resources() {
        let resources = ResourceArg::default();
        assert!(resources.catalog().is_ok());
        assert!(!resources.score_table().is_empty());
        let words = resources.word_list().unwrap();
        assert!(words.is_valid_word("cab"));
        assert!(words.is_valid_word("QUEST"));
    }

    #[test]
    fn test_missing_resources_fall_back() {
        let catalog = load_catalog(Some(Path::new("/nonexistent/dice.json"))).unwrap();
        assert_eq!(catalog, DiceCatalog::builtin().unwrap());
        assert!(load_score_table(Some(Path::new("/nonexistent/scores.json"))).is_empty());
        assert_eq!(load_config(None).unwrap(), GameConfig::default());
    }
}
