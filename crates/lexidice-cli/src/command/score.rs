use std::path::PathBuf;

use lexidice_engine::{ScoreTable, ScoringRule};
use serde::Serialize;

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ScoreArg {
    /// Words to score
    #[arg(required = true)]
    words: Vec<String>,
    /// Letter score JSON file
    #[arg(long)]
    scores: Option<PathBuf>,
    /// Scoring rule (letter-sum or length-multiplied)
    #[arg(long, default_value_t = ScoringRule::LetterSum)]
    rule: ScoringRule,
    /// Print the scores as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct WordScore {
    word: String,
    score: u32,
}

pub(crate) fn run(arg: &ScoreArg) -> anyhow::Result<()> {
    let ScoreArg {
        words,
        scores,
        rule,
        json,
    } = arg;

    let table = util::load_score_table(scores.as_deref());
    let scored = score_words(&table, *rule, words);

    if *json {
        Output::save_json(&scored, None)?;
        return Ok(());
    }
    let width = scored.iter().map(|s| s.word.len()).max().unwrap_or(0);
    for WordScore { word, score } in &scored {
        println!("{word:<width$}  {score:>3}");
    }
    let total = scored.iter().map(|s| s.score).sum::<u32>();
    println!("{:<width$}  {total:>3}", "total");
    Ok(())
}

fn score_words(table: &ScoreTable, rule: ScoringRule, words: &[String]) -> Vec<WordScore> {
    words
        .iter()
        .map(|word| {
            let word = word.trim().to_uppercase();
            WordScore {
                score: table.score_word_with(rule, &word),
                word,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_words_with_builtin_table() {
        let table = ScoreTable::builtin();
        let words = ["cab".to_owned(), " quest ".to_owned()];
        assert_eq!(
            score_words(&table, ScoringRule::LetterSum, &words),
            vec![
                WordScore {
                    word: "CAB".to_owned(),
                    score: 7
                },
                WordScore {
                    word: "QUEST".to_owned(),
                    score: 13
                },
            ]
        );
    }

    #[test]
    fn test_length_rule() {
        let table = ScoreTable::builtin();
        let words = ["quest".to_owned()];
        // Five letters use the factor listed for length 5.
        assert_eq!(
            score_words(&table, ScoringRule::LengthMultiplied, &words)[0].score,
            13 * table.length_factor(5)
        );
    }
}
