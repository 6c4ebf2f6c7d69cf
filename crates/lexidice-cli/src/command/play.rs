use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::Context as _;
use chrono::Utc;
use lexidice_engine::{
    BoardSize, BoardWordValidator, DiceRng, GameSession, GameSessionListener, InMemoryLeaderboard,
    Leaderboard as _, LeaderboardCategory, ScoringRule, SessionError, SessionFactory,
    SessionSummary, SessionTimer, SharedSession, SharedValidator, TimeBudget, WordResult,
};
use parking_lot::Mutex;

use crate::{
    schema::record::RecordedGame,
    util::{self, Output, ResourceArg, SeedArg},
};

const TICK_PERIOD: Duration = Duration::from_secs(1);
const LEADERBOARD_SIZE: usize = 5;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Board size (4x4, 5x5 or 6x6)
    #[arg(long)]
    size: Option<BoardSize>,
    /// Time budget: a preset name (very-short, short, default, medium, long,
    /// infinite) or a number of seconds
    #[arg(long)]
    budget: Option<TimeBudget>,
    /// Minimum number of vowels on the board
    #[arg(long)]
    min_vowels: Option<usize>,
    /// Scoring rule (letter-sum or length-multiplied)
    #[arg(long)]
    rule: Option<ScoringRule>,
    #[clap(flatten)]
    seed: SeedArg,
    #[clap(flatten)]
    resources: ResourceArg,
    /// Game config JSON file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Save each finished game as JSON to this file (replays add a
    /// `-replayN` suffix)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        size,
        budget,
        min_vowels,
        rule,
        seed,
        resources,
        config,
        output,
    } = arg;

    let config = util::load_config(config.as_deref())?;
    let size = size.unwrap_or(config.board_size);
    let budget = budget.unwrap_or(config.time_budget);
    let min_vowels = min_vowels.unwrap_or(config.min_vowels);
    let rule = rule.unwrap_or(config.scoring_rule);

    let catalog = resources.catalog()?;
    let face_sets = catalog
        .face_sets(size)
        .with_context(|| format!("Dice catalog has no {size} dice"))?;
    let score_table = Arc::new(resources.score_table());
    let words: SharedValidator = Arc::new(resources.word_list()?);

    let seed = seed.seed();
    let mut rng = DiceRng::with_seed(seed);
    let board = Arc::new(
        config
            .generator()
            .generate(face_sets, &mut rng, min_vowels)
            .with_context(|| format!("Failed to roll a {size} board"))?,
    );

    // Typed words must be traceable on the board as well as in the dictionary.
    let validator = Arc::new(BoardWordValidator::new(Arc::clone(&board), words));
    let factory = SessionFactory::new(score_table, validator, config.generator())
        .with_scoring_rule(rule);
    let leaderboard = InMemoryLeaderboard::new("you");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    // Not locked for the whole game: the timer thread prints too.
    let mut out = io::stdout();

    let mut session = factory.session_on(budget, board);
    loop {
        session.add_listener(Box::new(TimeUpNotice));
        let shared: SharedSession = Arc::new(Mutex::new(session));
        let timer = SessionTimer::start(Arc::clone(&shared), TICK_PERIOD)
            .context("Failed to start session timer")?;

        writeln!(out, "seed {} | {budget} | {rule}", seed.to_hex())?;
        print_help(&mut out)?;
        play_round(&shared, &mut input, &mut out)?;
        timer.stop();

        let finished = shared.lock();
        let summary = finished.summary();
        print_summary(&mut out, &summary)?;

        if let Some(category) = LeaderboardCategory::for_session(&finished) {
            leaderboard
                .report_score(&category, summary.stats.score())
                .context("Failed to report score")?;
            let top = leaderboard
                .fetch_top_scores(&category, LEADERBOARD_SIZE)
                .context("Failed to fetch leaderboard")?;
            writeln!(out, "best scores ({category}):")?;
            for (rank, entry) in top.iter().enumerate() {
                writeln!(out, "  {}. {:<6} {}", rank + 1, entry.player_id, entry.value)?;
            }
        }

        if let Some(path) = output {
            let record = RecordedGame {
                recorded_at: Utc::now(),
                seed,
                summary,
            };
            let path = record_path(path, finished.replay_count());
            Output::save_json(&record, Some(path))?;
        }

        if !finished.state().is_done() || !ask_replay(&mut input, &mut out)? {
            break;
        }
        session = factory.replay_session(&finished)?;
    }
    Ok(())
}

/// Prints a notice when the clock, not the player, ends the game.
struct TimeUpNotice;

impl GameSessionListener for TimeUpNotice {
    fn on_game_ended(&mut self, summary: &SessionSummary) {
        if summary.state.is_done() && summary.remaining_seconds == Some(0) {
            println!();
            println!("Time's up! Press Enter to see your score.");
        }
    }
}

fn print_help<W>(out: &mut W) -> io::Result<()>
where
    W: Write,
{
    writeln!(
        out,
        "Type words and press Enter. Commands: :board :rotate :pause :resume :reset :end :quit"
    )
}

fn print_board<W>(session: &GameSession, out: &mut W) -> io::Result<()>
where
    W: Write,
{
    if let Some(board) = session.oriented_board() {
        writeln!(out)?;
        writeln!(out, "{board}")?;
        writeln!(out)?;
    }
    let time = match session.remaining_seconds() {
        Some(remaining) => format!("{remaining}s left"),
        None => format!("{}s elapsed", session.elapsed_seconds()),
    };
    writeln!(
        out,
        "score {} | {} words | {time}",
        session.score(),
        session.stats().word_count()
    )
}

/// Reads commands and words until the session is finished or input ends.
fn play_round<R, W>(shared: &SharedSession, input: &mut R, out: &mut W) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    print_board(&shared.lock(), out)?;
    let mut line = String::new();
    loop {
        if shared.lock().state().is_finished() {
            break;
        }
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            let mut session = shared.lock();
            if session.state().is_paused() {
                session.resume()?;
            }
            if !session.state().is_finished() {
                session.end_game()?;
            }
            break;
        }

        let mut session = shared.lock();
        if session.state().is_finished() {
            break;
        }
        match line.trim() {
            "" => {}
            ":board" => print_board(&session, out)?,
            ":rotate" => match session.rotate_board() {
                Ok(()) => print_board(&session, out)?,
                Err(err) => writeln!(out, "{err}")?,
            },
            ":pause" => report(out, session.pause(), "paused, :resume to continue")?,
            ":resume" => report(out, session.resume(), "resumed")?,
            ":reset" => report(out, session.reset(), "cleared")?,
            ":end" => report(out, session.end_game(), "game over")?,
            ":quit" => report(out, session.terminate(), "bye")?,
            word => match session.submit_word(word) {
                Ok(WordResult::Accepted { score }) => {
                    writeln!(out, "+{score} (total {})", session.score())?;
                }
                Ok(WordResult::Duplicate) => writeln!(out, "already found")?,
                Ok(WordResult::Invalid) => writeln!(out, "not a word on this board")?,
                Err(err) => writeln!(out, "{err}")?,
            },
        }
    }
    Ok(())
}

/// `game.json` for the first game, `game-replay1.json` for the first replay.
fn record_path(path: &Path, replay_count: u32) -> PathBuf {
    if replay_count == 0 {
        return path.to_owned();
    }
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let mut file_name = format!("{stem}-replay{replay_count}");
    if let Some(ext) = path.extension() {
        file_name.push('.');
        file_name.push_str(&ext.to_string_lossy());
    }
    path.with_file_name(file_name)
}

fn report<W>(out: &mut W, result: Result<(), SessionError>, done: &str) -> io::Result<()>
where
    W: Write,
{
    match result {
        Ok(()) => writeln!(out, "{done}"),
        Err(err) => writeln!(out, "{err}"),
    }
}

fn print_summary<W>(out: &mut W, summary: &SessionSummary) -> io::Result<()>
where
    W: Write,
{
    writeln!(out)?;
    writeln!(out, "game {}", summary.state)?;
    writeln!(out, "score:   {}", summary.stats.score())?;
    writeln!(out, "words:   {}", summary.stats.words().join(", "))?;
    writeln!(out, "longest: {}", summary.longest_word_length)?;
    writeln!(
        out,
        "misses:  {} invalid, {} duplicate",
        summary.stats.invalid_guesses(),
        summary.stats.duplicate_guesses()
    )?;
    if summary.is_replay {
        writeln!(out, "replay:  #{}", summary.replay_count)?;
    }
    Ok(())
}

fn ask_replay<R, W>(input: &mut R, out: &mut W) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    write!(out, "Play the same board again? [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
