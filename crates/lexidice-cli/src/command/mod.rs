use clap::{Parser, Subcommand};

use self::{play::PlayArg, roll::RollArg, score::ScoreArg};

mod play;
mod roll;
mod score;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Roll a board and print it
    Roll(#[clap(flatten)] RollArg),
    /// Score words without playing
    Score(#[clap(flatten)] ScoreArg),
    /// Play a timed game in the terminal
    Play(#[clap(flatten)] PlayArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Roll(arg) => roll::run(&arg)?,
        Mode::Score(arg) => score::run(&arg)?,
        Mode::Play(arg) => play::run(&arg)?,
    }
    Ok(())
}
