use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Utc;
use lexidice_engine::{BoardSize, DiceRng};

use crate::{
    schema::record::RolledBoard,
    util::{self, Output, SeedArg},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct RollArg {
    /// Board size (4x4, 5x5 or 6x6)
    #[arg(long)]
    size: Option<BoardSize>,
    /// Minimum number of vowels on the board
    #[arg(long)]
    min_vowels: Option<usize>,
    #[clap(flatten)]
    seed: SeedArg,
    /// Dice catalog JSON file
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Game config JSON file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the board as JSON
    #[arg(long)]
    json: bool,
    /// Output file path (with --json)
    #[arg(long, requires = "json")]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &RollArg) -> anyhow::Result<()> {
    let RollArg {
        size,
        min_vowels,
        seed,
        catalog,
        config,
        json,
        output,
    } = arg;

    let config = util::load_config(config.as_deref())?;
    let size = size.unwrap_or(config.board_size);
    let min_vowels = min_vowels.unwrap_or(config.min_vowels);

    let catalog = util::load_catalog(catalog.as_deref())?;
    let face_sets = catalog
        .face_sets(size)
        .with_context(|| format!("Dice catalog has no {size} dice"))?;

    let seed = seed.seed();
    let mut rng = DiceRng::with_seed(seed);
    let board = config
        .generator()
        .generate(face_sets, &mut rng, min_vowels)
        .with_context(|| format!("Failed to roll a {size} board"))?;

    if *json {
        let record = RolledBoard {
            recorded_at: Utc::now(),
            seed,
            size,
            vowels: board.vowel_count(),
            board,
        };
        Output::save_json(&record, output.clone())?;
    } else {
        println!("{board}");
        println!();
        println!("seed:   {}", seed.to_hex());
        println!("vowels: {}", board.vowel_count());
    }
    Ok(())
}
