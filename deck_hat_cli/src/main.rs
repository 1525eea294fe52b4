mod draw;
mod editor;
mod error;
mod images;
mod prompt;
mod roster;
mod session;
mod storage;

use std::path::PathBuf;

use clap::{arg, value_parser, Command};
use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};

use prompt::Console;
use session::{DrawSettings, Session};
use storage::DEFAULT_ROSTER_FILE;

fn parse_settings() -> DrawSettings {
    let matches = Command::new("deck_hat")
        .version(clap::crate_version!())
        .about("Draws a deck for every player from somebody else's pile (nobody draws their own)")
        .arg(
            arg!(-f --file <path> "Roster file: JSON object of player name to deck names")
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_ROSTER_FILE),
        )
        .arg(
            arg!(-d --decks <n> "Decks to ask for when entering a player")
                .value_parser(value_parser!(u64).range(1..=10))
                .default_value("3"),
        )
        .arg(arg!(--seed <seed> "Seed the random generator for a reproducible draw").value_parser(value_parser!(u64)))
        .arg(arg!(--once "Draw once from the roster file and exit"))
        .arg(arg!(--images "Look up a card image for every drawn deck"))
        .get_matches();

    DrawSettings {
        roster_file: matches.get_one::<PathBuf>("file").cloned().unwrap_or_else(|| DEFAULT_ROSTER_FILE.into()),
        decks_per_player: matches.get_one::<u64>("decks").copied().unwrap_or(3) as usize,
        seed: matches.get_one::<u64>("seed").copied(),
        once: matches.get_flag("once"),
        show_images: matches.get_flag("images"),
    }
}

fn run<G: Rng>(settings: DrawSettings, rng: G) -> anyhow::Result<()> {
    let once = settings.once;
    let mut session = Session::new(settings, Console::stdio(), rng);
    if once {
        session.run_once()?;
    } else {
        session.run_interactive()?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let settings = parse_settings();
    match settings.seed {
        Some(seed) => run(settings, StdRng::seed_from_u64(seed)),
        None => run(settings, thread_rng()),
    }
}
