//! Tilerun entry point
//!
//! Runs one episode with the scripted sprinter and prints its report.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tilerun::SimConfig;
use tilerun::sim::{ChunkGenerator, EpisodeReport, Game, Sprinter, WindowSize};

const VIEW_SIZE: usize = 11;

#[derive(Parser, Debug)]
#[command(
    name = "tilerun",
    version,
    about = "Run one tile platformer episode with the scripted sprinter"
)]
struct Args {
    /// Level generator seed.
    #[arg(default_value_t = 1569986158)]
    seed: u64,
    /// Number of level chunks, including the start and finish chunks.
    #[arg(
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    num_chunks: u64,
    /// Optional JSON file with simulation tuning.
    config: Option<PathBuf>,
}

fn run(args: Args) -> Result<EpisodeReport, Box<dyn std::error::Error>> {
    let num_chunks = usize::try_from(args.num_chunks)?;
    let config = match args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };

    let window = WindowSize::new(VIEW_SIZE, VIEW_SIZE)?;
    let mut game = Game::generate(
        &ChunkGenerator::default(),
        num_chunks,
        args.seed,
        Some(window),
        config,
    )?;
    Ok(game.play(&mut Sprinter)?)
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::init();
    log::info!("Tilerun starting...");

    match run(args) {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("Failed to encode report: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["tilerun"]).unwrap();
        assert_eq!(args.seed, 1569986158);
        assert_eq!(args.num_chunks, 10);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_positional_arguments() {
        let args = Args::try_parse_from(["tilerun", "7", "3", "tuning.json"]).unwrap();
        assert_eq!(args.seed, 7);
        assert_eq!(args.num_chunks, 3);
        assert_eq!(args.config, Some(PathBuf::from("tuning.json")));
    }

    #[test]
    fn test_zero_chunks_rejected() {
        assert!(Args::try_parse_from(["tilerun", "7", "0"]).is_err());
    }
}
