use anyhow::{bail, Result};
use checkers_engine::utils::{count_paths, count_paths_divided, PathCount};
use checkers_engine::GameService;
use clap::Parser;

/// Counts move-action paths from the opening position.
#[derive(Parser, Debug)]
#[command(name = "move-count", version, about)]
struct Args {
    /// Number of actions to look ahead (every capture hop is one action)
    depth: usize,
    /// Fail unless the total matches this value
    expected: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let game = GameService::new();
    let mut total = if args.depth == 0 {
        count_paths(&game, 0)
    } else {
        PathCount::default()
    };
    for (square, dir, result) in count_paths_divided(&game, args.depth) {
        println!(" {square} {dir} : {result}");
        total += result;
    }
    println!("+ total: {total}");
    match args.expected {
        Some(expected) if expected != total.all => {
            bail!("Found {} paths, expected {expected}.", total.all)
        }
        _ => Ok(()),
    }
}
