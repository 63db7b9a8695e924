use std::io::{self, BufRead};

use anyhow::{bail, Context, Result};
use chess_engine::config::{DEFAULT_BUDGET_FRACTION, DEFAULT_MAX_DEPTH, DEFAULT_TIME_BUDGET_SECONDS};
use chess_engine::{EngineConfig, MoveSelector};
use clap::Parser;
use log::{error, info};

/// Prints a move for a chess position in coordinate notation.
#[derive(Parser, Debug)]
#[command(name = "chess-agent", version, about)]
struct Cli {
    /// Position as FEN (quoted or as separate words), or `startpos`.
    /// The initial position when omitted.
    fen: Vec<String>,

    /// Nominal time allotment per move, in seconds
    #[arg(long, default_value_t = DEFAULT_TIME_BUDGET_SECONDS)]
    time: f64,

    /// Maximum search depth in plies
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    depth: u8,

    /// Share of the time allotment spent searching
    #[arg(long, default_value_t = DEFAULT_BUDGET_FRACTION)]
    fraction: f64,

    /// Use piece-square tables for every piece type
    #[arg(long)]
    full_pst: bool,

    /// Read one position per line from standard input
    #[arg(long, conflicts_with = "fen")]
    stdin: bool,
}

impl Cli {
    fn config(&self) -> EngineConfig {
        EngineConfig::default()
            .with_time_budget(self.time)
            .with_max_depth(self.depth)
            .with_budget_fraction(self.fraction)
            .with_full_piece_square_tables(self.full_pst)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let selector = MoveSelector::for_chess(cli.config()).context("invalid engine settings")?;
    info!("engine settings: {:?}", selector.config());

    if !cli.stdin {
        let fen = cli.fen.join(" ");
        let mv = selector
            .select_chess(&fen)
            .with_context(|| format!("cannot choose a move for `{}`", fen))?;
        println!("{}", mv);
        return Ok(());
    }

    let mut failures = 0usize;
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read standard input")?;
        let fen = line.trim();
        if fen.is_empty() {
            continue;
        }
        match selector.select_chess(fen) {
            Ok(mv) => println!("{}", mv),
            Err(err) => {
                error!("{}: {}", fen, err);
                println!("none");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} position(s) had no move", failures);
    }
    Ok(())
}
