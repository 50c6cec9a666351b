use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use merge_2048::config::BoardConfig;
use merge_2048::engine::Board;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "merge-2048", about = "Headless random-move rollout of a 2048 board")]
struct Args {
    /// TOML board config; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    /// Tiles placed before the first move
    #[arg(long)]
    initial_tiles: Option<usize>,
    /// Probability that an inserted tile is a 2
    #[arg(long)]
    insertion_bias: Option<f64>,
    /// Seed for the board and the move picker
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many accepted moves
    #[arg(long)]
    steps: Option<u64>,
    /// Print the board after every move
    #[arg(long)]
    show: bool,
    /// Tracing filter, e.g. "info", "merge_2048=debug"
    #[arg(long, default_value = "info")]
    log: String,
}

impl Args {
    fn board_config(&self) -> Result<BoardConfig> {
        let mut cfg = match &self.config {
            Some(path) => BoardConfig::from_toml(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => BoardConfig::default(),
        };
        if let Some(w) = self.width { cfg.width = w; }
        if let Some(h) = self.height { cfg.height = h; }
        if let Some(n) = self.initial_tiles { cfg.initial_tiles = n; }
        if let Some(p) = self.insertion_bias { cfg.insertion_bias = p; }
        if self.seed.is_some() { cfg.seed = self.seed; }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(args.log.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = args.board_config()?;
    info!(width = cfg.width, height = cfg.height, seed = ?cfg.seed, "starting rollout");
    let mut board = Board::from_config(&cfg)?;
    let mut picker = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_entropy(),
    };
    if args.show {
        println!("{}", board);
    }

    let mut move_count: u64 = 0;
    loop {
        let legal = board.legal_moves();
        let Some(&dir) = legal.choose(&mut picker) else { break };
        if board.make_move(dir)? {
            move_count += 1;
        }
        if args.show {
            println!("{dir}{}", board);
        }
        if args.steps.is_some_and(|limit| move_count >= limit) {
            break;
        }
    }

    println!(
        "Moves made: {}, score: {}, highest tile: {}, empty cells: {}",
        move_count,
        board.score(),
        board.highest_tile(),
        board.count_empty()
    );
    Ok(())
}
