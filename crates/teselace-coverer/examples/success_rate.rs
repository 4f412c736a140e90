//! Measures how often a single covering attempt succeeds.
//!
//! Every attempt runs [`CoveringModel::try_cover`] once on a freshly seeded
//! model, without the retry loop, so the printed rate tells how many retries a
//! configuration typically needs.
//!
//! # Usage
//!
//! ```sh
//! cargo run --release --example success_rate
//! ```
//!
//! Change the rectangle and block size:
//!
//! ```sh
//! cargo run --release --example success_rate -- --width 12 --height 12 --size 3
//! ```
//!
//! Measure a pyramid with planar blocks instead:
//!
//! ```sh
//! cargo run --release --example success_rate -- --pyramid 4 --size 5 --planar
//! ```

use std::{process, time::Duration};

use clap::Parser;
use rayon::prelude::*;
use teselace_core::{PyramidTopology, RectTopology, Topology};
use teselace_coverer::{
    BlockSizes, ConstraintKind, CoverError, CoverOptions, CoveringConfig, CoveringModel,
    CoveringSeed,
};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Rectangle width.
    #[arg(long, default_value_t = 20)]
    width: usize,

    /// Rectangle height.
    #[arg(long, default_value_t = 20)]
    height: usize,

    /// Cover a pyramid with this many layers instead of a rectangle.
    #[arg(long, value_name = "LAYERS")]
    pyramid: Option<usize>,

    /// Block size.
    #[arg(short, long, default_value_t = 4)]
    size: usize,

    /// Require every block to be a simple path.
    #[arg(long)]
    path: bool,

    /// Require every block to be planar (pyramids only).
    #[arg(long)]
    planar: bool,

    /// Number of independent attempts.
    #[arg(short = 'n', long, value_name = "COUNT", default_value_t = 100)]
    attempts: usize,

    /// Give up a single attempt after this many seconds.
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    success: usize,
    dead_end: usize,
    timeout: usize,
}

impl Tally {
    fn record(mut self, result: Result<(), CoverError>) -> Self {
        match result {
            Ok(()) => self.success += 1,
            Err(CoverError::Timeout) => self.timeout += 1,
            Err(_) => self.dead_end += 1,
        }
        self
    }

    fn merge(self, other: Self) -> Self {
        Self {
            success: self.success + other.success,
            dead_end: self.dead_end + other.dead_end,
            timeout: self.timeout + other.timeout,
        }
    }
}

fn main() {
    let args = Args::parse();

    let sizes = BlockSizes::fixed(args.size).unwrap_or_else(|err| {
        eprintln!("{err}");
        process::exit(2);
    });
    let mut config = CoveringConfig::new(sizes);
    if args.path {
        config = config.with_constraint(ConstraintKind::Path);
    }
    if args.planar {
        config = config.with_constraint(ConstraintKind::Planar);
    }
    let options = CoverOptions {
        timeout: args.timeout.map(Duration::from_secs),
        ..CoverOptions::default()
    };

    let tally = match args.pyramid {
        Some(layers) => {
            let topology = PyramidTopology::new(layers).unwrap_or_else(|err| {
                eprintln!("{err}");
                process::exit(2);
            });
            measure(&topology, &config, &options, args.attempts)
        }
        None => {
            let topology = RectTopology::new(args.width, args.height).unwrap_or_else(|err| {
                eprintln!("{err}");
                process::exit(2);
            });
            measure(&topology, &config, &options, args.attempts)
        }
    };

    println!(
        "Results: successful {}/{} ({} dead ends, {} timeouts)",
        tally.success, args.attempts, tally.dead_end, tally.timeout
    );
}

fn measure<T: Topology>(
    topology: &T,
    config: &CoveringConfig,
    options: &CoverOptions,
    attempts: usize,
) -> Tally {
    (0..attempts)
        .into_par_iter()
        .map(|_| {
            let mut model =
                CoveringModel::with_seed(topology.clone(), config.clone(), CoveringSeed::random())
                    .unwrap_or_else(|err| {
                        eprintln!("{err}");
                        process::exit(2);
                    });
            let result = model.try_cover_with(options);
            Tally::default().record(result)
        })
        .reduce(Tally::default, Tally::merge)
}
