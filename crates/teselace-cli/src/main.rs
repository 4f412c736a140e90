//! Teselace command line interface.
//!
//! Covers the requested space, retrying from scratch up to the attempt budget,
//! and prints the covering. Exits with status 1 when no attempt succeeded and
//! with status 2 on invalid arguments.

use std::{fmt::Display, io, process::ExitCode};

use clap::Parser as _;
use teselace_core::{PyramidTopology, RectTopology};
use teselace_coverer::{ConstraintKind, CoveringConfig, CoveringModel, spawn_cover};

use crate::{
    args::{Args, CommonArgs, SpaceCommand},
    view::ConsoleView,
};

mod args;
mod view;

const USAGE_ERROR: u8 = 2;

fn main() -> ExitCode {
    better_panic::install();

    let args = Args::parse();
    let common = args.space.common();
    env_logger::Builder::new()
        .filter_level(common.log_level())
        .parse_default_env()
        .init();
    log::debug!("arguments: {args:?}");

    match &args.space {
        SpaceCommand::TwoD {
            width,
            height,
            common,
        } => match (RectTopology::new(*width, *height), common.config(&[])) {
            (Ok(topology), Ok(config)) => run(topology, config, common),
            (Err(err), _) => usage_error(err),
            (_, Err(err)) => usage_error(err),
        },
        SpaceCommand::Pyramid {
            size,
            planar,
            common,
        } => {
            let extra: &[ConstraintKind] = if *planar { &[ConstraintKind::Planar] } else { &[] };
            match (PyramidTopology::new(*size), common.config(extra)) {
                (Ok(topology), Ok(config)) => run(topology, config, common),
                (Err(err), _) => usage_error(err),
                (_, Err(err)) => usage_error(err),
            }
        }
    }
}

fn usage_error(err: impl Display) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(USAGE_ERROR)
}

fn run<T: ConsoleView>(topology: T, config: CoveringConfig, args: &CommonArgs) -> ExitCode {
    let model = match args.seed() {
        Some(seed) => CoveringModel::with_seed(topology, config, seed),
        None => CoveringModel::new(topology, config),
    };
    let model = match model {
        Ok(model) => model,
        Err(err) => return usage_error(err),
    };
    log::info!("seed: {}", model.seed());

    let outcome = match spawn_cover(model, args.attempts, args.options()).join() {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match outcome.result {
        Ok(report) => {
            log::info!(
                "covered in attempt {} ({} dead ends, {} timeouts)",
                report.attempt,
                report.dead_ends,
                report.timeouts
            );
            let mut stdout = io::stdout().lock();
            let written = if args.visual {
                view::write_visual(&outcome.model, &mut stdout)
            } else {
                view::write_text(&outcome.model, &mut stdout)
            };
            if let Err(err) = written {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("attempt limit reached: {err}");
            ExitCode::FAILURE
        }
    }
}
