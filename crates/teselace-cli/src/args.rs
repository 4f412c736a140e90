//! Command line arguments.

use std::time::Duration;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use teselace_coverer::{
    BlockSizes, COVERING_ATTEMPTS, ConfigError, ConstraintKind, CoverOptions, CoveringConfig,
    CoveringSeed,
};

/// Covers a rectangle or a pyramid with randomly shaped blocks.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    #[command(subcommand)]
    pub space: SpaceCommand,
}

/// The space to cover.
#[derive(Debug, Subcommand)]
pub enum SpaceCommand {
    /// Cover a rectangle with 4-connected blocks.
    #[command(name = "2d")]
    TwoD {
        /// Number of columns.
        #[arg(long, default_value_t = 10)]
        width: usize,

        /// Number of rows.
        #[arg(long, default_value_t = 10)]
        height: usize,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Cover a tetrahedral pyramid of spheres.
    Pyramid {
        /// Number of layers.
        #[arg(short, long, default_value_t = 4)]
        size: usize,

        /// Require every block to lie in one plane.
        #[arg(long)]
        planar: bool,

        #[command(flatten)]
        common: CommonArgs,
    },
}

impl SpaceCommand {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Self::TwoD { common, .. } | Self::Pyramid { common, .. } => common,
        }
    }
}

/// Options shared by all spaces.
#[derive(Debug, clap::Args)]
pub struct CommonArgs {
    /// Smallest allowed block size.
    #[arg(short = 'm', long, value_name = "SIZE", default_value_t = 4)]
    pub min_block_size: usize,

    /// Largest allowed block size [default: same as the smallest].
    #[arg(short = 'M', long, value_name = "SIZE")]
    pub max_block_size: Option<usize>,

    /// Require every block to be a simple path.
    #[arg(long)]
    pub path: bool,

    /// Print blocks in their colors.
    #[arg(long)]
    pub visual: bool,

    /// Increase logging verbosity. Repeatable.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Number of attempts from scratch before giving up.
    #[arg(long, value_name = "COUNT", default_value_t = COVERING_ATTEMPTS)]
    pub attempts: usize,

    /// Abandon a single attempt after this many seconds.
    #[arg(long, value_name = "SECONDS", value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Seed as 64 hexadecimal digits, or any phrase to derive one from.
    #[arg(long)]
    pub seed: Option<String>,

    /// Skip the check for uncoverable empty regions after each block.
    #[arg(long)]
    pub no_finishable_check: bool,
}

fn parse_timeout(text: &str) -> Result<Duration, String> {
    let secs = text.parse::<f64>().map_err(|err| err.to_string())?;
    Duration::try_from_secs_f64(secs).map_err(|err| err.to_string())
}

impl CommonArgs {
    /// Builds the covering configuration, adding `extra` constraints.
    pub fn config(&self, extra: &[ConstraintKind]) -> Result<CoveringConfig, ConfigError> {
        let max = self.max_block_size.unwrap_or(self.min_block_size);
        let mut config = CoveringConfig::new(BlockSizes::new(self.min_block_size, max)?);
        if self.path {
            config = config.with_constraint(ConstraintKind::Path);
        }
        for &constraint in extra {
            config = config.with_constraint(constraint);
        }
        Ok(config)
    }

    pub fn options(&self) -> CoverOptions {
        CoverOptions {
            check_finishable: !self.no_finishable_check,
            timeout: self.timeout,
        }
    }

    pub fn seed(&self) -> Option<CoveringSeed> {
        let text = self.seed.as_deref()?;
        Some(
            text.parse()
                .unwrap_or_else(|_| CoveringSeed::from_phrase(text)),
        )
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("teselace").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["2d"]);
        let SpaceCommand::TwoD {
            width,
            height,
            ref common,
        } = args.space
        else {
            panic!("expected 2d subcommand");
        };
        assert_eq!((width, height), (10, 10));
        assert_eq!(common.attempts, COVERING_ATTEMPTS);

        let config = common.config(&[]).unwrap();
        assert_eq!(config.block_sizes(), BlockSizes::fixed(4).unwrap());
        assert!(config.constraints().is_empty());
        assert_eq!(common.options(), CoverOptions::default());
        assert_eq!(common.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn test_pyramid_flags() {
        let args = parse(&["pyramid", "-s", "3", "--planar", "--path", "-m", "3", "-M", "4", "-vv"]);
        let SpaceCommand::Pyramid {
            size,
            planar,
            ref common,
        } = args.space
        else {
            panic!("expected pyramid subcommand");
        };
        assert_eq!(size, 3);
        assert!(planar);

        let config = common.config(&[ConstraintKind::Planar]).unwrap();
        assert_eq!(config.block_sizes(), BlockSizes::new(3, 4).unwrap());
        assert_eq!(
            config.constraints(),
            &[ConstraintKind::Path, ConstraintKind::Planar]
        );
        assert_eq!(common.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_sizes() {
        let args = parse(&["2d", "-m", "5", "-M", "3"]);
        assert_eq!(
            args.space.common().config(&[]),
            Err(ConfigError::InvalidBlockSizeRange { min: 5, max: 3 })
        );

        let args = parse(&["2d", "-m", "0"]);
        assert_eq!(args.space.common().config(&[]), Err(ConfigError::ZeroBlockSize));
    }

    #[test]
    fn test_planar_is_pyramid_only() {
        assert!(Args::try_parse_from(["teselace", "2d", "--planar"]).is_err());
    }

    #[test]
    fn test_seed_parsing() {
        let hex = "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1";
        let args = parse(&["2d", "--seed", hex]);
        assert_eq!(args.space.common().seed().unwrap().to_string(), hex);

        let args = parse(&["2d", "--seed", "hello"]);
        assert_eq!(
            args.space.common().seed(),
            Some(CoveringSeed::from_phrase("hello"))
        );

        assert_eq!(parse(&["2d"]).space.common().seed(), None);
    }

    #[test]
    fn test_options() {
        let args = parse(&["2d", "--timeout", "1.5", "--no-finishable-check"]);
        let options = args.space.common().options();
        assert!(!options.check_finishable);
        assert_eq!(options.timeout, Some(Duration::from_millis(1500)));

    }

    #[test]
    fn test_invalid_timeouts_are_rejected() {
        for timeout in ["--timeout=-5", "--timeout=NaN", "--timeout=inf", "--timeout=soon"] {
            let err = Args::try_parse_from(["teselace", "2d", timeout]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation, "{timeout}");
            assert_eq!(err.exit_code(), 2);
        }
    }
}
