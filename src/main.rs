//! Command line entry point for the TrueSkill rating engine
//!
//! Reads a finished match from a TOML or JSON file, rates it with the
//! configured calculator and prints the result as JSON on stdout. Logs go
//! to stderr so the output can be piped.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{error, info};
use trueskill_graph::config::AppConfig;
use trueskill_graph::utils::read_match_file;
use trueskill_graph::{
    FactorGraphTrueSkillCalculator, SkillCalculator, TwoPlayerTrueSkillCalculator,
    TwoTeamTrueSkillCalculator,
};

/// TrueSkill rating engine - factor graph message passing
#[derive(Parser)]
#[command(
    name = "trueskill",
    version,
    about = "Rate finished matches with TrueSkill",
    long_about = "Computes posterior TrueSkill ratings for teams of players from a ranked match \
                 result, using Gaussian message passing on a factor graph or the closed-form \
                 two-team update."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without rating anything")]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Compute posterior ratings for a finished match
    Rate {
        /// Match file (.toml or .json) with teams and ranks
        match_file: PathBuf,

        #[arg(long, value_enum, default_value_t = CalculatorKind::FactorGraph)]
        calculator: CalculatorKind,
    },
    /// Compute the draw probability of a prospective match
    Quality {
        /// Match file (.toml or .json) with teams; ranks are ignored
        match_file: PathBuf,

        #[arg(long, value_enum, default_value_t = CalculatorKind::FactorGraph)]
        calculator: CalculatorKind,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CalculatorKind {
    FactorGraph,
    TwoTeam,
    TwoPlayer,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Display configuration summary
fn display_banner(config: &AppConfig) {
    info!("TrueSkill rating engine v{}", trueskill_graph::VERSION);
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!(
        "   Game: mean={}, sigma={:.4}, beta={:.4}, tau={:.4}, draw={}",
        config.game.initial_mean,
        config.game.initial_standard_deviation,
        config.game.beta,
        config.game.dynamics_factor,
        config.game.draw_probability
    );
    info!(
        "   Engine: threshold={}, max iterations={}",
        config.engine.convergence_threshold, config.engine.max_loop_iterations
    );
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    trueskill_graph::config::validate_config(&config)?;
    Ok(config)
}

fn create_calculator(
    kind: CalculatorKind,
    config: &AppConfig,
) -> Result<Box<dyn SkillCalculator>> {
    let calculator: Box<dyn SkillCalculator> = match kind {
        CalculatorKind::FactorGraph => {
            Box::new(FactorGraphTrueSkillCalculator::new(config.game, config.engine)?)
        }
        CalculatorKind::TwoTeam => Box::new(TwoTeamTrueSkillCalculator::new(config.game)?),
        CalculatorKind::TwoPlayer => Box::new(TwoPlayerTrueSkillCalculator::new(config.game)?),
    };
    Ok(calculator)
}

fn run(command: Command, config: &AppConfig) -> Result<()> {
    match command {
        Command::Rate {
            match_file,
            calculator,
        } => {
            let input = read_match_file(&match_file)?;
            let calculator = create_calculator(calculator, config)?;
            info!(
                calculator = calculator.name(),
                teams = input.teams.len(),
                "Rating match from {}",
                match_file.display()
            );

            let result = calculator.calculate_new_ratings(&input.teams, &input.ranks)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Quality {
            match_file,
            calculator,
        } => {
            let input = read_match_file(&match_file)?;
            let calculator = create_calculator(calculator, config)?;
            let quality = calculator.calculate_match_quality(&input.teams)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "calculator": calculator.name(),
                    "match_quality": quality,
                }))?
            );
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if args.dry_run {
        info!("Configuration validation successful");
        display_banner(&config);
        info!("Dry run completed - exiting");
        return Ok(());
    }

    let Some(command) = args.command else {
        error!("No command given, see --help");
        std::process::exit(2);
    };

    display_banner(&config);
    if let Err(e) = run(command, &config) {
        error!("Rating failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
