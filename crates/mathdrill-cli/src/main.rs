//! mathdrill CLI: issue practice problems and grade answers.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(name = "mathdrill", version, about = "Math practice problems with deterministic grading")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Which schema contract `validate` checks against.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ValidateKind {
    /// A problem instance as issued by `next`
    Instance,
    /// A grade request body
    Grade,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue one problem instance as JSON
    Next {
        /// Unit: fraction, fraction_compare, or gcd
        #[arg(long, alias = "type")]
        unit: Option<String>,

        /// Difficulty: easy, normal, hard, or level 1-3
        #[arg(long, alias = "level")]
        difficulty: Option<String>,

        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Grade a request body (JSON file, or stdin when omitted)
    Grade {
        /// Path to the grade request JSON
        #[arg(long)]
        body: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a JSON document against the instance or grade-request schema
    Validate {
        /// Contract to check
        #[arg(long, value_enum)]
        kind: ValidateKind,

        /// Path to the JSON document (stdin when omitted)
        #[arg(long)]
        body: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the difficulty tier table
    Tiers {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Interactive practice session on stdin/stdout
    Practice {
        /// Unit: fraction, fraction_compare, or gcd
        #[arg(long, alias = "type")]
        unit: Option<String>,

        /// Difficulty: easy, normal, hard, or level 1-3
        #[arg(long, alias = "level")]
        difficulty: Option<String>,

        /// Number of problems
        #[arg(long, default_value = "5")]
        count: usize,

        /// Seed for a reproducible session
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter mathdrill.toml
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mathdrill=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Next {
            unit,
            difficulty,
            seed,
            config,
        } => commands::next::execute(unit, difficulty, seed, config),
        Commands::Grade { body, config } => commands::grade::execute(body, config),
        Commands::Validate { kind, body, config } => commands::validate::execute(kind, body, config),
        Commands::Tiers { config } => commands::tiers::execute(config),
        Commands::Practice {
            unit,
            difficulty,
            count,
            seed,
            config,
        } => commands::practice::execute(unit, difficulty, count, seed, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
