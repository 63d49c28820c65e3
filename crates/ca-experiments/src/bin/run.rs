//! CLI for running the constraint-adherence experiment suite.
//!
//! # Usage
//!
//! ```bash
//! # Full suite against the default backend
//! cargo run -p ca-experiments --bin ca-run
//!
//! # One experiment, one model, custom output directory
//! cargo run -p ca-experiments --bin ca-run -- \
//!     --experiments fatigue --models phi3:3.8b --output-dir outputs/smoke
//!
//! # Against a local backend
//! cargo run -p ca-experiments --bin ca-run -- --host http://localhost:11434
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::{error, info};

use ca_client::{GenerationClient, OllamaBackend, RetryPolicy, DEFAULT_HOST};
use ca_core::load_lexicon;
use ca_experiments::{
    complexity, contradictions, fatigue, formats, taxonomy, HarnessContext, DEFAULT_MODELS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Experiment {
    Fatigue,
    Taxonomy,
    Contradictions,
    Complexity,
    Formats,
}

impl Experiment {
    const ALL: [Experiment; 5] = [
        Experiment::Fatigue,
        Experiment::Taxonomy,
        Experiment::Contradictions,
        Experiment::Complexity,
        Experiment::Formats,
    ];

    fn name(&self) -> &'static str {
        match self {
            Self::Fatigue => "fatigue",
            Self::Taxonomy => "taxonomy",
            Self::Contradictions => "contradictions",
            Self::Complexity => "complexity",
            Self::Formats => "formats",
        }
    }
}

/// Run constraint-adherence experiments against a generation backend.
#[derive(Debug, Parser)]
#[command(name = "ca-run", version, about)]
struct Args {
    /// Experiments to run, in order (default: all).
    #[arg(long, value_enum, value_delimiter = ',')]
    experiments: Option<Vec<Experiment>>,

    /// Generation backend host.
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Models to sweep, comma separated.
    #[arg(long, value_delimiter = ',')]
    models: Option<Vec<String>>,

    /// Trials per experiment cell.
    #[arg(long, default_value_t = 3)]
    trials: u32,

    /// Directory for artifacts and results files.
    #[arg(long, default_value = "outputs")]
    output_dir: PathBuf,

    /// Word list for rule sampling.
    #[arg(long, default_value = "/usr/share/dict/words")]
    lexicon: PathBuf,

    /// Maximum words loaded from the word list.
    #[arg(long, default_value_t = 2000)]
    lexicon_limit: usize,

    /// Seed for reproducible term sampling.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Generation attempts per trial, including the first.
    #[arg(long, default_value_t = 3)]
    max_retries: u32,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let experiments = args
        .experiments
        .unwrap_or_else(|| Experiment::ALL.to_vec());
    let models = args.models.unwrap_or_else(|| {
        DEFAULT_MODELS.iter().map(|m| (*m).to_string()).collect()
    });

    let lexicon = load_lexicon(&args.lexicon, args.lexicon_limit);
    let ctx = HarnessContext::new(args.output_dir, models, args.trials, lexicon, args.seed);

    let backend = match OllamaBackend::new(args.host.clone(), Duration::from_secs(args.timeout_secs))
    {
        Ok(backend) => backend,
        Err(e) => {
            error!(host = %args.host, error = %e, "failed to create backend");
            return ExitCode::FAILURE;
        }
    };
    let client = GenerationClient::new(
        backend,
        RetryPolicy {
            max_retries: args.max_retries,
            ..RetryPolicy::default()
        },
    );

    info!(
        host = %args.host,
        experiments = experiments.len(),
        models = ctx.models.len(),
        trials = ctx.trials,
        output_dir = %ctx.output_dir.display(),
        "starting experiment suite"
    );

    let mut failed = 0usize;
    for experiment in &experiments {
        info!(experiment = experiment.name(), "starting");
        let outcome = match experiment {
            Experiment::Fatigue => fatigue::run(&ctx, &client).await,
            Experiment::Taxonomy => taxonomy::run(&ctx, &client).await,
            Experiment::Contradictions => contradictions::run(&ctx, &client).await,
            Experiment::Complexity => complexity::run(&ctx, &client).await,
            Experiment::Formats => formats::run(&ctx, &client).await,
        };

        // A failed experiment never stops the rest of the suite.
        match outcome {
            Ok(()) => info!(experiment = experiment.name(), "completed"),
            Err(e) => {
                failed += 1;
                error!(experiment = experiment.name(), error = %e, "experiment failed");
            }
        }
    }

    info!(
        completed = experiments.len() - failed,
        failed,
        "experiment suite finished"
    );

    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
