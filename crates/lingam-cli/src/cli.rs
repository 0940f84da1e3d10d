//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use lingam_core::config::CliOverrides;

#[derive(Parser, Debug)]
#[command(
    name = "lingam",
    version,
    about = "Linear non-Gaussian acyclic model (LiNGAM) causal discovery on CSV data"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file; replaces the project `lingam.toml`
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level used when LINGAM_LOG is unset
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate the causal order and adjacency matrix
    Fit(FitArgs),
    /// Refit on resampled data and report edge stability
    Bootstrap(BootstrapArgs),
    /// HSIC p-values between the residuals of a fitted model
    Pvalues(PvaluesArgs),
    /// Generate data from a random linear DAG
    Simulate(SimulateArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Dot,
    Text,
}

/// Formats for tabular reports that have no graph to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Json,
    Text,
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// CSV file with one column per variable
    #[arg(short, long)]
    pub input: PathBuf,

    /// Field delimiter
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// The first line is data, not variable names
    #[arg(long)]
    pub no_header: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// Estimation method
    #[arg(long, value_parser = ["direct", "ica"])]
    pub method: Option<String>,

    /// DirectLiNGAM independence measure
    #[arg(long, value_parser = ["pwling", "kernel"])]
    pub measure: Option<String>,

    /// Prior knowledge matrix as CSV (-1 unknown, 0 no path, 1 path; cell [i][j] is j -> i)
    #[arg(long)]
    pub prior: Option<PathBuf>,

    /// Use prior knowledge to narrow candidates instead of enforcing it
    #[arg(long)]
    pub soft_prior: bool,

    /// Keep every OLS coefficient instead of pruning with adaptive lasso
    #[arg(long)]
    pub no_prune: bool,

    /// Seed for ICA initialization and bootstrap resampling
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct FitArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Drop edges with |weight| at or below this value from the output
    #[arg(long)]
    pub threshold: Option<f64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct BootstrapArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Number of resamples
    #[arg(long)]
    pub n_sampling: Option<usize>,

    /// Worker threads
    #[arg(long)]
    pub threads: Option<usize>,

    /// Ignore effects with |value| at or below this
    #[arg(long)]
    pub min_effect: Option<f64>,

    /// How many directions and DAGs to report
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Report causal paths starting at this variable (name or index)
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// Report causal paths ending at this variable (name or index)
    #[arg(long, requires = "from")]
    pub to: Option<String>,

    #[arg(long, value_enum, default_value_t = ReportFormat::Json)]
    pub format: ReportFormat,

    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct PvaluesArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub model: ModelArgs,

    #[arg(long, value_enum, default_value_t = ReportFormat::Json)]
    pub format: ReportFormat,

    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Number of variables
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub variables: u32,

    /// Number of samples
    #[arg(long, value_parser = clap::value_parser!(u32).range(3..))]
    pub samples: u32,

    /// Probability of an edge between two variables
    #[arg(long, default_value_t = 0.5)]
    pub density: f64,

    /// Noise distribution
    #[arg(long, value_parser = ["uniform", "laplace", "gaussian"], default_value = "uniform")]
    pub noise: String,

    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Write the generating adjacency matrix as JSON to this file
    #[arg(long)]
    pub truth: Option<PathBuf>,

    /// Write the CSV to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ModelArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            method: self.method.clone(),
            measure: self.measure.clone(),
            soft_prior: self.soft_prior.then_some(true),
            prune: self.no_prune.then_some(false),
            seed: self.seed,
            ..Default::default()
        }
    }
}

impl Commands {
    /// Config overrides carried by this command's flags.
    pub fn overrides(&self) -> CliOverrides {
        match self {
            Self::Fit(args) => CliOverrides {
                edge_threshold: args.threshold,
                ..args.model.overrides()
            },
            Self::Bootstrap(args) => CliOverrides {
                n_sampling: args.n_sampling,
                threads: args.threads,
                min_causal_effect: args.min_effect,
                ..args.model.overrides()
            },
            Self::Pvalues(args) => args.model.overrides(),
            Self::Simulate(_) => CliOverrides::default(),
        }
    }
}
