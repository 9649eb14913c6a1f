use bea::{BEA_BASE_URL, DEFAULT_CACHE_FILE};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Browse the BEA dataset catalog and download data.
#[derive(Parser, Debug)]
#[command(name = "bea")]
#[command(about = "Browse and download data from the Bureau of Economic Analysis API", long_about = None)]
#[command(version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,

    /// BEA API user identifier
    #[arg(long, env = "BEA_API_KEY", hide_env_values = true, global = true)]
    pub(crate) api_key: Option<String>,

    /// Catalog cache file
    #[arg(long, env = "BEA_CACHE_FILE", global = true, default_value = DEFAULT_CACHE_FILE)]
    pub(crate) cache_file: PathBuf,

    /// Keep the catalog in memory only; nothing is read from or written to disk
    #[arg(long, global = true, default_value_t = false)]
    pub(crate) no_cache: bool,

    /// API endpoint
    #[arg(long, env = "BEA_BASE_URL", global = true, default_value = BEA_BASE_URL)]
    pub(crate) base_url: String,

    /// Maximum requests per rate window
    #[arg(long, global = true, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) max_requests: u32,

    /// Maximum mebibytes received per rate window
    #[arg(long, global = true, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    pub(crate) max_megabytes: u64,

    /// Maximum failed responses per rate window
    #[arg(long, global = true, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) max_errors: u32,

    /// Rate window length in seconds
    #[arg(long, global = true, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    pub(crate) window_secs: u64,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub(crate) timeout_secs: u64,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    /// List every dataset
    Datasets,

    /// Show the request parameters of a dataset
    Parameters {
        /// Dataset name (case-insensitive)
        dataset: String,
    },

    /// Show the valid inputs of a dataset parameter
    Values {
        /// Dataset name (case-insensitive)
        dataset: String,
        /// Parameter name (case-insensitive)
        parameter: String,
    },

    /// Explore the catalog interactively
    Browse,

    /// Rebuild the catalog cache now
    Refresh,

    /// Download data with GetData
    Download(DownloadArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub(crate) struct DownloadArgs {
    /// Dataset name
    pub(crate) dataset: String,

    /// Request parameter, repeatable (e.g. -p TableName=T10101)
    #[arg(short = 'p', long = "param", value_name = "NAME=VALUE")]
    pub(crate) params: Vec<String>,

    /// Output file
    #[arg(short, long)]
    pub(crate) output: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
    pub(crate) format: ExportFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExportFormat {
    /// The raw API response
    Json,
    /// Data rows as CSV
    Csv,
    /// Data rows as Parquet
    Parquet,
}
