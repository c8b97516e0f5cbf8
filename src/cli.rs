use crate::config::{FetchConfig, DEFAULT_API_URL, DEFAULT_CSV_OUTPUT, DEFAULT_REPOS_FILE, DEFAULT_TOKEN_ENV};
use crate::sink::OutputFormat;
use anyhow::Result;
use clap::{ArgAction, Args, Parser};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ghcontrib")]
#[command(about = "Per-contributor additions, deletions and commits across GitHub repositories")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub run: RunArgs,

    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity (-v info, -vv debug)")]
    pub verbose: u8,
}

#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    #[arg(long, help = "File listing owner/name repositories, one per line", default_value = DEFAULT_REPOS_FILE)]
    pub repos_file: PathBuf,

    #[arg(long, help = "Window start (YYYY-MM-DD, RFC3339, or 'N days ago'); default one month before end")]
    pub start: Option<String>,

    #[arg(long, help = "Window end, inclusive (YYYY-MM-DD, RFC3339, or 'N days ago'); default today")]
    pub end: Option<String>,

    #[arg(long, value_enum, help = "Output format", default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    #[arg(long, help = "Output path ('-' for stdout); CSV defaults to output.csv, NDJSON to stdout")]
    pub output: Option<PathBuf>,

    #[arg(long, env = "GITHUB_API_URL", help = "GitHub API base URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[arg(long, help = "Wait between polls while GitHub computes stats", default_value = "2s")]
    pub retry_interval: humantime::Duration,

    #[arg(long, help = "Polls per repository before giving up (0 = no limit)", default_value_t = 30)]
    pub max_attempts: u32,

    #[arg(long, help = "Timeout for a single HTTP request", default_value = "30s")]
    pub request_timeout: humantime::Duration,

    #[arg(long, help = "Environment variable holding the token", default_value = DEFAULT_TOKEN_ENV)]
    pub token_env: String,

    #[arg(long = "interactive", alias = "tui", help = "Prompt for parameters and allow cancelling with q")]
    pub interactive: bool,

    #[arg(long, help = "Disable the progress bar")]
    pub no_progress: bool,
}

impl RunArgs {
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig::default()
            .with_api_base_url(self.api_url.clone())
            .with_retry_interval(*self.retry_interval)
            .with_max_attempts(self.max_attempts)
            .with_request_timeout(*self.request_timeout)
    }

    /// Where records go; `None` means stdout.
    pub fn output_path(&self) -> Option<PathBuf> {
        match (&self.output, self.format) {
            (Some(p), _) if p.as_os_str() == "-" => None,
            (Some(p), _) => Some(p.clone()),
            (None, OutputFormat::Csv) => Some(PathBuf::from(DEFAULT_CSV_OUTPUT)),
            (None, OutputFormat::Ndjson) => None,
        }
    }
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        init_logging(self.verbose);
        crate::run::exec(self.run)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
