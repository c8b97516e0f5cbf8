use crate::cancel::CancelToken;
use crate::config::FetchConfig;
use crate::error::{Result, StatsError};
use crate::model::{ContributorHistory, RepoId};
use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use tracing::{debug, info};

const USER_AGENT: &str = concat!("ghcontrib/", env!("CARGO_PKG_VERSION"));
const GITHUB_JSON: &str = "application/vnd.github+json";

/// Status and body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// The single request the fetcher needs: an authenticated GET.
pub trait StatsTransport {
    fn get(&self, url: &str, token: &str) -> Result<RawResponse>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = client_builder(config).build()?;
        Ok(Self { client })
    }
}

fn client_builder(config: &FetchConfig) -> ClientBuilder {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(config.request_timeout)
}

impl StatsTransport for HttpTransport {
    fn get(&self, url: &str, token: &str) -> Result<RawResponse> {
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .header(ACCEPT, GITHUB_JSON)
            .send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();
        Ok(RawResponse { status, body })
    }
}

/// Fetches per-contributor weekly statistics, polling while GitHub is still
/// computing them (HTTP 202).
pub struct StatsFetcher<T: StatsTransport> {
    transport: T,
    config: FetchConfig,
    cancel: CancelToken,
}

impl<T: StatsTransport> StatsFetcher<T> {
    pub fn new(transport: T, config: FetchConfig, cancel: CancelToken) -> Self {
        Self { transport, config, cancel }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn fetch(&self, repo: &RepoId, token: &str) -> Result<Vec<ContributorHistory>> {
        let url = self.config.contributors_url(&repo.owner, &repo.name);
        let mut attempts: u32 = 0;

        loop {
            if self.cancel.is_cancelled() {
                return Err(StatsError::Cancelled);
            }

            attempts += 1;
            debug!(repository = %repo, attempt = attempts, "requesting contributor stats");
            let response = self.transport.get(&url, token)?;

            if response.status == StatusCode::OK.as_u16() {
                let stats: Vec<ContributorHistory> = serde_json::from_slice(&response.body)?;
                debug!(repository = %repo, contributors = stats.len(), "stats received");
                return Ok(stats);
            }
            if response.status != StatusCode::ACCEPTED.as_u16() {
                return Err(StatsError::Remote { status: response.status });
            }

            if let Some(max) = self.config.max_attempts {
                if attempts >= max {
                    return Err(StatsError::Timeout { attempts });
                }
            }
            info!(
                repository = %repo,
                attempt = attempts,
                "GitHub is generating stats, waiting {}",
                humantime::format_duration(self.config.retry_interval)
            );
            if self.cancel.wait(self.config.retry_interval) {
                return Err(StatsError::Cancelled);
            }
        }
    }
}
