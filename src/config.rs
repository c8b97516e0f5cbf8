use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const DEFAULT_REPOS_FILE: &str = "repos.txt";
pub const DEFAULT_CSV_OUTPUT: &str = "output.csv";

/// Knobs for talking to the stats endpoint.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub api_base_url: String,
    /// Pause between polls while the service is still computing.
    pub retry_interval: Duration,
    /// `None` polls until the service answers.
    pub max_attempts: Option<u32>,
    pub request_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            retry_interval: Duration::from_secs(2),
            max_attempts: Some(30),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl FetchConfig {
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    /// `0` means unbounded.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = (attempts > 0).then_some(attempts);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn contributors_url(&self, owner: &str, name: &str) -> String {
        format!(
            "{}/repos/{}/{}/stats/contributors",
            self.api_base_url, owner, name
        )
    }
}
