use crate::config::DEFAULT_TOKEN_ENV;
use crate::error::{Result, StatsError};
use std::env;
use tracing::info;

/// Supplies the bearer token sent with every request.
pub trait CredentialProvider {
    fn token(&self) -> Result<String>;
}

pub struct StaticCredentials(String);

impl StaticCredentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl CredentialProvider for StaticCredentials {
    fn token(&self) -> Result<String> {
        non_empty(self.0.clone(), "token")
    }
}

/// Reads the token from an environment variable, loading `.env` from the
/// working directory when the variable is not already set.
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    /// Value already present in the process environment, without touching `.env`.
    pub fn lookup(&self) -> Option<String> {
        env::var(&self.var).ok().filter(|t| !t.trim().is_empty())
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_ENV)
    }
}

impl CredentialProvider for EnvCredentials {
    fn token(&self) -> Result<String> {
        if let Some(token) = self.lookup() {
            info!(var = %self.var, "token read from environment");
            return Ok(token);
        }

        match dotenvy::dotenv() {
            Ok(path) => info!(path = %path.display(), "loaded .env file"),
            Err(e) => {
                return Err(StatsError::MissingCredential(format!(
                    "{} is not set and no usable .env file was found ({e})",
                    self.var
                )))
            }
        }

        let token = env::var(&self.var).unwrap_or_default();
        non_empty(token, &self.var)
    }
}

fn non_empty(token: String, what: &str) -> Result<String> {
    let token = token.trim().to_string();
    if token.is_empty() {
        return Err(StatsError::MissingCredential(format!("{what} is empty")));
    }
    Ok(token)
}
