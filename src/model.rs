use crate::error::{Result, StatsError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SECONDS_PER_WEEK: i64 = 7 * 24 * 60 * 60;

/// Login reported for contributors whose account no longer exists.
pub const GHOST_LOGIN: &str = "ghost";

/// One week of activity for one contributor, as reported by the stats endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekBucket {
    #[serde(rename = "w")]
    pub week_start: i64,
    #[serde(rename = "a")]
    pub additions: u64,
    #[serde(rename = "d")]
    pub deletions: u64,
    #[serde(rename = "c")]
    pub commits: u64,
}

impl WeekBucket {
    pub fn week_end(&self) -> i64 {
        self.week_start.saturating_add(SECONDS_PER_WEEK)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ContributorWire")]
pub struct ContributorHistory {
    pub login: String,
    pub weeks: Vec<WeekBucket>,
}

#[derive(Deserialize)]
struct AuthorWire {
    login: String,
}

#[derive(Deserialize)]
struct ContributorWire {
    author: Option<AuthorWire>,
    #[serde(default)]
    weeks: Vec<WeekBucket>,
}

impl From<ContributorWire> for ContributorHistory {
    fn from(wire: ContributorWire) -> Self {
        Self {
            login: wire
                .author
                .map(|a| a.login)
                .unwrap_or_else(|| GHOST_LOGIN.to_string()),
            weeks: wire.weeks,
        }
    }
}

/// A validated `owner/name` repository identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    pub fn parse(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.split('/').collect();
        match parts.as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(StatsError::Validation(input.to_string())),
        }
    }
}

impl FromStr for RepoId {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A contributor's summed activity inside a window, for one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateRecord {
    pub repository: String,
    pub contributor: String,
    pub additions: u64,
    pub deletions: u64,
    pub commits: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
