pub mod aggregate;
pub mod cancel;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod fetch;
pub mod model;
pub mod orchestrator;
pub mod progress;
pub mod prompt;
pub mod run;
pub mod sink;
pub mod source;
pub mod util;
pub mod window;

#[cfg(test)]
mod test_utils;

pub use error::{Result, StatsError};
