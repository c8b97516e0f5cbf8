use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Supplies repository identifiers in processing order.
pub trait RepositorySource {
    fn repositories(&self) -> Result<Vec<String>>;
}

impl RepositorySource for Vec<String> {
    fn repositories(&self) -> Result<Vec<String>> {
        Ok(self.clone())
    }
}

/// Newline-delimited list of `owner/name` entries. Whitespace is trimmed and
/// blank lines dropped; validation is left to the orchestrator.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RepositorySource for FileSource {
    fn repositories(&self) -> Result<Vec<String>> {
        let data = fs::read_to_string(&self.path)?;
        Ok(parse_list(&data))
    }
}

fn parse_list(data: &str) -> Vec<String> {
    data.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
