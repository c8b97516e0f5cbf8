//! Sequential batch driver: one repository in flight, progress after each.

use crate::aggregate::aggregate;
use crate::cancel::CancelToken;
use crate::error::{Result, StatsError};
use crate::fetch::{StatsFetcher, StatsTransport};
use crate::model::RepoId;
use crate::sink::Sink;
use crate::window::DateWindow;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    /// Index of the next repository to process.
    Processing(usize),
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoOutcome {
    Completed { records: usize },
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// 1-based count of repositories finished so far.
    pub completed: usize,
    pub total: usize,
    pub repository: String,
    pub outcome: RepoOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub records: usize,
    pub cancelled: bool,
}

pub struct Orchestrator<'a, T: StatsTransport> {
    fetcher: &'a StatsFetcher<T>,
    token: &'a str,
    window: DateWindow,
    cancel: CancelToken,
    repos: Vec<String>,
    state: BatchState,
    summary: BatchSummary,
}

impl<'a, T: StatsTransport> Orchestrator<'a, T> {
    pub fn new(
        fetcher: &'a StatsFetcher<T>,
        token: &'a str,
        window: DateWindow,
        cancel: CancelToken,
        repos: Vec<String>,
    ) -> Self {
        let total = repos.len();
        Self {
            fetcher,
            token,
            window,
            cancel,
            repos,
            state: BatchState::Idle,
            summary: BatchSummary { total, ..BatchSummary::default() },
        }
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    pub fn summary(&self) -> &BatchSummary {
        &self.summary
    }

    /// Process the next repository. Returns its progress event, or `None` once
    /// the batch is done (exhausted or cancelled).
    pub fn step<S: Sink + ?Sized>(&mut self, sink: &mut S) -> Result<Option<ProgressEvent>> {
        let index = match self.state {
            BatchState::Idle => 0,
            BatchState::Processing(i) => i,
            BatchState::Done => return Ok(None),
        };

        if index >= self.repos.len() {
            self.state = BatchState::Done;
            return Ok(None);
        }
        if self.cancel.is_cancelled() {
            self.finish_cancelled();
            return Ok(None);
        }
        self.state = BatchState::Processing(index);

        let identifier = self.repos[index].clone();
        let outcome = match self.process(&identifier, sink) {
            Ok(records) => {
                self.summary.succeeded += 1;
                RepoOutcome::Completed { records }
            }
            Err(StatsError::Cancelled) => {
                self.finish_cancelled();
                return Ok(None);
            }
            Err(e) if e.is_per_repository() => {
                warn!(repository = %identifier, error = %e, "skipping repository");
                self.summary.skipped += 1;
                RepoOutcome::Skipped { reason: e.to_string() }
            }
            Err(e) => {
                self.state = BatchState::Done;
                return Err(e);
            }
        };

        let next = index + 1;
        self.state = if next == self.repos.len() {
            BatchState::Done
        } else {
            BatchState::Processing(next)
        };

        Ok(Some(ProgressEvent {
            completed: next,
            total: self.repos.len(),
            repository: identifier,
            outcome,
        }))
    }

    /// Drive the batch to completion, reporting each repository to `on_progress`.
    pub fn run<S, P>(&mut self, sink: &mut S, mut on_progress: P) -> Result<BatchSummary>
    where
        S: Sink + ?Sized,
        P: FnMut(&ProgressEvent),
    {
        info!(repositories = self.repos.len(), "starting batch");
        while let Some(event) = self.step(sink)? {
            on_progress(&event);
        }
        info!(
            succeeded = self.summary.succeeded,
            skipped = self.summary.skipped,
            records = self.summary.records,
            cancelled = self.summary.cancelled,
            "batch finished"
        );
        Ok(self.summary.clone())
    }

    fn process<S: Sink + ?Sized>(&mut self, identifier: &str, sink: &mut S) -> Result<usize> {
        let repo = RepoId::parse(identifier)?;
        info!(repository = %repo, "fetching contributor stats");
        let stats = self.fetcher.fetch(&repo, self.token)?;

        let window = self.window;
        let mut written = 0;
        for record in stats
            .iter()
            .filter_map(|history| aggregate(identifier, history, &window))
        {
            sink.accept(record)?;
            written += 1;
            self.summary.records += 1;
        }
        Ok(written)
    }

    fn finish_cancelled(&mut self) {
        info!("batch cancelled");
        self.summary.cancelled = true;
        self.state = BatchState::Done;
    }
}
