use crate::orchestrator::{BatchSummary, ProgressEvent, RepoOutcome};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Terminal rendering of orchestrator progress events.
pub struct ProgressDisplay {
    bar: ProgressBar,
}

impl ProgressDisplay {
    pub fn new(total: usize, enabled: bool) -> Self {
        let bar = if enabled {
            ProgressBar::new(total as u64)
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} Processing [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        // keep the spinner moving while a fetch is blocked on polling
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    pub fn update(&self, event: &ProgressEvent) {
        self.bar.set_position(event.completed as u64);
        let message = match &event.outcome {
            RepoOutcome::Completed { records } => {
                format!("{} ({} records)", event.repository, records)
            }
            RepoOutcome::Skipped { .. } => {
                format!("{} {}", event.repository, style("skipped").yellow())
            }
        };
        self.bar.set_message(message);
    }

    pub fn finish(&self, summary: &BatchSummary) {
        if summary.cancelled {
            self.bar.abandon_with_message("cancelled");
        } else {
            self.bar.finish_with_message("done");
        }
    }
}

/// Closing report on stderr so it never mixes with NDJSON on stdout.
pub fn print_summary(summary: &BatchSummary, destination: &str) {
    eprintln!("{}", style("Contributor Stats Summary").bold());
    eprintln!("{}", "─".repeat(50));
    eprintln!("Repositories: {}", style(summary.total).cyan());
    eprintln!("Processed: {}", style(summary.succeeded).green());
    eprintln!("Skipped: {}", style(summary.skipped).red());
    eprintln!("Records written: {}", style(summary.records).yellow());
    eprintln!("Output: {}", style(destination).dim());
    if summary.cancelled {
        eprintln!(
            "{}",
            style("Cancelled before every repository was processed; partial output kept.").yellow()
        );
    }
}
