use crate::cancel::CancelToken;
use crate::cli::RunArgs;
use crate::credentials::{CredentialProvider, EnvCredentials, StaticCredentials};
use crate::fetch::{HttpTransport, StatsFetcher};
use crate::orchestrator::Orchestrator;
use crate::progress::{print_summary, ProgressDisplay};
use crate::sink::{open_sink, OutputFormat, Sink};
use crate::source::{FileSource, RepositorySource};
use crate::window::DateWindow;
use anyhow::Context;
use chrono::Utc;
use console::Term;
use std::io::{self, BufRead};
use std::thread;
use tracing::info;

pub fn exec(mut args: RunArgs) -> anyhow::Result<()> {
    let today = Utc::now().date_naive();
    let env_credentials = EnvCredentials::new(args.token_env.clone());

    let mut prompted_token = None;
    if args.interactive {
        let answers = crate::prompt::collect(&Term::stderr(), today, env_credentials.lookup().is_none())
            .context("Failed to read interactive input")?;
        args.start = Some(answers.start);
        args.end = Some(answers.end);
        args.output = Some(answers.output);
        args.repos_file = answers.repos_file;
        args.format = OutputFormat::Csv;
        prompted_token = answers.token;
    }

    let token = match prompted_token {
        Some(t) => StaticCredentials::new(t).token(),
        None => env_credentials.token(),
    }
    .context("No GitHub token available")?;

    let window = DateWindow::resolve(args.start.as_deref(), args.end.as_deref(), today)
        .context("Failed to resolve date window")?;

    let source = FileSource::new(&args.repos_file);
    let repos = source
        .repositories()
        .with_context(|| format!("Failed to read repository list {}", source.path().display()))?;
    info!(count = repos.len(), "loaded repositories");

    let output_path = args.output_path();
    let destination = output_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());
    let mut sink = open_sink(args.format, output_path.as_deref())
        .with_context(|| format!("Failed to open output {destination}"))?;

    let config = args.fetch_config();
    let transport = HttpTransport::new(&config).context("Failed to build HTTP client")?;
    let cancel = CancelToken::new();
    if args.interactive {
        spawn_quit_listener(cancel.clone());
    }
    let fetcher = StatsFetcher::new(transport, config, cancel.clone());

    let progress = ProgressDisplay::new(repos.len(), !args.no_progress);
    let result = Orchestrator::new(&fetcher, &token, window, cancel, repos)
        .run(&mut sink, |event| progress.update(event));
    let flushed = sink.finish();

    let summary = result.context("Batch aborted")?;
    flushed.context("Failed to flush output")?;
    progress.finish(&summary);
    print_summary(&summary, &destination);

    Ok(())
}

/// Cancel the batch when the operator types `q` and presses Enter.
fn spawn_quit_listener(cancel: CancelToken) {
    thread::spawn(move || listen_for_quit(io::stdin().lock(), &cancel));
}

fn listen_for_quit<R: BufRead>(input: R, cancel: &CancelToken) {
    for line in input.lines() {
        match line {
            Ok(l) if l.trim().eq_ignore_ascii_case("q") => {
                cancel.cancel();
                break;
            }
            Ok(_) => continue,
            Err(_) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn q_line_cancels() {
        let cancel = CancelToken::new();
        listen_for_quit(Cursor::new("hello\n  Q \nmore\n"), &cancel);
        assert!(cancel.is_cancelled());
    }

    #[test]
    fn other_input_and_eof_leave_batch_running() {
        let cancel = CancelToken::new();
        listen_for_quit(Cursor::new("quit\nqq\n\n"), &cancel);
        assert!(!cancel.is_cancelled());
    }
}
