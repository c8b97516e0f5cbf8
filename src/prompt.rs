//! Line-by-line collection of run parameters for `--interactive`.

use crate::config::{DEFAULT_CSV_OUTPUT, DEFAULT_REPOS_FILE};
use crate::util::{first_of_month, DATE_FORMAT};
use chrono::NaiveDate;
use console::{style, Term};
use std::io;
use std::path::PathBuf;

/// The line-oriented terminal operations the prompts need.
pub trait PromptTerm {
    fn write_line(&self, s: &str) -> io::Result<()>;
    fn write_str(&self, s: &str) -> io::Result<()>;
    fn read_line(&self) -> io::Result<String>;
    fn read_secure_line(&self) -> io::Result<String>;
}

impl PromptTerm for Term {
    fn write_line(&self, s: &str) -> io::Result<()> {
        Term::write_line(self, s)
    }

    fn write_str(&self, s: &str) -> io::Result<()> {
        Term::write_str(self, s)
    }

    fn read_line(&self) -> io::Result<String> {
        Term::read_line(self)
    }

    fn read_secure_line(&self) -> io::Result<String> {
        Term::read_secure_line(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub start: String,
    pub end: String,
    pub token: Option<String>,
    pub output: PathBuf,
    pub repos_file: PathBuf,
}

/// Ask for each parameter in turn. An empty answer takes the default shown in
/// brackets. The token is only requested when `need_token` is set.
pub fn collect<T: PromptTerm + ?Sized>(term: &T, today: NaiveDate, need_token: bool) -> io::Result<Answers> {
    let default_start = first_of_month(today).format(DATE_FORMAT).to_string();
    let default_end = today.format(DATE_FORMAT).to_string();

    term.write_line(&style("Enter parameters for processing:").bold().to_string())?;
    term.write_line(&style("(Press Enter for the default value)").dim().to_string())?;

    let start = ask(term, "Start Date", &default_start)?;
    let end = ask(term, "End Date", &default_end)?;
    let token = if need_token {
        term.write_str(&format!("{} ", style("GitHub Token:").bold()))?;
        let value = term.read_secure_line()?;
        Some(value.trim().to_string()).filter(|t| !t.is_empty())
    } else {
        None
    };
    let output = PathBuf::from(ask(term, "Output File Path", DEFAULT_CSV_OUTPUT)?);
    let repos_file = PathBuf::from(ask(term, "Repositories File Path", DEFAULT_REPOS_FILE)?);

    let answers = Answers { start, end, token, output, repos_file };
    echo(term, &answers)?;
    Ok(answers)
}

fn ask<T: PromptTerm + ?Sized>(term: &T, label: &str, default: &str) -> io::Result<String> {
    term.write_str(&format!(
        "{} {} ",
        style(format!("{label}:")).bold(),
        style(format!("[{default}]")).dim()
    ))?;
    let line = term.read_line()?;
    Ok(or_default(&line, default))
}

fn or_default(value: &str, default: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

fn echo<T: PromptTerm + ?Sized>(term: &T, answers: &Answers) -> io::Result<()> {
    term.write_line("")?;
    term.write_line(&style("Inputs received:").bold().to_string())?;
    term.write_line(&format!("Start Date: {}", answers.start))?;
    term.write_line(&format!("End Date: {}", answers.end))?;
    if answers.token.is_some() {
        term.write_line("GitHub Token: [provided]")?;
    }
    term.write_line(&format!("Output File: {}", answers.output.display()))?;
    term.write_line(&format!("Repositories File: {}", answers.repos_file.display()))?;
    term.write_line("")?;
    term.write_line("Processing... type q and press Enter to cancel.")?;
    Ok(())
}
