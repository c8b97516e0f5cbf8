//! In-memory collaborators for exercising the pipeline without a network.

use crate::error::{Result, StatsError};
use crate::fetch::{RawResponse, StatsTransport};
use crate::model::AggregateRecord;
use crate::sink::Sink;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

/// Epoch seconds for 2024-01-08, a Monday inside January 2024.
pub const JAN_8_2024: i64 = 1_704_672_000;

enum Scripted {
    Respond(RawResponse),
    Fail(String),
}

/// Replays canned responses per URL, in order, and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    script: RefCell<HashMap<String, VecDeque<Scripted>>>,
    calls: RefCell<Vec<(String, String)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, url: &str, response: RawResponse) -> Self {
        self.push(url, Scripted::Respond(response));
        self
    }

    pub fn fail(self, url: &str, message: &str) -> Self {
        self.push(url, Scripted::Fail(message.to_string()));
        self
    }

    fn push(&self, url: &str, entry: Scripted) {
        self.script
            .borrow_mut()
            .entry(url.to_string())
            .or_default()
            .push_back(entry);
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.borrow().clone()
    }
}

impl StatsTransport for ScriptedTransport {
    fn get(&self, url: &str, token: &str) -> Result<RawResponse> {
        self.calls
            .borrow_mut()
            .push((url.to_string(), token.to_string()));
        let next = self
            .script
            .borrow_mut()
            .get_mut(url)
            .and_then(|queue| queue.pop_front());
        match next {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Fail(message)) => Err(StatsError::Transport(message)),
            None => Err(StatsError::Transport(format!("no scripted response for {url}"))),
        }
    }
}

pub fn ok(body: &str) -> RawResponse {
    RawResponse { status: 200, body: body.as_bytes().to_vec() }
}

pub fn accepted() -> RawResponse {
    RawResponse { status: 202, body: b"{}".to_vec() }
}

/// A one-contributor payload with a single week of activity in January 2024.
pub fn contributors_body(login: &str, commits: u64) -> String {
    serde_json::json!([{
        "total": commits,
        "author": { "login": login },
        "weeks": [{ "w": JAN_8_2024, "a": commits * 10, "d": commits, "c": commits }]
    }])
    .to_string()
}

#[derive(Default)]
pub struct VecSink {
    pub records: Vec<AggregateRecord>,
    pub finished: bool,
}

impl Sink for VecSink {
    fn accept(&mut self, record: AggregateRecord) -> Result<()> {
        self.records.push(record);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

/// Rejects every write.
pub struct BrokenSink;

impl Sink for BrokenSink {
    fn accept(&mut self, _record: AggregateRecord) -> Result<()> {
        Err(StatsError::Io(std::io::Error::other("disk full")))
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}
