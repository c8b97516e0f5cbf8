use crate::model::{AggregateRecord, ContributorHistory, WeekBucket};
use crate::window::DateWindow;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Totals {
    additions: u64,
    deletions: u64,
    commits: u64,
}

impl Totals {
    fn add(&mut self, week: &WeekBucket) {
        self.additions = self.additions.saturating_add(week.additions);
        self.deletions = self.deletions.saturating_add(week.deletions);
        self.commits = self.commits.saturating_add(week.commits);
    }

    fn is_zero(&self) -> bool {
        self.additions == 0 && self.deletions == 0 && self.commits == 0
    }
}

/// True when the seven days starting at `week.week_start` touch the window.
/// Both ends are inclusive: a week starting exactly at `window.end`, or ending
/// exactly at `window.start`, counts.
pub fn overlaps(week: &WeekBucket, window: &DateWindow) -> bool {
    let start = window.start.timestamp();
    let end = window.end.timestamp();
    !(week.week_start > end || week.week_end() < start)
}

/// Sum a contributor's weeks that overlap `window`. Returns `None` when every
/// total is zero, which also covers contributors with no weeks at all.
pub fn aggregate(
    repository: &str,
    history: &ContributorHistory,
    window: &DateWindow,
) -> Option<AggregateRecord> {
    let mut totals = Totals::default();
    for week in history.weeks.iter().filter(|w| overlaps(w, window)) {
        totals.add(week);
    }

    if totals.is_zero() {
        return None;
    }

    Some(AggregateRecord {
        repository: repository.to_string(),
        contributor: history.login.clone(),
        additions: totals.additions,
        deletions: totals.deletions,
        commits: totals.commits,
        start_date: window.start_date(),
        end_date: window.end_date(),
    })
}
