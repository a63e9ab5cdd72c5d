//! Machine status tracking: the append-only status log, legacy status names
//! and per-period time totals.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::protocol::{PeriodSummary, StatusSlice, StatusSummary};

pub const STATUS_LOG_FILE: &str = "statuslog.txt";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const START_MARKER: &str = "Start:";
const END_MARKER: &str = "Slutt:";
const STATUS_COUNT: usize = 5;

/// Names written by older dashboards for what is now `Up time`.
const LEGACY_UP_TIME_LABELS: [&str; 3] = ["Idle", "Ingen aktiv status", "No issues"];

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum MachineStatus {
    #[default]
    #[serde(rename = "Up time")]
    UpTime,
    #[serde(rename = "Minor issue")]
    MinorIssue,
    Warning,
    Alarm,
    Urgent,
}

impl MachineStatus {
    pub const ALL: [MachineStatus; STATUS_COUNT] = [
        MachineStatus::UpTime,
        MachineStatus::MinorIssue,
        MachineStatus::Warning,
        MachineStatus::Alarm,
        MachineStatus::Urgent,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MachineStatus::UpTime => "Up time",
            MachineStatus::MinorIssue => "Minor issue",
            MachineStatus::Warning => "Warning",
            MachineStatus::Alarm => "Alarm",
            MachineStatus::Urgent => "Urgent",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            MachineStatus::UpTime => "#005A08",
            MachineStatus::MinorIssue => "#97D801",
            MachineStatus::Warning => "#E7AA00",
            MachineStatus::Alarm => "#D62400",
            MachineStatus::Urgent => "#AA00B9",
        }
    }

    /// Exact match on a current label. Used for status changes.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.label() == label)
    }

    /// Like [`MachineStatus::from_label`], but also accepts legacy names
    /// found in older log files.
    pub fn from_log_label(label: &str) -> Option<Self> {
        if LEGACY_UP_TIME_LABELS.contains(&label) {
            return Some(MachineStatus::UpTime);
        }
        Self::from_label(label)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One closed (or currently open) interval spent in a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEntry {
    pub status: MachineStatus,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl StatusEntry {
    pub fn new(status: MachineStatus, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { status, start, end }
    }

    /// Whole seconds between start and end; an end before the start counts as zero.
    pub fn duration_secs(&self) -> u64 {
        u64::try_from((self.end - self.start).num_seconds()).unwrap_or(0)
    }

    /// `"<status>, Start: <timestamp>, Slutt: <timestamp>"` without a line break.
    pub fn to_log_line(&self) -> String {
        format!(
            "{}, {START_MARKER} {}, {END_MARKER} {}",
            self.status,
            self.start.format(TIMESTAMP_FORMAT),
            self.end.format(TIMESTAMP_FORMAT),
        )
    }

    /// Parses one log line. Returns `None` for anything that is not a
    /// well-formed entry with a known (or legacy) status.
    pub fn parse_log_line(line: &str) -> Option<Self> {
        if !line.contains(START_MARKER) || !line.contains(END_MARKER) {
            return None;
        }
        let parts: Vec<&str> = line.split(',').collect();
        let [status, start, end] = parts.as_slice() else {
            return None;
        };
        Some(Self {
            status: MachineStatus::from_log_label(status.trim())?,
            start: parse_timestamp(start, START_MARKER)?,
            end: parse_timestamp(end, END_MARKER)?,
        })
    }
}

fn parse_timestamp(field: &str, marker: &str) -> Option<NaiveDateTime> {
    let raw = field.replace(marker, "");
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).ok()
}

/// Reads every well-formed entry from the text of a status log, skipping the rest.
pub fn read_log(text: &str) -> Vec<StatusEntry> {
    text.lines().filter_map(StatusEntry::parse_log_line).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Day,
    Week,
    Month,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Day, Period::Week, Period::Month];

    pub fn title(self) -> &'static str {
        match self {
            Period::Day => "Today",
            Period::Week => "This Week",
            Period::Month => "This Month",
        }
    }

    /// First day counted in this period. Weeks start on Monday.
    pub fn first_day(self, today: NaiveDate) -> NaiveDate {
        match self {
            Period::Day => today,
            Period::Week => {
                today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
            }
            Period::Month => today.with_day(1).unwrap_or(today),
        }
    }

    /// Entries are attributed to a period by the day they started on.
    pub fn includes(self, entry: &StatusEntry, today: NaiveDate) -> bool {
        let started = entry.start.date();
        match self {
            Period::Day => started == today,
            Period::Week | Period::Month => started >= self.first_day(today),
        }
    }
}

/// Seconds spent in each status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTotals {
    seconds: [u64; STATUS_COUNT],
}

impl StatusTotals {
    pub fn add(&mut self, entry: &StatusEntry) {
        self.seconds[entry.status.index()] += entry.duration_secs();
    }

    pub fn seconds(&self, status: MachineStatus) -> u64 {
        self.seconds[status.index()]
    }

    pub fn total(&self) -> u64 {
        self.seconds.iter().sum()
    }

    /// Share of the total per status, rounded half to even. `None` for a
    /// status with no time and for every status when there is no data.
    pub fn percent(&self, status: MachineStatus) -> Option<u64> {
        let total = self.total();
        let value = self.seconds(status);
        if total == 0 || value == 0 {
            return None;
        }
        let share = value as f64 * 100.0 / total as f64;
        Some(share.round_ties_even() as u64)
    }
}

pub fn sum_period(entries: &[StatusEntry], period: Period, today: NaiveDate) -> StatusTotals {
    let mut totals = StatusTotals::default();
    for entry in entries.iter().filter(|entry| period.includes(entry, today)) {
        totals.add(entry);
    }
    totals
}

/// The status currently in effect and when it began.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTracker {
    current: MachineStatus,
    since: NaiveDateTime,
}

impl StatusTracker {
    /// Starts in `Up time` at `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            current: MachineStatus::default(),
            since: now,
        }
    }

    pub fn current(&self) -> MachineStatus {
        self.current
    }

    pub fn since(&self) -> NaiveDateTime {
        self.since
    }

    /// The open interval, as it would be logged if it ended at `now`.
    pub fn active_entry(&self, now: NaiveDateTime) -> StatusEntry {
        StatusEntry::new(self.current, self.since, now)
    }

    /// Closes the current interval at `now` and starts `next`. The returned
    /// entry is what must be appended to the log. Changing to the status
    /// already in effect still closes an interval.
    pub fn change_status(&mut self, next: MachineStatus, now: NaiveDateTime) -> StatusEntry {
        let closed = self.active_entry(now);
        self.current = next;
        self.since = now;
        closed
    }

    /// Totals for every period over the logged entries plus the open interval.
    pub fn summarize(&self, logged: &[StatusEntry], now: NaiveDateTime) -> StatusSummary {
        let mut entries = logged.to_vec();
        entries.push(self.active_entry(now));
        let today = now.date();

        let periods = Period::ALL
            .into_iter()
            .map(|period| {
                let totals = sum_period(&entries, period, today);
                PeriodSummary {
                    period,
                    title: period.title().to_string(),
                    total_seconds: totals.total(),
                    slices: MachineStatus::ALL
                        .into_iter()
                        .map(|status| StatusSlice {
                            status,
                            color: status.color().to_string(),
                            seconds: totals.seconds(status),
                            percent: totals.percent(status),
                        })
                        .collect(),
                }
            })
            .collect();

        StatusSummary {
            current: self.current,
            color: self.current.color().to_string(),
            since: self.since.format(TIMESTAMP_FORMAT).to_string(),
            periods,
        }
    }
}

#[cfg(test)]
#[path = "tests/status_tests.rs"]
mod tests;
