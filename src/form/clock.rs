use crate::models::RecordId;
use chrono::{DateTime, Duration, FixedOffset, Local};
use std::sync::Mutex;

/// `en-KE` short date, e.g. 17/10/2026
pub const DATE_ADDED_FORMAT: &str = "%d/%m/%Y";

/// Source of the current time for ids and creation dates
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock in the local timezone
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let now = Local::now();
        now.with_timezone(now.offset())
    }
}

/// Clock that only moves when told to
pub struct ManualClock {
    now: Mutex<DateTime<FixedOffset>>,
}

impl ManualClock {
    pub fn new(start: DateTime<FixedOffset>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

pub fn format_date_added(at: &DateTime<FixedOffset>) -> String {
    at.format(DATE_ADDED_FORMAT).to_string()
}

/// Millisecond timestamp ids that never repeat or go backwards within a session
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: Option<RecordId>,
}

impl IdGenerator {
    /// Start above the largest id already in use
    pub fn seeded(max_existing: Option<RecordId>) -> Self {
        Self { last: max_existing }
    }

    /// `None` once the id space above the last issued id is used up
    pub fn next_id(&mut self, at: &DateTime<FixedOffset>) -> Option<RecordId> {
        let millis = at.timestamp_millis();
        let id = match self.last {
            Some(last) if millis <= last => last.checked_add(1)?,
            _ => millis,
        };
        self.last = Some(id);
        Some(id)
    }
}
