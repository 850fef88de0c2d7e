use chrono::{DateTime, NaiveTime, Utc};

/// Time source for the scheduling engine. Abstracted so tests can pin the
/// wall clock and the time-of-day independently.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn time_of_day(&self) -> NaiveTime {
        self.now().time()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests.
#[derive(Debug)]
pub struct ManualClock {
    now: std::sync::Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: std::sync::Mutex::new(now),
        }
    }

    /// Build a clock pinned to today at the given time of day.
    pub fn at_time_of_day(time: NaiveTime) -> Self {
        let today = Utc::now().date_naive();
        Self::new(today.and_time(time).and_utc())
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }

    pub fn advance(&self, delta: chrono::Duration) {
        let mut now = self.now.lock().unwrap();
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
