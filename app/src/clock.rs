use std::fmt::Display;
use std::sync::atomic::{AtomicU32, Ordering};

use anyhow::{anyhow, bail, Result};
use chrono::Timelike;

// Minutes since midnight, always in [0, MINUTES_PER_DAY) unless noted.
pub type Minutes = u32;

pub const MINUTES_PER_DAY: Minutes = 24 * 60;

/// Caller guarantees `hour < 24` and `minute < 60`.
pub fn to_minutes(hour: u32, minute: u32) -> Minutes {
    hour * 60 + minute
}

/// `base + delta` on a 24 hour dial. 23:50 + 20 minutes is 00:10.
pub fn add_wrapped(base: Minutes, delta: Minutes) -> Minutes {
    (base + delta % MINUTES_PER_DAY) % MINUTES_PER_DAY
}

/// Minutes to go from `now` until the dial shows `target` again.
/// A target numerically behind `now` is taken to be tomorrow's.
pub fn remaining_wrapped(target: Minutes, now: Minutes) -> Minutes {
    (target + MINUTES_PER_DAY - now) % MINUTES_PER_DAY
}

/// Parses "HH:MM". "24:00" is accepted and wraps to midnight.
pub fn parse_clock(s: &str) -> Result<Minutes> {
    let (h, m) = s
        .trim()
        .split_once(':')
        .ok_or(anyhow!("Expecting HH:MM, got {:?}", s))?;
    let hour: u32 = h.trim().parse().map_err(|_| anyhow!("Bad hour in {:?}", s))?;
    let minute: u32 = m.trim().parse().map_err(|_| anyhow!("Bad minute in {:?}", s))?;
    if minute >= 60 || hour > 24 || (hour == 24 && minute != 0) {
        bail!("{:?} is not a time of day", s);
    }
    Ok(to_minutes(hour, minute) % MINUTES_PER_DAY)
}

pub fn format_clock(minutes: Minutes) -> String {
    ClockTime(minutes).to_string()
}

/// Renders minutes since midnight as "HH:MM".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime(pub Minutes);

impl Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let minutes = self.0 % MINUTES_PER_DAY;
        write!(f, "{:02}:{:02}", minutes / 60, minutes % 60)
    }
}

pub trait Clock {
    // Current wall clock time as minutes since midnight
    fn now(&self) -> Minutes;
}

pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> Minutes {
        let now = chrono::Local::now();
        to_minutes(now.hour(), now.minute())
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct FixedClock {
    minutes: AtomicU32,
}

impl FixedClock {
    pub fn new(minutes: Minutes) -> Self {
        Self {
            minutes: AtomicU32::new(minutes % MINUTES_PER_DAY),
        }
    }

    pub fn at(hour: u32, minute: u32) -> Self {
        Self::new(to_minutes(hour, minute))
    }

    pub fn set(&self, minutes: Minutes) {
        self.minutes.store(minutes % MINUTES_PER_DAY, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Minutes {
        self.minutes.load(Ordering::SeqCst)
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Minutes {
        (**self).now()
    }
}
