use std::fmt::Display;

use anyhow::anyhow;
use serde_derive::Deserialize;

use crate::clock::{parse_clock, ClockTime, Minutes};

/// Business hours of a store as an `open-close` window on the 24 hour dial.
///
/// `open > close` is a window spanning midnight (17:00-05:00) and
/// `open == close` is a store that never closes (00:00-24:00).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct StoreHours {
    pub open: Minutes,
    pub close: Minutes,
}

impl StoreHours {
    pub fn new(open: Minutes, close: Minutes) -> Self {
        Self { open, close }
    }

    pub fn is_all_day(&self) -> bool {
        self.open == self.close
    }

    pub fn is_overnight(&self) -> bool {
        self.open > self.close
    }

    /// Admission check done once, when an order is submitted.
    /// There is no grace period: at `close` the store is closed.
    pub fn is_open(&self, now: Minutes) -> bool {
        if self.is_all_day() {
            true
        } else if self.is_overnight() {
            now >= self.open || now < self.close
        } else {
            self.open <= now && now < self.close
        }
    }
}

impl TryFrom<String> for StoreHours {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        // Input: HH:MM-HH:MM
        let (open, close) = s
            .split_once('-')
            .ok_or(anyhow!("Expecting store hours like 09:00-19:00, got {:?}", s))?;
        Ok(Self::new(parse_clock(open)?, parse_clock(close)?))
    }
}

impl Display for StoreHours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_all_day() {
            return write!(f, "open 24 hours");
        }
        let close = if self.close == 0 {
            // Reads nicer than 00:00 for "until midnight"
            "24:00".to_string()
        } else {
            ClockTime(self.close).to_string()
        };
        write!(f, "{}-{}", ClockTime(self.open), close)
    }
}
