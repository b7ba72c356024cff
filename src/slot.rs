use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// First bookable slot of the day (08:00).
pub const OPENING_MINUTE: u16 = 8 * 60;
/// Last bookable slot of the day (23:00).
pub const CLOSING_MINUTE: u16 = 23 * 60;
/// Spacing between consecutive slots on the picker grid.
pub const SLOT_STEP_MINUTES: u16 = 30;

/// A wall-clock time stored as minutes since midnight.
///
/// Kept as plain minutes so occupancy arithmetic stays integer math; displayed
/// as `HH:MM`. Parsing also accepts `HH:MM:SS` because the backend serializes
/// times with seconds.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(u16);

impl TimeSlot {
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes < 24 * 60 { Some(TimeSlot(minutes)) } else { None }
    }

    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(TimeSlot(hour * 60 + minute))
        } else {
            None
        }
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// The fixed picker grid: 08:00 through 23:00 inclusive, every 30 minutes.
    pub fn grid() -> impl Iterator<Item = TimeSlot> {
        (OPENING_MINUTE..=CLOSING_MINUTE)
            .step_by(SLOT_STEP_MINUTES as usize)
            .map(TimeSlot)
    }

    /// Whether this time is one of the 31 bookable grid values.
    pub fn is_on_grid(self) -> bool {
        (OPENING_MINUTE..=CLOSING_MINUTE).contains(&self.0)
            && (self.0 - OPENING_MINUTE) % SLOT_STEP_MINUTES == 0
    }

    pub fn to_naive_time(self) -> NaiveTime {
        // In-range by construction (minutes < 1440)
        NaiveTime::from_hms_opt(self.hour() as u32, self.minute() as u32, 0)
            .expect("slot minutes are always a valid wall-clock time")
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl fmt::Debug for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeSlot({self})")
    }
}

impl FromStr for TimeSlot {
    type Err = String;

    /// Parses `HH:MM`, ignoring a trailing `:SS` when present.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let (Some(h), Some(m)) = (parts.next(), parts.next()) else {
            return Err(format!("hora inválida: {s}"));
        };
        let hour: u16 = h.trim().parse().map_err(|_| format!("hora inválida: {s}"))?;
        let minute: u16 = m.trim().parse().map_err(|_| format!("hora inválida: {s}"))?;
        TimeSlot::from_hm(hour, minute).ok_or_else(|| format!("hora inválida: {s}"))
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
