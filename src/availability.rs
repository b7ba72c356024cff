use chrono::{NaiveDate, NaiveDateTime, Timelike, Utc};
use chrono_tz::Europe::Lisbon;

use crate::model::reservation::Reservation;
use crate::slot::TimeSlot;

/// The club has six courts, numbered 1 through 6.
pub const COURT_COUNT: u8 = 6;

pub fn courts() -> impl Iterator<Item = u8> {
    1..=COURT_COUNT
}

/// Current wall-clock time at the club (Lisbon). All availability predicates
/// take `now` as a parameter; this is the one place the real clock is read.
pub fn club_now() -> NaiveDateTime {
    Utc::now().with_timezone(&Lisbon).naive_local()
}

/// True iff `date` is the current calendar date and `slot` is at or before the
/// current minute. Future dates are never past regardless of the clock, and
/// past calendar dates are only blocked at the date-picker level, not here.
pub fn is_past(date: NaiveDate, slot: TimeSlot, now: NaiveDateTime) -> bool {
    if date != now.date() {
        return false;
    }
    let now_minute = (now.time().hour() * 60 + now.time().minute()) as u16;
    slot.minutes() <= now_minute
}

/// The reservations known for exactly one calendar date.
///
/// Replaced wholesale whenever the selected date changes; the date it was
/// fetched for is recorded so a snapshot can never be consulted for a
/// different day's selection.
#[derive(Debug, Clone)]
pub struct DaySnapshot {
    date: NaiveDate,
    reservations: Vec<Reservation>,
}

impl DaySnapshot {
    /// Build a snapshot for `date`, keeping only the rows that belong to it.
    /// The backend returns all reservations; filtering happens client-side.
    pub fn new(date: NaiveDate, rows: Vec<Reservation>) -> Self {
        let reservations = rows.into_iter().filter(|r| r.date == date).collect();
        DaySnapshot { date, reservations }
    }

    /// A snapshot with no known reservations, used when the fetch fails so the
    /// picker stays usable.
    pub fn empty(date: NaiveDate) -> Self {
        DaySnapshot { date, reservations: Vec::new() }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// Point-occupancy test: is some reservation covering `slot`? With a court
    /// given, only that court's reservations count; with `None`, any court
    /// matches. Duration-agnostic, used to grey out the time grid.
    pub fn is_slot_occupied(&self, slot: TimeSlot, court: Option<u8>) -> bool {
        self.reservations.iter().any(|r| {
            if let Some(c) = court {
                if r.court != c {
                    return false;
                }
            }
            r.covers(slot)
        })
    }

    /// A slot is selectable when it is not in the past and at least one of the
    /// six courts is free at that instant. Deliberately coarse: duration is
    /// not known yet at the time-picking step, so this only tests the point.
    pub fn is_slot_selectable(&self, slot: TimeSlot, now: NaiveDateTime) -> bool {
        if is_past(self.date, slot, now) {
            return false;
        }
        courts().any(|c| !self.is_slot_occupied(slot, Some(c)))
    }

    /// Precise, duration-aware check for the court-picking step. With time or
    /// duration still unset there is no constraint yet and every court shows
    /// as available. Otherwise the proposed `[time, time+duration)` interval
    /// must not overlap any reservation on that court.
    pub fn is_court_available(
        &self,
        court: u8,
        time: Option<TimeSlot>,
        duration_min: Option<u16>,
    ) -> bool {
        let (Some(time), Some(duration_min)) = (time, duration_min) else {
            return true;
        };
        !self
            .reservations
            .iter()
            .filter(|r| r.court == court)
            .any(|r| r.overlaps(time, duration_min))
    }
}
