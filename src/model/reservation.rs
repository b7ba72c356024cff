use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::slot::TimeSlot;

/// A court booking as returned by `GET /api/reservas/`.
///
/// Wire field names are the backend's Portuguese ones. A reservation occupies
/// the half-open interval `[start, start + duration_min)` on its court.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "campo")]
    pub court: u8,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "hora")]
    pub start: TimeSlot,
    #[serde(rename = "duracao", deserialize_with = "super::de_flexible_u16")]
    pub duration_min: u16,
}

impl Reservation {
    pub fn end_minute(&self) -> u16 {
        self.start.minutes() + self.duration_min
    }

    /// Point-in-interval test on the half-open `[start, end)` range.
    pub fn covers(&self, slot: TimeSlot) -> bool {
        self.start.minutes() <= slot.minutes() && slot.minutes() < self.end_minute()
    }

    /// Half-open interval overlap against a proposed `[start, start+duration)`.
    pub fn overlaps(&self, start: TimeSlot, duration_min: u16) -> bool {
        let sel_start = start.minutes();
        let sel_end = sel_start + duration_min;
        sel_start < self.end_minute() && sel_end > self.start.minutes()
    }
}

/// Payload for `POST /api/reservas/`, mirroring what the booking form sends.
#[derive(Debug, Clone, Serialize)]
pub struct BookingRequest {
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "hora")]
    pub time: TimeSlot,
    #[serde(rename = "campo")]
    pub court: u8,
    #[serde(rename = "duracao")]
    pub duration_min: u16,
}
