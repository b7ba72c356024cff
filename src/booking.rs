use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;
use tracing::{info, warn};

use crate::api::ApiError;
use crate::availability::{self, DaySnapshot};
use crate::model::reservation::{BookingRequest, Reservation};
use crate::slot::TimeSlot;

/// The calls the booking workflow needs from the outside world. Implemented
/// by [`crate::api::ClubApi`] and by in-memory fakes in tests. Session state
/// is deliberately not part of this contract: the workflow reacts to a 401 on
/// submission and leaves the who-am-I question to the session provider.
pub trait ClubBackend {
    fn reservations_on(&self, date: NaiveDate) -> Result<Vec<Reservation>, ApiError>;
    fn create_reservation(&self, request: &BookingRequest) -> Result<Option<String>, ApiError>;
}

/// The three booking lengths the club sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingDuration {
    OneHour,
    NinetyMinutes,
    TwoHours,
}

impl BookingDuration {
    pub const ALL: [BookingDuration; 3] = [
        BookingDuration::OneHour,
        BookingDuration::NinetyMinutes,
        BookingDuration::TwoHours,
    ];

    pub fn minutes(self) -> u16 {
        match self {
            BookingDuration::OneHour => 60,
            BookingDuration::NinetyMinutes => 90,
            BookingDuration::TwoHours => 120,
        }
    }

    pub fn from_minutes(minutes: u16) -> Option<Self> {
        match minutes {
            60 => Some(BookingDuration::OneHour),
            90 => Some(BookingDuration::NinetyMinutes),
            120 => Some(BookingDuration::TwoHours),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BookingDuration::OneHour => "1 hora",
            BookingDuration::NinetyMinutes => "1h30",
            BookingDuration::TwoHours => "2 horas",
        }
    }
}

impl FromStr for BookingDuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let minutes: u16 = s
            .trim()
            .parse()
            .map_err(|_| format!("duração inválida: {s}"))?;
        BookingDuration::from_minutes(minutes)
            .ok_or_else(|| format!("duração inválida: {s} (usa 60, 90 ou 120)"))
    }
}

/// The four progressive form fields. Filled strictly left to right; changing
/// any field clears everything to its right.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub date: Option<NaiveDate>,
    pub time: Option<TimeSlot>,
    pub duration: Option<BookingDuration>,
    pub court: Option<u8>,
}

/// Why a slot on the time grid cannot (or can) be picked right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    /// Today's date is selected and this slot is already behind the clock.
    Past,
    /// All six courts are taken at this instant.
    Full,
    Available,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("por favor preenche todos os campos")]
    Incomplete,
    #[error("só é possível reservar a partir de hoje")]
    PastDate,
    #[error("esse horário não está disponível")]
    SlotUnavailable,
    #[error("o campo {0} está ocupado nesse horário")]
    CourtUnavailable(u8),
    #[error("é necessário fazer login para reservar")]
    AuthRequired,
    #[error("{0}")]
    Rejected(String),
}

/// A completed selection, ready to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSummary {
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub duration: BookingDuration,
    pub court: u8,
}

impl fmt::Display for BookingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Data: {}", self.date.format("%d/%m/%Y"))?;
        writeln!(f, "Hora: {}", self.time)?;
        writeln!(f, "Duração: {}", self.duration.label())?;
        write!(f, "Campo: Campo {}", self.court)
    }
}

/// Date → time → duration → court, with availability re-derived from the
/// engine after every transition. Owns the day's reservation snapshot and
/// replaces it wholesale whenever the date changes.
pub struct BookingWorkflow<B> {
    backend: B,
    selection: Selection,
    snapshot: Option<DaySnapshot>,
}

impl<B: ClubBackend> BookingWorkflow<B> {
    pub fn new(backend: B) -> Self {
        BookingWorkflow {
            backend,
            selection: Selection::default(),
            snapshot: None,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The snapshot, but only when it was fetched for the currently selected
    /// date. A mismatched snapshot is treated as absent.
    fn active_snapshot(&self) -> Option<&DaySnapshot> {
        match (self.snapshot.as_ref(), self.selection.date) {
            (Some(snapshot), Some(date)) if snapshot.date() == date => Some(snapshot),
            _ => None,
        }
    }

    /// Step 1. Only dates from today onward are accepted. Re-selecting the
    /// current date is a no-op: no refetch, later steps kept. An actual change
    /// refetches the day's reservations and clears time, duration and court.
    pub fn select_date(&mut self, date: NaiveDate, now: NaiveDateTime) -> Result<(), BookingError> {
        if self.selection.date == Some(date) {
            return Ok(());
        }
        if date < now.date() {
            return Err(BookingError::PastDate);
        }
        let snapshot = match self.backend.reservations_on(date) {
            Ok(rows) => DaySnapshot::new(date, rows),
            Err(e) => {
                // Degrade to an empty day rather than blocking the picker;
                // the backend will still reject a conflicting booking.
                warn!(error = %e, %date, "failed to load reservations, assuming none");
                DaySnapshot::empty(date)
            }
        };
        self.selection = Selection {
            date: Some(date),
            ..Selection::default()
        };
        self.snapshot = Some(snapshot);
        Ok(())
    }

    /// Step 2. The slot must be one of the grid values and selectable (not
    /// past, at least one court free at that instant). Changing the time
    /// clears duration and court.
    pub fn select_time(&mut self, slot: TimeSlot, now: NaiveDateTime) -> Result<(), BookingError> {
        let snapshot = self.active_snapshot().ok_or(BookingError::Incomplete)?;
        if !slot.is_on_grid() || !snapshot.is_slot_selectable(slot, now) {
            return Err(BookingError::SlotUnavailable);
        }
        if self.selection.time == Some(slot) {
            return Ok(());
        }
        self.selection.time = Some(slot);
        self.selection.duration = None;
        self.selection.court = None;
        Ok(())
    }

    /// Step 3. Any duration may be chosen; narrowing happens at the court
    /// step. Changing the duration clears the court.
    pub fn select_duration(&mut self, duration: BookingDuration) -> Result<(), BookingError> {
        if self.selection.time.is_none() {
            return Err(BookingError::Incomplete);
        }
        if self.selection.duration == Some(duration) {
            return Ok(());
        }
        self.selection.duration = Some(duration);
        self.selection.court = None;
        Ok(())
    }

    /// Step 4. The precise interval-overlap check against the chosen time and
    /// duration decides which courts qualify.
    pub fn select_court(&mut self, court: u8) -> Result<(), BookingError> {
        if self.selection.duration.is_none() {
            return Err(BookingError::Incomplete);
        }
        if !(1..=availability::COURT_COUNT).contains(&court) {
            return Err(BookingError::CourtUnavailable(court));
        }
        let snapshot = self.active_snapshot().ok_or(BookingError::Incomplete)?;
        let available = snapshot.is_court_available(
            court,
            self.selection.time,
            self.selection.duration.map(BookingDuration::minutes),
        );
        if !available {
            return Err(BookingError::CourtUnavailable(court));
        }
        self.selection.court = Some(court);
        Ok(())
    }

    /// Status of every slot on the grid for rendering. Empty until a date is
    /// selected.
    pub fn slot_statuses(&self, now: NaiveDateTime) -> Vec<(TimeSlot, SlotStatus)> {
        let Some(snapshot) = self.active_snapshot() else {
            return Vec::new();
        };
        TimeSlot::grid()
            .map(|slot| {
                let status = if availability::is_past(snapshot.date(), slot, now) {
                    SlotStatus::Past
                } else if availability::courts()
                    .all(|c| snapshot.is_slot_occupied(slot, Some(c)))
                {
                    SlotStatus::Full
                } else {
                    SlotStatus::Available
                };
                (slot, status)
            })
            .collect()
    }

    pub fn available_slots(&self, now: NaiveDateTime) -> Vec<TimeSlot> {
        self.slot_statuses(now)
            .into_iter()
            .filter(|(_, status)| *status == SlotStatus::Available)
            .map(|(slot, _)| slot)
            .collect()
    }

    /// Courts that pass the duration-aware check for the current time and
    /// duration. All six while either is still unset.
    pub fn available_courts(&self) -> Vec<u8> {
        let Some(snapshot) = self.active_snapshot() else {
            return availability::courts().collect();
        };
        let duration_min = self.selection.duration.map(BookingDuration::minutes);
        availability::courts()
            .filter(|&c| snapshot.is_court_available(c, self.selection.time, duration_min))
            .collect()
    }

    /// Derivable once all four fields are set.
    pub fn summary(&self) -> Option<BookingSummary> {
        Some(BookingSummary {
            date: self.selection.date?,
            time: self.selection.time?,
            duration: self.selection.duration?,
            court: self.selection.court?,
        })
    }

    /// Confirm the reservation. Incomplete selections fail locally without
    /// touching the network. On success the form and snapshot are reset so a
    /// fresh booking can start.
    pub fn submit(&mut self) -> Result<String, BookingError> {
        let summary = self.summary().ok_or(BookingError::Incomplete)?;
        let request = BookingRequest {
            date: summary.date,
            time: summary.time,
            court: summary.court,
            duration_min: summary.duration.minutes(),
        };
        info!(date = %request.date, time = %request.time, court = request.court, "submitting reservation");
        match self.backend.create_reservation(&request) {
            Ok(message) => {
                self.selection = Selection::default();
                self.snapshot = None;
                Ok(message.unwrap_or_else(|| "Reserva criada com sucesso!".to_string()))
            }
            Err(ApiError::AuthRequired) => Err(BookingError::AuthRequired),
            Err(ApiError::Rejected { message }) => Err(BookingError::Rejected(
                message.unwrap_or_else(|| "Erro ao criar reserva".to_string()),
            )),
            Err(ApiError::Transport(e)) => {
                warn!(error = %e, "reservation submit failed in transit");
                Err(BookingError::Rejected("Erro ao criar reserva".to_string()))
            }
        }
    }
}
