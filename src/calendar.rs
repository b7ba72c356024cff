use chrono::Duration;
use icalendar::{Calendar, Component, Event, EventLike};

use crate::model::reservation::Reservation;

/// Render reservations as an iCalendar document so members can import their
/// court bookings into a personal calendar. Times are club-local wall-clock
/// and exported as floating times, one VEVENT per reservation.
pub fn reservations_to_ics(reservations: &[Reservation]) -> String {
    let mut calendar = Calendar::new();
    calendar.name("Reservas Padel Club Portugal");
    for reservation in reservations {
        let start = reservation.date.and_time(reservation.start.to_naive_time());
        let end = start + Duration::minutes(reservation.duration_min as i64);
        let event = Event::new()
            .summary(&format!("Padel: Campo {}", reservation.court))
            .description(&format!(
                "Reserva de {} minutos no Campo {}",
                reservation.duration_min, reservation.court
            ))
            .starts(start)
            .ends(end)
            .done();
        calendar.push(event);
    }
    calendar.to_string()
}
