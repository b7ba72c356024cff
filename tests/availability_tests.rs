use chrono::{NaiveDate, NaiveDateTime};

use padel_club_client::availability::{self, DaySnapshot, is_past};
use padel_club_client::model::reservation::Reservation;
use padel_club_client::slot::TimeSlot;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(d: NaiveDate, h: u32, min: u32) -> NaiveDateTime {
    d.and_hms_opt(h, min, 0).unwrap()
}

fn slot(s: &str) -> TimeSlot {
    s.parse().unwrap()
}

fn reservation(court: u8, d: NaiveDate, start: &str, duration_min: u16) -> Reservation {
    Reservation {
        id: None,
        court,
        date: d,
        start: slot(start),
        duration_min,
    }
}

#[test]
fn grid_runs_0800_to_2300_in_half_hours() {
    let grid: Vec<TimeSlot> = TimeSlot::grid().collect();
    assert_eq!(grid.len(), 31);
    assert_eq!(grid.first().unwrap().to_string(), "08:00");
    assert_eq!(grid.last().unwrap().to_string(), "23:00");
    assert_eq!(grid[1].to_string(), "08:30");
}

#[test]
fn occupancy_covers_every_half_hour_of_a_reservation() {
    let d = date(2025, 6, 10);
    let snapshot = DaySnapshot::new(d, vec![reservation(1, d, "10:00", 60)]);

    assert!(snapshot.is_slot_occupied(slot("10:00"), Some(1)));
    assert!(snapshot.is_slot_occupied(slot("10:30"), Some(1)));
    // Half-open interval: the end boundary is free again.
    assert!(!snapshot.is_slot_occupied(slot("11:00"), Some(1)));
    assert!(!snapshot.is_slot_occupied(slot("09:30"), Some(1)));
    // A different court is unaffected.
    assert!(!snapshot.is_slot_occupied(slot("10:00"), Some(2)));
}

#[test]
fn occupancy_without_a_court_matches_any_court() {
    let d = date(2025, 6, 10);
    let snapshot = DaySnapshot::new(d, vec![reservation(4, d, "18:00", 90)]);

    assert!(snapshot.is_slot_occupied(slot("18:00"), None));
    assert!(snapshot.is_slot_occupied(slot("19:00"), None));
    assert!(!snapshot.is_slot_occupied(slot("19:30"), None));
}

#[test]
fn court_availability_uses_interval_overlap() {
    let d = date(2025, 6, 10);
    let snapshot = DaySnapshot::new(d, vec![reservation(1, d, "10:00", 60)]);

    // 09:30 + 60 ends 10:30, which overlaps [10:00, 11:00).
    assert!(!snapshot.is_court_available(1, Some(slot("09:30")), Some(60)));
    // 11:00 + 60 starts exactly at the reservation's end.
    assert!(snapshot.is_court_available(1, Some(slot("11:00")), Some(60)));
    // 09:00 + 60 ends exactly at the reservation's start.
    assert!(snapshot.is_court_available(1, Some(slot("09:00")), Some(60)));
    // A longer duration reaches into the occupied interval.
    assert!(!snapshot.is_court_available(1, Some(slot("09:00")), Some(90)));
    // Other courts are never constrained by court 1's reservation.
    assert!(snapshot.is_court_available(2, Some(slot("10:00")), Some(120)));
}

#[test]
fn court_availability_is_unconstrained_until_time_and_duration_are_set() {
    let d = date(2025, 6, 10);
    let snapshot = DaySnapshot::new(d, vec![reservation(1, d, "10:00", 60)]);

    assert!(snapshot.is_court_available(1, None, None));
    assert!(snapshot.is_court_available(1, Some(slot("10:00")), None));
    assert!(snapshot.is_court_available(1, None, Some(60)));
}

#[test]
fn slot_selectable_iff_some_court_is_free() {
    let d = date(2025, 6, 10);
    let now = at(date(2025, 6, 1), 9, 0);

    // Five of six courts taken: still selectable.
    let mut rows: Vec<Reservation> = (1..=5).map(|c| reservation(c, d, "10:00", 60)).collect();
    let snapshot = DaySnapshot::new(d, rows.clone());
    assert!(snapshot.is_slot_selectable(slot("10:00"), now));

    // All six taken: not selectable, and the exhaustive per-court check agrees.
    rows.push(reservation(6, d, "10:00", 60));
    let snapshot = DaySnapshot::new(d, rows);
    assert!(!snapshot.is_slot_selectable(slot("10:00"), now));
    assert!(availability::courts().all(|c| snapshot.is_slot_occupied(slot("10:00"), Some(c))));
}

#[test]
fn same_day_cutoff_blocks_only_elapsed_slots() {
    let today = date(2025, 6, 10);
    let now = at(today, 14, 5);

    assert!(is_past(today, slot("14:00"), now));
    assert!(is_past(today, slot("08:00"), now));
    assert!(!is_past(today, slot("14:30"), now));

    // Other calendar dates are never past, regardless of the clock.
    assert!(!is_past(date(2025, 6, 11), slot("08:00"), now));
    assert!(!is_past(date(2025, 6, 9), slot("08:00"), now));
}

#[test]
fn cutoff_compares_at_minute_precision() {
    let today = date(2025, 6, 10);
    // 14:30:45 truncates to 14:30, so the 14:30 slot counts as elapsed.
    let now = today.and_hms_opt(14, 30, 45).unwrap();
    assert!(is_past(today, slot("14:30"), now));
    assert!(!is_past(today, slot("15:00"), now));
}

#[test]
fn past_slots_are_not_selectable_even_on_free_courts() {
    let today = date(2025, 6, 10);
    let snapshot = DaySnapshot::new(today, Vec::new());
    let now = at(today, 14, 5);

    assert!(!snapshot.is_slot_selectable(slot("14:00"), now));
    assert!(snapshot.is_slot_selectable(slot("14:30"), now));
}

#[test]
fn snapshot_discards_rows_from_other_dates() {
    let d = date(2025, 6, 10);
    let other = date(2025, 6, 11);
    let snapshot = DaySnapshot::new(
        d,
        vec![reservation(1, d, "10:00", 60), reservation(1, other, "12:00", 60)],
    );

    assert_eq!(snapshot.reservations().len(), 1);
    assert!(snapshot.is_slot_occupied(slot("10:00"), Some(1)));
    assert!(!snapshot.is_slot_occupied(slot("12:00"), Some(1)));
}
