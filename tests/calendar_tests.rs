use chrono::NaiveDate;

use padel_club_client::calendar::reservations_to_ics;
use padel_club_client::model::reservation::Reservation;

fn reservation(court: u8, date: (i32, u32, u32), start: &str, duration_min: u16) -> Reservation {
    Reservation {
        id: None,
        court,
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        start: start.parse().unwrap(),
        duration_min,
    }
}

#[test]
fn exports_one_event_per_reservation() {
    let rows = vec![
        reservation(1, (2025, 6, 10), "10:00", 90),
        reservation(5, (2025, 6, 12), "19:30", 60),
    ];
    let ics = reservations_to_ics(&rows);

    assert!(ics.starts_with("BEGIN:VCALENDAR"));
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
    assert_eq!(ics.matches("END:VEVENT").count(), 2);

    // First booking: 10:00 plus 90 minutes.
    assert!(ics.contains("DTSTART:20250610T100000"), "ics was: {ics}");
    assert!(ics.contains("DTEND:20250610T113000"), "ics was: {ics}");
    // Second booking: 19:30 plus 60 minutes.
    assert!(ics.contains("DTSTART:20250612T193000"), "ics was: {ics}");
    assert!(ics.contains("DTEND:20250612T203000"), "ics was: {ics}");

    assert!(ics.contains("Campo 1"), "ics was: {ics}");
    assert!(ics.contains("Campo 5"), "ics was: {ics}");
}

#[test]
fn empty_list_still_produces_a_valid_calendar() {
    let ics = reservations_to_ics(&[]);
    assert!(ics.starts_with("BEGIN:VCALENDAR"));
    assert!(ics.trim_end().ends_with("END:VCALENDAR"));
    assert!(!ics.contains("BEGIN:VEVENT"));
}
