use chrono::NaiveDate;

use padel_club_client::model::product::Product;
use padel_club_client::model::reservation::{BookingRequest, Reservation};
use padel_club_client::model::tournament::{RegistrationStatus, Tournament};
use padel_club_client::model::training::TrainingLevel;
use padel_club_client::model::user::LoginResponse;
use padel_club_client::slot::TimeSlot;

#[test]
fn reservations_deserialize_from_backend_json() {
    let json = include_str!("sample_reservas.json");
    let rows: Vec<Reservation> = serde_json::from_str(json).expect("reservas fixture");

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].court, 1);
    assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
    // Times arrive with seconds; only hours and minutes are kept.
    assert_eq!(rows[0].start.to_string(), "10:00");
    assert_eq!(rows[1].start.to_string(), "18:30");
    // Durations arrive as numbers or quoted strings.
    assert_eq!(rows[0].duration_min, 60);
    assert_eq!(rows[1].duration_min, 90);
    assert_eq!(rows[2].duration_min, 120);
}

#[test]
fn booking_request_serializes_with_wire_field_names() {
    let request = BookingRequest {
        date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
        time: "10:00".parse().unwrap(),
        court: 3,
        duration_min: 90,
    };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "data": "2025-06-10",
            "hora": "10:00",
            "campo": 3,
            "duracao": 90
        })
    );
}

#[test]
fn time_slot_parses_and_rejects() {
    assert_eq!("08:00".parse::<TimeSlot>().unwrap().minutes(), 480);
    assert_eq!("23:00".parse::<TimeSlot>().unwrap().to_string(), "23:00");
    assert_eq!("10:30:00".parse::<TimeSlot>().unwrap().to_string(), "10:30");

    assert!("24:00".parse::<TimeSlot>().is_err());
    assert!("10:60".parse::<TimeSlot>().is_err());
    assert!("dez".parse::<TimeSlot>().is_err());
    assert!("10".parse::<TimeSlot>().is_err());
}

#[test]
fn products_deserialize_with_flexible_prices() {
    let json = include_str!("sample_artigos.json");
    let products: Vec<Product> = serde_json::from_str(json).expect("artigos fixture");

    assert_eq!(products.len(), 2);
    assert!((products[0].preco - 189.90).abs() < f64::EPSILON);
    assert!((products[1].preco - 5.5).abs() < f64::EPSILON);
    assert_eq!(products[0].avaliacoes.len(), 2);
    assert_eq!(products[0].avaliacoes[0].username, "joao");
    assert_eq!(products[0].avaliacoes[0].estrelas, 5);
    // Optional fields missing on the second product fall back to defaults.
    assert_eq!(products[1].numero_avaliacoes, 0);
    assert!(products[1].imagem.is_none());
}

#[test]
fn tournaments_deserialize_and_report_open_registrations() {
    let json = serde_json::json!([
        {
            "id": 7,
            "nome": "Open de Verão",
            "data": "2025-07-20",
            "categoria": "M3",
            "premio": "500",
            "inscricoes": "abertas",
            "descricao": "Torneio de pares"
        },
        {
            "id": 8,
            "nome": "Masters",
            "data": "2025-09-01",
            "categoria": "M1",
            "premio": 1500,
            "inscricoes": "fechadas"
        }
    ]);
    let tournaments: Vec<Tournament> = serde_json::from_value(json).unwrap();

    assert!(tournaments[0].is_open());
    assert!(!tournaments[1].is_open());
    assert_eq!(tournaments[0].inscricoes, RegistrationStatus::Abertas);
    assert!((tournaments[0].premio - 500.0).abs() < f64::EPSILON);
    assert!(tournaments[1].descricao.is_none());
}

#[test]
fn login_response_unwraps_the_user_envelope() {
    let json = serde_json::json!({
        "user": { "id": 12, "username": "rita", "email": "rita@example.pt" }
    });
    let response: LoginResponse = serde_json::from_value(json).unwrap();
    assert_eq!(response.user.id, 12);
    assert_eq!(response.user.username, "rita");
}

#[test]
fn training_levels_use_lowercase_wire_names() {
    assert_eq!(
        serde_json::to_string(&TrainingLevel::Intermedio).unwrap(),
        "\"intermedio\""
    );
    let level: TrainingLevel = serde_json::from_str("\"avancado\"").unwrap();
    assert_eq!(level, TrainingLevel::Avancado);
    // CLI input accepts accented spellings too.
    assert_eq!("intermédio".parse::<TrainingLevel>().unwrap(), TrainingLevel::Intermedio);
}
