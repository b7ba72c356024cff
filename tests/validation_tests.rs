use chrono::NaiveDate;

use padel_club_client::validation::{
    is_valid_email, is_valid_phone, validate_date_of_birth, validate_password, validate_required,
    validate_username,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn email_shapes() {
    assert!(is_valid_email("joao@example.pt"));
    assert!(is_valid_email("a.b+c@clube.padel.pt"));

    assert!(!is_valid_email("joao"));
    assert!(!is_valid_email("joao@"));
    assert!(!is_valid_email("@example.pt"));
    assert!(!is_valid_email("joao@example"));
    assert!(!is_valid_email("joao silva@example.pt"));
    assert!(!is_valid_email("joao@exa@mple.pt"));
}

#[test]
fn portuguese_phone_numbers() {
    assert!(is_valid_phone("912345678"));
    assert!(is_valid_phone("+351912345678"));
    assert!(is_valid_phone("912 345 678"));

    assert!(!is_valid_phone("12345"));
    assert!(!is_valid_phone("91234567a"));
    assert!(!is_valid_phone(""));
    assert!(!is_valid_phone("+4412345678901234567"));
}

#[test]
fn password_length_bounds() {
    assert!(validate_password("segredo1").is_ok());

    let errors = validate_password("").unwrap_err();
    assert_eq!(errors, vec!["A password é obrigatória"]);

    let errors = validate_password("abc").unwrap_err();
    assert_eq!(errors, vec!["A password deve ter pelo menos 6 caracteres"]);

    let long = "x".repeat(129);
    let errors = validate_password(&long).unwrap_err();
    assert_eq!(errors, vec!["A password não pode ter mais de 128 caracteres"]);
}

#[test]
fn username_rules() {
    assert!(validate_username("joao_silva99").is_ok());

    assert!(validate_username("").is_err());
    assert!(validate_username("ab").is_err());
    assert!(validate_username(&"a".repeat(31)).is_err());

    let errors = validate_username("joão").unwrap_err();
    assert_eq!(
        errors,
        vec!["O username só pode conter letras, números e underscore"]
    );
}

#[test]
fn date_of_birth_age_window() {
    let today = date(2025, 6, 10);

    assert!(validate_date_of_birth(date(1990, 3, 2), today).is_ok());
    assert!(validate_date_of_birth(date(2009, 1, 1), today).is_ok());

    let errors = validate_date_of_birth(date(2026, 1, 1), today).unwrap_err();
    assert_eq!(errors, vec!["Data de nascimento não pode ser no futuro"]);

    let errors = validate_date_of_birth(date(2015, 6, 10), today).unwrap_err();
    assert_eq!(errors, vec!["Deves ter pelo menos 16 anos"]);

    let errors = validate_date_of_birth(date(1900, 1, 1), today).unwrap_err();
    assert_eq!(errors, vec!["Data de nascimento inválida"]);
}

#[test]
fn required_fields_reject_blank_input() {
    assert!(validate_required("Rua das Laranjeiras 12", "Morada").is_ok());

    let errors = validate_required("   ", "Morada").unwrap_err();
    assert_eq!(errors, vec!["Morada é obrigatório"]);
}
