//! Form validation rules shared by the signup, membership, tournament and
//! training flows. Each check returns every problem it found so forms can
//! report them all at once.

use chrono::{Datelike, NaiveDate};

pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
        && !domain.contains('@')
}

/// Portuguese phone numbers: an optional +351 prefix followed by 9 to 15
/// digits, spaces allowed.
pub fn is_valid_phone(phone: &str) -> bool {
    let rest = phone.strip_prefix("+351").unwrap_or(phone);
    let digits = rest.chars().filter(|c| c.is_ascii_digit()).count();
    rest.chars().all(|c| c.is_ascii_digit() || c == ' ') && (9..=15).contains(&digits)
}

pub fn validate_password(password: &str) -> Result<(), Vec<String>> {
    if password.is_empty() {
        return Err(vec!["A password é obrigatória".to_string()]);
    }
    let mut errors = Vec::new();
    if password.chars().count() < 6 {
        errors.push("A password deve ter pelo menos 6 caracteres".to_string());
    }
    if password.chars().count() > 128 {
        errors.push("A password não pode ter mais de 128 caracteres".to_string());
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

pub fn validate_username(username: &str) -> Result<(), Vec<String>> {
    if username.is_empty() {
        return Err(vec!["O username é obrigatório".to_string()]);
    }
    let mut errors = Vec::new();
    if username.chars().count() < 3 {
        errors.push("O username deve ter pelo menos 3 caracteres".to_string());
    }
    if username.chars().count() > 30 {
        errors.push("O username não pode ter mais de 30 caracteres".to_string());
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        errors.push("O username só pode conter letras, números e underscore".to_string());
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Members must be between 16 and 120 years old; the comparison uses whole
/// calendar years, matching the signup form.
pub fn validate_date_of_birth(date: NaiveDate, today: NaiveDate) -> Result<(), Vec<String>> {
    let age = today.year() - date.year();
    let mut errors = Vec::new();
    if age < 0 {
        errors.push("Data de nascimento não pode ser no futuro".to_string());
    } else if age < 16 {
        errors.push("Deves ter pelo menos 16 anos".to_string());
    } else if age > 120 {
        errors.push("Data de nascimento inválida".to_string());
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

pub fn validate_required(value: &str, field_name: &str) -> Result<(), Vec<String>> {
    if value.trim().is_empty() {
        Err(vec![format!("{field_name} é obrigatório")])
    } else {
        Ok(())
    }
}

/// Collect the error lists of several checks into one flat list.
pub fn collect_errors(checks: Vec<Result<(), Vec<String>>>) -> Result<(), Vec<String>> {
    let mut all = Vec::new();
    for check in checks {
        if let Err(mut errors) = check {
            all.append(&mut errors);
        }
    }
    if all.is_empty() { Ok(()) } else { Err(all) }
}
