//! The club's non-booking forms: membership signup, tournament registration,
//! training requests, product reviews and the member's own reservation list.
//! Each flow validates locally first and only then talks to the backend.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use crate::api::{ApiError, ClubApi};
use crate::model::member::MemberApplication;
use crate::model::product::ReviewRequest;
use crate::model::reservation::Reservation;
use crate::model::tournament::{TeamRegistration, Tournament};
use crate::model::training::TrainingRequest;
use crate::model::user::SignupRequest;
use crate::session::Session;
use crate::validation::{
    collect_errors, is_valid_email, is_valid_phone, validate_date_of_birth, validate_password,
    validate_required, validate_username,
};

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("{}", .0.join("; "))]
    Invalid(Vec<String>),
    #[error("Você já é sócio!")]
    AlreadyMember,
    #[error("as inscrições para este torneio estão fechadas")]
    RegistrationsClosed,
    #[error("é necessário fazer login")]
    AuthRequired,
    #[error(transparent)]
    Api(ApiError),
}

impl From<ApiError> for FlowError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::AuthRequired => FlowError::AuthRequired,
            other => FlowError::Api(other),
        }
    }
}

fn check_email(email: &str) -> Result<(), Vec<String>> {
    validate_required(email, "Email")?;
    if is_valid_email(email) { Ok(()) } else { Err(vec!["Email inválido".to_string()]) }
}

fn check_phone(phone: &str) -> Result<(), Vec<String>> {
    validate_required(phone, "Telefone")?;
    if is_valid_phone(phone) {
        Ok(())
    } else {
        Err(vec!["Número de telefone inválido".to_string()])
    }
}

// Accounts

pub fn validate_signup(request: &SignupRequest, password2: &str) -> Result<(), Vec<String>> {
    let mut checks = vec![
        validate_username(&request.username),
        check_email(&request.email),
        validate_password(&request.password),
    ];
    if request.password != password2 {
        checks.push(Err(vec!["As passwords não coincidem".to_string()]));
    }
    collect_errors(checks)
}

pub fn create_account(
    api: &ClubApi,
    request: &SignupRequest,
    password2: &str,
) -> Result<String, FlowError> {
    validate_signup(request, password2).map_err(FlowError::Invalid)?;
    let message = Session::signup(api, request)?;
    Ok(message.unwrap_or_else(|| "Conta criada com sucesso!".to_string()))
}

// Membership

pub fn validate_member_application(
    application: &MemberApplication,
    today: NaiveDate,
) -> Result<(), Vec<String>> {
    collect_errors(vec![
        validate_required(&application.nome_completo, "Nome Completo"),
        check_email(&application.email),
        check_phone(&application.telefone),
        validate_required(&application.morada, "Morada"),
        validate_date_of_birth(application.data_nascimento, today),
    ])
}

/// Submit a membership application. When the session user already appears in
/// the member list the submission is refused locally; if that lookup fails the
/// application still goes through and the backend decides.
pub fn apply_for_membership(
    api: &ClubApi,
    session: &Session,
    application: &MemberApplication,
    today: NaiveDate,
) -> Result<String, FlowError> {
    validate_member_application(application, today).map_err(FlowError::Invalid)?;
    if let Some(user) = session.user() {
        if let Ok(members) = api.members() {
            if members.iter().any(|m| m.user == user.id) {
                return Err(FlowError::AlreadyMember);
            }
        }
    }
    let message = api.apply_for_membership(application)?;
    info!(tier = ?application.tipo_socio, "membership application submitted");
    Ok(message.unwrap_or_else(|| "Sócio criado com sucesso!".to_string()))
}

// Tournaments

pub fn validate_team_registration(registration: &TeamRegistration) -> Result<(), Vec<String>> {
    collect_errors(vec![
        validate_required(&registration.nome_equipa, "Nome da Equipa"),
        validate_required(&registration.jogador1, "Jogador 1"),
        validate_required(&registration.jogador2, "Jogador 2"),
        check_email(&registration.email),
        check_phone(&registration.telefone),
    ])
}

pub fn register_team(
    api: &ClubApi,
    tournament: &Tournament,
    registration: &TeamRegistration,
) -> Result<String, FlowError> {
    if !tournament.is_open() {
        return Err(FlowError::RegistrationsClosed);
    }
    validate_team_registration(registration).map_err(FlowError::Invalid)?;
    let message = api.register_team(registration)?;
    info!(tournament = %tournament.nome, team = %registration.nome_equipa, "team registered");
    Ok(message.unwrap_or_else(|| "Inscrição realizada com sucesso!".to_string()))
}

// Training

pub fn validate_training_request(request: &TrainingRequest) -> Result<(), Vec<String>> {
    collect_errors(vec![
        validate_required(&request.nome, "Nome"),
        check_email(&request.email),
        check_phone(&request.telefone),
        validate_required(&request.objetivo, "Objetivo do Treino"),
        validate_required(&request.disponibilidade, "Disponibilidade"),
    ])
}

pub fn request_training(api: &ClubApi, request: &TrainingRequest) -> Result<String, FlowError> {
    validate_training_request(request).map_err(FlowError::Invalid)?;
    let message = api.request_training(request)?;
    Ok(message.unwrap_or_else(|| "Pedido de treino enviado com sucesso!".to_string()))
}

// Shop reviews

pub fn validate_review(review: &ReviewRequest) -> Result<(), Vec<String>> {
    let mut checks = Vec::new();
    if !(1..=5).contains(&review.estrelas) {
        checks.push(Err(vec!["A avaliação deve ter entre 1 e 5 estrelas".to_string()]));
    }
    checks.push(validate_required(&review.comentario, "Comentário"));
    collect_errors(checks)
}

/// Reviews require a logged-in account; the check happens before any network
/// call so an anonymous user is redirected to login immediately.
pub fn submit_review(
    api: &ClubApi,
    session: &Session,
    review: &ReviewRequest,
) -> Result<String, FlowError> {
    if !session.is_authenticated() {
        return Err(FlowError::AuthRequired);
    }
    validate_review(review).map_err(FlowError::Invalid)?;
    let message = api.submit_review(review)?;
    Ok(message.unwrap_or_else(|| "Avaliação adicionada com sucesso!".to_string()))
}

// My reservations

/// The member's own bookings, soonest first. A 401 propagates as
/// `AuthRequired` so the caller can redirect to login.
pub fn my_reservations(api: &ClubApi) -> Result<Vec<Reservation>, FlowError> {
    let mut rows = api.reservations()?;
    rows.sort_by_key(|r| (r.date, r.start));
    Ok(rows)
}
