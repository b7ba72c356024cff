use std::cell::RefCell;
use std::env;
use std::time::Duration;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, instrument, warn};
use ureq::Agent;

use crate::booking::ClubBackend;
use crate::model::member::{Member, MemberApplication};
use crate::model::product::{Product, ReviewRequest};
use crate::model::reservation::{BookingRequest, Reservation};
use crate::model::tournament::{TeamRegistration, Tournament};
use crate::model::training::{Coach, TrainingPackage, TrainingRequest};
use crate::model::user::{LoginRequest, LoginResponse, SignupRequest, User};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Failures surfaced by the club API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered 401/403; the caller must log in first.
    #[error("é necessário fazer login")]
    AuthRequired,
    /// The backend rejected the request, possibly with a message to show.
    #[error("{}", message.as_deref().unwrap_or("pedido rejeitado pelo servidor"))]
    Rejected { message: Option<String> },
    /// The request never produced a usable response (network, timeout, bad JSON).
    #[error("falha de comunicação com o servidor: {0}")]
    Transport(String),
}

#[derive(serde::Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(serde::Deserialize)]
struct CsrfBody {
    #[serde(rename = "csrfToken")]
    csrf_token: String,
}

/// Blocking client for the club's REST API.
///
/// The agent keeps the Django session cookie across calls; the CSRF token is
/// fetched lazily from `/api/csrf-token/` and replayed as `X-CSRFToken` on
/// every mutating request, the same dance the web client performed.
pub struct ClubApi {
    agent: Agent,
    base: String,
    csrf: RefCell<Option<String>>,
}

impl ClubApi {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        ClubApi {
            agent: config.new_agent(),
            base: format!("{}/api", base_url.trim_end_matches('/')),
            csrf: RefCell::new(None),
        }
    }

    /// Read base URL and timeout from `PADEL_API_URL` / `PADEL_API_TIMEOUT_SECS`,
    /// falling back to the local development backend.
    pub fn from_env() -> Self {
        let base = env::var("PADEL_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout = env::var("PADEL_API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self::new(&base, Duration::from_secs(timeout))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Lazily fetched CSRF token. A failed fetch is logged and tolerated: the
    /// request goes out without the header and the backend has the last word.
    fn csrf_token(&self) -> Option<String> {
        let mut cached = self.csrf.borrow_mut();
        if cached.is_none() {
            match self.agent.get(&self.url("/csrf-token/")).call() {
                Ok(resp) => {
                    let mut body = resp.into_body();
                    match body.read_to_string() {
                        Ok(text) => match serde_json::from_str::<CsrfBody>(&text) {
                            Ok(b) => *cached = Some(b.csrf_token),
                            Err(e) => warn!(error = %e, "CSRF token response not understood"),
                        },
                        Err(e) => warn!(error = %e, "failed to read CSRF token response"),
                    }
                }
                Err(e) => warn!(error = %e, "failed to fetch CSRF token"),
            }
        }
        cached.clone()
    }

    #[instrument(level = "info", skip(self))]
    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        match self.agent.get(&url).call() {
            Ok(resp) => decode(path, resp),
            Err(e) => {
                error!(error = %e, url = %url, "GET request failed");
                Err(ApiError::Transport(e.to_string()))
            }
        }
    }

    #[instrument(level = "info", skip(self, payload))]
    fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let mut request = self.agent.post(&url);
        if let Some(token) = self.csrf_token() {
            request = request.header("X-CSRFToken", &token);
        }
        match request.send_json(payload) {
            Ok(resp) => decode(path, resp),
            Err(e) => {
                error!(error = %e, url = %url, "POST request failed");
                Err(ApiError::Transport(e.to_string()))
            }
        }
    }

    // Auth

    pub fn signup(&self, request: &SignupRequest) -> Result<Option<String>, ApiError> {
        self.post_json::<MessageBody, _>("/signup/", request)
            .map(|b| b.message)
    }

    pub fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let payload = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post_json("/login/", &payload)?;
        info!(username = %response.user.username, "logged in");
        Ok(response.user)
    }

    pub fn logout(&self) -> Result<(), ApiError> {
        // Response body is irrelevant here; only the status matters.
        let url = self.url("/logout/");
        let mut request = self.agent.post(&url);
        if let Some(token) = self.csrf_token() {
            request = request.header("X-CSRFToken", &token);
        }
        match request.send_json(serde_json::json!({})) {
            Ok(resp) => match resp.status().as_u16() {
                200..=299 => Ok(()),
                401 | 403 => Err(ApiError::AuthRequired),
                status => Err(ApiError::Rejected {
                    message: Some(format!("logout falhou ({status})")),
                }),
            },
            Err(e) => Err(ApiError::Transport(e.to_string())),
        }
    }

    pub fn user(&self) -> Result<User, ApiError> {
        self.get_json("/user/")
    }

    // Reservations

    pub fn reservations(&self) -> Result<Vec<Reservation>, ApiError> {
        self.get_json("/reservas/")
    }

    pub fn book(&self, request: &BookingRequest) -> Result<Option<String>, ApiError> {
        self.post_json::<MessageBody, _>("/reservas/", request)
            .map(|b| b.message)
    }

    // Membership

    pub fn members(&self) -> Result<Vec<Member>, ApiError> {
        self.get_json("/socios/")
    }

    pub fn apply_for_membership(
        &self,
        application: &MemberApplication,
    ) -> Result<Option<String>, ApiError> {
        self.post_json::<MessageBody, _>("/socios/", application)
            .map(|b| b.message)
    }

    // Shop

    pub fn products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_json("/artigos/")
    }

    pub fn submit_review(&self, review: &ReviewRequest) -> Result<Option<String>, ApiError> {
        self.post_json::<MessageBody, _>("/avaliacao/", review)
            .map(|b| b.message)
    }

    // Tournaments

    pub fn tournaments(&self) -> Result<Vec<Tournament>, ApiError> {
        self.get_json("/torneios/")
    }

    pub fn register_team(
        &self,
        registration: &TeamRegistration,
    ) -> Result<Option<String>, ApiError> {
        self.post_json::<MessageBody, _>("/inscricoes-torneio/", registration)
            .map(|b| b.message)
    }

    // Training

    pub fn coaches(&self) -> Result<Vec<Coach>, ApiError> {
        self.get_json("/treinadores/")
    }

    pub fn training_packages(&self) -> Result<Vec<TrainingPackage>, ApiError> {
        self.get_json("/pacotes-treino/")
    }

    pub fn request_training(
        &self,
        request: &TrainingRequest,
    ) -> Result<Option<String>, ApiError> {
        self.post_json::<MessageBody, _>("/pedidos-treino/", request)
            .map(|b| b.message)
    }
}

impl ClubBackend for ClubApi {
    /// The list endpoint returns every reservation; the caller filters by date
    /// (the snapshot constructor discards other days' rows).
    fn reservations_on(&self, date: NaiveDate) -> Result<Vec<Reservation>, ApiError> {
        let rows = self.reservations()?;
        Ok(rows.into_iter().filter(|r| r.date == date).collect())
    }

    fn create_reservation(&self, request: &BookingRequest) -> Result<Option<String>, ApiError> {
        self.book(request)
    }
}

/// Map a raw HTTP response onto the error taxonomy, deserializing the payload
/// on success.
fn decode<T: DeserializeOwned>(
    path: &str,
    resp: ureq::http::Response<ureq::Body>,
) -> Result<T, ApiError> {
    let status = resp.status().as_u16();
    let mut body = resp.into_body();
    let text = body
        .read_to_string()
        .map_err(|e| ApiError::Transport(format!("failed to read response body: {e}")))?;
    match status {
        200..=299 => serde_json::from_str(&text).map_err(|e| {
            error!(error = %e, path, "failed to deserialize response");
            ApiError::Transport(format!("resposta inesperada do servidor: {e}"))
        }),
        401 | 403 => Err(ApiError::AuthRequired),
        _ => {
            let message = extract_error_message(&text);
            warn!(status, path, message = message.as_deref().unwrap_or(""), "request rejected");
            Err(ApiError::Rejected { message })
        }
    }
}

/// Pull a human-readable message out of an error payload. The backend uses
/// `{"error": "..."}` for most endpoints, `{"detail": "..."}` for auth, and
/// Django field maps (`{"campo": ["mensagem"]}`) for signup.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;
    for key in ["error", "detail"] {
        if let Some(message) = object.get(key).and_then(|v| v.as_str()) {
            return Some(message.to_string());
        }
    }
    for (field, val) in object {
        if let Some(first) = val.as_array().and_then(|a| a.first()).and_then(|m| m.as_str()) {
            return Some(format!("{field}: {first}"));
        }
    }
    None
}
