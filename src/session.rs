use tracing::info;

use crate::api::{ApiError, ClubApi};
use crate::model::user::{SignupRequest, User};

/// The current login state, carried explicitly into every flow that needs it
/// instead of living in ambient global state.
#[derive(Debug, Default, Clone)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    /// Ask the backend who we are. An unauthenticated probe is a normal
    /// outcome, not an error.
    pub fn probe(api: &ClubApi) -> Self {
        Session {
            user: api.user().ok(),
        }
    }

    pub fn login(api: &ClubApi, username: &str, password: &str) -> Result<Self, ApiError> {
        let user = api.login(username, password)?;
        Ok(Session { user: Some(user) })
    }

    pub fn signup(api: &ClubApi, request: &SignupRequest) -> Result<Option<String>, ApiError> {
        api.signup(request)
    }

    /// Best-effort server-side logout; the local session is cleared either way.
    pub fn logout(&mut self, api: &ClubApi) {
        if let Err(e) = api.logout() {
            info!(error = %e, "logout request failed, clearing local session anyway");
        }
        self.user = None;
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
