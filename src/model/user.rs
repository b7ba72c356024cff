use serde::{Deserialize, Serialize};

/// The authenticated account, from `GET /api/user/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Payload for `POST /api/signup/`. The backend expects the password twice.
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
}

/// Payload for `POST /api/login/`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login envelope: `{ "user": { ... } }`.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub user: User,
}
