pub mod member;
pub mod product;
pub mod reservation;
pub mod tournament;
pub mod training;
pub mod user;

use serde::de::{Deserialize, Deserializer};

/// The backend is inconsistent about numeric fields: depending on the
/// serializer they arrive as JSON numbers or as quoted strings. These helpers
/// accept both.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

pub(crate) fn de_flexible_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

pub(crate) fn de_flexible_u16<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n as u16),
        NumberOrString::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
