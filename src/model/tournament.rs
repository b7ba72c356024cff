use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Abertas,
    Fechadas,
}

/// A tournament listing from `GET /api/torneios/`.
#[derive(Debug, Clone, Deserialize)]
pub struct Tournament {
    pub id: i64,
    pub nome: String,
    pub data: NaiveDate,
    pub categoria: String,
    #[serde(deserialize_with = "super::de_flexible_f64")]
    pub premio: f64,
    pub inscricoes: RegistrationStatus,
    #[serde(default)]
    pub descricao: Option<String>,
}

impl Tournament {
    pub fn is_open(&self) -> bool {
        self.inscricoes == RegistrationStatus::Abertas
    }
}

/// Payload for `POST /api/inscricoes-torneio/`.
#[derive(Debug, Clone, Serialize)]
pub struct TeamRegistration {
    pub torneio: i64,
    pub nome_equipa: String,
    pub jogador1: String,
    pub jogador2: String,
    pub email: String,
    pub telefone: String,
}
