use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Membership tier, priced per year by the club.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberTier {
    Individual,
    Familiar,
    Estudante,
}

impl std::str::FromStr for MemberTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "individual" => Ok(MemberTier::Individual),
            "familiar" => Ok(MemberTier::Familiar),
            "estudante" => Ok(MemberTier::Estudante),
            other => Err(format!("tipo de sócio desconhecido: {other}")),
        }
    }
}

/// An existing club member row from `GET /api/socios/`. Only the owning user
/// id is needed client-side (duplicate-application check).
#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub id: Option<i64>,
    pub user: i64,
    #[serde(default)]
    pub nome_completo: Option<String>,
    #[serde(default)]
    pub data_inscricao: Option<NaiveDate>,
}

/// Payload for `POST /api/socios/`.
#[derive(Debug, Clone, Serialize)]
pub struct MemberApplication {
    pub nome_completo: String,
    pub email: String,
    pub telefone: String,
    pub morada: String,
    pub data_nascimento: NaiveDate,
    pub tipo_socio: MemberTier,
}
