use serde::{Deserialize, Serialize};

/// A coach profile from `GET /api/treinadores/`.
#[derive(Debug, Clone, Deserialize)]
pub struct Coach {
    pub id: i64,
    pub nome: String,
    #[serde(default)]
    pub especialidade: Option<String>,
    #[serde(default)]
    pub experiencia: Option<String>,
    #[serde(default)]
    pub certificacao: Option<String>,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub foto: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingLevel {
    Iniciante,
    Intermedio,
    Avancado,
}

impl std::str::FromStr for TrainingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "iniciante" => Ok(TrainingLevel::Iniciante),
            "intermedio" | "intermédio" => Ok(TrainingLevel::Intermedio),
            "avancado" | "avançado" => Ok(TrainingLevel::Avancado),
            other => Err(format!("nível desconhecido: {other}")),
        }
    }
}

/// Payload for `POST /api/pedidos-treino/`.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingRequest {
    pub nome: String,
    pub email: String,
    pub telefone: String,
    pub nivel: TrainingLevel,
    pub treinador: i64,
    pub objetivo: String,
    pub disponibilidade: String,
}

/// A session package from `GET /api/pacotes-treino/`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingPackage {
    #[serde(default)]
    pub id: Option<i64>,
    pub nome: String,
    #[serde(deserialize_with = "super::de_flexible_f64")]
    pub preco: f64,
    #[serde(default)]
    pub sessoes: Option<u32>,
    #[serde(default)]
    pub descricao: Option<String>,
}
