use serde::{Deserialize, Serialize};

/// A shop article from `GET /api/artigos/`, with its reviews embedded.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: i64,
    pub nome: String,
    #[serde(deserialize_with = "super::de_flexible_f64")]
    pub preco: f64,
    #[serde(default)]
    pub imagem: Option<String>,
    #[serde(default)]
    pub avaliacao_media: f64,
    #[serde(default)]
    pub numero_avaliacoes: u32,
    #[serde(default)]
    pub avaliacoes: Vec<Review>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    pub estrelas: u8,
    pub comentario: String,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub user_profile_pic: Option<String>,
}

/// Payload for `POST /api/avaliacao/`.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewRequest {
    pub artigo: i64,
    pub estrelas: u8,
    pub comentario: String,
}
