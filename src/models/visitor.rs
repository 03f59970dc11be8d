// src/models/visitor.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visitor {
    pub id: i64,
    pub full_name: String,
    #[serde(default)]
    pub document_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

// POST /visitors, PUT /visitors/{id}
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VisitorPayload {
    #[validate(length(min = 1, message = "O nome completo é obrigatório."))]
    pub full_name: String,
    #[validate(length(min = 1, message = "O documento é obrigatório."))]
    pub document_id: String,
    #[validate(
        length(min = 1, message = "O email é obrigatório."),
        email(message = "Formato de email inválido.")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "O telefone é obrigatório."))]
    pub phone: String,
    #[validate(length(min = 1, message = "A empresa é obrigatória."))]
    pub company: String,
    #[validate(length(max = 255, message = "As observações devem ter no máximo 255 caracteres."))]
    pub notes: String,
    pub active: bool,
}
