// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::auth::Role;

// Usuário como a API devolve em /users e no login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub registration_code: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub card_identifier: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserSummary {
    /// Rótulo usado nas listas de seleção: "Nome (matrícula)".
    pub fn option_label(&self) -> String {
        format!("{} ({})", self.name, self.registration_code.as_deref().unwrap_or("—"))
    }
}

// Payload da edição inline (PUT /users/{id}); a senha não é alterada por aqui
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdatePayload {
    #[validate(length(min = 1, message = "Informe o nome."))]
    pub name: String,
    #[validate(
        length(min = 1, message = "Informe o email."),
        email(message = "Formato de email inválido.")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "Informe a matrícula."))]
    pub registration_code: String,
    #[validate(length(min = 1, message = "Informe a função."))]
    pub role: String,
    #[validate(length(min = 1, message = "Informe o número do cartão."))]
    pub card_identifier: String,
}
