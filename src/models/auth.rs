// src/models/auth.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::user::UserSummary;

/// Papel do usuário autenticado. Somente o texto exato `ADMIN` dá acesso às abas administrativas;
/// qualquer outro cargo ("Analista", "Porteiro", "admin") é um membro comum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Member(String),
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "ADMIN",
            Role::Member(role) => role,
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Member(String::new())
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        if value == "ADMIN" {
            Role::Admin
        } else {
            Role::Member(value)
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

// Dados para login
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginPayload {
    #[validate(
        length(min = 1, message = "O email é obrigatório."),
        email(message = "Formato de email inválido.")
    )]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter pelo menos 6 caracteres."))]
    pub password: String,
}

// Dados para registro de um novo usuário (também usado no POST /users)
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    #[validate(length(min = 1, max = 120, message = "O nome é obrigatório."))]
    pub name: String,
    #[validate(
        length(min = 1, message = "O email é obrigatório."),
        email(message = "Formato de email inválido.")
    )]
    pub email: String,
    #[validate(length(min = 1, max = 40, message = "O registro é obrigatório (até 40 dígitos)."))]
    pub registration_code: String,
    #[validate(length(min = 1, max = 40, message = "O cargo/função é obrigatório."))]
    pub role: String,
    #[validate(length(min = 1, max = 80, message = "O identificador de cartão é obrigatório (até 80 dígitos)."))]
    pub card_identifier: String,
    #[validate(length(min = 6, message = "A senha deve ter pelo menos 6 caracteres."))]
    pub password: String,
}

/// O formulário de autenticação produz um dos dois formatos.
#[derive(Debug, Clone)]
pub enum AuthPayload {
    Login(LoginPayload),
    Register(RegisterPayload),
}

// Resposta de /auth/login e /auth/register
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<UserSummary>,
}

fn default_success() -> bool {
    true
}
