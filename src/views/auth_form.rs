// src/views/auth_form.rs

use validator::Validate;

use super::form::unknown;
use crate::{
    common::{error::AppError, input},
    models::auth::{AuthPayload, LoginPayload, RegisterPayload},
    router::view::AuthMode,
};

/// Formulário de login/cadastro. Só guarda o texto digitado; o envio é do roteador.
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    pub name: String,
    pub email: String,
    pub registration_code: String,
    pub role: String,
    pub card_identifier: String,
    pub password: String,
}

impl AuthForm {
    pub fn set(&mut self, mode: AuthMode, field: &str, value: &str) -> Result<(), AppError> {
        match (mode, field) {
            (_, "email") => self.email = value.to_string(),
            (_, "password") => self.password = value.to_string(),
            (AuthMode::Register, "name") => self.name = value.to_string(),
            (AuthMode::Register, "role") => self.role = value.to_string(),
            (AuthMode::Register, "registrationCode") => {
                self.registration_code = input::only_digits(value)
            }
            (AuthMode::Register, "cardIdentifier") => {
                self.card_identifier = input::only_digits(value)
            }
            _ => return Err(unknown(field)),
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Payload com strings aparadas, já validado. A senha vai como foi digitada.
    pub fn payload(&self, mode: AuthMode) -> Result<AuthPayload, AppError> {
        match mode {
            AuthMode::Login => {
                let payload = LoginPayload {
                    email: self.email.trim().to_string(),
                    password: self.password.clone(),
                };
                payload.validate()?;
                Ok(AuthPayload::Login(payload))
            }
            AuthMode::Register => {
                let payload = RegisterPayload {
                    name: self.name.trim().to_string(),
                    email: self.email.trim().to_string(),
                    registration_code: self.registration_code.trim().to_string(),
                    role: self.role.trim().to_string(),
                    card_identifier: self.card_identifier.trim().to_string(),
                    password: self.password.clone(),
                };
                payload.validate()?;
                Ok(AuthPayload::Register(payload))
            }
        }
    }

    pub fn render(&self, mode: AuthMode) -> String {
        let masked = "*".repeat(self.password.chars().count());
        let mut fields = vec![("email", self.email.clone()), ("password", masked)];
        if mode == AuthMode::Register {
            fields.splice(
                0..0,
                [
                    ("name", self.name.clone()),
                    ("registrationCode", self.registration_code.clone()),
                    ("role", self.role.clone()),
                    ("cardIdentifier", self.card_identifier.clone()),
                ],
            );
        }
        fields
            .into_iter()
            .map(|(field, value)| format!("  {field:<18} = {value}\n"))
            .collect()
    }
}
