// src/views/users.rs

use async_trait::async_trait;

use super::{
    Action, Screen,
    feedback::Feedback,
    form::{FormState, unknown},
    format,
    inline::{InlineSlot, InlineText},
    manager::{EntityManager, ManagedResource, ManagerText},
    table::Table,
};
use crate::{
    common::{
        error::{AppError, FieldErrors},
        input,
    },
    console::confirm::Confirm,
    models::{
        auth::RegisterPayload,
        user::{UserSummary, UserUpdatePayload},
    },
    services::user::{UserService, Users},
};

// =============================================================================
//  FORMULÁRIOS
// =============================================================================

/// Cadastro de usuário + cartão (POST /users).
#[derive(Debug, Clone, Default)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub registration_code: String,
    pub role: String,
    pub card_identifier: String,
    pub password: String,
}

impl FormState for UserForm {
    type Payload = RegisterPayload;

    fn set(&mut self, field: &str, value: &str) -> Result<(), AppError> {
        match field {
            "name" => self.name = value.to_string(),
            "email" => self.email = value.to_string(),
            "registrationCode" => self.registration_code = input::only_digits(value),
            "role" => self.role = value.to_string(),
            "cardIdentifier" => self.card_identifier = input::only_digits(value),
            "password" => self.password = value.to_string(),
            _ => return Err(unknown(field)),
        }
        Ok(())
    }

    fn build(&self, _errors: &mut FieldErrors) -> RegisterPayload {
        RegisterPayload {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            registration_code: self.registration_code.trim().to_string(),
            role: self.role.trim().to_string(),
            card_identifier: self.card_identifier.trim().to_string(),
            password: self.password.clone(),
        }
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("registrationCode", self.registration_code.clone()),
            ("role", self.role.clone()),
            ("cardIdentifier", self.card_identifier.clone()),
            ("password", "*".repeat(self.password.chars().count())),
        ]
    }
}

/// Rascunho da edição inline (PUT /users/{id}).
#[derive(Debug, Clone, Default)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub registration_code: String,
    pub role: String,
    pub card_identifier: String,
}

impl From<&UserSummary> for UserDraft {
    fn from(user: &UserSummary) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            registration_code: user.registration_code.clone().unwrap_or_default(),
            role: user.role.as_str().to_string(),
            card_identifier: user.card_identifier.clone().unwrap_or_default(),
        }
    }
}

impl FormState for UserDraft {
    type Payload = UserUpdatePayload;

    fn set(&mut self, field: &str, value: &str) -> Result<(), AppError> {
        match field {
            "name" => self.name = value.to_string(),
            "email" => self.email = value.to_string(),
            "registrationCode" => self.registration_code = input::only_digits(value),
            "role" => self.role = value.to_string(),
            "cardIdentifier" => self.card_identifier = input::only_digits(value),
            _ => return Err(unknown(field)),
        }
        Ok(())
    }

    fn build(&self, _errors: &mut FieldErrors) -> UserUpdatePayload {
        UserUpdatePayload {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            registration_code: self.registration_code.trim().to_string(),
            role: self.role.trim().to_string(),
            card_identifier: self.card_identifier.trim().to_string(),
        }
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("registrationCode", self.registration_code.clone()),
            ("role", self.role.clone()),
            ("cardIdentifier", self.card_identifier.clone()),
        ]
    }
}

impl ManagedResource for Users {
    type Form = UserForm;
    type Filter = ();

    const TEXT: ManagerText = ManagerText {
        created: "Usuário e cartão cadastrados com sucesso.",
        updated: "Usuário atualizado com sucesso.",
        save_error: "Erro ao cadastrar usuário.",
        load_error: "Não foi possível carregar os usuários.",
    };
}

const INLINE_TEXT: InlineText = InlineText {
    updated: "Usuário atualizado com sucesso.",
    update_error: "Erro ao atualizar usuário.",
};

// =============================================================================
//  TELA
// =============================================================================

pub struct UsersScreen {
    pub manager: EntityManager<Users>,
    pub inline: InlineSlot<UserDraft>,
}

impl UsersScreen {
    pub fn new(service: UserService) -> Self {
        Self {
            manager: EntityManager::new(service),
            inline: InlineSlot::default(),
        }
    }

    fn start_inline(&mut self, id: i64) -> Result<(), AppError> {
        let user = self
            .manager
            .find(id)
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Usuário #{id} não está na lista")))?;
        let draft = UserDraft::from(user);
        self.inline.start(id, draft);
        Ok(())
    }
}

#[async_trait]
impl Screen for UsersScreen {
    fn title(&self) -> &'static str {
        "Usuários"
    }

    async fn mount(&mut self) {
        self.manager.load().await;
    }

    async fn handle(
        &mut self,
        action: Action,
        _confirm: &mut (dyn Confirm + Send),
    ) -> Result<(), AppError> {
        match action {
            Action::Set { field, value } => self.manager.set_field(&field, &value)?,
            Action::Submit => {
                self.manager.submit().await;
            }
            Action::Reset => {
                self.manager.reset();
                self.manager.feedback = None;
            }
            Action::Refresh => {
                self.manager.load().await;
            }
            Action::Inline(id) => self.start_inline(id)?,
            Action::InlineSet { field, value } => self.inline.set(&field, &value)?,
            Action::Save => {
                let (service, rows) = self.manager.parts_mut();
                self.inline.save(service, rows, &INLINE_TEXT).await?;
            }
            Action::Cancel => self.inline.cancel(),
            other => return Err(other.unsupported()),
        }
        Ok(())
    }

    fn feedback(&self) -> Option<&Feedback> {
        self.manager.feedback.as_ref()
    }

    fn render(&self) -> String {
        let mut out = String::from("Novo usuário:\n");
        out.push_str(&self.manager.form.render());
        if let Some(feedback) = &self.manager.feedback {
            out.push_str(&feedback.render());
        }

        let mut table = Table::new(&["ID", "Nome", "Email", "Matrícula", "Função", "Cartão"]);
        for user in &self.manager.rows {
            let marker = if self.inline.editing_id() == Some(user.id) { "✎" } else { "" };
            table.row(vec![
                format!("{}{marker}", user.id),
                user.name.clone(),
                user.email.clone(),
                format::text(user.registration_code.as_deref()),
                user.role.as_str().to_string(),
                format::text(user.card_identifier.as_deref()),
            ]);
        }
        out.push_str("\nUsuários cadastrados:\n");
        out.push_str(&table.render("Nenhum usuário cadastrado."));
        out.push_str(&self.inline.render());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_draft_revalidates_each_change() {
        let user: UserSummary = serde_json::from_value(serde_json::json!({
            "id": 1, "name": "Ana", "email": "ana@x.com",
            "registrationCode": "10", "role": "Analista", "cardIdentifier": "99"
        }))
        .unwrap();
        let mut slot = InlineSlot::default();
        slot.start(1, UserDraft::from(&user));

        slot.set("name", "   ").unwrap();
        let errors = &slot.editing.as_ref().unwrap().errors;
        assert_eq!(errors.get("name").map(String::as_str), Some("Informe o nome."));

        slot.set("name", "Ana Souza").unwrap();
        assert!(slot.editing.as_ref().unwrap().errors.is_empty());
    }

    #[test]
    fn create_form_requires_every_field() {
        let form = UserForm::default();
        let errors = form.field_errors();
        for field in ["name", "email", "registrationCode", "role", "cardIdentifier", "password"] {
            assert!(errors.contains_key(field), "faltou {field}");
        }
    }
}
