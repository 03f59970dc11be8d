// src/views/areas.rs

use async_trait::async_trait;

use super::{
    Action, Screen,
    feedback::Feedback,
    form::{self, FormState, unknown, yes_no},
    format,
    inline::{InlineSlot, InlineText},
    manager::{DeleteText, EntityManager, ManagedResource, ManagerText, RemovableResource},
    table::Table,
};
use crate::{
    common::error::{AppError, FieldErrors},
    console::confirm::Confirm,
    models::area::{Area, AreaPayload, SecurityLevel},
    services::area::{AreaService, Areas},
};

/// Formulário de área. Também serve de rascunho da edição inline.
#[derive(Debug, Clone)]
pub struct AreaForm {
    pub name: String,
    pub description: String,
    pub location: String,
    pub security_level: SecurityLevel,
    pub notes: String,
    pub active: bool,
}

impl Default for AreaForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            location: String::new(),
            security_level: SecurityLevel::Restrita,
            notes: String::new(),
            active: true,
        }
    }
}

impl From<&Area> for AreaForm {
    fn from(area: &Area) -> Self {
        Self {
            name: area.name.clone(),
            description: area.description.clone(),
            location: area.location.clone(),
            security_level: area.security_level.or_default(),
            notes: area.notes.clone().unwrap_or_default(),
            active: area.active,
        }
    }
}

impl FormState for AreaForm {
    type Payload = AreaPayload;

    fn set(&mut self, field: &str, value: &str) -> Result<(), AppError> {
        match field {
            "name" => self.name = value.to_string(),
            "description" => self.description = value.to_string(),
            "location" => self.location = value.to_string(),
            "securityLevel" => self.security_level = form::choice(field, value)?,
            "notes" => self.notes = value.to_string(),
            "active" => self.active = form::flag(field, value)?,
            _ => return Err(unknown(field)),
        }
        Ok(())
    }

    fn build(&self, _errors: &mut FieldErrors) -> AreaPayload {
        AreaPayload {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            location: self.location.trim().to_string(),
            security_level: self.security_level.clone(),
            notes: self.notes.trim().to_string(),
            active: self.active,
        }
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("description", self.description.clone()),
            ("location", self.location.clone()),
            ("securityLevel", self.security_level.wire().to_string()),
            ("notes", self.notes.clone()),
            ("active", yes_no(self.active)),
        ]
    }
}

impl ManagedResource for Areas {
    type Form = AreaForm;
    type Filter = ();

    const TEXT: ManagerText = ManagerText {
        created: "Área criada com sucesso.",
        updated: "Área atualizada com sucesso.",
        save_error: "Erro ao salvar área.",
        load_error: "Não foi possível carregar as áreas.",
    };
}

impl RemovableResource for Areas {
    const DELETE_TEXT: DeleteText = DeleteText {
        confirm: "Deseja realmente remover esta área?",
        deleted: "Área removida.",
        delete_error: "Erro ao remover área.",
    };
}

const INLINE_TEXT: InlineText = InlineText {
    updated: "Área atualizada com sucesso.",
    update_error: "Erro ao atualizar área.",
};

pub struct AreasScreen {
    pub manager: EntityManager<Areas>,
    pub inline: InlineSlot<AreaForm>,
}

impl AreasScreen {
    pub fn new(service: AreaService) -> Self {
        Self {
            manager: EntityManager::new(service),
            inline: InlineSlot::default(),
        }
    }
}

#[async_trait]
impl Screen for AreasScreen {
    fn title(&self) -> &'static str {
        "Áreas"
    }

    async fn mount(&mut self) {
        self.manager.load().await;
    }

    async fn handle(
        &mut self,
        action: Action,
        confirm: &mut (dyn Confirm + Send),
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
            Action::Delete(id) => {
                if self.manager.delete(id, confirm).await {
                    self.inline.forget(id);
                }
            }
            Action::Inline(id) => {
                let area = self.manager.find(id).ok_or_else(|| {
                    AppError::Internal(anyhow::anyhow!("Área #{id} não está na lista"))
                })?;
                let draft = AreaForm::from(area);
                self.inline.start(id, draft);
            }
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
        let mut out = String::from("Nova área:\n");
        out.push_str(&self.manager.form.render());
        if let Some(feedback) = &self.manager.feedback {
            out.push_str(&feedback.render());
        }

        let mut table = Table::new(&[
            "ID",
            "Nome",
            "Descrição",
            "Localização",
            "Nível",
            "Situação de uso",
            "Responsável atual",
            "Prazo limite",
        ]);
        for area in &self.manager.rows {
            let marker = if self.inline.editing_id() == Some(area.id) { "✎" } else { "" };
            table.row(vec![
                format!("{}{marker}", area.id),
                area.name.clone(),
                area.description.clone(),
                area.location.clone(),
                area.security_level.label().to_string(),
                format::area_status(area.status.as_ref(), area.active),
                format::occupant(area),
                format::datetime(area.usage_deadline),
            ]);
        }
        out.push_str("\nÁreas cadastradas:\n");
        out.push_str(&table.render("Nenhuma área cadastrada."));
        out.push_str(&self.inline.render());
        out
    }
}
