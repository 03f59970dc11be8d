// src/views/visitors.rs

use std::future::Future;

use async_trait::async_trait;

use super::{
    Action, Screen,
    feedback::Feedback,
    form::{self, FormState, unknown, yes_no},
    format,
    manager::{DeleteText, EntityManager, ManagedResource, ManagerText, RemovableResource},
    table::Table,
};
use crate::{
    common::error::{AppError, FieldErrors},
    console::confirm::Confirm,
    models::visitor::{Visitor, VisitorPayload},
    services::{
        resource::ResourceService,
        visitor::{VisitorService, Visitors},
    },
};

#[derive(Debug, Clone)]
pub struct VisitorForm {
    pub full_name: String,
    pub document_id: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub notes: String,
    pub active: bool,
}

impl Default for VisitorForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            document_id: String::new(),
            email: String::new(),
            phone: String::new(),
            company: String::new(),
            notes: String::new(),
            active: true,
        }
    }
}

impl From<&Visitor> for VisitorForm {
    fn from(visitor: &Visitor) -> Self {
        Self {
            full_name: visitor.full_name.clone(),
            document_id: visitor.document_id.clone(),
            email: visitor.email.clone(),
            phone: visitor.phone.clone(),
            company: visitor.company.clone(),
            notes: visitor.notes.clone().unwrap_or_default(),
            active: visitor.active,
        }
    }
}

impl FormState for VisitorForm {
    type Payload = VisitorPayload;

    fn set(&mut self, field: &str, value: &str) -> Result<(), AppError> {
        match field {
            "fullName" => self.full_name = value.to_string(),
            "documentId" => self.document_id = value.to_string(),
            "email" => self.email = value.to_string(),
            "phone" => self.phone = value.to_string(),
            "company" => self.company = value.to_string(),
            "notes" => self.notes = value.to_string(),
            "active" => self.active = form::flag(field, value)?,
            _ => return Err(unknown(field)),
        }
        Ok(())
    }

    fn build(&self, _errors: &mut FieldErrors) -> VisitorPayload {
        VisitorPayload {
            full_name: self.full_name.trim().to_string(),
            document_id: self.document_id.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            company: self.company.trim().to_string(),
            notes: self.notes.trim().to_string(),
            active: self.active,
        }
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("fullName", self.full_name.clone()),
            ("documentId", self.document_id.clone()),
            ("email", self.email.clone()),
            ("phone", self.phone.clone()),
            ("company", self.company.clone()),
            ("notes", self.notes.clone()),
            ("active", yes_no(self.active)),
        ]
    }
}

impl ManagedResource for Visitors {
    type Form = VisitorForm;
    type Filter = ();

    const TEXT: ManagerText = ManagerText {
        created: "Visitante cadastrado com sucesso.",
        updated: "Visitante atualizado com sucesso.",
        save_error: "Erro ao salvar visitante.",
        load_error: "Não foi possível carregar os visitantes.",
    };

    fn save(
        service: &ResourceService<Self>,
        editing_id: Option<i64>,
        payload: &VisitorPayload,
    ) -> impl Future<Output = Result<Visitor, AppError>> + Send {
        service.save(editing_id, payload)
    }
}

impl RemovableResource for Visitors {
    const DELETE_TEXT: DeleteText = DeleteText {
        confirm: "Deseja realmente remover este visitante?",
        deleted: "Visitante removido.",
        delete_error: "Erro ao remover visitante.",
    };
}

pub struct VisitorsScreen {
    pub manager: EntityManager<Visitors>,
}

impl VisitorsScreen {
    pub fn new(service: VisitorService) -> Self {
        Self {
            manager: EntityManager::new(service),
        }
    }
}

#[async_trait]
impl Screen for VisitorsScreen {
    fn title(&self) -> &'static str {
        "Visitantes"
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
            Action::Edit(id) => self.manager.start_edit(id)?,
            Action::Cancel => self.manager.cancel_edit(),
            Action::Delete(id) => {
                self.manager.delete(id, confirm).await;
            }
            other => return Err(other.unsupported()),
        }
        Ok(())
    }

    fn feedback(&self) -> Option<&Feedback> {
        self.manager.feedback.as_ref()
    }

    fn render(&self) -> String {
        let mut out = match self.manager.editing_id {
            Some(id) => format!("Editando visitante #{id}:\n"),
            None => "Novo visitante:\n".to_string(),
        };
        out.push_str(&self.manager.form.render());
        if let Some(feedback) = &self.manager.feedback {
            out.push_str(&feedback.render());
        }

        let mut table = Table::new(&[
            "ID", "Nome", "Documento", "Email", "Telefone", "Empresa", "Status",
        ]);
        for visitor in &self.manager.rows {
            table.row(vec![
                visitor.id.to_string(),
                visitor.full_name.clone(),
                format::text(Some(&visitor.document_id)),
                format::text(Some(&visitor.email)),
                format::text(Some(&visitor.phone)),
                format::text(Some(&visitor.company)),
                if visitor.active { "Ativo" } else { "Inativo" }.to_string(),
            ]);
        }
        out.push_str("\nVisitantes cadastrados:\n");
        out.push_str(&table.render("Nenhum visitante cadastrado."));
        out
    }
}
