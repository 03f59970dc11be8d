// src/views/visits.rs

use std::future::Future;

use async_trait::async_trait;

use super::{
    Action, Screen,
    feedback::Feedback,
    form::{self, FormState, parsed, unknown},
    format,
    manager::{DeleteText, EntityManager, ManagedResource, ManagerText, RemovableResource},
    table::Table,
};
use crate::{
    common::{
        error::{AppError, FieldErrors},
        input,
    },
    console::confirm::Confirm,
    models::{
        visit::{Visit, VisitPayload, VisitStatus},
        visitor::Visitor,
    },
    services::{
        resource::ResourceService,
        visit::{VisitService, Visits},
        visitor::VisitorService,
    },
};

#[derive(Debug, Clone, Default)]
pub struct VisitForm {
    pub visitor_id: String,
    pub host_name: String,
    pub purpose: String,
    pub visit_date: String,
    pub start_time: String,
    pub end_time: String,
    pub status: VisitStatus,
    pub notes: String,
}

impl From<&Visit> for VisitForm {
    fn from(visit: &Visit) -> Self {
        Self {
            visitor_id: visit.visitor_id.to_string(),
            host_name: visit.host_name.clone(),
            purpose: visit.purpose.clone(),
            visit_date: visit.visit_date.format("%Y-%m-%d").to_string(),
            start_time: visit.start_time.format("%H:%M").to_string(),
            end_time: visit.end_time.format("%H:%M").to_string(),
            status: visit.status.or_default(),
            notes: visit.notes.clone().unwrap_or_default(),
        }
    }
}

impl FormState for VisitForm {
    type Payload = VisitPayload;

    fn set(&mut self, field: &str, value: &str) -> Result<(), AppError> {
        match field {
            "visitorId" => self.visitor_id = value.trim().to_string(),
            "hostName" => self.host_name = value.to_string(),
            "purpose" => self.purpose = value.to_string(),
            "visitDate" => self.visit_date = value.trim().to_string(),
            "startTime" => self.start_time = value.trim().to_string(),
            "endTime" => self.end_time = value.trim().to_string(),
            "status" => self.status = form::choice(field, value)?,
            "notes" => self.notes = value.to_string(),
            _ => return Err(unknown(field)),
        }
        Ok(())
    }

    fn build(&self, errors: &mut FieldErrors) -> VisitPayload {
        VisitPayload {
            visitor_id: parsed(
                errors,
                "visitorId",
                input::parse_id(&self.visitor_id),
                "Visitante inválido.",
            ),
            host_name: self.host_name.trim().to_string(),
            purpose: self.purpose.trim().to_string(),
            visit_date: parsed(
                errors,
                "visitDate",
                input::parse_date(&self.visit_date),
                "Data inválida.",
            ),
            start_time: parsed(
                errors,
                "startTime",
                input::parse_time(&self.start_time),
                "Horário inválido.",
            ),
            end_time: parsed(
                errors,
                "endTime",
                input::parse_time(&self.end_time),
                "Horário inválido.",
            ),
            status: self.status.clone(),
            notes: self.notes.trim().to_string(),
        }
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("visitorId", self.visitor_id.clone()),
            ("hostName", self.host_name.clone()),
            ("purpose", self.purpose.clone()),
            ("visitDate", self.visit_date.clone()),
            ("startTime", self.start_time.clone()),
            ("endTime", self.end_time.clone()),
            ("status", self.status.wire().to_string()),
            ("notes", self.notes.clone()),
        ]
    }
}

impl ManagedResource for Visits {
    type Form = VisitForm;
    type Filter = ();

    const TEXT: ManagerText = ManagerText {
        created: "Visita cadastrada com sucesso.",
        updated: "Visita atualizada com sucesso.",
        save_error: "Erro ao salvar visita.",
        load_error: "Não foi possível carregar os registros de visita.",
    };

    fn save(
        service: &ResourceService<Self>,
        editing_id: Option<i64>,
        payload: &VisitPayload,
    ) -> impl Future<Output = Result<Visit, AppError>> + Send {
        service.save(editing_id, payload)
    }
}

impl RemovableResource for Visits {
    const DELETE_TEXT: DeleteText = DeleteText {
        confirm: "Deseja realmente remover este registro de visita?",
        deleted: "Visita removida.",
        delete_error: "Erro ao remover visita.",
    };
}

pub struct VisitsScreen {
    pub manager: EntityManager<Visits>,
    pub visitors: Vec<Visitor>,
    visitor_service: VisitorService,
}

impl VisitsScreen {
    pub fn new(service: VisitService, visitor_service: VisitorService) -> Self {
        Self {
            manager: EntityManager::new(service),
            visitors: Vec::new(),
            visitor_service,
        }
    }

    async fn load_all(&mut self) {
        let loaded = tokio::try_join!(self.visitor_service.list(), self.manager.service().list());
        match loaded {
            Ok((visitors, visits)) => {
                self.visitors = visitors;
                self.manager.rows = visits;
            }
            Err(err) => {
                tracing::warn!("Falha ao carregar visitas: {err}");
                self.manager.feedback = Some(Feedback::from_error(&err, Visits::TEXT.load_error));
            }
        }
    }

    fn visitor_label(&self, visit: &Visit) -> String {
        visit
            .visitor_name
            .clone()
            .or_else(|| {
                self.visitors
                    .iter()
                    .find(|v| v.id == visit.visitor_id)
                    .map(|v| v.full_name.clone())
            })
            .unwrap_or_else(|| format!("#{}", visit.visitor_id))
    }
}

#[async_trait]
impl Screen for VisitsScreen {
    fn title(&self) -> &'static str {
        "Visitas"
    }

    async fn mount(&mut self) {
        self.load_all().await;
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
            Action::Refresh => self.load_all().await,
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
            Some(id) => format!("Editando visita #{id}:\n"),
            None => "Nova visita:\n".to_string(),
        };
        out.push_str(&self.manager.form.render());
        let visitors: Vec<String> = self
            .visitors
            .iter()
            .map(|v| format!("{}={}", v.id, v.full_name))
            .collect();
        out.push_str(&format!("  visitantes: {}\n", visitors.join("; ")));
        if let Some(feedback) = &self.manager.feedback {
            out.push_str(&feedback.render());
        }

        let mut table = Table::new(&[
            "ID",
            "Visitante",
            "Anfitrião",
            "Propósito",
            "Data",
            "Início",
            "Término",
            "Status",
        ]);
        for visit in &self.manager.rows {
            table.row(vec![
                visit.id.to_string(),
                self.visitor_label(visit),
                visit.host_name.clone(),
                visit.purpose.clone(),
                format::date(visit.visit_date),
                format::time(visit.start_time),
                format::time(visit.end_time),
                visit.status.label().to_string(),
            ]);
        }
        out.push_str("\nVisitas agendadas:\n");
        out.push_str(&table.render("Nenhuma visita cadastrada."));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn times_accept_hours_and_minutes() {
        let mut form = VisitForm::default();
        for (field, value) in [
            ("visitorId", "3"),
            ("hostName", "Carla"),
            ("purpose", "Auditoria"),
            ("visitDate", "10/02/2025"),
            ("startTime", "09:00"),
            ("endTime", "10:30:00"),
            ("status", "em_andamento"),
        ] {
            form.set(field, value).unwrap();
        }
        let payload = form.payload().unwrap();
        assert_eq!(payload.status, VisitStatus::EmAndamento);
        assert_eq!(payload.end_time.map(|t| t.to_string()), Some("10:30:00".to_string()));
    }
}
