// src/views/history.rs

use std::future::Future;

use async_trait::async_trait;

use super::{
    Action, Screen,
    feedback::Feedback,
    form::{self, FormState, parsed, unknown},
    format,
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
        area::Area,
        history::{AccessResult, EventType, HistoryEntry, HistoryFilter, HistoryPayload},
        user::UserSummary,
    },
    services::{
        area::AreaService,
        history::{History, HistoryService},
        resource::ResourceService,
        user::UserService,
    },
};

#[derive(Debug, Clone, Default)]
pub struct HistoryForm {
    pub user_id: String,
    pub area_id: String,
    pub event_type: EventType,
    pub result: AccessResult,
    pub card_identifier: String,
    pub notes: String,
}

impl FormState for HistoryForm {
    type Payload = HistoryPayload;

    fn set(&mut self, field: &str, value: &str) -> Result<(), AppError> {
        match field {
            "userId" => self.user_id = value.trim().to_string(),
            "areaId" => self.area_id = value.trim().to_string(),
            "eventType" => self.event_type = form::choice(field, value)?,
            "result" => self.result = form::choice(field, value)?,
            "cardIdentifier" => self.card_identifier = input::only_digits(value),
            "notes" => self.notes = value.to_string(),
            _ => return Err(unknown(field)),
        }
        Ok(())
    }

    fn build(&self, errors: &mut FieldErrors) -> HistoryPayload {
        HistoryPayload {
            user_id: parsed(errors, "userId", input::parse_id(&self.user_id), "Usuário inválido."),
            area_id: parsed(errors, "areaId", input::parse_id(&self.area_id), "Área inválida."),
            event_type: self.event_type.clone(),
            result: self.result.clone(),
            card_identifier: self.card_identifier.trim().to_string(),
            notes: self.notes.trim().to_string(),
        }
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("userId", self.user_id.clone()),
            ("areaId", self.area_id.clone()),
            ("eventType", self.event_type.wire().to_string()),
            ("result", self.result.wire().to_string()),
            ("cardIdentifier", self.card_identifier.clone()),
            ("notes", self.notes.clone()),
        ]
    }
}

impl ManagedResource for History {
    type Form = HistoryForm;
    type Filter = Option<HistoryFilter>;

    const TEXT: ManagerText = ManagerText {
        created: "Evento registrado no histórico.",
        updated: "Evento registrado no histórico.",
        save_error: "Erro ao registrar evento.",
        load_error: "Não foi possível carregar o histórico.",
    };

    fn list(
        service: &ResourceService<Self>,
        filter: &Option<HistoryFilter>,
    ) -> impl Future<Output = Result<Vec<HistoryEntry>, AppError>> + Send {
        service.list_filtered(filter.as_ref())
    }
}

const OPTIONS_ERROR: &str = "Não foi possível carregar usuários/áreas.";

pub struct HistoryScreen {
    pub manager: EntityManager<History>,
    pub users: Vec<UserSummary>,
    pub areas: Vec<Area>,
    user_service: UserService,
    area_service: AreaService,
}

impl HistoryScreen {
    pub fn new(service: HistoryService, user_service: UserService, area_service: AreaService) -> Self {
        Self {
            manager: EntityManager::new(service),
            users: Vec::new(),
            areas: Vec::new(),
            user_service,
            area_service,
        }
    }

    pub fn filter(&self) -> Option<&HistoryFilter> {
        self.manager.filter.as_ref()
    }
}

#[async_trait]
impl Screen for HistoryScreen {
    fn title(&self) -> &'static str {
        "Histórico"
    }

    /// Opções (usuários/áreas) e histórico em paralelo, com mensagens de erro separadas.
    async fn mount(&mut self) {
        let (users, areas) = (&self.user_service, &self.area_service);
        let options = async move { tokio::try_join!(users.list(), areas.list()) };
        let (options, history_loaded) = tokio::join!(options, self.manager.load());
        match options {
            Ok((users, areas)) => {
                self.users = users;
                self.areas = areas;
            }
            Err(err) => {
                tracing::warn!("Falha ao carregar usuários/áreas: {err}");
                // A falha do próprio histórico tem prioridade na faixa de mensagem
                if history_loaded {
                    self.manager.feedback = Some(Feedback::from_error(&err, OPTIONS_ERROR));
                }
            }
        }
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
            Action::Filter { start, end } => {
                self.manager.filter = Some(HistoryFilter { start, end });
                self.manager.load().await;
            }
            Action::Unfilter => {
                self.manager.filter = None;
                self.manager.load().await;
            }
            other => return Err(other.unsupported()),
        }
        Ok(())
    }

    fn feedback(&self) -> Option<&Feedback> {
        self.manager.feedback.as_ref()
    }

    fn render(&self) -> String {
        let mut out = String::from("Registrar evento:\n");
        out.push_str(&self.manager.form.render());
        let users: Vec<String> = self
            .users
            .iter()
            .map(|u| format!("{}={}", u.id, u.option_label()))
            .collect();
        out.push_str(&format!("  usuários: {}\n", users.join("; ")));
        let areas: Vec<String> = self
            .areas
            .iter()
            .map(|a| format!("{}={}", a.id, a.option_label()))
            .collect();
        out.push_str(&format!("  áreas: {}\n", areas.join("; ")));
        if let Some(feedback) = &self.manager.feedback {
            out.push_str(&feedback.render());
        }

        match self.filter() {
            Some(filter) => out.push_str(&format!(
                "\nHistórico de {} a {}:\n",
                format::date(filter.start),
                format::date(filter.end)
            )),
            None => out.push_str("\nHistórico:\n"),
        }
        let mut table = Table::new(&[
            "Data/Hora",
            "Nome",
            "Nº do cartão",
            "Área",
            "Evento",
            "Resultado",
            "Observações",
        ]);
        for entry in &self.manager.rows {
            table.row(vec![
                format::datetime(entry.recorded_at),
                format::text(entry.user_name.as_deref()),
                format::text(entry.card_identifier.as_deref()),
                format::text(entry.area_name.as_deref()),
                entry.event_type.label().to_string(),
                entry.result.label().to_string(),
                format::text(entry.notes.as_deref()),
            ]);
        }
        out.push_str(&table.render("Nenhum evento registrado."));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_user_and_area_block_submit() {
        let mut form = HistoryForm::default();
        form.set("cardIdentifier", "99-1").unwrap();
        assert_eq!(form.card_identifier, "991");
        let errors = form.field_errors();
        assert!(errors.contains_key("userId"));
        assert!(errors.contains_key("areaId"));
        assert!(!errors.contains_key("cardIdentifier"));
    }
}
