// src/views/self_service.rs

use async_trait::async_trait;

use super::{Action, Screen, feedback::Feedback, format, table::Table};
use crate::{
    common::error::AppError,
    console::confirm::Confirm,
    models::{area::Area, history::HistoryEntry, permission::Permission},
    router::session::SessionUser,
    services::{area::AreaService, history::HistoryService, permission::PermissionService},
};

const LOAD_ERROR: &str = "Não foi possível carregar seus dados.";

/// "Minha conta": permissões, salas liberadas e histórico do próprio usuário. Somente leitura.
pub struct SelfServiceScreen {
    pub user: SessionUser,
    pub permissions: Vec<Permission>,
    pub areas: Vec<Area>,
    pub history: Vec<HistoryEntry>,
    pub feedback: Option<Feedback>,
    pub loading: bool,
    permission_service: PermissionService,
    area_service: AreaService,
    history_service: HistoryService,
}

impl SelfServiceScreen {
    pub fn new(
        user: SessionUser,
        permission_service: PermissionService,
        area_service: AreaService,
        history_service: HistoryService,
    ) -> Self {
        Self {
            user,
            permissions: Vec::new(),
            areas: Vec::new(),
            history: Vec::new(),
            feedback: None,
            loading: false,
            permission_service,
            area_service,
            history_service,
        }
    }

    /// As três consultas em paralelo; qualquer falha vira um único erro.
    pub async fn load(&mut self) {
        let card = self.user.card_identifier.clone().unwrap_or_default();
        self.loading = true;
        self.feedback = None;
        let loaded = tokio::try_join!(
            self.permission_service.by_user(self.user.id),
            self.area_service.authorized(&card),
            self.history_service.by_user(self.user.id),
        );
        self.loading = false;

        match loaded {
            Ok((permissions, areas, history)) => {
                self.permissions = permissions;
                self.areas = areas;
                self.history = history;
            }
            Err(err) => {
                tracing::warn!(user_id = self.user.id, "Falha ao carregar dados do usuário: {err}");
                self.feedback = Some(Feedback::from_error(&err, LOAD_ERROR));
            }
        }
    }
}

#[async_trait]
impl Screen for SelfServiceScreen {
    fn title(&self) -> &'static str {
        "Minha conta"
    }

    async fn mount(&mut self) {
        self.load().await;
    }

    async fn handle(
        &mut self,
        action: Action,
        _confirm: &mut (dyn Confirm + Send),
    ) -> Result<(), AppError> {
        match action {
            Action::Refresh => self.load().await,
            other => return Err(other.unsupported()),
        }
        Ok(())
    }

    fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    fn render(&self) -> String {
        let mut out = format!(
            "Bem-vindo, {}. Abaixo estão suas permissões e histórico.\n",
            self.user.name
        );
        if let Some(feedback) = &self.feedback {
            out.push_str(&feedback.render());
            return out;
        }

        let mut permissions = Table::new(&["Área", "Nível", "Válida de", "Válida até", "Status"]);
        for permission in &self.permissions {
            permissions.row(vec![
                permission
                    .area_name
                    .clone()
                    .unwrap_or_else(|| format!("#{}", permission.area_id)),
                permission.access_level.label().to_string(),
                format::date(permission.valid_from),
                format::date(permission.valid_until),
                permission.status.label().to_string(),
            ]);
        }
        out.push_str("\nMinhas permissões:\n");
        out.push_str(&permissions.render("Nenhuma permissão ativa registrada."));

        let mut areas = Table::new(&["Sala", "Localização", "Nível", "Status", "Observações"]);
        for area in &self.areas {
            areas.row(vec![
                area.name.clone(),
                area.location.clone(),
                area.security_level.label().to_string(),
                format::area_status(area.status.as_ref(), area.active),
                format::text(area.notes.as_deref()),
            ]);
        }
        out.push_str("\nSalas autorizadas:\n");
        out.push_str(&areas.render("Nenhuma sala autorizada no momento."));

        let mut history = Table::new(&["Data/Hora", "Área", "Evento", "Resultado"]);
        for entry in &self.history {
            history.row(vec![
                format::datetime(entry.recorded_at),
                format::text(entry.area_name.as_deref()),
                entry.event_type.label().to_string(),
                entry.result.label().to_string(),
            ]);
        }
        out.push_str("\nMeu histórico:\n");
        out.push_str(&history.render("Nenhum evento registrado."));
        out
    }
}
