// src/views/access_simulation.rs
//
// Simulação de acesso: busca as salas liberadas para um cartão e registra
// entradas/saídas, atualizando a ocupação da sala no próprio lugar.

use async_trait::async_trait;
use validator::Validate;

use super::{
    Action, Screen,
    feedback::{DEFAULT_SUCCESS, Feedback},
    form::{self, unknown},
    format,
    table::Table,
};
use crate::{
    common::{
        error::{AppError, FieldErrors},
        input,
    },
    console::confirm::Confirm,
    models::{
        access::AccessCheckRequest,
        area::{Area, MovementRequest, MovementResponse},
        history::EventType,
    },
    services::{access::AccessService, area::AreaService},
};

const SEARCH_WITHOUT_CARD: &str = "Informe o número do cartão antes de buscar as salas autorizadas.";
const MISSING_CARD: &str = "Informe o número do cartão.";
const MISSING_AREA: &str = "Selecione uma sala autorizada para registrar a movimentação.";
const LOAD_ERROR: &str = "Não foi possível carregar as salas autorizadas.";
const MOVEMENT_ERROR: &str = "Erro ao registrar a movimentação.";
const CHECK_ERROR: &str = "Não foi possível simular o acesso.";

pub struct AccessSimulationScreen {
    pub card_identifier: String,
    pub area_id: Option<i64>,
    pub notes: String,
    /// Sentido usado pelo `check` (na movimentação quem decide é o servidor).
    pub event_type: EventType,
    pub areas: Vec<Area>,
    pub feedback: Option<Feedback>,
    pub loading: bool,
    area_service: AreaService,
    access_service: AccessService,
}

impl AccessSimulationScreen {
    pub fn new(area_service: AreaService, access_service: AccessService) -> Self {
        Self {
            card_identifier: String::new(),
            area_id: None,
            notes: String::new(),
            event_type: EventType::default(),
            areas: Vec::new(),
            feedback: None,
            loading: false,
            area_service,
            access_service,
        }
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), AppError> {
        match field {
            "cardIdentifier" => self.card_identifier = input::only_digits(value),
            "areaId" => {
                let id = input::parse_id(value).ok().flatten();
                match id.filter(|id| self.areas.iter().any(|a| a.id == *id)) {
                    Some(id) => self.area_id = Some(id),
                    None => {
                        return Err(AppError::Validation(FieldErrors::from([(
                            field.to_string(),
                            MISSING_AREA.to_string(),
                        )])));
                    }
                }
            }
            "notes" => self.notes = value.to_string(),
            "eventType" => self.event_type = form::choice(field, value)?,
            _ => return Err(unknown(field)),
        }
        Ok(())
    }

    /// Busca as salas autorizadas. A seleção atual é mantida se ainda estiver na lista;
    /// senão a primeira sala é selecionada.
    pub async fn search(&mut self) {
        let card = self.card_identifier.trim().to_string();
        if card.is_empty() {
            self.feedback = Some(Feedback::error(SEARCH_WITHOUT_CARD));
            return;
        }

        self.loading = true;
        self.feedback = None;
        let result = self.area_service.authorized(&card).await;
        self.loading = false;

        match result {
            Ok(areas) => {
                let still_listed = self
                    .area_id
                    .is_some_and(|selected| areas.iter().any(|a| a.id == selected));
                if !still_listed {
                    self.area_id = areas.first().map(|a| a.id);
                }
                self.areas = areas;
            }
            Err(err) => {
                tracing::warn!("Falha ao buscar salas autorizadas: {err}");
                self.feedback = Some(Feedback::from_error(&err, LOAD_ERROR));
            }
        }
    }

    fn required_inputs(&mut self) -> Option<(String, i64)> {
        let card = self.card_identifier.trim().to_string();
        if card.is_empty() {
            self.feedback = Some(Feedback::error(MISSING_CARD));
            return None;
        }
        let Some(area_id) = self.area_id else {
            self.feedback = Some(Feedback::error(MISSING_AREA));
            return None;
        };
        Some((card, area_id))
    }

    /// Registra a movimentação e corrige só a linha da sala movimentada.
    pub async fn submit(&mut self) {
        let Some((card_identifier, area_id)) = self.required_inputs() else {
            return;
        };

        let request = MovementRequest {
            card_identifier,
            area_id,
            notes: input::non_empty(&self.notes),
        };

        self.loading = true;
        self.feedback = None;
        let result = self.area_service.register_movement(&request).await;
        self.loading = false;
        self.notes.clear();

        match result {
            Ok(movement) => {
                if let Some(area) = self.areas.iter_mut().find(|a| a.id == movement.area_id) {
                    area.apply_movement(&movement);
                }
                tracing::info!(area_id = movement.area_id, "✅ Movimentação registrada");
                self.feedback = Some(movement_feedback(&movement));
            }
            Err(err) => {
                self.feedback = Some(Feedback::from_error(&err, MOVEMENT_ERROR));
            }
        }
    }

    /// Pergunta ao servidor se o acesso seria liberado, sem registrar movimentação.
    pub async fn check(&mut self) {
        let Some((card_identifier, area_id)) = self.required_inputs() else {
            return;
        };

        let request = AccessCheckRequest {
            card_identifier,
            area_id,
            event_type: self.event_type.clone(),
            notes: input::non_empty(&self.notes),
        };
        if let Err(errors) = request.validate() {
            self.feedback = Some(Feedback::from_error(&AppError::from(errors), CHECK_ERROR));
            return;
        }

        self.loading = true;
        self.feedback = None;
        let result = self.access_service.simulate(&request).await;
        self.loading = false;

        self.feedback = Some(match result {
            Ok(check) => {
                let message = check
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("Acesso {}.", check.result.label().to_lowercase()));
                let base = if check.authorized {
                    Feedback::success(message)
                } else {
                    Feedback::error(message)
                };
                let mut feedback = base.with_detail("Resultado", check.result.label());
                if let Some(user) = &check.user_name {
                    feedback = feedback.with_detail("Usuário", user.clone());
                }
                if let Some(area) = &check.area_name {
                    feedback = feedback.with_detail("Área", area.clone());
                }
                feedback
            }
            Err(err) => Feedback::from_error(&err, CHECK_ERROR),
        });
    }

    /// Limpa o formulário mantendo o número do cartão.
    pub fn reset(&mut self) {
        self.area_id = None;
        self.notes.clear();
        self.event_type = EventType::default();
        self.feedback = None;
    }
}

fn movement_feedback(movement: &MovementResponse) -> Feedback {
    let message = movement.message.clone().unwrap_or_else(|| DEFAULT_SUCCESS.to_string());
    let mut feedback = Feedback::success(message);
    if let Some(kind) = &movement.movement_type {
        feedback = feedback
            .with_detail("Movimento", kind.label())
            .with_detail("Status", format::simulation_status(movement.status.as_ref()));
        if let Some(name) = &movement.occupant_name {
            feedback = feedback.with_detail("Responsável", name.clone());
        }
        if let Some(card) = &movement.occupant_card_identifier {
            feedback = feedback.with_detail("Cartão", card.clone());
        }
    }
    feedback
}

#[async_trait]
impl Screen for AccessSimulationScreen {
    fn title(&self) -> &'static str {
        "Simulação de acesso"
    }

    // Nada a carregar antes de informar o cartão
    async fn mount(&mut self) {}

    async fn handle(
        &mut self,
        action: Action,
        _confirm: &mut (dyn Confirm + Send),
    ) -> Result<(), AppError> {
        match action {
            Action::Set { field, value } => self.set_field(&field, &value)?,
            Action::Search | Action::Refresh => self.search().await,
            Action::Submit => self.submit().await,
            Action::Check => self.check().await,
            Action::Reset => self.reset(),
            other => return Err(other.unsupported()),
        }
        Ok(())
    }

    fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    fn render(&self) -> String {
        let selected = self
            .area_id
            .and_then(|id| self.areas.iter().find(|a| a.id == id))
            .map(|a| format!("{} ({})", a.id, a.option_label()))
            .unwrap_or_default();

        let mut out = String::from("Movimentação:\n");
        for (field, value) in [
            ("cardIdentifier", self.card_identifier.clone()),
            ("areaId", selected),
            ("notes", self.notes.clone()),
            ("eventType", self.event_type.wire().to_string()),
        ] {
            out.push_str(&format!("  {field:<18} = {value}\n"));
        }
        if let Some(feedback) = &self.feedback {
            out.push_str(&feedback.render());
        }

        let mut table = Table::new(&[
            "ID",
            "Sala",
            "Localização",
            "Status",
            "Responsável atual",
            "Prazo limite",
            "Última movimentação",
        ]);
        for area in &self.areas {
            table.row(vec![
                area.id.to_string(),
                area.name.clone(),
                area.location.clone(),
                format::simulation_status(area.status.as_ref()),
                format::occupant(area),
                format::datetime(area.usage_deadline),
                format::datetime(area.last_movement_at),
            ]);
        }
        let empty = if self.card_identifier.is_empty() {
            "Informe o cartão e use \"search\" para visualizar os ambientes autorizados."
        } else {
            "Nenhuma sala autorizada encontrada para este cartão ou os dados ainda não foram carregados."
        };
        out.push_str("\nSalas autorizadas:\n");
        out.push_str(&table.render(empty));
        out
    }
}
