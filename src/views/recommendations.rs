// src/views/recommendations.rs

use async_trait::async_trait;

use super::{Action, Screen, feedback::Feedback, form::unknown, format, table::Table};
use crate::{
    common::{error::AppError, input},
    console::confirm::Confirm,
    models::recommendation::AreaRecommendation,
    services::recommendation::RecommendationService,
};

const MISSING_CARD: &str = "Informe o número do cartão para gerar recomendações.";
const NOT_ENOUGH_DATA: &str =
    "Sem registros suficientes para recomendar novas áreas. Registre movimentações para gerar sugestões.";
const LOAD_ERROR: &str = "Não foi possível gerar recomendações.";

pub struct RecommendationsScreen {
    pub card_identifier: String,
    pub recommendations: Vec<AreaRecommendation>,
    pub feedback: Option<Feedback>,
    pub loading: bool,
    service: RecommendationService,
}

impl RecommendationsScreen {
    pub fn new(service: RecommendationService) -> Self {
        Self {
            card_identifier: String::new(),
            recommendations: Vec::new(),
            feedback: None,
            loading: false,
            service,
        }
    }

    /// Lista vazia vira mensagem de sucesso; erro limpa a lista.
    pub async fn fetch(&mut self) {
        let card = self.card_identifier.trim().to_string();
        if card.is_empty() {
            self.feedback = Some(Feedback::error(MISSING_CARD));
            self.recommendations.clear();
            return;
        }

        self.loading = true;
        self.feedback = None;
        let result = self.service.recommend(&card).await;
        self.loading = false;

        match result {
            Ok(recommendations) => {
                if recommendations.is_empty() {
                    self.feedback = Some(Feedback::success(NOT_ENOUGH_DATA));
                }
                self.recommendations = recommendations;
            }
            Err(err) => {
                tracing::warn!("Falha ao gerar recomendações: {err}");
                self.feedback = Some(Feedback::from_error(&err, LOAD_ERROR));
                self.recommendations.clear();
            }
        }
    }
}

#[async_trait]
impl Screen for RecommendationsScreen {
    fn title(&self) -> &'static str {
        "Recomendações"
    }

    async fn mount(&mut self) {}

    async fn handle(
        &mut self,
        action: Action,
        _confirm: &mut (dyn Confirm + Send),
    ) -> Result<(), AppError> {
        match action {
            Action::Set { field, value } if field == "cardIdentifier" => {
                self.card_identifier = input::only_digits(&value);
            }
            Action::Set { field, .. } => return Err(unknown(&field)),
            Action::Search | Action::Submit => self.fetch().await,
            other => return Err(other.unsupported()),
        }
        Ok(())
    }

    fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    fn render(&self) -> String {
        let mut out = format!("  {:<18} = {}\n", "cardIdentifier", self.card_identifier);
        if let Some(feedback) = &self.feedback {
            out.push_str(&feedback.render());
        }

        let mut table = Table::new(&["Área", "Acessos recentes", "Último acesso", "Motivo"]);
        for item in &self.recommendations {
            table.row(vec![
                item.area_name.clone(),
                item.access_count.to_string(),
                format::datetime(item.last_access_at),
                format::text(Some(&item.recommendation_reason)),
            ]);
        }
        out.push_str("\nÁreas sugeridas:\n");
        out.push_str(&table.render("Nenhuma recomendação disponível."));
        out
    }
}
