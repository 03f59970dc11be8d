// src/services/recommendation.rs

use super::api::ApiClient;
use crate::{common::error::AppError, models::recommendation::AreaRecommendation};

#[derive(Clone)]
pub struct RecommendationService {
    api: ApiClient,
}

impl RecommendationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Ranking de áreas sugeridas a partir do histórico do cartão.
    pub async fn recommend(
        &self,
        card_identifier: &str,
    ) -> Result<Vec<AreaRecommendation>, AppError> {
        self.api
            .get(
                "/ai/recommendations",
                &[("cardIdentifier", card_identifier.to_string())],
            )
            .await
    }
}
