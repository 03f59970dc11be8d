// src/services/access.rs

use super::api::ApiClient;
use crate::{
    common::error::AppError,
    models::access::{AccessCheckRequest, AccessCheckResponse},
};

#[derive(Clone)]
pub struct AccessService {
    api: ApiClient,
}

impl AccessService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Consulta se o cartão pode entrar/sair da área. Não altera a ocupação.
    pub async fn simulate(
        &self,
        request: &AccessCheckRequest,
    ) -> Result<AccessCheckResponse, AppError> {
        self.api.post("/access/simulate", request).await
    }
}
