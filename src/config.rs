// src/config.rs

use std::time::Duration;

use crate::services::{
    access::AccessService, api::ApiClient, api::DEFAULT_BASE_URL, area::AreaService,
    auth::AuthService, history::HistoryService, permission::PermissionService,
    recommendation::RecommendationService, user::UserService, visit::VisitService,
    visitor::VisitorService,
};

/// Configuração do console (vinda de argumentos, variáveis de ambiente ou `.env`).
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    /// Sem timeout quando `None`.
    pub timeout: Option<Duration>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub auth_service: AuthService,
    pub users: UserService,
    pub areas: AreaService,
    pub permissions: PermissionService,
    pub visitors: VisitorService,
    pub visits: VisitService,
    pub history: HistoryService,
    pub recommendations: RecommendationService,
    pub access: AccessService,
}

impl AppState {
    pub fn new(config: &ConsoleConfig) -> anyhow::Result<Self> {
        let api = ApiClient::new(&config.api_base_url, config.timeout)?;
        tracing::info!(base_url = api.base_url(), "✅ Cliente da API configurado");

        // --- Monta o gráfico de dependências ---
        Ok(Self {
            auth_service: AuthService::new(api.clone()),
            users: UserService::new(api.clone()),
            areas: AreaService::new(api.clone()),
            permissions: PermissionService::new(api.clone()),
            visitors: VisitorService::new(api.clone()),
            visits: VisitService::new(api.clone()),
            history: HistoryService::new(api.clone()),
            recommendations: RecommendationService::new(api.clone()),
            access: AccessService::new(api.clone()),
            api,
        })
    }
}
