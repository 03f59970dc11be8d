// src/services/auth.rs

use super::api::ApiClient;
use crate::{
    common::error::AppError,
    models::auth::{AuthResponse, LoginPayload, RegisterPayload},
};

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn login(&self, payload: &LoginPayload) -> Result<AuthResponse, AppError> {
        Self::accepted(self.api.post("/auth/login", payload).await?)
    }

    pub async fn register(&self, payload: &RegisterPayload) -> Result<AuthResponse, AppError> {
        Self::accepted(self.api.post("/auth/register", payload).await?)
    }

    // Um 2xx com `success: false` também é falha
    fn accepted(response: AuthResponse) -> Result<AuthResponse, AppError> {
        if response.success {
            return Ok(response);
        }
        tracing::warn!("API recusou a autenticação: {:?}", response.message);
        Err(AppError::Api {
            status: 200,
            message: response.message,
            errors: Default::default(),
        })
    }
}
