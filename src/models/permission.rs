// src/models/permission.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::wire_enum;

wire_enum! {
    AccessLevel, default = Padrao {
        Padrao => ("PADRAO", "Padrão"),
        Supervisor => ("SUPERVISOR", "Supervisor"),
        Admin => ("ADMIN", "Administrador"),
        Visitante => ("VISITANTE", "Visitante"),
    }
}

wire_enum! {
    PermissionStatus, default = Ativa {
        Ativa => ("ATIVA", "Ativa"),
        Suspensa => ("SUSPENSA", "Suspensa"),
        Revogada => ("REVOGADA", "Revogada"),
        Expirada => ("EXPIRADA", "Expirada"),
    }
}

// Concessão com prazo: usuário -> área, com nível de acesso
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    pub area_id: i64,
    #[serde(default)]
    pub area_name: Option<String>,
    pub access_level: AccessLevel,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
    pub status: PermissionStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

// POST /permissions, PUT /permissions/{id}
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PermissionPayload {
    #[validate(required(message = "O usuário é obrigatório."))]
    pub user_id: Option<i64>,
    #[validate(required(message = "A área é obrigatória."))]
    pub area_id: Option<i64>,
    pub access_level: AccessLevel,
    #[validate(required(message = "A data de início é obrigatória."))]
    pub valid_from: Option<NaiveDate>,
    #[validate(required(message = "A data de término é obrigatória."))]
    pub valid_until: Option<NaiveDate>,
    pub status: PermissionStatus,
    #[validate(length(max = 160, message = "As observações devem ter no máximo 160 caracteres."))]
    pub notes: String,
}
