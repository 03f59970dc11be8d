// src/models/access.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::history::{AccessResult, EventType};

// POST /access/simulate: verifica a permissão sem alterar a ocupação da sala
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccessCheckRequest {
    pub card_identifier: String,
    pub area_id: i64,
    pub event_type: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 160, message = "As observações devem ter no máximo 160 caracteres."))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessCheckResponse {
    pub authorized: bool,
    pub result: AccessResult,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub card_identifier: Option<String>,
    #[serde(default)]
    pub area_name: Option<String>,
}
