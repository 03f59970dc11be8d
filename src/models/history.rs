// src/models/history.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::wire_enum;

wire_enum! {
    EventType, default = Entrada {
        Entrada => ("ENTRADA", "Entrada"),
        Saida => ("SAIDA", "Saída"),
    }
}

wire_enum! {
    AccessResult, default = Autorizado {
        Autorizado => ("AUTORIZADO", "Autorizado"),
        Negado => ("NEGADO", "Negado"),
    }
}

// Registro imutável de uma tentativa de acesso
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub user_name: Option<String>,
    pub area_id: i64,
    #[serde(default)]
    pub area_name: Option<String>,
    pub event_type: EventType,
    pub result: AccessResult,
    #[serde(default)]
    pub card_identifier: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
}

// POST /history
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPayload {
    #[validate(required(message = "O usuário é obrigatório."))]
    pub user_id: Option<i64>,
    #[validate(required(message = "A área é obrigatória."))]
    pub area_id: Option<i64>,
    pub event_type: EventType,
    pub result: AccessResult,
    #[validate(length(min = 1, max = 120, message = "O identificador do cartão é obrigatório."))]
    pub card_identifier: String,
    #[validate(length(max = 160, message = "As observações devem ter no máximo 160 caracteres."))]
    pub notes: String,
}

/// Filtro por período. Só é aplicado com as duas datas preenchidas;
/// o dia inicial começa às 00:00:00Z e o final termina às 23:59:59Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryFilter {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl HistoryFilter {
    pub fn query(&self) -> [(&'static str, String); 2] {
        [
            ("start", format!("{}T00:00:00Z", self.start.format("%Y-%m-%d"))),
            ("end", format!("{}T23:59:59Z", self.end.format("%Y-%m-%d"))),
        ]
    }
}
