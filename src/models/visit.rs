// src/models/visit.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::wire_enum;

wire_enum! {
    VisitStatus, default = Agendada {
        Agendada => ("AGENDADA", "Agendada"),
        EmAndamento => ("EM_ANDAMENTO", "Em andamento"),
        Concluida => ("CONCLUIDA", "Concluída"),
        Cancelada => ("CANCELADA", "Cancelada"),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: i64,
    pub visitor_id: i64,
    #[serde(default)]
    pub visitor_name: Option<String>,
    pub host_name: String,
    pub purpose: String,
    pub visit_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: VisitStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

// POST /visits, PUT /visits/{id}
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VisitPayload {
    #[validate(required(message = "O visitante é obrigatório."))]
    pub visitor_id: Option<i64>,
    #[validate(length(min = 1, message = "O anfitrião é obrigatório."))]
    pub host_name: String,
    #[validate(length(min = 1, message = "O propósito é obrigatório."))]
    pub purpose: String,
    #[validate(required(message = "A data da visita é obrigatória."))]
    pub visit_date: Option<NaiveDate>,
    #[validate(required(message = "O horário inicial é obrigatório."))]
    pub start_time: Option<NaiveTime>,
    #[validate(required(message = "O horário final é obrigatório."))]
    pub end_time: Option<NaiveTime>,
    pub status: VisitStatus,
    #[validate(length(max = 255, message = "As observações devem ter no máximo 255 caracteres."))]
    pub notes: String,
}
