// src/views/format.rs
//
// Formatação de datas e da ocupação das salas.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};

use crate::models::area::{Area, UsageStatus};

pub const EMPTY: &str = "—";

pub fn datetime(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|v| v.with_timezone(&Local).format("%d/%m/%Y %H:%M:%S").to_string())
        .unwrap_or_else(|| EMPTY.to_string())
}

pub fn date(value: NaiveDate) -> String {
    value.format("%d/%m/%Y").to_string()
}

pub fn time(value: NaiveTime) -> String {
    value.format("%H:%M").to_string()
}

pub fn text(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => EMPTY.to_string(),
    }
}

/// Coluna "Situação de uso" da tela de áreas.
pub fn area_status(status: Option<&UsageStatus>, active: bool) -> String {
    if !active {
        return "Inativa".to_string();
    }
    status.map_or("Disponível", UsageStatus::label).to_string()
}

/// Coluna "Status" da simulação de acesso.
pub fn simulation_status(status: Option<&UsageStatus>) -> String {
    status.map_or("Indisponível", UsageStatus::label).to_string()
}

/// Coluna "Responsável atual".
pub fn occupant(area: &Area) -> String {
    occupant_of(
        area.in_use || area.occupant_name.is_some(),
        area.occupant_name.as_deref(),
        area.occupant_card_identifier.as_deref(),
    )
}

pub fn occupant_of(in_use: bool, name: Option<&str>, card: Option<&str>) -> String {
    if !in_use {
        return EMPTY.to_string();
    }
    let name = name.filter(|n| !n.is_empty()).unwrap_or("Em uso");
    match card.filter(|c| !c.is_empty()) {
        Some(card) => format!("{name} (Cartão: {card})"),
        None => name.to_string(),
    }
}
