// src/common/input.rs
//
// Normalização dos valores digitados nos formulários do console.

use chrono::{NaiveDate, NaiveTime};

/// Mantém apenas dígitos (campos de matrícula e número do cartão).
pub fn only_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Texto opcional: vazio depois do trim vira `None`.
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Interpreta um booleano digitado no console ("sim", "true", "1"...).
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "sim" | "s" | "yes" | "y" | "ativo" | "ativa" => Some(true),
        "0" | "false" | "nao" | "não" | "n" | "no" | "inativo" | "inativa" => Some(false),
        _ => None,
    }
}

// Os helpers abaixo devolvem `Err(())` quando o texto não é vazio mas é inválido,
// e `Ok(None)` quando o campo simplesmente não foi preenchido.

pub fn parse_id(value: &str) -> Result<Option<i64>, ()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse::<i64>().map(Some).map_err(|_| ())
}

/// Aceita `AAAA-MM-DD` (o formato do input `date`) e `DD/MM/AAAA`.
pub fn parse_date(value: &str) -> Result<Option<NaiveDate>, ()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .map(Some)
        .map_err(|_| ())
}

/// Aceita `HH:MM` e `HH:MM:SS`.
pub fn parse_time(value: &str) -> Result<Option<NaiveTime>, ()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map(Some)
        .map_err(|_| ())
}
