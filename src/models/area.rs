// src/models/area.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{history::EventType, wire_enum};

wire_enum! {
    /// Nível de segurança da área.
    SecurityLevel, default = Restrita {
        Restrita => ("RESTRITA", "Restrita"),
        Confidencial => ("CONFIDENCIAL", "Confidencial"),
        Geral => ("GERAL", "Geral"),
        Critica => ("CRITICA", "Crítica"),
    }
}

wire_enum! {
    /// Situação de uso calculada pelo servidor ("Disponivel", "EmUso", "NaoDevolvida").
    UsageStatus, default = Disponivel {
        Disponivel => ("DISPONIVEL", "Disponível"),
        EmUso => ("EMUSO", "Em uso"),
        NaoDevolvida => ("NAODEVOLVIDA", "Não devolvida"),
    }
}

impl UsageStatus {
    /// Em uso ou não devolvida: a sala tem um responsável.
    pub fn is_occupied(&self) -> bool {
        matches!(self, UsageStatus::EmUso | UsageStatus::NaoDevolvida)
    }
}

// Área de acesso como a API devolve
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub id: i64,
    #[serde(default)]
    pub active: bool,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub security_level: SecurityLevel,
    #[serde(default)]
    pub notes: Option<String>,

    // --- Ocupação ---
    #[serde(default)]
    pub in_use: bool,
    #[serde(default)]
    pub status: Option<UsageStatus>,
    #[serde(default)]
    pub occupant_name: Option<String>,
    #[serde(default)]
    pub occupant_card_identifier: Option<String>,
    #[serde(default)]
    pub occupant_user_id: Option<i64>,
    #[serde(default)]
    pub last_movement_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub usage_deadline: Option<DateTime<Utc>>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Area {
    /// Rótulo usado nas listas de seleção: "Nome - Localização".
    pub fn option_label(&self) -> String {
        format!("{} - {}", self.name, self.location)
    }

    /// Aplica no próprio registro os campos de ocupação devolvidos por uma movimentação.
    pub fn apply_movement(&mut self, movement: &MovementResponse) {
        self.status = movement.status.clone();
        self.in_use = movement.in_use.unwrap_or_else(|| {
            movement
                .status
                .as_ref()
                .is_some_and(UsageStatus::is_occupied)
        });
        self.occupant_name = movement.occupant_name.clone();
        self.occupant_card_identifier = movement.occupant_card_identifier.clone();
        self.last_movement_at = movement.last_movement_at;
        self.usage_deadline = movement.usage_deadline;
    }
}

// Payload de criação/atualização (POST /areas, PUT /areas/{id})
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AreaPayload {
    #[validate(length(min = 1, message = "Informe o nome da área."))]
    pub name: String,
    #[validate(length(min = 1, message = "Informe a descrição."))]
    pub description: String,
    #[validate(length(min = 1, message = "Informe a localização."))]
    pub location: String,
    pub security_level: SecurityLevel,
    #[validate(length(max = 255, message = "As observações devem ter no máximo 255 caracteres."))]
    pub notes: String,
    pub active: bool,
}

// POST /areas/movements
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementRequest {
    pub card_identifier: String,
    pub area_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// O servidor decide se é ENTRADA ou SAIDA conforme a ocupação atual da sala
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementResponse {
    pub area_id: i64,
    #[serde(default)]
    pub area_name: Option<String>,
    #[serde(default)]
    pub movement_type: Option<EventType>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<UsageStatus>,
    #[serde(default)]
    pub in_use: Option<bool>,
    #[serde(default)]
    pub occupant_name: Option<String>,
    #[serde(default)]
    pub occupant_card_identifier: Option<String>,
    #[serde(default)]
    pub last_movement_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub usage_deadline: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(id: i64) -> Area {
        serde_json::from_value(serde_json::json!({
            "id": id, "active": true, "name": format!("Sala {id}"),
            "description": "d", "location": "Bloco A", "securityLevel": "GERAL",
            "inUse": false, "status": "Disponivel"
        }))
        .unwrap()
    }

    #[test]
    fn status_matching_ignores_case() {
        assert_eq!(UsageStatus::from("emuso"), UsageStatus::EmUso);
        assert_eq!(UsageStatus::from("NaoDevolvida"), UsageStatus::NaoDevolvida);
        assert_eq!(UsageStatus::from("Reservada"), UsageStatus::Outro("Reservada".into()));
    }

    #[test]
    fn unknown_security_level_is_kept_verbatim() {
        let level = SecurityLevel::from("ULTRA");
        assert_eq!(level.label(), "ULTRA");
        assert_eq!(level.or_default(), SecurityLevel::Restrita);
    }

    #[test]
    fn movement_without_in_use_derives_it_from_status() {
        let mut target = area(7);
        let movement: MovementResponse = serde_json::from_value(serde_json::json!({
            "areaId": 7, "status": "emuso", "occupantName": "Jane"
        }))
        .unwrap();
        target.apply_movement(&movement);
        assert!(target.in_use);
        assert_eq!(target.status, Some(UsageStatus::EmUso));
        assert_eq!(target.occupant_name.as_deref(), Some("Jane"));
    }

    #[test]
    fn movement_request_omits_empty_notes() {
        let request = MovementRequest {
            card_identifier: "12345".into(),
            area_id: 7,
            notes: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"cardIdentifier": "12345", "areaId": 7}));
    }
}
