// src/models/recommendation.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Item do ranking devolvido por GET /ai/recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaRecommendation {
    pub area_id: i64,
    pub area_name: String,
    #[serde(default)]
    pub access_count: u64,
    #[serde(default)]
    pub last_access_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub recommendation_reason: String,
}
