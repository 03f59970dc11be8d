// src/services/history.rs

use super::resource::{Creatable, Resource, ResourceService};
use crate::{
    common::error::AppError,
    models::history::{HistoryEntry, HistoryFilter, HistoryPayload},
};

/// Histórico é somente inclusão: sem PUT nem DELETE.
pub struct History;

impl Resource for History {
    type Entity = HistoryEntry;
    const PATH: &'static str = "/history";

    fn id(entity: &HistoryEntry) -> i64 {
        entity.id
    }
}

impl Creatable for History {
    type Payload = HistoryPayload;
}

pub type HistoryService = ResourceService<History>;

impl ResourceService<History> {
    /// Lista filtrada por período; sem filtro equivale a `list()`.
    pub async fn list_filtered(
        &self,
        filter: Option<&HistoryFilter>,
    ) -> Result<Vec<HistoryEntry>, AppError> {
        match filter {
            Some(filter) => self.api().get(History::PATH, &filter.query()).await,
            None => self.list().await,
        }
    }

    pub async fn by_user(&self, user_id: i64) -> Result<Vec<HistoryEntry>, AppError> {
        self.api().get(&format!("/history/user/{user_id}"), &[]).await
    }
}
