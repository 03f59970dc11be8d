// src/services/area.rs

use super::resource::{Creatable, Deletable, Resource, ResourceService, Updatable};
use crate::{
    common::error::AppError,
    models::area::{Area, AreaPayload, MovementRequest, MovementResponse},
};

pub struct Areas;

impl Resource for Areas {
    type Entity = Area;
    const PATH: &'static str = "/areas";

    fn id(entity: &Area) -> i64 {
        entity.id
    }
}

impl Creatable for Areas {
    type Payload = AreaPayload;
}

impl Updatable for Areas {
    type UpdatePayload = AreaPayload;
}

impl Deletable for Areas {}

pub type AreaService = ResourceService<Areas>;

impl ResourceService<Areas> {
    /// Áreas liberadas para o cartão informado (GET /areas/authorized).
    pub async fn authorized(&self, card_identifier: &str) -> Result<Vec<Area>, AppError> {
        self.api()
            .get(
                "/areas/authorized",
                &[("cardIdentifier", card_identifier.to_string())],
            )
            .await
    }

    /// Registra entrada/saída; o servidor decide o sentido pela ocupação atual.
    pub async fn register_movement(
        &self,
        request: &MovementRequest,
    ) -> Result<MovementResponse, AppError> {
        self.api().post("/areas/movements", request).await
    }
}
