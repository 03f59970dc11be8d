// src/services/visit.rs

use super::resource::{Creatable, Deletable, Resource, ResourceService, Updatable};
use crate::models::visit::{Visit, VisitPayload};

pub struct Visits;

impl Resource for Visits {
    type Entity = Visit;
    const PATH: &'static str = "/visits";

    fn id(entity: &Visit) -> i64 {
        entity.id
    }
}

impl Creatable for Visits {
    type Payload = VisitPayload;
}

impl Updatable for Visits {
    type UpdatePayload = VisitPayload;
}

impl Deletable for Visits {}

pub type VisitService = ResourceService<Visits>;
