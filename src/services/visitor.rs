// src/services/visitor.rs

use super::resource::{Creatable, Deletable, Resource, ResourceService, Updatable};
use crate::models::visitor::{Visitor, VisitorPayload};

pub struct Visitors;

impl Resource for Visitors {
    type Entity = Visitor;
    const PATH: &'static str = "/visitors";

    fn id(entity: &Visitor) -> i64 {
        entity.id
    }
}

impl Creatable for Visitors {
    type Payload = VisitorPayload;
}

impl Updatable for Visitors {
    type UpdatePayload = VisitorPayload;
}

impl Deletable for Visitors {}

pub type VisitorService = ResourceService<Visitors>;
