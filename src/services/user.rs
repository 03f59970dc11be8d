// src/services/user.rs

use super::resource::{Creatable, Resource, ResourceService, Updatable};
use crate::models::{auth::RegisterPayload, user::{UserSummary, UserUpdatePayload}};

/// `/users`: cadastro de usuário + cartão e edição inline. Sem remoção.
pub struct Users;

impl Resource for Users {
    type Entity = UserSummary;
    const PATH: &'static str = "/users";

    fn id(entity: &UserSummary) -> i64 {
        entity.id
    }
}

impl Creatable for Users {
    type Payload = RegisterPayload;
}

impl Updatable for Users {
    type UpdatePayload = UserUpdatePayload;
}

pub type UserService = ResourceService<Users>;
