// src/services/permission.rs

use super::resource::{Creatable, Deletable, Resource, ResourceService, Updatable};
use crate::{
    common::error::AppError,
    models::permission::{Permission, PermissionPayload},
};

pub struct Permissions;

impl Resource for Permissions {
    type Entity = Permission;
    const PATH: &'static str = "/permissions";

    fn id(entity: &Permission) -> i64 {
        entity.id
    }
}

impl Creatable for Permissions {
    type Payload = PermissionPayload;
}

impl Updatable for Permissions {
    type UpdatePayload = PermissionPayload;
}

impl Deletable for Permissions {}

pub type PermissionService = ResourceService<Permissions>;

impl ResourceService<Permissions> {
    pub async fn by_user(&self, user_id: i64) -> Result<Vec<Permission>, AppError> {
        self.api().get(&format!("/permissions/user/{user_id}"), &[]).await
    }
}
