// src/services/resource.rs

use std::marker::PhantomData;

use serde::{Serialize, de::DeserializeOwned};

use super::api::ApiClient;
use crate::common::error::AppError;

/// 1. O Trait que define um recurso REST (listagem em `PATH`)
pub trait Resource: Sized + Send + Sync + 'static {
    type Entity: DeserializeOwned + Send + 'static;

    const PATH: &'static str;

    fn id(entity: &Self::Entity) -> i64;
}

/// 2. Capacidades: cada recurso só implementa os endpoints que a API expõe.
pub trait Creatable: Resource {
    type Payload: Serialize + Send + Sync;
}

pub trait Updatable: Resource {
    type UpdatePayload: Serialize + Send + Sync;
}

pub trait Deletable: Resource {}

/// 3. O serviço genérico. Operações ausentes simplesmente não existem no tipo:
/// `ResourceService<Users>` não tem `delete`.
pub struct ResourceService<R> {
    api: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceService<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub async fn list(&self) -> Result<Vec<R::Entity>, AppError> {
        self.api.get(R::PATH, &[]).await
    }

    fn item_path(id: i64) -> String {
        format!("{}/{id}", R::PATH)
    }
}

impl<R: Creatable> ResourceService<R> {
    pub async fn create(&self, payload: &R::Payload) -> Result<R::Entity, AppError> {
        self.api.post(R::PATH, payload).await
    }
}

impl<R: Updatable> ResourceService<R> {
    pub async fn update(&self, id: i64, payload: &R::UpdatePayload) -> Result<R::Entity, AppError> {
        self.api.put(&Self::item_path(id), payload).await
    }
}

impl<R: Deletable> ResourceService<R> {
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.api.delete(&Self::item_path(id)).await
    }
}

impl<R> ResourceService<R>
where
    R: Creatable + Updatable<UpdatePayload = <R as Creatable>::Payload>,
{
    /// Cria ou atualiza, conforme exista um id em edição.
    pub async fn save(
        &self,
        editing_id: Option<i64>,
        payload: &<R as Creatable>::Payload,
    ) -> Result<R::Entity, AppError> {
        match editing_id {
            Some(id) => self.update(id, payload).await,
            None => self.create(payload).await,
        }
    }
}
