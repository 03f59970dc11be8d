// src/views/manager.rs
//
// Ciclo genérico dos cadastros: listar, preencher, enviar, editar, remover.

use std::future::Future;

use super::{feedback::Feedback, form::FormState};
use crate::{
    common::error::AppError,
    console::confirm::Confirm,
    services::resource::{Creatable, Deletable, ResourceService, Updatable},
};

/// Mensagens exibidas por um cadastro.
pub struct ManagerText {
    pub created: &'static str,
    pub updated: &'static str,
    pub save_error: &'static str,
    pub load_error: &'static str,
}

pub struct DeleteText {
    pub confirm: &'static str,
    pub deleted: &'static str,
    pub delete_error: &'static str,
}

/// Recurso com tela de cadastro.
pub trait ManagedResource: Creatable {
    type Form: FormState<Payload = Self::Payload>;

    /// Filtro aplicado na listagem (`()` quando não há).
    type Filter: Default + Send + Sync;

    const TEXT: ManagerText;

    fn list(
        service: &ResourceService<Self>,
        filter: &Self::Filter,
    ) -> impl Future<Output = Result<Vec<Self::Entity>, AppError>> + Send {
        let _ = filter;
        service.list()
    }

    /// Envio do formulário. Por padrão só cria; recursos com edição pelo formulário
    /// sobrescrevem para atualizar quando há `editing_id`.
    fn save(
        service: &ResourceService<Self>,
        editing_id: Option<i64>,
        payload: &Self::Payload,
    ) -> impl Future<Output = Result<Self::Entity, AppError>> + Send {
        let _ = editing_id;
        service.create(payload)
    }
}

/// Cadastro que também permite remoção.
pub trait RemovableResource: ManagedResource + Deletable {
    const DELETE_TEXT: DeleteText;
}

pub struct EntityManager<R: ManagedResource> {
    service: ResourceService<R>,
    pub rows: Vec<R::Entity>,
    pub filter: R::Filter,
    pub form: R::Form,
    pub editing_id: Option<i64>,
    pub feedback: Option<Feedback>,
    pub loading: bool,
}

impl<R: ManagedResource> EntityManager<R> {
    pub fn new(service: ResourceService<R>) -> Self {
        Self {
            service,
            rows: Vec::new(),
            filter: R::Filter::default(),
            form: R::Form::default(),
            editing_id: None,
            feedback: None,
            loading: false,
        }
    }

    pub fn service(&self) -> &ResourceService<R> {
        &self.service
    }

    /// Serviço e linhas ao mesmo tempo (edição inline substitui a linha no lugar).
    pub fn parts_mut(&mut self) -> (&ResourceService<R>, &mut Vec<R::Entity>) {
        (&self.service, &mut self.rows)
    }

    /// GET da lista. Em caso de falha as linhas anteriores continuam na tela.
    pub async fn load(&mut self) -> bool {
        self.loading = true;
        let result = R::list(&self.service, &self.filter).await;
        self.loading = false;

        match result {
            Ok(rows) => {
                self.rows = rows;
                true
            }
            Err(err) => {
                tracing::warn!(path = R::PATH, "Falha ao carregar lista: {err}");
                self.feedback = Some(Feedback::from_error(&err, R::TEXT.load_error));
                false
            }
        }
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), AppError> {
        self.form.set(field, value)
    }

    pub fn reset(&mut self) {
        self.form = R::Form::default();
        self.editing_id = None;
    }

    /// Validação local primeiro: com campo obrigatório faltando nenhuma requisição sai.
    pub async fn submit(&mut self) -> bool {
        self.feedback = None;

        let payload = match self.form.payload() {
            Ok(payload) => payload,
            Err(err) => {
                self.feedback = Some(Feedback::from_error(&err, R::TEXT.save_error));
                return false;
            }
        };

        let editing_id = self.editing_id;
        self.loading = true;
        let result = R::save(&self.service, editing_id, &payload).await;
        self.loading = false;

        match result {
            Ok(_) => {
                let message = if editing_id.is_some() {
                    R::TEXT.updated
                } else {
                    R::TEXT.created
                };
                tracing::info!(path = R::PATH, ?editing_id, "✅ Registro salvo");
                self.feedback = Some(Feedback::success(message));
                self.reset();
                self.load().await;
                true
            }
            Err(err) => {
                self.feedback = Some(Feedback::from_error(&err, R::TEXT.save_error));
                false
            }
        }
    }

    pub fn find(&self, id: i64) -> Option<&R::Entity> {
        self.rows.iter().find(|row| R::id(row) == id)
    }
}

impl<R> EntityManager<R>
where
    R: ManagedResource + Updatable<UpdatePayload = <R as Creatable>::Payload>,
    for<'a> R::Form: From<&'a R::Entity>,
{
    /// Carrega a linha no formulário; o próximo envio vira PUT.
    pub fn start_edit(&mut self, id: i64) -> Result<(), AppError> {
        let entity = self
            .find(id)
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Registro #{id} não está na lista")))?;
        self.form = R::Form::from(entity);
        self.editing_id = Some(id);
        self.feedback = None;
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.reset();
        self.feedback = None;
    }
}

impl<R: RemovableResource> EntityManager<R> {
    /// Remove após confirmação. Recusa não gera requisição.
    pub async fn delete(&mut self, id: i64, confirm: &mut (dyn Confirm + Send)) -> bool {
        if !confirm.confirm(R::DELETE_TEXT.confirm) {
            return false;
        }

        self.feedback = None;
        match self.service.delete(id).await {
            Ok(()) => {
                tracing::info!(path = R::PATH, id, "Registro removido");
                if self.editing_id == Some(id) {
                    self.reset();
                }
                self.feedback = Some(Feedback::success(R::DELETE_TEXT.deleted));
                self.load().await;
                true
            }
            Err(err) => {
                self.feedback = Some(Feedback::from_error(&err, R::DELETE_TEXT.delete_error));
                false
            }
        }
    }
}
