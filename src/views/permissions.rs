// src/views/permissions.rs

use std::future::Future;

use async_trait::async_trait;

use super::{
    Action, Screen,
    feedback::Feedback,
    form::{self, FormState, parsed, unknown},
    format,
    manager::{DeleteText, EntityManager, ManagedResource, ManagerText, RemovableResource},
    table::Table,
};
use crate::{
    common::{
        error::{AppError, FieldErrors},
        input,
    },
    console::confirm::Confirm,
    models::{
        area::Area,
        permission::{AccessLevel, Permission, PermissionPayload, PermissionStatus},
        user::UserSummary,
    },
    services::{
        area::AreaService,
        permission::{PermissionService, Permissions},
        resource::ResourceService,
        user::UserService,
    },
};

#[derive(Debug, Clone, Default)]
pub struct PermissionForm {
    pub user_id: String,
    pub area_id: String,
    pub access_level: AccessLevel,
    pub valid_from: String,
    pub valid_until: String,
    pub status: PermissionStatus,
    pub notes: String,
}

impl From<&Permission> for PermissionForm {
    fn from(permission: &Permission) -> Self {
        Self {
            user_id: permission.user_id.to_string(),
            area_id: permission.area_id.to_string(),
            access_level: permission.access_level.or_default(),
            valid_from: permission.valid_from.format("%Y-%m-%d").to_string(),
            valid_until: permission.valid_until.format("%Y-%m-%d").to_string(),
            status: permission.status.or_default(),
            notes: permission.notes.clone().unwrap_or_default(),
        }
    }
}

impl FormState for PermissionForm {
    type Payload = PermissionPayload;

    fn set(&mut self, field: &str, value: &str) -> Result<(), AppError> {
        match field {
            "userId" => self.user_id = value.trim().to_string(),
            "areaId" => self.area_id = value.trim().to_string(),
            "accessLevel" => self.access_level = form::choice(field, value)?,
            "validFrom" => self.valid_from = value.trim().to_string(),
            "validUntil" => self.valid_until = value.trim().to_string(),
            "status" => self.status = form::choice(field, value)?,
            "notes" => self.notes = value.to_string(),
            _ => return Err(unknown(field)),
        }
        Ok(())
    }

    fn build(&self, errors: &mut FieldErrors) -> PermissionPayload {
        PermissionPayload {
            user_id: parsed(errors, "userId", input::parse_id(&self.user_id), "Usuário inválido."),
            area_id: parsed(errors, "areaId", input::parse_id(&self.area_id), "Área inválida."),
            access_level: self.access_level.clone(),
            valid_from: parsed(
                errors,
                "validFrom",
                input::parse_date(&self.valid_from),
                "Data inválida.",
            ),
            valid_until: parsed(
                errors,
                "validUntil",
                input::parse_date(&self.valid_until),
                "Data inválida.",
            ),
            status: self.status.clone(),
            notes: self.notes.trim().to_string(),
        }
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("userId", self.user_id.clone()),
            ("areaId", self.area_id.clone()),
            ("accessLevel", self.access_level.wire().to_string()),
            ("validFrom", self.valid_from.clone()),
            ("validUntil", self.valid_until.clone()),
            ("status", self.status.wire().to_string()),
            ("notes", self.notes.clone()),
        ]
    }
}

impl ManagedResource for Permissions {
    type Form = PermissionForm;
    type Filter = ();

    const TEXT: ManagerText = ManagerText {
        created: "Permissão criada com sucesso.",
        updated: "Permissão atualizada com sucesso.",
        save_error: "Erro ao salvar permissão.",
        load_error: "Não foi possível carregar os dados.",
    };

    fn save(
        service: &ResourceService<Self>,
        editing_id: Option<i64>,
        payload: &PermissionPayload,
    ) -> impl Future<Output = Result<Permission, AppError>> + Send {
        service.save(editing_id, payload)
    }
}

impl RemovableResource for Permissions {
    const DELETE_TEXT: DeleteText = DeleteText {
        confirm: "Deseja realmente remover esta permissão?",
        deleted: "Permissão removida.",
        delete_error: "Erro ao remover permissão.",
    };
}

pub struct PermissionsScreen {
    pub manager: EntityManager<Permissions>,
    pub users: Vec<UserSummary>,
    pub areas: Vec<Area>,
    user_service: UserService,
    area_service: AreaService,
}

impl PermissionsScreen {
    pub fn new(
        service: PermissionService,
        user_service: UserService,
        area_service: AreaService,
    ) -> Self {
        Self {
            manager: EntityManager::new(service),
            users: Vec::new(),
            areas: Vec::new(),
            user_service,
            area_service,
        }
    }

    /// Usuários, áreas e permissões em paralelo; qualquer falha mantém as listas atuais.
    async fn load_all(&mut self) {
        let loaded = tokio::try_join!(
            self.user_service.list(),
            self.area_service.list(),
            self.manager.service().list(),
        );
        match loaded {
            Ok((users, areas, permissions)) => {
                self.users = users;
                self.areas = areas;
                self.manager.rows = permissions;
            }
            Err(err) => {
                tracing::warn!("Falha ao carregar permissões: {err}");
                self.manager.feedback = Some(Feedback::from_error(
                    &err,
                    Permissions::TEXT.load_error,
                ));
            }
        }
    }

    fn user_label(&self, permission: &Permission) -> String {
        permission
            .user_name
            .clone()
            .or_else(|| {
                self.users
                    .iter()
                    .find(|u| u.id == permission.user_id)
                    .map(|u| u.name.clone())
            })
            .unwrap_or_else(|| format!("#{}", permission.user_id))
    }

    fn area_label(&self, permission: &Permission) -> String {
        permission
            .area_name
            .clone()
            .or_else(|| {
                self.areas
                    .iter()
                    .find(|a| a.id == permission.area_id)
                    .map(|a| a.name.clone())
            })
            .unwrap_or_else(|| format!("#{}", permission.area_id))
    }
}

#[async_trait]
impl Screen for PermissionsScreen {
    fn title(&self) -> &'static str {
        "Permissões"
    }

    async fn mount(&mut self) {
        self.load_all().await;
    }

    async fn handle(
        &mut self,
        action: Action,
        confirm: &mut (dyn Confirm + Send),
    ) -> Result<(), AppError> {
        match action {
            Action::Set { field, value } => self.manager.set_field(&field, &value)?,
            Action::Submit => {
                self.manager.submit().await;
            }
            Action::Reset => {
                self.manager.reset();
                self.manager.feedback = None;
            }
            Action::Refresh => self.load_all().await,
            Action::Edit(id) => self.manager.start_edit(id)?,
            Action::Cancel => self.manager.cancel_edit(),
            Action::Delete(id) => {
                self.manager.delete(id, confirm).await;
            }
            other => return Err(other.unsupported()),
        }
        Ok(())
    }

    fn feedback(&self) -> Option<&Feedback> {
        self.manager.feedback.as_ref()
    }

    fn render(&self) -> String {
        let mut out = match self.manager.editing_id {
            Some(id) => format!("Editando permissão #{id}:\n"),
            None => "Nova permissão:\n".to_string(),
        };
        out.push_str(&self.manager.form.render());

        out.push_str("  usuários: ");
        let users: Vec<String> = self
            .users
            .iter()
            .map(|u| format!("{}={}", u.id, u.option_label()))
            .collect();
        out.push_str(&format!("{}\n", users.join("; ")));
        out.push_str("  áreas: ");
        let areas: Vec<String> = self
            .areas
            .iter()
            .map(|a| format!("{}={}", a.id, a.option_label()))
            .collect();
        out.push_str(&format!("{}\n", areas.join("; ")));

        if let Some(feedback) = &self.manager.feedback {
            out.push_str(&feedback.render());
        }

        let mut table = Table::new(&["ID", "Usuário", "Área", "Nível", "Válida", "Status"]);
        for permission in &self.manager.rows {
            table.row(vec![
                permission.id.to_string(),
                self.user_label(permission),
                self.area_label(permission),
                permission.access_level.label().to_string(),
                format!(
                    "{} a {}",
                    format::date(permission.valid_from),
                    format::date(permission.valid_until)
                ),
                permission.status.label().to_string(),
            ]);
        }
        out.push_str("\nPermissões cadastradas:\n");
        out.push_str(&table.render("Nenhuma permissão cadastrada."));
        out
    }
}
