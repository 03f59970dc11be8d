// src/views.rs
//
// Telas do console. Cada tela carrega seus próprios dados ao ser montada
// e descarta tudo quando o roteador a substitui.

pub mod access_simulation;
pub mod areas;
pub mod auth_form;
pub mod feedback;
pub mod form;
pub mod format;
pub mod history;
pub mod inline;
pub mod manager;
pub mod permissions;
pub mod recommendations;
pub mod self_service;
pub mod table;
pub mod users;
pub mod visitors;
pub mod visits;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{common::error::AppError, console::confirm::Confirm};
pub use feedback::Feedback;

/// Ação do usuário sobre a tela ativa.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Set { field: String, value: String },
    Submit,
    Reset,
    Refresh,
    Edit(i64),
    Cancel,
    Delete(i64),
    Inline(i64),
    InlineSet { field: String, value: String },
    Save,
    Search,
    Check,
    Filter { start: NaiveDate, end: NaiveDate },
    Unfilter,
}

impl Action {
    /// Nome do comando correspondente no console.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Set { .. } => "set",
            Action::Submit => "submit",
            Action::Reset => "reset",
            Action::Refresh => "refresh",
            Action::Edit(_) => "edit",
            Action::Cancel => "cancel",
            Action::Delete(_) => "delete",
            Action::Inline(_) => "inline",
            Action::InlineSet { .. } => "inline-set",
            Action::Save => "save",
            Action::Search => "search",
            Action::Check => "check",
            Action::Filter { .. } => "filter",
            Action::Unfilter => "unfilter",
        }
    }

    pub(crate) fn unsupported(&self) -> AppError {
        AppError::Unsupported(self.name())
    }
}

/// Uma tela montada. Erros de rede viram `Feedback` dentro da própria tela;
/// `handle` só devolve `Err` para uso incorreto (campo ou comando inexistente).
#[async_trait]
pub trait Screen: Send {
    fn title(&self) -> &'static str;

    /// Carga inicial (equivale à montagem do componente).
    async fn mount(&mut self);

    async fn handle(
        &mut self,
        action: Action,
        confirm: &mut (dyn Confirm + Send),
    ) -> Result<(), AppError>;

    fn feedback(&self) -> Option<&Feedback>;

    fn render(&self) -> String;
}
