// src/views/inline.rs
//
// Edição inline de uma linha: rascunho separado do registro confirmado.

use super::{feedback::Feedback, form::FormState};
use crate::{
    common::error::{AppError, FieldErrors},
    services::resource::{ResourceService, Updatable},
};

/// Rascunho de uma linha. Os erros são recalculados a cada alteração.
#[derive(Debug, Clone)]
pub struct InlineEdit<D> {
    pub id: i64,
    pub draft: D,
    pub errors: FieldErrors,
}

impl<D: FormState> InlineEdit<D> {
    pub fn start(id: i64, draft: D) -> Self {
        Self {
            id,
            draft,
            errors: FieldErrors::new(),
        }
    }

    pub fn set(&mut self, field: &str, value: &str) -> Result<(), AppError> {
        self.draft.set(field, value)?;
        self.errors = self.draft.field_errors();
        Ok(())
    }
}

/// Mensagens da edição inline.
pub struct InlineText {
    pub updated: &'static str,
    pub update_error: &'static str,
}

/// Estado de edição inline de uma tela: no máximo uma linha em edição
/// e o feedback associado ao id da linha.
pub struct InlineSlot<D> {
    pub editing: Option<InlineEdit<D>>,
    pub feedback: Option<(i64, Feedback)>,
    pub saving: bool,
}

impl<D> Default for InlineSlot<D> {
    fn default() -> Self {
        Self {
            editing: None,
            feedback: None,
            saving: false,
        }
    }
}

impl<D: FormState> InlineSlot<D> {
    pub fn start(&mut self, id: i64, draft: D) {
        self.editing = Some(InlineEdit::start(id, draft));
        self.feedback = None;
    }

    pub fn cancel(&mut self) {
        self.editing = None;
        self.feedback = None;
    }

    pub fn editing_id(&self) -> Option<i64> {
        self.editing.as_ref().map(|edit| edit.id)
    }

    /// A linha removida não pode continuar em edição.
    pub fn forget(&mut self, id: i64) {
        if self.editing_id() == Some(id) {
            self.cancel();
        }
    }

    pub fn set(&mut self, field: &str, value: &str) -> Result<(), AppError> {
        self.editing
            .as_mut()
            .ok_or(AppError::Unsupported("nenhuma linha em edição inline"))?
            .set(field, value)
    }

    /// Salva o rascunho. Com erros de validação nada é enviado; com sucesso a linha é
    /// substituída no lugar pela resposta do servidor, sem recarregar a lista.
    pub async fn save<R>(
        &mut self,
        service: &ResourceService<R>,
        rows: &mut [R::Entity],
        text: &InlineText,
    ) -> Result<bool, AppError>
    where
        R: Updatable,
        D: FormState<Payload = R::UpdatePayload>,
    {
        let edit = self
            .editing
            .as_mut()
            .ok_or(AppError::Unsupported("nenhuma linha em edição inline"))?;

        let payload = match edit.draft.payload() {
            Ok(payload) => payload,
            Err(err) => {
                edit.errors = err.field_errors().cloned().unwrap_or_default();
                return Ok(false);
            }
        };

        let id = edit.id;
        self.saving = true;
        self.feedback = None;
        let result = service.update(id, &payload).await;
        self.saving = false;

        match result {
            Ok(updated) => {
                if let Some(row) = rows.iter_mut().find(|row| R::id(row) == id) {
                    *row = updated;
                }
                self.editing = None;
                self.feedback = Some((id, Feedback::success(text.updated)));
                Ok(true)
            }
            Err(err) => {
                tracing::warn!(id, "Falha na edição inline: {err}");
                self.feedback = Some((id, Feedback::from_error(&err, text.update_error)));
                Ok(false)
            }
        }
    }

    /// Feedback da linha `id`, se houver.
    pub fn feedback_for(&self, id: i64) -> Option<&Feedback> {
        self.feedback
            .as_ref()
            .filter(|(row, _)| *row == id)
            .map(|(_, feedback)| feedback)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(edit) = &self.editing {
            out.push_str(&format!("Edição inline da linha #{}:\n", edit.id));
            out.push_str(&edit.draft.render());
            for (field, message) in &edit.errors {
                out.push_str(&format!("   ⚠ {field}: {message}\n"));
            }
        }
        if let Some((id, feedback)) = &self.feedback {
            out.push_str(&format!("Linha #{id}: {}", feedback.render()));
        }
        out
    }
}
