// src/views/feedback.rs

use crate::common::error::{AppError, FieldErrors};

pub const DEFAULT_SUCCESS: &str = "Operação realizada com sucesso.";
pub const DEFAULT_ERROR: &str = "Não foi possível completar a operação.";
const CHECK_FIELDS: &str = "Verifique os campos destacados.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
}

/// Faixa de mensagem exibida abaixo do formulário.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
    pub errors: FieldErrors,
    /// Linhas extras "Rótulo: valor" (dados do usuário logado, movimento registrado...)
    pub details: Vec<(String, String)>,
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Success,
            message: message.into(),
            errors: FieldErrors::new(),
            details: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Error,
            ..Self::success(message)
        }
    }

    /// Único ponto que transforma um `AppError` em mensagem de tela.
    /// A mensagem do servidor tem prioridade; sem ela vale o texto de `fallback`.
    pub fn from_error(err: &AppError, fallback: &str) -> Self {
        let message = match err {
            AppError::Api { message, .. } => message.as_deref().unwrap_or(fallback).to_string(),
            AppError::Validation(_) => CHECK_FIELDS.to_string(),
            AppError::Forbidden
            | AppError::InvalidCommand(_)
            | AppError::UnknownField(_)
            | AppError::Unsupported(_) => err.to_string(),
            AppError::Transport(_) | AppError::Decode(_) | AppError::Internal(_) => {
                fallback.to_string()
            }
        };
        Self {
            errors: err.field_errors().cloned().unwrap_or_default(),
            ..Self::error(message)
        }
    }

    pub fn with_detail(mut self, label: &str, value: impl Into<String>) -> Self {
        self.details.push((label.to_string(), value.into()));
        self
    }

    pub fn is_error(&self) -> bool {
        self.kind == FeedbackKind::Error
    }

    pub fn render(&self) -> String {
        let marker = match self.kind {
            FeedbackKind::Success => "✅",
            FeedbackKind::Error => "❌",
        };
        let mut out = format!("{marker} {}\n", self.message);
        for (label, value) in &self.details {
            out.push_str(&format!("   {label}: {value}\n"));
        }
        for (field, message) in &self.errors {
            out.push_str(&format!("   - {field}: {message}\n"));
        }
        out
    }
}
