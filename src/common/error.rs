// src/common/error.rs

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

/// Mapa campo -> mensagem, no mesmo formato que a API devolve em `errors`.
pub type FieldErrors = BTreeMap<String, String>;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Todo erro termina virando `Feedback` na tela; nenhum é fatal para o console.
#[derive(Debug, Error)]
pub enum AppError {
    // Falha de rede/transporte (servidor fora do ar, DNS, conexão recusada...)
    #[error("Falha de comunicação com a API: {0}")]
    Transport(#[source] Arc<reqwest::Error>),

    // Erro reportado pelo servidor: mensagem + mapa opcional de campos
    #[error("Erro {status} da API: {}", message.as_deref().unwrap_or("sem mensagem"))]
    Api {
        status: u16,
        message: Option<String>,
        errors: FieldErrors,
    },

    // Validação local (equivalente às restrições `required`/`minLength` dos formulários)
    #[error("Erro de validação")]
    Validation(FieldErrors),

    #[error("Resposta inválida da API: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Acesso restrito a administradores.")]
    Forbidden,

    #[error("Comando inválido: {0}")]
    InvalidCommand(String),

    #[error("Campo desconhecido: {0}")]
    UnknownField(String),

    #[error("Comando não disponível nesta tela: {0}")]
    Unsupported(&'static str),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(Arc::new(err))
    }
}

impl From<Arc<reqwest::Error>> for AppError {
    fn from(err: Arc<reqwest::Error>) -> Self {
        AppError::Transport(err)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(validation_details(&errors))
    }
}

impl AppError {
    /// Mensagem enviada pelo servidor, se houver.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AppError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Erros por campo (do servidor ou da validação local).
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            AppError::Api { errors, .. } | AppError::Validation(errors) if !errors.is_empty() => {
                Some(errors)
            }
            _ => None,
        }
    }

    /// Monta o erro de API a partir do corpo bruto da resposta.
    /// Corpos que não seguem `{ message, errors }` viram `message = None`.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let parsed = serde_json::from_slice::<ErrorBody>(body).unwrap_or_default();
        AppError::Api {
            status,
            message: parsed.message.filter(|m| !m.trim().is_empty()),
            errors: parsed.errors.unwrap_or_default(),
        }
    }
}

// Formato esperado das respostas de erro: { message: string, errors?: { [campo]: string } }
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    errors: Option<FieldErrors>,
}

// Converte os erros do `validator` em mapa campo -> primeira mensagem.
// As chaves saem em camelCase para bater com os nomes usados pela API.
pub fn validation_details(errors: &validator::ValidationErrors) -> FieldErrors {
    let mut details = FieldErrors::new();
    for (field, field_errors) in errors.field_errors() {
        let message = field_errors
            .iter()
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .next()
            .unwrap_or_else(|| "Campo inválido.".to_string());
        details.insert(camel_case(&field), message);
    }
    details
}

pub fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}
