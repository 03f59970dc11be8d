// src/views/form.rs

use validator::Validate;

use crate::{
    common::{
        error::{AppError, FieldErrors, validation_details},
        input,
    },
    models::WireEnum,
};

/// Estado de um formulário: o texto digitado campo a campo, convertido em payload
/// só no envio. Nomes de campo são os mesmos da API (camelCase).
pub trait FormState: Default + Send + Sync + 'static {
    type Payload: Validate + Send + Sync;

    /// Atribui um campo. Campo inexistente -> `AppError::UnknownField`.
    fn set(&mut self, field: &str, value: &str) -> Result<(), AppError>;

    /// Monta o payload com strings aparadas. Erros de formato (data inválida...) vão para `errors`.
    fn build(&self, errors: &mut FieldErrors) -> Self::Payload;

    /// Pares campo/valor para exibição.
    fn describe(&self) -> Vec<(&'static str, String)>;

    fn payload(&self) -> Result<Self::Payload, AppError> {
        let mut errors = FieldErrors::new();
        let payload = self.build(&mut errors);
        if let Err(validation) = payload.validate() {
            for (field, message) in validation_details(&validation) {
                errors.entry(field).or_insert(message);
            }
        }
        if errors.is_empty() {
            Ok(payload)
        } else {
            Err(AppError::Validation(errors))
        }
    }

    fn field_errors(&self) -> FieldErrors {
        match self.payload() {
            Ok(_) => FieldErrors::new(),
            Err(err) => err.field_errors().cloned().unwrap_or_default(),
        }
    }

    fn render(&self) -> String {
        self.describe()
            .into_iter()
            .map(|(field, value)| format!("  {field:<18} = {value}\n"))
            .collect()
    }
}

// --- Helpers para implementações de `FormState` ---

pub fn unknown(field: &str) -> AppError {
    AppError::UnknownField(field.to_string())
}

fn invalid(field: &str, message: String) -> AppError {
    AppError::Validation(FieldErrors::from([(field.to_string(), message)]))
}

/// Campo de seleção: só aceita os valores conhecidos do enum.
pub fn choice<E: WireEnum>(field: &str, value: &str) -> Result<E, AppError> {
    let parsed = E::from(value.trim().to_string());
    if parsed.is_known() {
        Ok(parsed)
    } else {
        Err(invalid(
            field,
            format!("Opções válidas: {}.", E::wire_values().join(", ")),
        ))
    }
}

/// Checkbox.
pub fn flag(field: &str, value: &str) -> Result<bool, AppError> {
    input::parse_flag(value)
        .ok_or_else(|| invalid(field, "Use sim/não.".to_string()))
}

/// Converte um texto opcional; formato inválido registra `message` em `errors`.
pub fn parsed<T>(
    errors: &mut FieldErrors,
    field: &str,
    result: Result<Option<T>, ()>,
    message: &str,
) -> Option<T> {
    result.unwrap_or_else(|()| {
        errors.insert(field.to_string(), message.to_string());
        None
    })
}

pub fn yes_no(value: bool) -> String {
    if value { "sim" } else { "não" }.to_string()
}
