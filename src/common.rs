// src/common.rs

pub mod error;
pub mod input;
pub use error::{AppError, FieldErrors};
