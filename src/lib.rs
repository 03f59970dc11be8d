// src/lib.rs

pub mod common;
pub mod config;
pub mod console;
pub mod models;
pub mod router;
pub mod services;
pub mod views;

pub use common::error::AppError;
pub use config::{AppState, ConsoleConfig};
pub use router::ViewRouter;
