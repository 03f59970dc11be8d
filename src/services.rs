// src/services.rs

pub mod access;
pub mod api;
pub mod area;
pub mod auth;
pub mod history;
pub mod permission;
pub mod recommendation;
pub mod resource;
pub mod user;
pub mod visit;
pub mod visitor;

pub use api::ApiClient;
pub use resource::{Creatable, Deletable, Resource, ResourceService, Updatable};
