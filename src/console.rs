// src/console.rs
//
// Shell interativo: uma linha por comando, a tela ativa é impressa após cada um.

pub mod command;
pub mod confirm;
pub mod shell;

pub use command::{Command, parse};
pub use shell::Shell;
