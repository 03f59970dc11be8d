// src/console/shell.rs

use std::io::{self, BufRead, Write};

use super::{
    command::{self, Command, HELP},
    confirm::{Confirm, StdinConfirm},
};
use crate::{
    common::error::AppError,
    config::AppState,
    router::{AuthMode, ViewRouter},
};

/// O que o laço faz depois de um comando.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Render,
    Help,
    Quit,
}

pub struct Shell {
    router: ViewRouter,
}

impl Shell {
    pub fn new(state: AppState) -> Self {
        Self {
            router: ViewRouter::new(state),
        }
    }

    pub fn router(&self) -> &ViewRouter {
        &self.router
    }

    /// Executa uma linha. Erros devolvidos aqui são de uso do console e nunca chegam à rede.
    pub async fn execute(
        &mut self,
        line: &str,
        confirm: &mut (dyn Confirm + Send),
    ) -> Result<Option<Flow>, AppError> {
        let Some(command) = command::parse(line)? else {
            return Ok(None);
        };

        let flow = match command {
            Command::Help => Flow::Help,
            Command::Quit => Flow::Quit,
            Command::Login => {
                self.router.switch_auth_mode(AuthMode::Login)?;
                Flow::Render
            }
            Command::Register => {
                self.router.switch_auth_mode(AuthMode::Register)?;
                Flow::Render
            }
            Command::Logout => {
                self.router.logout();
                Flow::Render
            }
            Command::Tab(tab) => {
                self.router.open_tab(tab).await?;
                Flow::Render
            }
            Command::Action(action) => {
                self.router.dispatch(action, confirm).await?;
                Flow::Render
            }
        };
        Ok(Some(flow))
    }

    fn prompt(&self) -> String {
        format!("sysaccessos:{}> ", self.router.view())
    }

    /// Laço principal: lê do terminal até `quit` ou fim da entrada.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut confirm = StdinConfirm;
        println!("{}", self.router.render());
        println!("Digite help para ver os comandos.");

        loop {
            print!("{}", self.prompt());
            io::stdout().flush()?;

            let Some(line) = read_line().await? else {
                break;
            };

            match self.execute(&line, &mut confirm).await {
                Ok(Some(Flow::Render)) => println!("{}", self.router.render()),
                Ok(Some(Flow::Help)) => println!("{HELP}"),
                Ok(Some(Flow::Quit)) => break,
                Ok(None) => {}
                Err(err) => println!("⚠ {err}"),
            }
        }

        tracing::info!("Console encerrado");
        Ok(())
    }
}

async fn read_line() -> anyhow::Result<Option<String>> {
    let line = tokio::task::spawn_blocking(|| -> io::Result<Option<String>> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        Ok((read > 0).then_some(line))
    })
    .await??;
    Ok(line)
}
