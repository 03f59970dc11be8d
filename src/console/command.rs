// src/console/command.rs

use crate::{
    common::{error::AppError, input},
    router::view::AdminTab,
    views::Action,
};

pub const HELP: &str = "\
Comandos:
  login | register                 alterna entre entrar e criar conta
  set <campo> <valor...>           preenche um campo do formulário
  submit | reset                   envia / limpa o formulário
  tab <aba>                        users, areas, permissions, visitors, visits,
                                   history, access, recommendations
  refresh                          recarrega a lista
  edit <id> | cancel | delete <id> edição pelo formulário, cancelar, remover
  inline <id>                      edição inline da linha
  inline-set <campo> <valor...>    altera o rascunho inline
  save                             salva a edição inline
  search                           busca salas autorizadas / recomendações
  check                            simula a verificação de acesso
  filter <início> <fim> | unfilter filtro de datas do histórico
  logout | quit | help";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Login,
    Register,
    Logout,
    Tab(AdminTab),
    Action(Action),
}

/// Interpreta uma linha. Linha vazia devolve `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, AppError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (name, rest) = split_word(line);
    let command = match name.to_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "login" => Command::Login,
        "register" => Command::Register,
        "logout" => Command::Logout,
        "tab" => Command::Tab(rest.parse().map_err(AppError::InvalidCommand)?),
        "set" => {
            let (field, value) = field_and_value(name, rest)?;
            Command::Action(Action::Set { field, value })
        }
        "inline-set" => {
            let (field, value) = field_and_value(name, rest)?;
            Command::Action(Action::InlineSet { field, value })
        }
        "submit" => Command::Action(Action::Submit),
        "reset" => Command::Action(Action::Reset),
        "refresh" => Command::Action(Action::Refresh),
        "cancel" => Command::Action(Action::Cancel),
        "save" => Command::Action(Action::Save),
        "search" => Command::Action(Action::Search),
        "check" => Command::Action(Action::Check),
        "unfilter" => Command::Action(Action::Unfilter),
        "edit" => Command::Action(Action::Edit(id_arg(name, rest)?)),
        "delete" => Command::Action(Action::Delete(id_arg(name, rest)?)),
        "inline" => Command::Action(Action::Inline(id_arg(name, rest)?)),
        "filter" => {
            let (start, end) = split_word(rest);
            let start = date_arg(name, start)?;
            let end = date_arg(name, end)?;
            Command::Action(Action::Filter { start, end })
        }
        other => {
            return Err(AppError::InvalidCommand(format!(
                "'{other}' (digite help para ver os comandos)"
            )));
        }
    };
    Ok(Some(command))
}

fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    }
}

fn field_and_value(command: &str, rest: &str) -> Result<(String, String), AppError> {
    let (field, value) = split_word(rest);
    if field.is_empty() {
        return Err(AppError::InvalidCommand(format!("uso: {command} <campo> <valor>")));
    }
    Ok((field.to_string(), value.to_string()))
}

fn id_arg(command: &str, rest: &str) -> Result<i64, AppError> {
    match input::parse_id(rest) {
        Ok(Some(id)) => Ok(id),
        _ => Err(AppError::InvalidCommand(format!("uso: {command} <id>"))),
    }
}

fn date_arg(command: &str, value: &str) -> Result<chrono::NaiveDate, AppError> {
    match input::parse_date(value) {
        Ok(Some(date)) => Ok(date),
        _ => Err(AppError::InvalidCommand(format!(
            "uso: {command} <AAAA-MM-DD> <AAAA-MM-DD>"
        ))),
    }
}
