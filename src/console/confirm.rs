// src/console/confirm.rs

use std::io::{self, BufRead, Write};

/// Pergunta sim/não antes de uma ação destrutiva.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}

/// Lê a resposta do terminal. Só "s"/"sim"/"y"/"yes" confirmam.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, question: &str) -> bool {
        tokio::task::block_in_place(|| {
            print!("{question} [s/N] ");
            if io::stdout().flush().is_err() {
                return false;
            }
            let mut answer = String::new();
            match io::stdin().lock().read_line(&mut answer) {
                Ok(_) => is_yes(&answer),
                Err(err) => {
                    tracing::warn!("Falha ao ler confirmação: {err}");
                    false
                }
            }
        })
    }
}

/// Resposta fixa, registrando as perguntas feitas.
#[derive(Debug, Default)]
pub struct AutoConfirm {
    pub answer: bool,
    pub asked: Vec<String>,
}

impl AutoConfirm {
    pub fn yes() -> Self {
        Self {
            answer: true,
            asked: Vec::new(),
        }
    }

    pub fn no() -> Self {
        Self::default()
    }
}

impl Confirm for AutoConfirm {
    fn confirm(&mut self, question: &str) -> bool {
        self.asked.push(question.to_string());
        self.answer
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "sim" | "y" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_yes("S\n"));
        assert!(is_yes(" sim "));
        assert!(!is_yes(""));
        assert!(!is_yes("talvez"));
    }

    #[test]
    fn auto_confirm_records_questions() {
        let mut confirm = AutoConfirm::no();
        assert!(!confirm.confirm("Deseja realmente remover esta área?"));
        assert_eq!(confirm.asked, vec!["Deseja realmente remover esta área?".to_string()]);
    }
}
