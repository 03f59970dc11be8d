// src/router/view.rs

use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

/// Abas do painel administrativo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminTab {
    Users,
    Areas,
    Permissions,
    Visitors,
    Visits,
    History,
    AccessSimulation,
    Recommendations,
}

impl AdminTab {
    pub const ALL: [AdminTab; 8] = [
        AdminTab::Users,
        AdminTab::Areas,
        AdminTab::Permissions,
        AdminTab::Visitors,
        AdminTab::Visits,
        AdminTab::History,
        AdminTab::AccessSimulation,
        AdminTab::Recommendations,
    ];

    /// Nome usado no comando `tab`.
    pub fn slug(self) -> &'static str {
        match self {
            AdminTab::Users => "users",
            AdminTab::Areas => "areas",
            AdminTab::Permissions => "permissions",
            AdminTab::Visitors => "visitors",
            AdminTab::Visits => "visits",
            AdminTab::History => "history",
            AdminTab::AccessSimulation => "access",
            AdminTab::Recommendations => "recommendations",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AdminTab::Users => "Usuários",
            AdminTab::Areas => "Áreas",
            AdminTab::Permissions => "Permissões",
            AdminTab::Visitors => "Visitantes",
            AdminTab::Visits => "Visitas",
            AdminTab::History => "Histórico",
            AdminTab::AccessSimulation => "Simulação de acesso",
            AdminTab::Recommendations => "Recomendações",
        }
    }
}

impl FromStr for AdminTab {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_lowercase();
        AdminTab::ALL
            .into_iter()
            .find(|tab| tab.slug() == wanted)
            .ok_or_else(|| format!("Aba desconhecida: {value}"))
    }
}

/// Exatamente uma tela ativa por vez.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Auth(AuthMode),
    Admin(AdminTab),
    SelfService,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Auth(AuthMode::Login) => f.write_str("entrar"),
            View::Auth(AuthMode::Register) => f.write_str("criar conta"),
            View::Admin(tab) => f.write_str(tab.slug()),
            View::SelfService => f.write_str("minha conta"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_names_round_trip() {
        for tab in AdminTab::ALL {
            assert_eq!(tab.slug().parse::<AdminTab>(), Ok(tab));
        }
        assert_eq!("ACCESS".parse::<AdminTab>(), Ok(AdminTab::AccessSimulation));
        assert!("dashboard".parse::<AdminTab>().is_err());
    }
}
