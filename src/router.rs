// src/router.rs
//
// Roteador de telas: dono da sessão e da tela ativa.

pub mod session;
pub mod view;

use crate::{
    common::error::AppError,
    config::AppState,
    console::confirm::Confirm,
    models::auth::{AuthPayload, AuthResponse},
    views::{
        Action, Feedback, Screen,
        access_simulation::AccessSimulationScreen,
        areas::AreasScreen,
        auth_form::AuthForm,
        feedback::{DEFAULT_ERROR, DEFAULT_SUCCESS},
        history::HistoryScreen,
        permissions::PermissionsScreen,
        recommendations::RecommendationsScreen,
        self_service::SelfServiceScreen,
        users::UsersScreen,
        visitors::VisitorsScreen,
        visits::VisitsScreen,
    },
};
pub use session::{RequireAdmin, Session, SessionUser};
pub use view::{AdminTab, AuthMode, View};

const REGISTER_FOLLOW_UP: &str = "Agora faça login com suas credenciais.";
pub const LANDING_TAB: AdminTab = AdminTab::Users;

pub struct ViewRouter {
    state: AppState,
    session: Session,
    view: View,
    auth_form: AuthForm,
    screen: Option<Box<dyn Screen>>,
    feedback: Option<Feedback>,
    loading: bool,
}

impl ViewRouter {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            session: Session::Anonymous,
            view: View::Auth(AuthMode::Login),
            auth_form: AuthForm::default(),
            screen: None,
            feedback: None,
            loading: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn screen(&self) -> Option<&dyn Screen> {
        self.screen.as_deref()
    }

    pub fn auth_form(&self) -> &AuthForm {
        &self.auth_form
    }

    // =============================================================================
    //  AUTENTICAÇÃO
    // =============================================================================

    /// Troca entre login e cadastro. Os campos são limpos; o feedback continua.
    pub fn switch_auth_mode(&mut self, mode: AuthMode) -> Result<(), AppError> {
        if !matches!(self.view, View::Auth(_)) {
            return Err(AppError::Unsupported("login/register (encerre a sessão antes)"));
        }
        self.view = View::Auth(mode);
        self.auth_form.reset();
        Ok(())
    }

    pub async fn submit_auth(&mut self) {
        let View::Auth(mode) = self.view else {
            return;
        };

        self.feedback = None;
        let payload = match self.auth_form.payload(mode) {
            Ok(payload) => payload,
            Err(err) => {
                self.feedback = Some(Feedback::from_error(&err, DEFAULT_ERROR));
                return;
            }
        };

        self.loading = true;
        let result = match &payload {
            AuthPayload::Login(login) => self.state.auth_service.login(login).await,
            AuthPayload::Register(register) => self.state.auth_service.register(register).await,
        };
        self.loading = false;

        match (result, mode) {
            (Ok(response), AuthMode::Login) => self.on_login(response).await,
            (Ok(response), AuthMode::Register) => {
                let message = response.message.as_deref().unwrap_or(DEFAULT_SUCCESS);
                tracing::info!("✅ Cadastro concluído, voltando ao login");
                self.view = View::Auth(AuthMode::Login);
                self.auth_form.reset();
                self.feedback = Some(Feedback::success(format!("{message} {REGISTER_FOLLOW_UP}")));
            }
            (Err(err), _) => {
                tracing::warn!("Falha na autenticação: {err}");
                self.feedback = Some(Feedback::from_error(&err, DEFAULT_ERROR));
            }
        }
    }

    async fn on_login(&mut self, response: AuthResponse) {
        let message = response.message.as_deref().unwrap_or(DEFAULT_SUCCESS);
        let mut feedback = Feedback::success(message);

        let Some(user) = response.user else {
            self.feedback = Some(feedback);
            return;
        };

        feedback = feedback
            .with_detail("ID", user.id.to_string())
            .with_detail("Nome", user.name.clone())
            .with_detail("Email", user.email.clone());
        if let Some(code) = user.registration_code.as_deref().filter(|c| !c.is_empty()) {
            feedback = feedback.with_detail("Registro", code);
        }
        if let Some(card) = user.card_identifier.as_deref().filter(|c| !c.is_empty()) {
            feedback = feedback.with_detail("Cartão", card);
        }

        tracing::info!(user_id = user.id, role = user.role.as_str(), "✅ Login efetuado");
        self.auth_form.reset();
        self.session = Session::from_user(user);
        let landing = if self.session.is_admin() {
            View::Admin(LANDING_TAB)
        } else {
            View::SelfService
        };
        self.show(landing).await;
        self.feedback = Some(feedback);
    }

    // =============================================================================
    //  NAVEGAÇÃO
    // =============================================================================

    /// Abre uma aba administrativa. Fora de uma sessão ADMIN a tela atual não muda.
    pub async fn open_tab(&mut self, tab: AdminTab) -> Result<(), AppError> {
        RequireAdmin::check(&self.session)?;
        tracing::info!(tab = tab.slug(), "Abrindo aba");
        self.feedback = None;
        self.show(View::Admin(tab)).await;
        Ok(())
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.session.user() {
            tracing::info!(user_id = user.id, "Sessão encerrada");
        }
        self.session = Session::Anonymous;
        self.view = View::Auth(AuthMode::Login);
        self.screen = None;
        self.auth_form.reset();
        self.feedback = None;
    }

    /// Descarta a tela anterior (e os dados dela) e monta a nova.
    async fn show(&mut self, view: View) {
        self.screen = None;
        self.view = view;
        let Some(mut screen) = self.build_screen(view) else {
            return;
        };
        screen.mount().await;
        self.screen = Some(screen);
    }

    fn build_screen(&self, view: View) -> Option<Box<dyn Screen>> {
        let state = &self.state;
        let screen: Box<dyn Screen> = match view {
            View::Auth(_) => return None,
            View::Admin(AdminTab::Users) => Box::new(UsersScreen::new(state.users.clone())),
            View::Admin(AdminTab::Areas) => Box::new(AreasScreen::new(state.areas.clone())),
            View::Admin(AdminTab::Permissions) => Box::new(PermissionsScreen::new(
                state.permissions.clone(),
                state.users.clone(),
                state.areas.clone(),
            )),
            View::Admin(AdminTab::Visitors) => {
                Box::new(VisitorsScreen::new(state.visitors.clone()))
            }
            View::Admin(AdminTab::Visits) => Box::new(VisitsScreen::new(
                state.visits.clone(),
                state.visitors.clone(),
            )),
            View::Admin(AdminTab::History) => Box::new(HistoryScreen::new(
                state.history.clone(),
                state.users.clone(),
                state.areas.clone(),
            )),
            View::Admin(AdminTab::AccessSimulation) => Box::new(AccessSimulationScreen::new(
                state.areas.clone(),
                state.access.clone(),
            )),
            View::Admin(AdminTab::Recommendations) => {
                Box::new(RecommendationsScreen::new(state.recommendations.clone()))
            }
            View::SelfService => Box::new(SelfServiceScreen::new(
                self.session.user()?.clone(),
                state.permissions.clone(),
                state.areas.clone(),
                state.history.clone(),
            )),
        };
        Some(screen)
    }

    // =============================================================================
    //  AÇÕES
    // =============================================================================

    /// Encaminha a ação para o formulário de autenticação ou para a tela ativa.
    pub async fn dispatch(
        &mut self,
        action: Action,
        confirm: &mut (dyn Confirm + Send),
    ) -> Result<(), AppError> {
        if let View::Auth(mode) = self.view {
            return match action {
                Action::Set { field, value } => self.auth_form.set(mode, &field, &value),
                Action::Submit => {
                    self.submit_auth().await;
                    Ok(())
                }
                Action::Reset => {
                    self.auth_form.reset();
                    Ok(())
                }
                other => Err(other.unsupported()),
            };
        }

        // Ações na tela substituem o feedback do login
        self.feedback = None;
        match self.screen.as_mut() {
            Some(screen) => screen.handle(action, confirm).await,
            None => Err(action.unsupported()),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("══ SysAccessos ══\n");
        match (&self.view, self.session.user()) {
            (View::Auth(AuthMode::Login), _) => out.push_str("[Entrar]\n"),
            (View::Auth(AuthMode::Register), _) => out.push_str("[Criar conta]\n"),
            (View::Admin(active), Some(user)) => {
                let tabs: Vec<String> = AdminTab::ALL
                    .iter()
                    .map(|tab| {
                        if tab == active {
                            format!("[{}]", tab.label())
                        } else {
                            tab.label().to_string()
                        }
                    })
                    .collect();
                out.push_str(&format!("{} · {} (ADMIN)\n", tabs.join(" | "), user.name));
            }
            (View::SelfService, Some(user)) => {
                out.push_str(&format!("[Minha conta] · {} ({})\n", user.name, user.role.as_str()));
            }
            _ => {}
        }

        if let View::Auth(mode) = self.view {
            out.push_str(&self.auth_form.render(mode));
        }
        if self.loading {
            out.push_str("Carregando...\n");
        }
        if let Some(feedback) = &self.feedback {
            out.push_str(&feedback.render());
        }
        if let Some(screen) = &self.screen {
            out.push_str(&format!("\n── {} ──\n", screen.title()));
            out.push_str(&screen.render());
        }
        out
    }
}
