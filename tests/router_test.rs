mod common;

use common::{MockApi, area, router_for, user};
use serde_json::json;
use sysaccessos_console::{
    AppError,
    console::confirm::AutoConfirm,
    router::{AdminTab, AuthMode, Session, View},
    views::Action,
};

fn set(field: &str, value: &str) -> Action {
    Action::Set {
        field: field.to_string(),
        value: value.to_string(),
    }
}

async fn fill_login(router: &mut sysaccessos_console::ViewRouter, confirm: &mut AutoConfirm) {
    router.dispatch(set("email", " ana@empresa.com "), confirm).await.unwrap();
    router.dispatch(set("password", "segredo1"), confirm).await.unwrap();
}

#[tokio::test]
async fn admin_login_lands_on_users_tab() {
    let mock = MockApi::new();
    mock.on(
        "POST",
        "/auth/login",
        200,
        json!({"success": true, "message": "Login realizado.", "user": user(1, "Ana", "ADMIN", "999")}),
    );
    mock.on("GET", "/users", 200, json!([user(1, "Ana", "ADMIN", "999")]));

    let mut router = router_for(&mock).await;
    let mut confirm = AutoConfirm::no();
    fill_login(&mut router, &mut confirm).await;
    router.dispatch(Action::Submit, &mut confirm).await.unwrap();

    assert_eq!(router.view(), View::Admin(AdminTab::Users));
    assert!(matches!(router.session(), Session::Admin(u) if u.id == 1));

    let login = mock.last("POST", "/auth/login").unwrap();
    assert_eq!(login.body, Some(json!({"email": "ana@empresa.com", "password": "segredo1"})));

    // A aba de usuários foi montada (GET inicial)
    assert_eq!(mock.count("GET", "/users"), 1);

    let feedback = router.feedback().unwrap();
    assert_eq!(feedback.message, "Login realizado.");
    assert!(feedback.details.contains(&("Cartão".to_string(), "999".to_string())));
    assert!(router.render().contains("[Usuários]"));
}

#[tokio::test]
async fn member_login_lands_on_self_service_and_cannot_open_tabs() {
    let mock = MockApi::new();
    mock.on(
        "POST",
        "/auth/login",
        200,
        json!({"success": true, "user": user(5, "Bruno", "Porteiro", "4321")}),
    );
    mock.on("GET", "/permissions/user/5", 200, json!([]));
    mock.on("GET", "/areas/authorized", 200, json!([area(7, "Laboratório")]));
    mock.on("GET", "/history/user/5", 200, json!([]));

    let mut router = router_for(&mock).await;
    let mut confirm = AutoConfirm::no();
    fill_login(&mut router, &mut confirm).await;
    router.dispatch(Action::Submit, &mut confirm).await.unwrap();

    assert_eq!(router.view(), View::SelfService);
    assert!(matches!(router.session(), Session::Member(_)));
    assert_eq!(
        mock.last("GET", "/areas/authorized").unwrap().query.as_deref(),
        Some("cardIdentifier=4321")
    );
    assert_eq!(router.feedback().unwrap().message, "Operação realizada com sucesso.");
    assert!(router.render().contains("Laboratório"));

    let err = router.open_tab(AdminTab::Areas).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
    assert_eq!(router.view(), View::SelfService);
    assert_eq!(mock.count("GET", "/areas"), 0);
}

#[tokio::test]
async fn lowercase_admin_role_is_a_member() {
    let mock = MockApi::new();
    mock.on(
        "POST",
        "/auth/login",
        200,
        json!({"success": true, "user": user(2, "Caio", "admin", "1")}),
    );
    mock.on("GET", "/permissions/user/2", 200, json!([]));
    mock.on("GET", "/areas/authorized", 200, json!([]));
    mock.on("GET", "/history/user/2", 200, json!([]));

    let mut router = router_for(&mock).await;
    let mut confirm = AutoConfirm::no();
    fill_login(&mut router, &mut confirm).await;
    router.dispatch(Action::Submit, &mut confirm).await.unwrap();

    assert_eq!(router.view(), View::SelfService);
}

#[tokio::test]
async fn registration_returns_to_login_with_composed_message() {
    let mock = MockApi::new();
    mock.on(
        "POST",
        "/auth/register",
        201,
        json!({"success": true, "message": "Usuário registrado com sucesso.", "user": user(9, "Dora", "Analista", "55")}),
    );

    let mut router = router_for(&mock).await;
    let mut confirm = AutoConfirm::no();
    router.switch_auth_mode(AuthMode::Register).unwrap();
    for (field, value) in [
        ("name", " Dora "),
        ("email", "dora@empresa.com"),
        ("registrationCode", "R-900"),
        ("role", "Analista"),
        ("cardIdentifier", "00 55"),
        ("password", "segredo1"),
    ] {
        router.dispatch(set(field, value), &mut confirm).await.unwrap();
    }
    router.dispatch(Action::Submit, &mut confirm).await.unwrap();

    assert_eq!(router.view(), View::Auth(AuthMode::Login));
    assert!(matches!(router.session(), Session::Anonymous));
    assert_eq!(
        router.feedback().unwrap().message,
        "Usuário registrado com sucesso. Agora faça login com suas credenciais."
    );

    let body = mock.last("POST", "/auth/register").unwrap().body.unwrap();
    assert_eq!(body["name"], "Dora");
    assert_eq!(body["registrationCode"], "900");
    assert_eq!(body["cardIdentifier"], "0055");
}

#[tokio::test]
async fn failed_login_keeps_view_and_shows_server_errors() {
    let mock = MockApi::new();
    mock.on(
        "POST",
        "/auth/login",
        401,
        json!({"success": false, "message": "Credenciais inválidas.", "errors": {"password": "Senha incorreta."}}),
    );

    let mut router = router_for(&mock).await;
    let mut confirm = AutoConfirm::no();
    fill_login(&mut router, &mut confirm).await;
    router.dispatch(Action::Submit, &mut confirm).await.unwrap();

    assert_eq!(router.view(), View::Auth(AuthMode::Login));
    let feedback = router.feedback().unwrap();
    assert!(feedback.is_error());
    assert_eq!(feedback.message, "Credenciais inválidas.");
    assert_eq!(feedback.errors.get("password").map(String::as_str), Some("Senha incorreta."));
    assert!(!router.loading());
}

#[tokio::test]
async fn success_false_is_a_failure_and_missing_message_uses_default() {
    let mock = MockApi::new();
    mock.on("POST", "/auth/login", 200, json!({"success": false}));

    let mut router = router_for(&mock).await;
    let mut confirm = AutoConfirm::no();
    fill_login(&mut router, &mut confirm).await;
    router.dispatch(Action::Submit, &mut confirm).await.unwrap();

    assert_eq!(router.view(), View::Auth(AuthMode::Login));
    assert_eq!(
        router.feedback().unwrap().message,
        "Não foi possível completar a operação."
    );
}

#[tokio::test]
async fn invalid_auth_form_never_calls_the_api() {
    let mock = MockApi::new();
    let mut router = router_for(&mock).await;
    let mut confirm = AutoConfirm::no();

    router.dispatch(set("email", "sem-arroba"), &mut confirm).await.unwrap();
    router.dispatch(set("password", "123"), &mut confirm).await.unwrap();
    router.dispatch(Action::Submit, &mut confirm).await.unwrap();

    assert!(mock.requests().is_empty());
    let errors = &router.feedback().unwrap().errors;
    assert!(errors.contains_key("email"));
    assert!(errors.contains_key("password"));
}

#[tokio::test]
async fn switching_auth_mode_clears_fields_but_keeps_feedback() {
    let mock = MockApi::new();
    let mut router = router_for(&mock).await;
    let mut confirm = AutoConfirm::no();

    router.dispatch(set("email", "x"), &mut confirm).await.unwrap();
    router.dispatch(Action::Submit, &mut confirm).await.unwrap();
    assert!(router.feedback().is_some());

    router.switch_auth_mode(AuthMode::Register).unwrap();
    assert_eq!(router.view(), View::Auth(AuthMode::Register));
    assert!(router.auth_form().email.is_empty());
    assert!(router.feedback().is_some());
}

#[tokio::test]
async fn tab_switch_and_logout() {
    let mock = MockApi::new();
    mock.on(
        "POST",
        "/auth/login",
        200,
        json!({"success": true, "user": user(1, "Ana", "ADMIN", "999")}),
    );
    mock.on("GET", "/users", 200, json!([]));
    mock.on("GET", "/areas", 200, json!([area(3, "Depósito")]));

    let mut router = router_for(&mock).await;
    let mut confirm = AutoConfirm::no();
    fill_login(&mut router, &mut confirm).await;
    router.dispatch(Action::Submit, &mut confirm).await.unwrap();

    router.open_tab(AdminTab::Areas).await.unwrap();
    assert_eq!(router.view(), View::Admin(AdminTab::Areas));
    assert!(router.feedback().is_none());
    assert_eq!(router.screen().unwrap().title(), "Áreas");
    assert!(router.render().contains("Depósito"));

    router.logout();
    assert_eq!(router.view(), View::Auth(AuthMode::Login));
    assert!(matches!(router.session(), Session::Anonymous));
    assert!(router.screen().is_none());
    assert!(matches!(
        router.open_tab(AdminTab::Users).await,
        Err(AppError::Forbidden)
    ));
}
