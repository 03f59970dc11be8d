mod common;

use chrono::NaiveDate;
use common::{MockApi, area, history_entry, permission, state_for, user};
use serde_json::json;
use sysaccessos_console::{
    console::confirm::AutoConfirm,
    views::{
        Action, Screen, areas::AreasScreen, history::HistoryScreen,
        permissions::PermissionsScreen, users::UsersScreen, visitors::VisitorsScreen,
        visits::VisitsScreen,
    },
};

fn set(field: &str, value: &str) -> Action {
    Action::Set {
        field: field.to_string(),
        value: value.to_string(),
    }
}

fn inline_set(field: &str, value: &str) -> Action {
    Action::InlineSet {
        field: field.to_string(),
        value: value.to_string(),
    }
}

async fn areas_screen(mock: &MockApi) -> AreasScreen {
    let state = state_for(mock).await;
    let mut screen = AreasScreen::new(state.areas.clone());
    screen.mount().await;
    screen
}

#[tokio::test]
async fn missing_required_field_sends_nothing() {
    let mock = MockApi::new();
    mock.on("GET", "/areas", 200, json!([]));
    let mut screen = areas_screen(&mock).await;
    let mut confirm = AutoConfirm::no();

    screen.handle(set("name", "Laboratório"), &mut confirm).await.unwrap();
    screen.handle(set("location", "Bloco B"), &mut confirm).await.unwrap();
    screen.handle(Action::Submit, &mut confirm).await.unwrap();

    assert_eq!(mock.count("POST", "/areas"), 0);
    let feedback = screen.feedback().unwrap();
    assert!(feedback.is_error());
    assert_eq!(
        feedback.errors.get("description").map(String::as_str),
        Some("Informe a descrição.")
    );
}

#[tokio::test]
async fn create_posts_trimmed_payload_and_reloads() {
    let mock = MockApi::new();
    mock.on("GET", "/areas", 200, json!([]));
    mock.on("POST", "/areas", 201, area(4, "Laboratório"));
    let mut screen = areas_screen(&mock).await;
    let mut confirm = AutoConfirm::no();

    for (field, value) in [
        ("name", "  Laboratório "),
        ("description", "Equipamentos"),
        ("location", " Bloco B"),
        ("securityLevel", "confidencial"),
    ] {
        screen.handle(set(field, value), &mut confirm).await.unwrap();
    }
    mock.on("GET", "/areas", 200, json!([area(4, "Laboratório")]));
    screen.handle(Action::Submit, &mut confirm).await.unwrap();

    let body = mock.last("POST", "/areas").unwrap().body.unwrap();
    assert_eq!(
        body,
        json!({
            "name": "Laboratório",
            "description": "Equipamentos",
            "location": "Bloco B",
            "securityLevel": "CONFIDENCIAL",
            "notes": "",
            "active": true,
        })
    );
    assert_eq!(mock.count("GET", "/areas"), 2);
    assert_eq!(screen.manager.rows.len(), 1);
    assert_eq!(screen.feedback().unwrap().message, "Área criada com sucesso.");
    // formulário volta ao padrão
    assert!(screen.manager.form.name.is_empty());
}

#[tokio::test]
async fn server_rejection_keeps_form_and_shows_message() {
    let mock = MockApi::new();
    mock.on("GET", "/areas", 200, json!([]));
    mock.on(
        "POST",
        "/areas",
        409,
        json!({"success": false, "message": "Já existe uma área com esse nome."}),
    );
    let mut screen = areas_screen(&mock).await;
    let mut confirm = AutoConfirm::no();

    for (field, value) in [("name", "Cofre"), ("description", "d"), ("location", "l")] {
        screen.handle(set(field, value), &mut confirm).await.unwrap();
    }
    screen.handle(Action::Submit, &mut confirm).await.unwrap();

    assert_eq!(screen.feedback().unwrap().message, "Já existe uma área com esse nome.");
    assert_eq!(screen.manager.form.name, "Cofre");
    assert_eq!(mock.count("GET", "/areas"), 1);
}

#[tokio::test]
async fn deleting_the_inline_row_cancels_the_edit() {
    let mock = MockApi::new();
    mock.on("GET", "/areas", 200, json!([area(3, "Depósito"), area(5, "Cofre")]));
    mock.on("DELETE", "/areas/3", 204, json!(null));
    let mut screen = areas_screen(&mock).await;
    let mut confirm = AutoConfirm::yes();

    screen.handle(Action::Inline(3), &mut confirm).await.unwrap();
    assert_eq!(screen.inline.editing_id(), Some(3));

    mock.on("GET", "/areas", 200, json!([area(5, "Cofre")]));
    screen.handle(Action::Delete(3), &mut confirm).await.unwrap();

    assert_eq!(confirm.asked, vec!["Deseja realmente remover esta área?".to_string()]);
    assert_eq!(mock.count("DELETE", "/areas/3"), 1);
    assert_eq!(screen.inline.editing_id(), None);
    assert_eq!(screen.manager.rows.len(), 1);
    assert_eq!(screen.feedback().unwrap().message, "Área removida.");
}

#[tokio::test]
async fn refused_confirmation_sends_no_delete() {
    let mock = MockApi::new();
    mock.on("GET", "/areas", 200, json!([area(3, "Depósito")]));
    let mut screen = areas_screen(&mock).await;
    let mut confirm = AutoConfirm::no();

    screen.handle(Action::Delete(3), &mut confirm).await.unwrap();

    assert_eq!(confirm.asked.len(), 1);
    assert_eq!(mock.count("DELETE", "/areas/3"), 0);
    assert_eq!(screen.manager.rows.len(), 1);
}

#[tokio::test]
async fn failed_reload_keeps_previous_rows() {
    let mock = MockApi::new();
    mock.on("GET", "/areas", 200, json!([area(3, "Depósito")]));
    let mut screen = areas_screen(&mock).await;
    let mut confirm = AutoConfirm::no();

    mock.on("GET", "/areas", 500, json!({"success": false}));
    screen.handle(Action::Refresh, &mut confirm).await.unwrap();

    assert_eq!(screen.manager.rows.len(), 1);
    let feedback = screen.feedback().unwrap();
    assert!(feedback.is_error());
    assert_eq!(feedback.message, "Não foi possível carregar as áreas.");
}

#[tokio::test]
async fn inline_save_replaces_row_without_reloading() {
    let mock = MockApi::new();
    mock.on(
        "GET",
        "/users",
        200,
        json!([user(1, "Ana", "ADMIN", "999"), user(2, "Bruno", "Porteiro", "111")]),
    );
    mock.on("PUT", "/users/2", 200, user(2, "Bruno Lima", "Supervisor", "111"));

    let state = state_for(&mock).await;
    let mut screen = UsersScreen::new(state.users.clone());
    screen.mount().await;
    let mut confirm = AutoConfirm::no();

    screen.handle(Action::Inline(2), &mut confirm).await.unwrap();
    screen.handle(inline_set("name", " Bruno Lima "), &mut confirm).await.unwrap();
    screen.handle(inline_set("role", "Supervisor"), &mut confirm).await.unwrap();
    screen.handle(Action::Save, &mut confirm).await.unwrap();

    let body = mock.last("PUT", "/users/2").unwrap().body.unwrap();
    assert_eq!(body["name"], "Bruno Lima");
    assert_eq!(body["role"], "Supervisor");
    assert!(body.get("password").is_none());

    assert_eq!(mock.count("GET", "/users"), 1);
    assert_eq!(screen.manager.rows[1].name, "Bruno Lima");
    assert_eq!(screen.manager.rows[0].name, "Ana");
    assert_eq!(screen.inline.editing_id(), None);
    assert_eq!(
        screen.inline.feedback_for(2).unwrap().message,
        "Usuário atualizado com sucesso."
    );
}

#[tokio::test]
async fn inline_validation_blocks_the_put() {
    let mock = MockApi::new();
    mock.on("GET", "/users", 200, json!([user(2, "Bruno", "Porteiro", "111")]));

    let state = state_for(&mock).await;
    let mut screen = UsersScreen::new(state.users.clone());
    screen.mount().await;
    let mut confirm = AutoConfirm::no();

    screen.handle(Action::Inline(2), &mut confirm).await.unwrap();
    screen.handle(inline_set("email", "bruno-sem-arroba"), &mut confirm).await.unwrap();
    screen.handle(Action::Save, &mut confirm).await.unwrap();

    assert_eq!(mock.count("PUT", "/users/2"), 0);
    let edit = screen.inline.editing.as_ref().unwrap();
    assert_eq!(edit.errors.get("email").map(String::as_str), Some("Formato de email inválido."));
}

#[tokio::test]
async fn permission_edit_sends_put() {
    let mock = MockApi::new();
    mock.on("GET", "/users", 200, json!([user(1, "Ana", "ADMIN", "999")]));
    mock.on("GET", "/areas", 200, json!([area(7, "Laboratório")]));
    mock.on("GET", "/permissions", 200, json!([permission(11, 1, 7)]));
    mock.on("PUT", "/permissions/11", 200, permission(11, 1, 7));

    let state = state_for(&mock).await;
    let mut screen = PermissionsScreen::new(
        state.permissions.clone(),
        state.users.clone(),
        state.areas.clone(),
    );
    screen.mount().await;
    assert_eq!(screen.users.len(), 1);
    assert_eq!(screen.areas.len(), 1);
    let mut confirm = AutoConfirm::no();

    screen.handle(Action::Edit(11), &mut confirm).await.unwrap();
    assert_eq!(screen.manager.form.valid_from, "2025-01-01");
    screen.handle(set("status", "suspensa"), &mut confirm).await.unwrap();
    screen.handle(Action::Submit, &mut confirm).await.unwrap();

    assert_eq!(mock.count("POST", "/permissions"), 0);
    let body = mock.last("PUT", "/permissions/11").unwrap().body.unwrap();
    assert_eq!(body["status"], "SUSPENSA");
    assert_eq!(body["userId"], 1);
    assert_eq!(body["validUntil"], "2025-12-31");
    assert_eq!(screen.feedback().unwrap().message, "Permissão atualizada com sucesso.");
    assert_eq!(screen.manager.editing_id, None);
}

#[tokio::test]
async fn history_filter_is_sent_and_kept_on_reload() {
    let mock = MockApi::new();
    mock.on("GET", "/users", 200, json!([]));
    mock.on("GET", "/areas", 200, json!([]));
    mock.on("GET", "/history", 200, json!([history_entry(1, 1, 7)]));

    let state = state_for(&mock).await;
    let mut screen = HistoryScreen::new(
        state.history.clone(),
        state.users.clone(),
        state.areas.clone(),
    );
    screen.mount().await;
    assert_eq!(mock.last("GET", "/history").unwrap().query, None);
    let mut confirm = AutoConfirm::no();

    let filter = Action::Filter {
        start: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        end: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
    };
    screen.handle(filter, &mut confirm).await.unwrap();
    screen.handle(Action::Refresh, &mut confirm).await.unwrap();

    let query = mock.last("GET", "/history").unwrap().query.unwrap();
    assert!(query.contains("start=2025-01-02T00"));
    assert!(query.contains("end=2025-01-05T23"));

    screen.handle(Action::Unfilter, &mut confirm).await.unwrap();
    assert_eq!(mock.last("GET", "/history").unwrap().query, None);
    assert!(screen.filter().is_none());
}

#[tokio::test]
async fn history_options_failure_has_its_own_message() {
    let mock = MockApi::new();
    mock.on("GET", "/users", 500, json!({}));
    mock.on("GET", "/areas", 200, json!([]));
    mock.on("GET", "/history", 200, json!([history_entry(1, 1, 7)]));

    let state = state_for(&mock).await;
    let mut screen = HistoryScreen::new(
        state.history.clone(),
        state.users.clone(),
        state.areas.clone(),
    );
    screen.mount().await;

    assert_eq!(screen.manager.rows.len(), 1);
    assert_eq!(
        screen.feedback().unwrap().message,
        "Não foi possível carregar usuários/áreas."
    );
}

#[tokio::test]
async fn history_load_failure_wins_over_options_failure() {
    let mock = MockApi::new();
    mock.on("GET", "/users", 500, json!({}));
    mock.on("GET", "/areas", 200, json!([]));
    mock.on("GET", "/history", 500, json!({}));

    let state = state_for(&mock).await;
    let mut screen = HistoryScreen::new(
        state.history.clone(),
        state.users.clone(),
        state.areas.clone(),
    );
    screen.mount().await;

    assert_eq!(
        screen.feedback().unwrap().message,
        "Não foi possível carregar o histórico."
    );
}

// =============================================================================
//  USUÁRIOS, VISITANTES E VISITAS
// =============================================================================

#[tokio::test]
async fn user_create_posts_register_payload_and_reloads() {
    let mock = MockApi::new();
    mock.on("GET", "/users", 200, json!([]));
    mock.on("POST", "/users", 201, user(3, "Carla", "Analista", "777"));

    let state = state_for(&mock).await;
    let mut screen = UsersScreen::new(state.users.clone());
    screen.mount().await;
    let mut confirm = AutoConfirm::no();

    for (field, value) in [
        ("name", " Carla "),
        ("email", "carla@empresa.com"),
        ("registrationCode", "M-300"),
        ("role", "Analista"),
        ("cardIdentifier", "7 7 7"),
        ("password", "segredo1"),
    ] {
        screen.handle(set(field, value), &mut confirm).await.unwrap();
    }
    mock.on("GET", "/users", 200, json!([user(3, "Carla", "Analista", "777")]));
    screen.handle(Action::Submit, &mut confirm).await.unwrap();

    let body = mock.last("POST", "/users").unwrap().body.unwrap();
    assert_eq!(
        body,
        json!({
            "name": "Carla",
            "email": "carla@empresa.com",
            "registrationCode": "300",
            "role": "Analista",
            "cardIdentifier": "777",
            "password": "segredo1",
        })
    );
    assert_eq!(mock.count("GET", "/users"), 2);
    assert_eq!(screen.manager.rows.len(), 1);
    assert_eq!(
        screen.feedback().unwrap().message,
        "Usuário e cartão cadastrados com sucesso."
    );
}

fn visitor(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "fullName": name,
        "documentId": format!("DOC-{id}"),
        "email": format!("visitante{id}@acme.com"),
        "phone": "11999990000",
        "company": "ACME",
        "notes": null,
        "active": true,
    })
}

fn visit(id: i64, visitor_id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "visitorId": visitor_id,
        "hostName": "Carla",
        "purpose": "Auditoria",
        "visitDate": "2025-02-10",
        "startTime": "09:00:00",
        "endTime": "10:30:00",
        "status": "AGENDADA",
        "notes": null,
    })
}

#[tokio::test]
async fn visitor_edit_sends_put_and_delete_asks_first() {
    let mock = MockApi::new();
    mock.on("GET", "/visitors", 200, json!([visitor(4, "João"), visitor(5, "Maria")]));
    mock.on("PUT", "/visitors/4", 200, visitor(4, "João Lima"));
    mock.on("DELETE", "/visitors/5", 204, json!(null));

    let state = state_for(&mock).await;
    let mut screen = VisitorsScreen::new(state.visitors.clone());
    screen.mount().await;
    let mut confirm = AutoConfirm::yes();

    screen.handle(Action::Edit(4), &mut confirm).await.unwrap();
    assert_eq!(screen.manager.form.document_id, "DOC-4");
    screen.handle(set("fullName", "João Lima "), &mut confirm).await.unwrap();
    screen.handle(Action::Submit, &mut confirm).await.unwrap();

    assert_eq!(mock.count("POST", "/visitors"), 0);
    let body = mock.last("PUT", "/visitors/4").unwrap().body.unwrap();
    assert_eq!(body["fullName"], "João Lima");
    assert_eq!(body["active"], true);
    assert_eq!(screen.feedback().unwrap().message, "Visitante atualizado com sucesso.");
    assert_eq!(screen.manager.editing_id, None);

    screen.handle(Action::Delete(5), &mut confirm).await.unwrap();
    assert_eq!(
        confirm.asked,
        vec!["Deseja realmente remover este visitante?".to_string()]
    );
    assert_eq!(mock.count("DELETE", "/visitors/5"), 1);
    assert_eq!(screen.feedback().unwrap().message, "Visitante removido.");
}

#[tokio::test]
async fn visits_mount_loads_visitors_and_visits_together() {
    let mock = MockApi::new();
    mock.on("GET", "/visitors", 200, json!([visitor(4, "João")]));
    mock.on("GET", "/visits", 200, json!([visit(8, 4)]));

    let state = state_for(&mock).await;
    let mut screen = VisitsScreen::new(state.visits.clone(), state.visitors.clone());
    screen.mount().await;

    assert_eq!(screen.visitors.len(), 1);
    assert_eq!(screen.manager.rows.len(), 1);
    // nome do visitante vem da lista de opções
    assert!(screen.render().contains("João"));

    mock.on("GET", "/visitors", 500, json!({}));
    let mut confirm = AutoConfirm::no();
    screen.handle(Action::Refresh, &mut confirm).await.unwrap();
    assert_eq!(screen.manager.rows.len(), 1);
    assert_eq!(
        screen.feedback().unwrap().message,
        "Não foi possível carregar os registros de visita."
    );
}

#[tokio::test]
async fn visit_edit_sends_put_and_refused_delete_sends_nothing() {
    let mock = MockApi::new();
    mock.on("GET", "/visitors", 200, json!([visitor(4, "João")]));
    mock.on("GET", "/visits", 200, json!([visit(8, 4)]));
    mock.on("PUT", "/visits/8", 200, visit(8, 4));

    let state = state_for(&mock).await;
    let mut screen = VisitsScreen::new(state.visits.clone(), state.visitors.clone());
    screen.mount().await;
    let mut confirm = AutoConfirm::no();

    screen.handle(Action::Edit(8), &mut confirm).await.unwrap();
    assert_eq!(screen.manager.form.start_time, "09:00");
    screen.handle(set("status", "concluida"), &mut confirm).await.unwrap();
    screen.handle(Action::Submit, &mut confirm).await.unwrap();

    let body = mock.last("PUT", "/visits/8").unwrap().body.unwrap();
    assert_eq!(body["status"], "CONCLUIDA");
    assert_eq!(body["visitorId"], 4);
    assert_eq!(body["visitDate"], "2025-02-10");
    assert_eq!(body["startTime"], "09:00:00");
    assert_eq!(screen.feedback().unwrap().message, "Visita atualizada com sucesso.");

    screen.handle(Action::Delete(8), &mut confirm).await.unwrap();
    assert_eq!(
        confirm.asked,
        vec!["Deseja realmente remover este registro de visita?".to_string()]
    );
    assert_eq!(mock.count("DELETE", "/visits/8"), 0);
}

#[tokio::test]
async fn unsupported_action_is_rejected_without_requests() {
    let mock = MockApi::new();
    mock.on("GET", "/users", 200, json!([]));
    let state = state_for(&mock).await;
    let mut screen = UsersScreen::new(state.users.clone());
    screen.mount().await;
    let mut confirm = AutoConfirm::yes();

    assert!(screen.handle(Action::Delete(1), &mut confirm).await.is_err());
    assert!(screen.handle(set("salary", "10"), &mut confirm).await.is_err());
    assert!(confirm.asked.is_empty());
    assert_eq!(mock.requests().len(), 1);
}
