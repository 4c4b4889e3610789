//! End-to-end session flow against a mock plan service and a real record file.

use std::sync::Arc;

use nutrisync_application::{ActionOutcome, NoticeKind, SessionController, SessionView};
use nutrisync_core::form::{FormField, PlanProfile};
use nutrisync_core::session::SessionState;
use nutrisync_infrastructure::JsonPlanRepository;
use nutrisync_interaction::HttpNutritionClient;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn start(server: &MockServer, dir: &TempDir) -> SessionController {
    let api = Arc::new(HttpNutritionClient::new(server.uri()));
    let repository = Arc::new(JsonPlanRepository::at(dir.path().join("nutri_data.json")));
    SessionController::start(api, repository, PlanProfile::Goal).await
}

async fn fill_form(controller: &SessionController) {
    controller.set_field(FormField::Age, "30").await;
    controller.set_field(FormField::Weight, "80").await;
    controller.set_field(FormField::Height, "175").await;
}

#[tokio::test]
async fn test_plan_survives_restart_of_the_process() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/generate-plan"))
        .and(body_json(json!({
            "age": 30.0,
            "weight": 80.0,
            "height": 175.0,
            "goal": "fat_loss"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "smartScore": 82,
            "calories": 2200,
            "protein": 150,
            "aiPlan": "Lean protein at every meal."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let controller = start(&server, &dir).await;
    fill_form(&controller).await;
    assert_eq!(controller.submit().await, ActionOutcome::Applied);
    assert!(dir.path().join("nutri_data.json").exists());

    // Second launch reads the record instead of calling the service.
    let relaunched = start(&server, &dir).await;
    let SessionView::Dashboard(dashboard) = relaunched.view().await else {
        panic!("expected dashboard after relaunch");
    };
    assert_eq!(dashboard.tiles[0].value, "82%");
    assert_eq!(dashboard.recommendation.as_deref(), Some("Lean protein at every meal."));
    assert_eq!(dashboard.prediction[29].weight, 78.5);
    assert_eq!(relaunched.form().await.age, "30");
}

#[tokio::test]
async fn test_string_typed_numbers_still_populate_dashboard() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/generate-plan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "calories": 2200,
            "bmi": "24.2",
            "smartScore": "pending"
        })))
        .mount(&server)
        .await;

    let controller = start(&server, &dir).await;
    fill_form(&controller).await;
    assert_eq!(controller.submit().await, ActionOutcome::Applied);

    let SessionState::Populated(plan) = controller.state().await else {
        panic!("expected populated session");
    };
    assert_eq!(plan.bmi, Some(24.2));
    assert_eq!(plan.extra.get("smartScore"), Some(&json!("pending")));

    // The same shape reads back from disk on the next launch.
    let relaunched = start(&server, &dir).await;
    let SessionView::Dashboard(dashboard) = relaunched.view().await else {
        panic!("expected dashboard after relaunch");
    };
    let labels: Vec<_> = dashboard.tiles.iter().map(|t| (t.label, t.value.as_str())).collect();
    assert_eq!(labels, vec![("Calories", "2200"), ("BMI", "24.2")]);
}

#[tokio::test]
async fn test_validation_error_keeps_form_and_writes_nothing() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/generate-plan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "invalid age" })))
        .mount(&server)
        .await;

    let controller = start(&server, &dir).await;
    controller.set_field(FormField::Age, "-4").await;
    let outcome = controller.submit().await;

    let notice = outcome.notice().expect("validation notice");
    assert_eq!(notice.kind, NoticeKind::Validation);
    assert_eq!(notice.message, "invalid age");
    assert_eq!(controller.state().await, SessionState::Empty);
    assert!(!dir.path().join("nutri_data.json").exists());
}

#[tokio::test]
async fn test_restart_removes_record() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/generate-plan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "calories": 1800 })))
        .mount(&server)
        .await;

    let controller = start(&server, &dir).await;
    fill_form(&controller).await;
    controller.submit().await;

    assert_eq!(controller.restart().await, ActionOutcome::Applied);
    assert!(!dir.path().join("nutri_data.json").exists());
    assert!(!start(&server, &dir).await.view().await.is_dashboard());
}

#[tokio::test]
async fn test_malformed_record_starts_empty() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("nutri_data.json"), "{ not json").unwrap();

    let controller = start(&server, &dir).await;
    assert_eq!(controller.state().await, SessionState::Empty);
}

#[tokio::test]
async fn test_legacy_record_rehydrates() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("nutri_data.json"),
        r#"{"smartScore": 75, "calories": 2400, "protein": 160}"#,
    )
    .unwrap();

    let controller = start(&server, &dir).await;
    let SessionState::Populated(plan) = controller.state().await else {
        panic!("expected legacy plan to rehydrate");
    };
    assert_eq!(plan.calories, Some(2400.0));
}

#[tokio::test]
async fn test_dashboard_actions() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/generate-plan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "calories": 2000 })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({ "message": "How much protein?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": "About 150 g." })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/track-progress"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": [80, 79.5, 79] })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/analyze-food"))
        .and(body_json(json!({ "image_base64": "aGVsbG8=" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "analysis": "Rice bowl, 520 kcal" })),
        )
        .mount(&server)
        .await;

    let controller = start(&server, &dir).await;
    fill_form(&controller).await;
    controller.submit().await;

    assert_eq!(controller.send_chat("How much protein?").await, ActionOutcome::Applied);
    assert_eq!(controller.track_weight("79").await, ActionOutcome::Applied);
    assert_eq!(controller.analyze_food(b"hello").await, ActionOutcome::Applied);
    controller.add_water().await;

    let SessionView::Dashboard(dashboard) = controller.view().await else {
        panic!("expected dashboard");
    };
    assert_eq!(dashboard.chat[0].ai_reply, "About 150 g.");
    assert_eq!(dashboard.progress.len(), 3);
    assert_eq!(dashboard.progress[2].weight, 79.0);
    assert_eq!(dashboard.food_analysis.as_deref(), Some("Rice bowl, 520 kcal"));
    assert_eq!(dashboard.hydration.label, "0.5 / 3 Liters");
}

#[tokio::test]
async fn test_unreachable_service_reports_connectivity() {
    let dir = TempDir::new().unwrap();
    let api = Arc::new(HttpNutritionClient::new("http://127.0.0.1:1"));
    let repository = Arc::new(JsonPlanRepository::at(dir.path().join("nutri_data.json")));
    let controller = SessionController::start(api, repository, PlanProfile::Goal).await;

    let outcome = controller.submit().await;
    assert_eq!(outcome.notice().map(|n| n.kind), Some(NoticeKind::Connectivity));
    assert_eq!(controller.state().await, SessionState::Empty);
}
