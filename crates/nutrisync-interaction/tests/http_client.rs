//! Contract tests for HttpNutritionClient against a mock plan service.

use anyhow::Result;
use nutrisync_core::error::NutriError;
use nutrisync_core::form::{FormField, FormInput, PlanProfile, PlanRequest};
use nutrisync_core::NutritionApi;
use nutrisync_interaction::HttpNutritionClient;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_request() -> PlanRequest {
    let mut form = FormInput::default();
    form.set_field(FormField::Age, "30");
    form.set_field(FormField::Weight, "80");
    form.set_field(FormField::Height, "175");
    PlanRequest::from_form(&form)
}

#[tokio::test]
async fn test_generate_plan_success() -> Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate-plan"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "age": 30.0,
            "weight": 80.0,
            "height": 175.0,
            "goal": "fat_loss"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "smartScore": 82,
            "calories": 2200,
            "protein": 150
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpNutritionClient::new(mock_server.uri());
    let plan = client.generate_plan(&sample_request()).await?;

    assert_eq!(plan.smart_score, Some(82.0));
    assert_eq!(plan.calories, Some(2200.0));
    assert_eq!(plan.protein, Some(150.0));
    Ok(())
}

#[tokio::test]
async fn test_generate_plan_activity_profile_sends_activity() -> Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate-plan"))
        .and(body_json(json!({
            "age": 41.0,
            "weight": 68.0,
            "height": 160.0,
            "activity": "high"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bmi": 26.6,
            "goal": "fat_loss",
            "calories": 1900,
            "aiPlan": "Walk after meals."
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut form = FormInput::new(PlanProfile::Activity);
    form.set_field(FormField::Age, "41");
    form.set_field(FormField::Weight, "68");
    form.set_field(FormField::Height, "160");
    form.set_field(FormField::Selection, "high");

    let client = HttpNutritionClient::new(mock_server.uri());
    let plan = client.generate_plan(&PlanRequest::from_form(&form)).await?;

    assert_eq!(plan.bmi, Some(26.6));
    assert_eq!(plan.goal.as_deref(), Some("fat_loss"));
    assert_eq!(plan.ai_plan.as_deref(), Some("Walk after meals."));
    Ok(())
}

#[tokio::test]
async fn test_generate_plan_error_field_is_validation() -> Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate-plan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "invalid age"})))
        .mount(&mock_server)
        .await;

    let client = HttpNutritionClient::new(mock_server.uri());
    let err = client.generate_plan(&sample_request()).await.unwrap_err();

    assert_eq!(err, NutriError::Validation("invalid age".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_generate_plan_error_field_with_bad_status_is_validation() -> Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate-plan"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"error": "height missing"})))
        .mount(&mock_server)
        .await;

    let client = HttpNutritionClient::new(mock_server.uri());
    let err = client.generate_plan(&sample_request()).await.unwrap_err();

    assert!(err.is_validation());
    Ok(())
}

#[tokio::test]
async fn test_server_error_without_error_field_is_service_error() -> Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate-plan"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&mock_server)
        .await;

    let client = HttpNutritionClient::new(mock_server.uri());
    let err = client.generate_plan(&sample_request()).await.unwrap_err();

    assert!(matches!(err, NutriError::Service { status: 503, .. }));
    Ok(())
}

#[tokio::test]
async fn test_transport_failure_is_network_error() -> Result<()> {
    // Nothing listens on port 1.
    let client = HttpNutritionClient::new("http://127.0.0.1:1");

    assert!(client.generate_plan(&sample_request()).await.unwrap_err().is_network());
    assert!(client.send_chat_message("hi").await.unwrap_err().is_network());
    assert!(client.track_progress(80.0).await.unwrap_err().is_network());
    assert!(client.analyze_food_image(b"img").await.unwrap_err().is_network());
    Ok(())
}

#[tokio::test]
async fn test_analyze_food_sends_base64() -> Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze-food"))
        .and(body_json(json!({"image_base64": "aGVsbG8="})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"analysis": "Looks like pasta."})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpNutritionClient::new(mock_server.uri());
    let analysis = client.analyze_food_image(b"hello").await?;

    assert_eq!(analysis, "Looks like pasta.");
    Ok(())
}

#[tokio::test]
async fn test_send_chat_message() -> Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({"message": "Is rice ok?"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "In moderation."})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpNutritionClient::new(mock_server.uri());
    let reply = client.send_chat_message("Is rice ok?").await?;

    assert_eq!(reply, "In moderation.");
    Ok(())
}

#[tokio::test]
async fn test_track_progress_returns_history() -> Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/track-progress"))
        .and(body_json(json!({"weight": 79.0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [80, 79.5, 79]})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpNutritionClient::new(mock_server.uri());
    let history = client.track_progress(79.0).await?;

    assert_eq!(history, vec![80.0, 79.5, 79.0]);
    Ok(())
}

#[tokio::test]
async fn test_missing_reply_is_unexpected_response() -> Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "wrong key"})))
        .mount(&mock_server)
        .await;

    let client = HttpNutritionClient::new(mock_server.uri());
    let err = client.send_chat_message("hello").await.unwrap_err();

    assert!(matches!(err, NutriError::UnexpectedResponse { ref endpoint, .. } if endpoint == "chat"));
    Ok(())
}
