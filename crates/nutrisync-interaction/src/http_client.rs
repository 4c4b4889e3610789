//! HttpNutritionClient - REST client for the plan service.
//!
//! Every operation is a single JSON `POST` against the configured base URL.
//! There are no retries and no client-side timeout: a request runs until the
//! transport completes or fails.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use nutrisync_core::api::NutritionApi;
use nutrisync_core::config::ClientConfig;
use nutrisync_core::error::{NutriError, Result};
use nutrisync_core::form::PlanRequest;
use nutrisync_core::plan::PlanResult;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

const GENERATE_PLAN_PATH: &str = "generate-plan";
const ANALYZE_FOOD_PATH: &str = "analyze-food";
const CHAT_PATH: &str = "chat";
const TRACK_PROGRESS_PATH: &str = "track-progress";

#[derive(Debug, Serialize)]
struct AnalyzeFoodRequest {
    image_base64: String,
}

#[derive(Debug, Deserialize)]
struct AnalyzeFoodResponse {
    analysis: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    reply: String,
}

#[derive(Debug, Serialize)]
struct TrackProgressRequest {
    weight: f64,
}

#[derive(Debug, Deserialize)]
struct TrackProgressResponse {
    data: Vec<f64>,
}

/// Client for the plan service's HTTP API.
#[derive(Clone)]
pub struct HttpNutritionClient {
    client: Client,
    base_url: String,
}

impl HttpNutritionClient {
    /// Creates a client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Creates a client from the loaded configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Posts a JSON body and returns the status with the decoded JSON body.
    async fn post_json<B>(&self, path: &str, body: &B) -> Result<(StatusCode, Value)>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.endpoint(path);
        debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(%url, error = %e, "Request failed");
                NutriError::network(format!("Request to /{} failed: {}", path, e))
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| NutriError::network(format!("Failed to read /{} response: {}", path, e)))?;

        let value = serde_json::from_str::<Value>(&text).map_err(|e| {
            if status.is_success() {
                NutriError::unexpected_response(path, format!("Invalid JSON body: {}", e))
            } else {
                NutriError::Service {
                    status: status.as_u16(),
                    message: text.clone(),
                }
            }
        })?;

        debug!(%url, status = status.as_u16(), "Response received");
        Ok((status, value))
    }

    /// Posts a body and decodes a typed success response.
    async fn post_for<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let (status, value) = self.post_json(path, body).await?;
        ensure_success(status, &value)?;
        serde_json::from_value(value).map_err(|e| NutriError::unexpected_response(path, e.to_string()))
    }
}

/// Extracts the service's `error` field, if any.
fn error_message(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

fn ensure_success(status: StatusCode, body: &Value) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    let message = error_message(body).unwrap_or_else(|| body.to_string());
    Err(NutriError::Service {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl NutritionApi for HttpNutritionClient {
    async fn generate_plan(&self, request: &PlanRequest) -> Result<PlanResult> {
        let (status, body) = self.post_json(GENERATE_PLAN_PATH, request).await?;

        if let Some(message) = error_message(&body) {
            debug!(%message, "Plan request rejected by service");
            return Err(NutriError::validation(message));
        }
        ensure_success(status, &body)?;

        if !body.is_object() {
            return Err(NutriError::unexpected_response(
                GENERATE_PLAN_PATH,
                format!("Expected a JSON object, got {}", body),
            ));
        }
        serde_json::from_value(body)
            .map_err(|e| NutriError::unexpected_response(GENERATE_PLAN_PATH, e.to_string()))
    }

    async fn analyze_food_image(&self, image: &[u8]) -> Result<String> {
        let request = AnalyzeFoodRequest {
            image_base64: BASE64_STANDARD.encode(image),
        };
        let response: AnalyzeFoodResponse = self.post_for(ANALYZE_FOOD_PATH, &request).await?;
        Ok(response.analysis)
    }

    async fn send_chat_message(&self, message: &str) -> Result<String> {
        let response: ChatResponse = self.post_for(CHAT_PATH, &ChatRequest { message }).await?;
        Ok(response.reply)
    }

    async fn track_progress(&self, weight: f64) -> Result<Vec<f64>> {
        let response: TrackProgressResponse = self
            .post_for(TRACK_PROGRESS_PATH, &TrackProgressRequest { weight })
            .await?;
        Ok(response.data)
    }
}
