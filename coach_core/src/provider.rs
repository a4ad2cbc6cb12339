//! Plan providers.
//!
//! A plan provider turns an age group into a full weekly plan. The real
//! implementation calls Google's Generative Language API; the request is
//! single-shot and never retried automatically. Any failure surfaces as one
//! generic plan error which the shell turns into a retry path.

use crate::{AgeGroup, Error, Result, WeeklyPlan};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Environment variable holding the Gemini API key
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default model to use
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Base URL for the Gemini API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default per-request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of weekly workout plans
pub trait PlanProvider {
    /// Generate a seven-day plan for the given age group.
    ///
    /// Implementations return the plan atomically: a partially populated
    /// week is an error, never a value.
    fn weekly_plan(&self, age_group: AgeGroup) -> Result<WeeklyPlan>;
}

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Weekly plan provider backed by the Gemini API
pub struct GeminiPlanProvider {
    api_key: String,
    client: reqwest::blocking::Client,
    model: String,
    timeout: Duration,
}

impl GeminiPlanProvider {
    /// Create a provider with an explicit API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: reqwest::blocking::Client::new(),
            model: DEFAULT_MODEL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a provider from the `GEMINI_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(GEMINI_API_KEY_ENV).map_err(|_| {
            Error::Config(format!(
                "{} environment variable not set",
                GEMINI_API_KEY_ENV
            ))
        })?;
        Ok(Self::new(api_key))
    }

    /// Override the model id
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            API_BASE_URL, self.model, self.api_key
        )
    }

    fn build_request(age_group: AgeGroup) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_owned()),
                parts: vec![ContentPart {
                    text: build_prompt(age_group),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_owned(),
                response_schema: plan_response_schema(),
            },
        }
    }

    /// Extract the candidate text from a Gemini response
    fn extract_content(response: GeminiResponse) -> Result<String> {
        if let Some(error) = response.error {
            return Err(Error::Plan(format!("Gemini API error: {}", error.message)));
        }

        response
            .candidates
            .and_then(|mut c| if c.is_empty() { None } else { Some(c.remove(0)) })
            .and_then(|c| c.content)
            .and_then(|mut c| {
                if c.parts.is_empty() {
                    None
                } else {
                    Some(c.parts.remove(0).text)
                }
            })
            .ok_or_else(|| Error::Plan("No content in Gemini response".into()))
    }

    /// Parse and validate the model's JSON output into a weekly plan
    fn parse_plan_text(text: &str) -> Result<WeeklyPlan> {
        let plan: WeeklyPlan = serde_json::from_str(text)
            .map_err(|e| Error::Plan(format!("Malformed plan from model: {}", e)))?;
        plan.validate()?;
        Ok(plan)
    }

    fn map_api_error(status: u16, body: &str) -> Error {
        let message = serde_json::from_str::<GeminiResponse>(body)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| body.to_owned(), |e| e.message);
        Error::Plan(format!("Gemini API error ({}): {}", status, message))
    }
}

impl PlanProvider for GeminiPlanProvider {
    fn weekly_plan(&self, age_group: AgeGroup) -> Result<WeeklyPlan> {
        let url = self.build_url();
        let request = Self::build_request(age_group);

        tracing::info!("Requesting weekly plan for {}", age_group.label());

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&request)
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            tracing::error!(status = %status, "Gemini API request failed");
            return Err(Self::map_api_error(status.as_u16(), &body));
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Plan(format!("Failed to parse Gemini response: {}", e)))?;

        let text = Self::extract_content(gemini_response)?;
        let plan = Self::parse_plan_text(&text)?;

        tracing::info!("Received valid {}-day plan", plan.days.len());
        Ok(plan)
    }
}

impl std::fmt::Debug for GeminiPlanProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiPlanProvider")
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Prompt sent to the model for a given age group
fn build_prompt(age_group: AgeGroup) -> String {
    format!(
        "Generate a diverse and effective 7-day workout plan suitable for the '{}' age group. \
         For each day, provide a creative title and a list of 4-6 exercises. \
         For each exercise, include a name, a brief description, a specific duration in seconds \
         (if time-based) or a number of reps (if count-based), and a concise YouTube search query \
         for a tutorial video. \
         If an exercise is rep-based, set duration to 0. If it's duration-based, set reps to 0. \
         Ensure the plan is balanced, targeting different muscle groups throughout the week, \
         with appropriate rest days or light activity days. \
         The response must be in JSON format.",
        age_group.label()
    )
}

/// JSON schema constraining the model output to the weekly plan shape
fn plan_response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "day": { "type": "STRING" },
                "title": { "type": "STRING" },
                "exercises": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "name": { "type": "STRING" },
                            "description": { "type": "STRING" },
                            "duration": { "type": "INTEGER" },
                            "reps": { "type": "INTEGER" },
                            "videoQuery": { "type": "STRING" }
                        },
                        "required": ["name", "description", "duration", "reps", "videoQuery"]
                    }
                }
            },
            "required": ["day", "title", "exercises"]
        }
    })
}
