//! Gemini API annotator adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AnnotationError, Annotator};
use crate::domain::audio::AudioData;
use crate::domain::message::Annotation;

/// Gemini API model to use
const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";

/// Gemini API base URL
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Analysis instruction sent alongside the audio
const ANALYSIS_PROMPT: &str = "Listen to this audio clip and provide a catchy title, \
a very brief description (max 10 words), and one relevant emoji. \
Output in JSON format.";

// Request types for Gemini API

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: ResponseSchema,
}

#[derive(Debug, Serialize)]
struct ResponseSchema {
    #[serde(rename = "type")]
    schema_type: &'static str,
    properties: SchemaProperties,
    required: [&'static str; 3],
}

#[derive(Debug, Serialize)]
struct SchemaProperties {
    title: SchemaField,
    description: SchemaField,
    emoji: SchemaField,
}

#[derive(Debug, Serialize)]
struct SchemaField {
    #[serde(rename = "type")]
    schema_type: &'static str,
}

impl ResponseSchema {
    fn annotation() -> Self {
        const STRING: SchemaField = SchemaField {
            schema_type: "STRING",
        };
        Self {
            schema_type: "OBJECT",
            properties: SchemaProperties {
                title: STRING,
                description: STRING,
                emoji: STRING,
            },
            required: ["title", "description", "emoji"],
        }
    }
}

// Response types for Gemini API

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// The JSON object the model is constrained to emit
#[derive(Debug, Deserialize)]
struct AnnotationPayload {
    title: String,
    description: String,
    emoji: String,
}

/// Gemini API annotator
pub struct GeminiAnnotator {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiAnnotator {
    /// Create a new Gemini annotator with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a new Gemini annotator with a custom model
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Override the API base URL (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the API URL
    fn api_url(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    /// Build the request body
    fn build_request(&self, audio: &AudioData) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: audio.mime_type().to_string(),
                            data: audio.to_base64(),
                        }),
                    },
                    Part {
                        text: Some(ANALYSIS_PROMPT.to_string()),
                        inline_data: None,
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: ResponseSchema::annotation(),
            },
        }
    }

    /// Extract text from response
    fn extract_text(response: &GenerateContentResponse) -> Option<String> {
        let parts: Vec<&str> = response
            .candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(""))
        }
    }

    /// Parse the constrained JSON into an annotation
    fn parse_annotation(text: &str) -> Result<Annotation, AnnotationError> {
        let payload: AnnotationPayload = serde_json::from_str(text.trim())
            .map_err(|e| AnnotationError::ParseError(e.to_string()))?;
        Ok(Annotation::new(payload.title, payload.description, payload.emoji))
    }
}

#[async_trait]
impl Annotator for GeminiAnnotator {
    async fn analyze(&self, audio: &AudioData) -> Result<Annotation, AnnotationError> {
        let url = self.api_url();
        let body = self.build_request(audio);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AnnotationError::RequestFailed(e.to_string()))?;

        let status = response.status();

        // Handle HTTP errors
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AnnotationError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AnnotationError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AnnotationError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        // Parse response
        let response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AnnotationError::ParseError(e.to_string()))?;

        // Check for API error in response body
        if let Some(error) = response.error {
            return Err(AnnotationError::ApiError(error.message));
        }

        let text = Self::extract_text(&response).ok_or(AnnotationError::EmptyResponse)?;

        Self::parse_annotation(&text)
    }
}
