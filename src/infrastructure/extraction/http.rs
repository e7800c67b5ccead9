//! HTTP plan extraction client adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::ExtractionClient;
use crate::domain::config::DEFAULT_API_URL;
use crate::domain::pipeline::ExtractionError;
use crate::domain::plan::{validate_candidates, PlanCandidate, PlanRecord};

// Request types for the extraction API

#[derive(Debug, Serialize)]
struct ProcessTextRequest<'a> {
    text: &'a str,
    timezone: &'a str,
}

// Response types for the extraction API

#[derive(Debug, Deserialize)]
struct ProcessTextResponse {
    extracted_info: Option<ExtractedInfo>,
}

#[derive(Debug, Deserialize)]
struct ExtractedInfo {
    plans: Option<Vec<PlanCandidate>>,
}

/// Client for the plan extraction service.
///
/// Sends recognized text with a timezone; the response carries plan
/// candidates that are validated independently, dropping invalid ones
/// (skip-and-continue). `MalformedResponse` only covers a body that
/// cannot be decoded at all.
pub struct HttpExtractionClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpExtractionClient {
    /// Create a client against the default service URL
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_URL)
    }

    /// Create a client against a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Build the process-text endpoint URL
    fn endpoint(&self) -> String {
        format!("{}/api/process-text/", self.base_url.trim_end_matches('/'))
    }

    /// Pull plan candidates out of the response envelope
    fn extract_candidates(response: ProcessTextResponse) -> Option<Vec<PlanCandidate>> {
        Some(response.extracted_info?.plans.unwrap_or_default())
    }
}

impl Default for HttpExtractionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExtractionClient for HttpExtractionClient {
    async fn extract(
        &self,
        text: &str,
        token: &str,
        timezone: &str,
    ) -> Result<Vec<PlanRecord>, ExtractionError> {
        let body = ProcessTextRequest { text, timezone };

        let response = self
            .client
            .post(self.endpoint())
            .header(reqwest::header::AUTHORIZATION, format!("Token {}", token))
            .json(&body)
            .send()
            .await
            .map_err(|e| ExtractionError::NetworkError(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ExtractionError::Unauthenticated);
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ExtractionError::NetworkError(format!(
                "HTTP {}: {}",
                status,
                body.trim()
            )));
        }

        let response: ProcessTextResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::MalformedResponse(e.to_string()))?;

        let candidates = Self::extract_candidates(response).ok_or_else(|| {
            ExtractionError::MalformedResponse("missing extracted_info".to_string())
        })?;

        let total = candidates.len();
        let plans = validate_candidates(candidates);
        if plans.len() < total {
            log::debug!("dropped {} invalid plan candidate(s)", total - plans.len());
        }

        Ok(plans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url() {
        let client = HttpExtractionClient::with_base_url("http://example.com");
        assert_eq!(client.endpoint(), "http://example.com/api/process-text/");
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let client = HttpExtractionClient::with_base_url("http://example.com/");
        assert_eq!(client.endpoint(), "http://example.com/api/process-text/");
    }

    #[test]
    fn default_client_uses_default_url() {
        let client = HttpExtractionClient::new();
        assert!(client.endpoint().starts_with(DEFAULT_API_URL));
    }

    #[test]
    fn request_serializes_text_and_timezone() {
        let body = ProcessTextRequest {
            text: "Lunch at noon",
            timezone: "Asia/Seoul",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["text"], "Lunch at noon");
        assert_eq!(json["timezone"], "Asia/Seoul");
    }

    #[test]
    fn extract_candidates_from_envelope() {
        let response: ProcessTextResponse = serde_json::from_str(
            r#"{"extracted_info": {"plans": [{"title": "Lunch"}]}}"#,
        )
        .unwrap();

        let candidates = HttpExtractionClient::extract_candidates(response).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title.as_deref(), Some("Lunch"));
    }

    #[test]
    fn missing_envelope_yields_none() {
        let response: ProcessTextResponse = serde_json::from_str("{}").unwrap();
        assert!(HttpExtractionClient::extract_candidates(response).is_none());
    }

    #[test]
    fn missing_plan_list_is_empty() {
        let response: ProcessTextResponse =
            serde_json::from_str(r#"{"extracted_info": {}}"#).unwrap();
        let candidates = HttpExtractionClient::extract_candidates(response).unwrap();
        assert!(candidates.is_empty());
    }
}
