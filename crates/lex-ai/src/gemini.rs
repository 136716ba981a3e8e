//! Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use lex_config::GeminiConfig;
use lex_core::enums::RiskLevel;
use serde::{Deserialize, Serialize};

use crate::classify::classify;
use crate::error::AiError;
use crate::http::check_response;
use crate::prompts::{draft_prompt, risk_prompt};
use crate::{
    AgreementContext, DRAFT_EMPTY, DRAFT_UNAVAILABLE, DraftingService, RISK_UNAVAILABLE,
    RiskAssessment,
};

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, parts joined. `None` when the model
    /// produced nothing (e.g. the prompt was blocked).
    fn text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        Some(text).filter(|text| !text.is_empty())
    }
}

/// HTTP client for one Gemini model.
pub struct GeminiClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    company_name: String,
    risk_excerpt_chars: usize,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns [`AiError::Http`] if the underlying `reqwest::Client` fails
    /// to build.
    pub fn new(config: &GeminiConfig, timeout: Duration) -> Result<Self, AiError> {
        Ok(Self {
            http: reqwest::Client::builder()
                .user_agent(concat!("lexcorp/", env!("CARGO_PKG_VERSION")))
                .timeout(timeout)
                .build()?,
            url: config.generate_url(),
            api_key: config.api_key.clone(),
            company_name: config.company_name.clone(),
            risk_excerpt_chars: config.risk_excerpt_chars,
        })
    }

    /// Send `prompt`, returning the model's text (if any).
    ///
    /// # Errors
    ///
    /// Returns [`AiError`] if the request fails, the API answers with a
    /// non-success status, or the body cannot be parsed.
    pub async fn generate(&self, prompt: &str) -> Result<Option<String>, AiError> {
        let request = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };
        let resp = self
            .http
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;
        let body: GenerateResponse = check_response(resp)
            .await?
            .json()
            .await
            .map_err(|e| AiError::Parse(e.to_string()))?;
        Ok(body.text())
    }
}

#[async_trait]
impl DraftingService for GeminiClient {
    async fn draft_clause(&self, clause_title: &str, context: &AgreementContext) -> String {
        let prompt = draft_prompt(clause_title, context, &self.company_name);
        draft_outcome(self.generate(&prompt).await)
    }

    async fn analyze_risk(&self, agreement_text: &str) -> RiskAssessment {
        let prompt = risk_prompt(agreement_text, self.risk_excerpt_chars);
        risk_outcome(self.generate(&prompt).await)
    }
}

fn draft_outcome(result: Result<Option<String>, AiError>) -> String {
    match result {
        Ok(Some(text)) => text,
        Ok(None) => DRAFT_EMPTY.to_string(),
        Err(error) => {
            tracing::error!(%error, "clause drafting failed");
            DRAFT_UNAVAILABLE.to_string()
        }
    }
}

fn risk_outcome(result: Result<Option<String>, AiError>) -> RiskAssessment {
    match result {
        Ok(text) => classify(text.as_deref()),
        Err(error) => {
            tracing::error!(%error, "risk analysis failed");
            RiskAssessment {
                level: RiskLevel::Medium,
                reason: RISK_UNAVAILABLE.to_string(),
            }
        }
    }
}
