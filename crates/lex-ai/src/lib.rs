//! # lex-ai
//!
//! Clause drafting and agreement risk analysis backed by Google's Gemini
//! models.
//!
//! Neither operation fails from the caller's point of view: transport, API,
//! and parse failures are logged and replaced by fixed fallback text.

pub mod classify;
pub mod gemini;
pub mod prompts;

mod error;
mod http;

pub use error::AiError;
pub use gemini::GeminiClient;

use async_trait::async_trait;
use lex_core::enums::RiskLevel;
use serde::{Deserialize, Serialize};

/// Returned by drafting when the model could not be reached.
pub const DRAFT_UNAVAILABLE: &str = "AI drafting unavailable. Please check your connection or API key.";
/// Returned by drafting when the model answered with no text.
pub const DRAFT_EMPTY: &str = "Drafting failed. Please try again.";
/// Reason given when risk analysis could not be performed.
pub const RISK_UNAVAILABLE: &str = "AI analysis unavailable.";
/// Reason given when the model returned no text to classify.
pub const RISK_DEFAULT_REASON: &str = "Standard agreement structure.";

/// The agreement a clause is being drafted for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementContext {
    pub title: String,
    pub counterparty: String,
    /// Agreement type, e.g. "NDA" or "SaaS".
    pub kind: String,
}

/// Outcome of a risk analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub reason: String,
}

/// Drafting and risk-analysis service.
#[async_trait]
pub trait DraftingService: Send + Sync {
    /// Draft the body of `clause_title`. Degrades to [`DRAFT_UNAVAILABLE`]
    /// or [`DRAFT_EMPTY`] instead of failing.
    async fn draft_clause(&self, clause_title: &str, context: &AgreementContext) -> String;

    /// Rate `agreement_text`. Degrades to Medium with [`RISK_UNAVAILABLE`]
    /// instead of failing.
    async fn analyze_risk(&self, agreement_text: &str) -> RiskAssessment;
}
