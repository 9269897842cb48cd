pub mod prompts;

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use ghoomo_core::{
    fallback_analysis, score_responses, ChatContext, PersonaAnalysis, QuizCatalog, ScoreError,
};
use ghoomo_llm::{extract_structured, TextGenerator};
use ghoomo_observability::AppMetrics;
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

/// Response text returned when the primary chatbot call itself fails.
pub const CHAT_FALLBACK_RESPONSE: &str =
    "I'm having trouble processing your request right now. Please try again later.";

/// Suggestions returned alongside [`CHAT_FALLBACK_RESPONSE`].
pub const CHAT_FALLBACK_SUGGESTIONS: [&str; 3] = [
    "What are popular destinations in India?",
    "How can I plan a budget trip?",
    "What should I pack for my trip?",
];

/// Suggestions substituted when only the follow-up call fails or returns
/// something unusable. Distinct wording from [`CHAT_FALLBACK_SUGGESTIONS`].
pub const SUGGESTION_FALLBACKS: [&str; 3] = [
    "What are the best times to visit?",
    "How's the local transportation?",
    "Any safety tips I should know?",
];

fn fixed_list(items: [&str; 3]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// Scores quiz responses locally, then lets the external model override the
/// result when it produces a well-formed analysis. Only empty input is a
/// hard error; every external failure degrades to the deterministic result.
#[derive(Clone)]
pub struct QuizAgent {
    catalog: Arc<QuizCatalog>,
    generator: Arc<dyn TextGenerator>,
    metrics: Arc<AppMetrics>,
}

impl QuizAgent {
    pub fn new(
        catalog: Arc<QuizCatalog>,
        generator: Arc<dyn TextGenerator>,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        Self {
            catalog,
            generator,
            metrics,
        }
    }

    pub fn catalog(&self) -> &QuizCatalog {
        &self.catalog
    }

    #[instrument(skip(self, responses))]
    pub async fn analyze(&self, responses: &Map<String, Value>) -> Result<PersonaAnalysis, ScoreError> {
        let started = Instant::now();
        self.metrics.inc_request();

        // InvalidInput rejects here, before any external call.
        let breakdown = score_responses(&self.catalog, responses)?;

        let analysis = match self.model_analysis(responses).await {
            Ok(analysis) => analysis,
            Err(err) => {
                self.metrics.inc_model_failure();
                self.metrics.inc_fallback();
                warn!(error = %format!("{err:#}"), "model analysis unusable, using local scoring");
                fallback_analysis(&breakdown)
            }
        };

        self.metrics.observe_latency(started.elapsed());
        info!(
            primary = %analysis.primary_persona,
            budget = %analysis.budget_sensitivity.as_code(),
            pace = %analysis.travel_pace.as_code(),
            "quiz responses analyzed"
        );

        Ok(analysis)
    }

    async fn model_analysis(&self, responses: &Map<String, Value>) -> Result<PersonaAnalysis> {
        self.metrics.inc_model_call();

        let prompt = prompts::quiz_analysis_prompt(responses);
        let reply = self
            .generator
            .generate(&prompt)
            .await
            .context("quiz analysis call failed")?;

        let value = extract_structured(&reply).context("quiz analysis reply is not JSON")?;
        let analysis = serde_json::from_value(value)
            .context("quiz analysis reply does not match the expected shape")?;
        Ok(analysis)
    }
}

#[derive(Debug, Clone)]
pub struct ChatReply {
    pub success: bool,
    pub response: String,
    pub suggestions: Vec<String>,
}

/// Stateless gateway to the conversational model: one call for the answer,
/// one for follow-up suggestions, fixed fallbacks for each. Every request is
/// independent; no conversation state is kept.
#[derive(Clone)]
pub struct ChatbotAgent {
    generator: Arc<dyn TextGenerator>,
    metrics: Arc<AppMetrics>,
}

impl ChatbotAgent {
    pub fn new(generator: Arc<dyn TextGenerator>, metrics: Arc<AppMetrics>) -> Self {
        Self { generator, metrics }
    }

    #[instrument(skip(self, query, context))]
    pub async fn ask(&self, query: &str, context: Option<&ChatContext>) -> ChatReply {
        let started = Instant::now();
        self.metrics.inc_request();

        let prompt = prompts::chatbot_prompt(query, context);
        self.metrics.inc_model_call();
        let response = match self.generator.generate(&prompt).await {
            Ok(text) => text,
            Err(err) => {
                self.metrics.inc_model_failure();
                self.metrics.inc_fallback();
                warn!(error = %err, "chatbot primary call failed, returning fixed fallback");
                return ChatReply {
                    success: false,
                    response: CHAT_FALLBACK_RESPONSE.to_string(),
                    suggestions: fixed_list(CHAT_FALLBACK_SUGGESTIONS),
                };
            }
        };

        let suggestions = self.follow_up_suggestions(query).await;

        self.metrics.observe_latency(started.elapsed());
        info!(suggestions = suggestions.len(), "chatbot query answered");

        ChatReply {
            success: true,
            response,
            suggestions,
        }
    }

    async fn follow_up_suggestions(&self, query: &str) -> Vec<String> {
        self.metrics.inc_model_call();
        match self.request_follow_ups(query).await {
            Ok(suggestions) => suggestions,
            Err(err) => {
                self.metrics.inc_model_failure();
                self.metrics.inc_fallback();
                warn!(error = %format!("{err:#}"), "follow-up suggestions unusable, using fixed list");
                fixed_list(SUGGESTION_FALLBACKS)
            }
        }
    }

    async fn request_follow_ups(&self, query: &str) -> Result<Vec<String>> {
        let reply = self
            .generator
            .generate(&prompts::follow_up_prompt(query))
            .await
            .context("follow-up call failed")?;

        let value = extract_structured(&reply).context("follow-up reply is not JSON")?;
        let suggestions: Vec<String> =
            serde_json::from_value(value).context("follow-up reply is not a string array")?;
        anyhow::ensure!(
            suggestions.len() == 3,
            "expected exactly 3 suggestions, got {}",
            suggestions.len()
        );
        Ok(suggestions)
    }
}
