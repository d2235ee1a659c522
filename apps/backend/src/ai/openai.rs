//! OpenAI-compatible client implementing all three collaborator traits.
//!
//! Transient failures (429, 5xx, transport errors, timeouts) are retried with
//! exponential backoff up to the configured bound; anything else surfaces
//! immediately. No partial output is ever returned.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ai::config::AiConfig;
use crate::ai::prompts;
use crate::ai::trait_def::{
    Adjudicator, AiError, ArgumentGenerator, CaseBrief, Transcriber,
};
use crate::domain::transcript::{ArgumentContext, StageBundle};
use crate::domain::verdict::{
    AdjudicationOutcome, CategoryScores, SideScores, StageAnalysis,
};
use crate::domain::{Side, Stage};

const INITIAL_BACKOFF_MS: u64 = 500;
const MAX_BACKOFF_MS: u64 = 30_000;

#[derive(Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    config: AiConfig,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    type_: &'static str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

impl OpenAiClient {
    pub fn new(config: AiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_default();
        Self { client, config }
    }

    /// Retry `operation` on transient failures with exponential backoff.
    async fn with_retry<T, F, Fut>(&self, operation: F, operation_name: &str) -> Result<T, AiError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, AiError>>,
    {
        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(err) if retries < self.config.max_retries && is_transient(&err) => {
                    warn!(
                        "{operation_name} failed transiently ({err}), retrying in {backoff_ms}ms \
                         (attempt {}/{})",
                        retries + 1,
                        self.config.max_retries
                    );
                    tokio::time::sleep(std::time::Duration::from_millis(backoff_ms)).await;
                    retries += 1;
                    backoff_ms = (backoff_ms * 2).min(MAX_BACKOFF_MS);
                }
                Err(err) => {
                    if retries > 0 {
                        warn!("{operation_name} failed after {retries} retries: {err}");
                    }
                    return Err(err);
                }
            }
        }
    }

    async fn chat(
        &self,
        system: &str,
        user: &str,
        json_mode: bool,
        temperature: f32,
        max_tokens: Option<u32>,
    ) -> Result<String, AiError> {
        let request = ChatRequest {
            model: &self.config.chat_model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature,
            max_tokens,
            response_format: json_mode.then_some(ResponseFormat {
                type_: "json_object",
            }),
        };

        let url = format!("{}/chat/completions", self.config.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_err)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AiError::Upstream {
                status: Some(status.as_u16()),
                message,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AiError::InvalidResponse(format!("chat response decode: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| AiError::InvalidResponse("chat response had no content".to_string()))
    }
}

fn map_transport_err(e: reqwest::Error) -> AiError {
    if e.is_timeout() {
        AiError::Timeout
    } else {
        AiError::Upstream {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

fn is_transient(err: &AiError) -> bool {
    match err {
        AiError::Timeout => true,
        AiError::Upstream { status, .. } => match status {
            Some(code) => {
                *code == StatusCode::TOO_MANY_REQUESTS.as_u16() || *code >= 500
            }
            // Transport-level failure without a status (connection reset etc.)
            None => true,
        },
        AiError::InvalidResponse(_) | AiError::Internal(_) => false,
    }
}

// ----- untrusted verdict JSON -----

#[derive(Deserialize, Default)]
struct RawCategory {
    legal_accuracy: Option<i64>,
    evidence_strength: Option<i64>,
    persuasion: Option<i64>,
}

#[derive(Deserialize, Default)]
struct RawScores {
    plaintiff: Option<RawCategory>,
    defendant: Option<RawCategory>,
}

#[derive(Deserialize, Default)]
struct RawStageAnalysis {
    opening_statements: Option<String>,
    plaintiff_case: Option<String>,
    cross_examination: Option<String>,
    defendant_case: Option<String>,
    closing_submissions: Option<String>,
}

#[derive(Deserialize)]
struct RawOutcome {
    winner: Option<String>,
    reasoning: Option<String>,
    stage_analysis: Option<RawStageAnalysis>,
    citations: Option<Vec<String>>,
    scores: Option<RawScores>,
}

fn clamp_score(raw: Option<i64>) -> u8 {
    raw.unwrap_or(0).clamp(0, 100) as u8
}

fn category(raw: Option<RawCategory>) -> CategoryScores {
    let raw = raw.unwrap_or_default();
    CategoryScores::new(
        clamp_score(raw.legal_accuracy),
        clamp_score(raw.evidence_strength),
        clamp_score(raw.persuasion),
    )
}

fn winner_side(raw: Option<&str>) -> Option<Side> {
    let lowered = raw?.to_ascii_lowercase();
    if lowered.contains("plaintiff") {
        Some(Side::Plaintiff)
    } else if lowered.contains("defendant") {
        Some(Side::Defendant)
    } else {
        // "draw", "indeterminate", or anything unexpected: no outright winner.
        None
    }
}

/// Parse the adjudicator's JSON into a normalized outcome.
fn parse_outcome(text: &str) -> Result<AdjudicationOutcome, AiError> {
    let raw: RawOutcome = serde_json::from_str(text)
        .map_err(|e| AiError::InvalidResponse(format!("verdict JSON decode: {e}")))?;

    let analysis = raw.stage_analysis.unwrap_or_default();
    let scores = raw.scores.unwrap_or_default();

    Ok(AdjudicationOutcome {
        winner: winner_side(raw.winner.as_deref()),
        reasoning: raw.reasoning.unwrap_or_default(),
        stage_analysis: StageAnalysis {
            opening_statements: analysis.opening_statements.unwrap_or_default(),
            plaintiff_case: analysis.plaintiff_case.unwrap_or_default(),
            cross_examination: analysis.cross_examination.unwrap_or_default(),
            defendant_case: analysis.defendant_case.unwrap_or_default(),
            closing_submissions: analysis.closing_submissions.unwrap_or_default(),
        },
        citations: raw.citations.unwrap_or_default(),
        scores: SideScores {
            plaintiff: category(scores.plaintiff),
            defendant: category(scores.defendant),
        },
    }
    .normalized())
}

#[async_trait]
impl ArgumentGenerator for OpenAiClient {
    async fn generate_argument(
        &self,
        brief: &CaseBrief,
        ctx: &ArgumentContext,
        stage: Stage,
        side: Side,
    ) -> Result<String, AiError> {
        let system = prompts::argument_system_prompt(brief, side);
        let user = prompts::render_argument_prompt(brief, ctx, stage, side);

        debug!(stage = %stage, side = %side, "requesting generated argument");
        self.with_retry(
            || self.chat(&system, &user, false, 0.7, Some(800)),
            "generate_argument",
        )
        .await
    }
}

#[async_trait]
impl Adjudicator for OpenAiClient {
    async fn adjudicate(
        &self,
        brief: &CaseBrief,
        bundle: &[StageBundle; 5],
    ) -> Result<AdjudicationOutcome, AiError> {
        let user = prompts::render_adjudication_prompt(brief, bundle);

        debug!("requesting adjudication");
        let text = self
            .with_retry(
                || self.chat(prompts::ADJUDICATION_SYSTEM_PROMPT, &user, true, 0.3, None),
                "adjudicate",
            )
            .await?;

        parse_outcome(&text)
    }
}

#[async_trait]
impl Transcriber for OpenAiClient {
    async fn transcribe(&self, audio_url: &str) -> Result<String, AiError> {
        self.with_retry(
            || async {
                // Fetch the audio bytes, then hand them to the transcription
                // endpoint as a multipart upload.
                let audio = self
                    .client
                    .get(audio_url)
                    .send()
                    .await
                    .map_err(map_transport_err)?;
                if !audio.status().is_success() {
                    return Err(AiError::Upstream {
                        status: Some(audio.status().as_u16()),
                        message: format!("audio fetch failed for {audio_url}"),
                    });
                }
                let bytes = audio.bytes().await.map_err(map_transport_err)?;

                let part = reqwest::multipart::Part::bytes(bytes.to_vec())
                    .file_name("audio.webm")
                    .mime_str("audio/webm")
                    .map_err(|e| AiError::Internal(e.to_string()))?;
                let form = reqwest::multipart::Form::new()
                    .part("file", part)
                    .text("model", self.config.transcription_model.clone())
                    .text("response_format", "text")
                    .text("language", "en");

                let url = format!("{}/audio/transcriptions", self.config.base_url);
                let response = self
                    .client
                    .post(&url)
                    .bearer_auth(&self.config.api_key)
                    .multipart(form)
                    .send()
                    .await
                    .map_err(map_transport_err)?;

                let status = response.status();
                if !status.is_success() {
                    let message = response.text().await.unwrap_or_default();
                    return Err(AiError::Upstream {
                        status: Some(status.as_u16()),
                        message,
                    });
                }

                response.text().await.map_err(map_transport_err)
            },
            "transcribe",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_outcome_normalizes_winner_and_scores() {
        let text = r#"{
            "winner": "Plaintiff",
            "reasoning": "Stronger evidence.",
            "stage_analysis": { "opening_statements": "even" },
            "citations": ["Rule 12"],
            "scores": {
                "plaintiff": { "legal_accuracy": 120, "evidence_strength": 80, "persuasion": -5 },
                "defendant": { "legal_accuracy": 60, "evidence_strength": 55, "persuasion": 70 }
            }
        }"#;

        let outcome = parse_outcome(text).unwrap();
        assert_eq!(outcome.winner, Some(Side::Plaintiff));
        assert_eq!(outcome.scores.plaintiff.legal_accuracy, 100);
        assert_eq!(outcome.scores.plaintiff.persuasion, 0);
        assert_eq!(outcome.citations, vec!["Rule 12".to_string()]);
    }

    #[test]
    fn parse_outcome_treats_draw_as_no_winner() {
        let outcome = parse_outcome(r#"{"winner": "draw"}"#).unwrap();
        assert_eq!(outcome.winner, None);
    }

    #[test]
    fn parse_outcome_rejects_non_json() {
        assert!(matches!(
            parse_outcome("the plaintiff wins"),
            Err(AiError::InvalidResponse(_))
        ));
    }

    #[test]
    fn rate_limit_and_server_errors_are_transient() {
        assert!(is_transient(&AiError::Timeout));
        assert!(is_transient(&AiError::Upstream {
            status: Some(429),
            message: String::new()
        }));
        assert!(is_transient(&AiError::Upstream {
            status: Some(503),
            message: String::new()
        }));
        assert!(!is_transient(&AiError::Upstream {
            status: Some(400),
            message: String::new()
        }));
        assert!(!is_transient(&AiError::InvalidResponse(String::new())));
    }
}
