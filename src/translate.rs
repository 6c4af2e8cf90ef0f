//! Result assembly: the translate operation the host calls.
//!
//! Stages run strictly in order:
//!
//! ```text
//! validating -> fetching -> ranking -> (enriching | skip) -> done
//!      \____________\______________________________________-> error
//! ```
//!
//! Validation and lookup failures end the query with an error outcome. An
//! enrichment failure is rendered into the result instead, so the ranked
//! definitions are always delivered once the lookup succeeded.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{ErrorOutcome, LookupError};
use crate::openai;
use crate::urban::{self, Definition};
use crate::validation::validate_input;

pub const SECTION_SEPARATOR: &str = "\n=========================================\n";
pub const ANALYSIS_HEADER: &str = "🤖 GPT Analysis:";
pub const ANALYSIS_ERROR_HEADER: &str = "❌ GPT Analysis Error:";

/// Query as sent by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    #[serde(default, deserialize_with = "crate::urban::null_as_default")]
    pub text: String,
    #[serde(default = "default_detect")]
    pub detect_from: String,
    #[serde(default = "default_detect")]
    pub detect_to: String,
}

fn default_detect() -> String {
    "auto".to_string()
}

impl Query {
    pub fn new(text: impl Into<String>, detect_from: impl Into<String>, detect_to: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            detect_from: detect_from.into(),
            detect_to: detect_to.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub from: String,
    pub to: String,
    pub from_paragraphs: Vec<String>,
    pub to_paragraphs: Vec<String>,
}

/// Exactly one of these is delivered per query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Result(TranslationResult),
    Error(ErrorOutcome),
}

impl Outcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }
}

/// Run the pipeline and hand the outcome to `completion`, exactly once.
pub async fn translate<F>(client: &reqwest::Client, config: &Config, query: &Query, completion: F)
where
    F: FnOnce(Outcome),
{
    completion(run_pipeline(client, config, query).await);
}

pub async fn run_pipeline(client: &reqwest::Client, config: &Config, query: &Query) -> Outcome {
    match assemble(client, config, query).await {
        Ok(result) => Outcome::Result(result),
        Err(e) => {
            info!("Lookup for {:?} failed: {}", query.text, e);
            Outcome::Error(e.to_outcome())
        }
    }
}

async fn assemble(
    client: &reqwest::Client,
    config: &Config,
    query: &Query,
) -> Result<TranslationResult, LookupError> {
    let term = validate_input(&query.text)?;
    info!("Looking up {:?} (target: {})", term, query.detect_to);

    let definitions = urban::lookup(client, config, term).await?;

    let mut result = TranslationResult {
        from: query.detect_from.clone(),
        to: query.detect_to.clone(),
        from_paragraphs: vec![query.text.clone()],
        to_paragraphs: definitions
            .iter()
            .enumerate()
            .map(|(i, d)| format_definition(i + 1, d))
            .collect(),
    };

    if config.enrichment_enabled() {
        let explanation =
            openai::explain_slang(client, config, &definitions, term, &query.detect_to).await;
        append_enrichment(&mut result.to_paragraphs, explanation);
    }

    Ok(result)
}

/// `"1. <definition>\n\nExample: <example>\n\n(👍 up | 👎 down)"`
pub fn format_definition(index: usize, definition: &Definition) -> String {
    format!(
        "{}. {}\n\nExample: {}\n\n(👍 {} | 👎 {})",
        index,
        definition.cleaned_text(),
        definition.cleaned_example(),
        definition.upvotes,
        definition.downvotes
    )
}

/// Append the explanation section, or an error block if it failed.
/// Existing paragraphs are never touched.
pub fn append_enrichment(paragraphs: &mut Vec<String>, explanation: Result<String, LookupError>) {
    paragraphs.push(SECTION_SEPARATOR.to_string());

    match explanation {
        Ok(text) => {
            paragraphs.push(ANALYSIS_HEADER.to_string());
            paragraphs.extend(
                text.split("\n\n")
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string),
            );
        }
        Err(e) => {
            warn!("Explanation unavailable, returning definitions only: {}", e);
            paragraphs.push(ANALYSIS_ERROR_HEADER.to_string());
            paragraphs.push(e.to_string());
        }
    }
}
