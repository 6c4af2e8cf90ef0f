use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::LookupError;
use crate::http::{self, HttpStatusError};
use crate::i18n::Language;
use crate::markdown::strip_markdown;
use crate::retry::{retry_if, RetryPolicy};
use crate::urban::Definition;

pub const ERROR_PREFIX: &str = "OpenAI API Error: ";

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

fn build_system_prompt(language: Language) -> String {
    format!(
        "You are a helpful assistant that explains slang terms and informal expressions. \
         Analyze the provided Urban Dictionary definitions and give a clear explanation in {}. \
         Include cultural context, common usage, and appropriateness level.",
        language.name()
    )
}

/// Definitions rendered for the prompt, bracket markers stripped.
fn format_definitions(definitions: &[Definition]) -> String {
    definitions
        .iter()
        .enumerate()
        .map(|(i, d)| {
            format!(
                "Definition {}: {}\nExample: {}",
                i + 1,
                d.text.replace(['[', ']'], ""),
                d.example.replace(['[', ']'], "")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn build_user_prompt(term: &str, definitions: &[Definition], language: Language) -> String {
    format!(
        "I need an explanation of the slang term \"{}\" in {}. Here are the top definitions from Urban Dictionary:\n\n{}",
        term,
        language.native_name(),
        format_definitions(definitions)
    )
}

fn build_request(
    config: &Config,
    term: &str,
    definitions: &[Definition],
    language: Language,
) -> ChatRequest {
    ChatRequest {
        model: config.openai_model.clone(),
        messages: vec![
            Message {
                role: "system".to_string(),
                content: build_system_prompt(language),
            },
            Message {
                role: "user".to_string(),
                content: build_user_prompt(term, definitions, language),
            },
        ],
        temperature: config.openai_temperature,
        max_tokens: config.openai_max_tokens,
    }
}

/// Ask the chat model to explain `term` in the target language.
///
/// Returns plain text (Markdown stripped) ending in a newline. Failures are
/// `Enrichment` errors; apart from a missing API key, their message starts
/// with `OpenAI API Error: `.
pub async fn explain_slang(
    client: &reqwest::Client,
    config: &Config,
    definitions: &[Definition],
    term: &str,
    target_language: &str,
) -> Result<String, LookupError> {
    let api_key = config.openai_api_key.as_deref().ok_or_else(|| {
        LookupError::Enrichment(
            "OpenAI API Key is not set. Please add your API key in the plugin settings."
                .to_string(),
        )
    })?;

    let language = Language::resolve(target_language);
    let request = build_request(config, term, definitions, language);

    info!(
        "Requesting {} explanation of {:?} from {}",
        language.name(),
        term,
        config.openai_model
    );

    let content = retry_if(
        &RetryPolicy::from_config(config),
        "OpenAI explanation",
        || request_completion(client, config, api_key, &request),
        http::is_retryable,
    )
    .await
    .map_err(|e| LookupError::Enrichment(format!("{}{}", ERROR_PREFIX, http::describe_error(&e))))?;

    let mut explanation = strip_markdown(content.trim());
    if !explanation.is_empty() && !explanation.ends_with('\n') {
        explanation.push('\n');
    }

    Ok(explanation)
}

async fn request_completion(
    client: &reqwest::Client,
    config: &Config,
    api_key: &str,
    request: &ChatRequest,
) -> Result<String> {
    debug!("POST {} model={}", config.openai_api_url, request.model);

    let response = client
        .post(&config.openai_api_url)
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Content-Type", "application/json")
        .json(request)
        .send()
        .await
        .context("Failed to send request to OpenAI API")?;

    if !response.status().is_success() {
        return Err(HttpStatusError::from_response(response).await.into());
    }

    let chat_response: ChatResponse = response
        .json()
        .await
        .context("Failed to parse OpenAI response")?;

    chat_response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .context("Failed to get a response from OpenAI API")
}
