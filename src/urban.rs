//! Urban Dictionary lookup and definition ranking.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use crate::config::{Config, MAX_DEFINITIONS};
use crate::error::LookupError;
use crate::http::{self, HttpStatusError};
use crate::retry::{retry_if, RetryPolicy};

/// One community definition as returned by the lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(rename = "definition")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub example: String,
    #[serde(rename = "thumbs_up", default, deserialize_with = "null_as_default")]
    pub upvotes: u64,
    #[serde(rename = "thumbs_down", default, deserialize_with = "null_as_default")]
    pub downvotes: u64,
}

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct DefineResponse {
    #[serde(default)]
    list: Vec<Definition>,
}

/// Fetch definitions for `term` and return the best ones, most upvoted first.
pub async fn lookup(
    client: &reqwest::Client,
    config: &Config,
    term: &str,
) -> Result<Vec<Definition>, LookupError> {
    let definitions = fetch_definitions(client, config, term).await?;
    let total = definitions.len();

    let ranked = rank_definitions(definitions, config.max_definitions);
    info!("Found {} definitions for {:?}, keeping {}", total, term, ranked.len());

    Ok(ranked)
}

/// Query the lookup service. Zero results is `NotFound`; any HTTP or decoding
/// failure is `Network` with the error chain as detail.
pub async fn fetch_definitions(
    client: &reqwest::Client,
    config: &Config,
    term: &str,
) -> Result<Vec<Definition>, LookupError> {
    let definitions = retry_if(
        &RetryPolicy::from_config(config),
        &format!("Urban Dictionary lookup {:?}", term),
        || request_definitions(client, config, term),
        http::is_retryable,
    )
    .await
    .map_err(|e| LookupError::Network(format!("{:#}", e)))?;

    if definitions.is_empty() {
        return Err(LookupError::NotFound);
    }

    Ok(definitions)
}

async fn request_definitions(
    client: &reqwest::Client,
    config: &Config,
    term: &str,
) -> Result<Vec<Definition>> {
    debug!("GET {} term={:?}", config.urban_api_url, term);

    let response = client
        .get(&config.urban_api_url)
        .query(&[("term", term)])
        .header(reqwest::header::USER_AGENT, &config.lookup_user_agent)
        .send()
        .await
        .context("Failed to send request to Urban Dictionary")?;

    if !response.status().is_success() {
        return Err(HttpStatusError::from_response(response).await.into());
    }

    let body: DefineResponse = response
        .json()
        .await
        .context("Failed to parse Urban Dictionary response")?;

    Ok(body.list)
}

/// Stable sort by upvotes (descending) and keep at most `limit`, never more than 3.
pub fn rank_definitions(mut definitions: Vec<Definition>, limit: usize) -> Vec<Definition> {
    definitions.sort_by(|a, b| b.upvotes.cmp(&a.upvotes));
    definitions.truncate(limit.min(MAX_DEFINITIONS));
    definitions
}

/// Remove `[`/`]` cross-reference markers, normalize CRLF, trim.
pub fn clean_text(raw: &str) -> String {
    raw.replace(['[', ']'], "").replace("\r\n", "\n").trim().to_string()
}

impl Definition {
    pub fn cleaned_text(&self) -> String {
        clean_text(&self.text)
    }

    pub fn cleaned_example(&self) -> String {
        clean_text(&self.example)
    }
}
