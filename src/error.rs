//! Error taxonomy shared by the lookup pipeline and its host surfaces.
//!
//! [`LookupError`] is what the pipeline stages return. The host never sees it
//! directly: it is rendered into an [`ErrorOutcome`] carrying a short message
//! and an `addition` hint telling the user what to do about it.

use serde::{Deserialize, Serialize};

/// Pipeline failure, one variant per outcome the host can distinguish.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// Nothing to look up.
    #[error("Translation source is empty.")]
    EmptyInput,

    /// Input contains characters outside the English character set.
    #[error("Urban Dictionary only supports English input.")]
    UnsupportedLanguage,

    /// The lookup service returned zero definitions.
    #[error("No definitions found")]
    NotFound,

    /// Transport or HTTP failure while talking to the lookup service.
    #[error("Network error: {0}")]
    Network(String),

    /// OpenAI explanation failed or is not configured.
    #[error("{0}")]
    Enrichment(String),
}

/// Wire name of an error, as the host expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    Param,
    UnsupportedLanguage,
    NotFound,
    Network,
    Enrichment,
}

/// Error payload delivered to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorOutcome {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addition: Option<String>,
}

impl LookupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::EmptyInput => ErrorKind::Param,
            LookupError::UnsupportedLanguage => ErrorKind::UnsupportedLanguage,
            LookupError::NotFound => ErrorKind::NotFound,
            LookupError::Network(_) => ErrorKind::Network,
            LookupError::Enrichment(_) => ErrorKind::Enrichment,
        }
    }

    pub fn to_outcome(&self) -> ErrorOutcome {
        let (message, addition) = match self {
            LookupError::EmptyInput => (
                self.to_string(),
                "Required parameter source is empty.".to_string(),
            ),
            LookupError::UnsupportedLanguage => (
                self.to_string(),
                "Please enter an English word or phrase.".to_string(),
            ),
            LookupError::NotFound => (
                self.to_string(),
                "Urban Dictionary doesn't have a definition for this term.".to_string(),
            ),
            LookupError::Network(detail) => ("Network error".to_string(), detail.clone()),
            LookupError::Enrichment(message) => (
                message.clone(),
                "Check the OpenAI API key and model in the settings.".to_string(),
            ),
        };

        ErrorOutcome {
            kind: self.kind(),
            message,
            addition: Some(addition),
        }
    }
}
