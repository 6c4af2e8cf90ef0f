//! Urban Dictionary slang lookup with optional OpenAI explanations.
//!
//! [`translate::translate`] is the entry point: it validates an English term,
//! fetches and ranks its definitions, optionally asks a chat model to explain
//! them in the target language, and delivers one [`translate::Outcome`].

pub mod config;
pub mod error;
pub mod http;
pub mod i18n;
pub mod markdown;
pub mod openai;
pub mod retry;
pub mod security;
pub mod server;
pub mod translate;
pub mod urban;
pub mod validation;
