use anyhow::{Context, Result};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_URBAN_API_URL: &str = "https://api.urbandictionary.com/v0/define";

/// Urban Dictionary rejects requests carrying reqwest's default identifier.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/94.0.4606.81 Safari/537.36";

/// Hard upper bound on how many definitions end up in a result.
pub const MAX_DEFINITIONS: usize = 3;

#[derive(Debug, Clone)]
pub struct Config {
    // OpenAI (enrichment is disabled when no key is set)
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_api_url: String,
    pub openai_temperature: f32,
    pub openai_max_tokens: u32,

    // Urban Dictionary
    pub urban_api_url: String,
    pub lookup_user_agent: String,
    pub max_definitions: usize,

    // HTTP
    pub http_timeout_secs: u64,
    pub http_max_attempts: u32,

    // Server
    pub api_key: Option<String>,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            openai_api_url: DEFAULT_OPENAI_API_URL.to_string(),
            openai_temperature: 0.7,
            openai_max_tokens: 1024,
            urban_api_url: DEFAULT_URBAN_API_URL.to_string(),
            lookup_user_agent: DEFAULT_USER_AGENT.to_string(),
            max_definitions: MAX_DEFINITIONS,
            http_timeout_secs: 15,
            http_max_attempts: 3,
            api_key: None,
            port: 8080,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            // OpenAI
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            openai_model: non_empty_var("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            openai_api_url: non_empty_var("OPENAI_API_URL").unwrap_or(defaults.openai_api_url),
            openai_temperature: parsed_var("OPENAI_TEMPERATURE")?
                .unwrap_or(defaults.openai_temperature),
            openai_max_tokens: parsed_var("OPENAI_MAX_TOKENS")?
                .unwrap_or(defaults.openai_max_tokens),

            // Urban Dictionary
            urban_api_url: non_empty_var("URBAN_DICTIONARY_API_URL")
                .unwrap_or(defaults.urban_api_url),
            lookup_user_agent: non_empty_var("LOOKUP_USER_AGENT")
                .unwrap_or(defaults.lookup_user_agent),
            max_definitions: parsed_var::<usize>("MAX_DEFINITIONS")?
                .unwrap_or(defaults.max_definitions)
                .clamp(1, MAX_DEFINITIONS),

            // HTTP
            http_timeout_secs: parsed_var("HTTP_TIMEOUT_SECS")?
                .unwrap_or(defaults.http_timeout_secs),
            http_max_attempts: parsed_var::<u32>("HTTP_MAX_ATTEMPTS")?
                .unwrap_or(defaults.http_max_attempts)
                .max(1),

            // Server
            api_key: non_empty_var("API_KEY"),
            port: parsed_var("PORT")?.unwrap_or(defaults.port),
        })
    }

    /// Whether the OpenAI explanation step should run at all.
    pub fn enrichment_enabled(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parsed_var<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    non_empty_var(name)
        .map(|v| v.parse::<T>().with_context(|| format!("{} has invalid value '{}'", name, v)))
        .transpose()
}
