//! Lookup binary - runs one query through the pipeline and prints the result
//!
//! Usage:
//!   cargo run --bin lookup -- <term> [target-language]
//!   cargo run --bin lookup -- "no cap" ja
//!
//! Optional environment variables:
//! - OPENAI_API_KEY (enables the explanation section)
//! - OPENAI_MODEL (defaults to gpt-4o-mini)
//! - MAX_DEFINITIONS (defaults to 3)

use anyhow::{bail, Result};
use slang_explainer::{
    config::Config,
    http::build_client,
    i18n::{supported_languages, AUTO_CODE},
    translate::{translate, Outcome, Query},
};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("slang_explainer=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(term) = args.next() else {
        bail!(
            "Usage: lookup <term> [target-language]\nTarget languages: {}",
            supported_languages().join(", ")
        );
    };
    let target = args.next().unwrap_or_else(|| AUTO_CODE.to_string());

    let config = Config::from_env()?;
    let client = build_client(&config)?;
    let query = Query::new(term, AUTO_CODE, target);

    let mut delivered = None;
    translate(&client, &config, &query, |outcome| delivered = Some(outcome)).await;

    match delivered {
        Some(Outcome::Result(result)) => {
            for paragraph in &result.from_paragraphs {
                println!("{}\n", paragraph);
            }
            for paragraph in &result.to_paragraphs {
                println!("{}\n", paragraph);
            }
            Ok(())
        }
        Some(Outcome::Error(error)) => {
            eprintln!("{}", error.message);
            if let Some(addition) = error.addition {
                eprintln!("{}", addition);
            }
            std::process::exit(1);
        }
        None => bail!("Lookup finished without an outcome"),
    }
}
