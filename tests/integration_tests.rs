//! Integration tests for the slang explainer
//!
//! These drive the whole pipeline (and the HTTP host) against mocked
//! Urban Dictionary and OpenAI servers.

use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use slang_explainer::{
    config::Config,
    error::ErrorKind,
    server::{router, AppState, API_KEY_HEADER},
    translate::{
        run_pipeline, translate, Outcome, Query, TranslationResult, ANALYSIS_ERROR_HEADER,
        ANALYSIS_HEADER, SECTION_SEPARATOR,
    },
};

// ==================== Test Helpers ====================

fn create_test_config(urban_url: &str, openai_url: Option<&str>) -> Config {
    Config {
        urban_api_url: format!("{}/v0/define", urban_url),
        openai_api_key: openai_url.map(|_| "test-openai-key".to_string()),
        openai_api_url: openai_url
            .map(|u| format!("{}/v1/chat/completions", u))
            .unwrap_or_else(|| "http://127.0.0.1:1/unused".to_string()),
        http_max_attempts: 1,
        ..Config::default()
    }
}

fn create_define_response(entries: &[(&str, &str, u64, u64)]) -> serde_json::Value {
    let list: Vec<_> = entries
        .iter()
        .map(|(definition, example, up, down)| {
            serde_json::json!({
                "definition": definition,
                "example": example,
                "thumbs_up": up,
                "thumbs_down": down,
                "word": "rizz"
            })
        })
        .collect();
    serde_json::json!({ "list": list })
}

fn create_openai_response(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
        ]
    })
}

async fn mount_definitions(server: &MockServer, entries: &[(&str, &str, u64, u64)]) {
    Mock::given(method("GET"))
        .and(path("/v0/define"))
        .respond_with(ResponseTemplate::new(200).set_body_json(create_define_response(entries)))
        .mount(server)
        .await;
}

fn expect_result(outcome: Outcome) -> TranslationResult {
    match outcome {
        Outcome::Result(result) => result,
        Outcome::Error(e) => panic!("Expected result, got error {:?}", e),
    }
}

fn expect_error_kind(outcome: Outcome) -> ErrorKind {
    match outcome {
        Outcome::Error(e) => e.kind,
        Outcome::Result(r) => panic!("Expected error, got result {:?}", r),
    }
}

// ==================== Pipeline Tests ====================

#[tokio::test]
async fn test_definitions_only_without_api_key() {
    let urban = MockServer::start().await;
    mount_definitions(
        &urban,
        &[
            ("[Charm], when flirting", "He has [rizz]", 5, 1),
            ("Short for charisma", "W rizz", 20, 2),
            ("Game", "Rizz her up", 1, 0),
            ("Extra", "never shown", 0, 9),
        ],
    )
    .await;

    let client = reqwest::Client::new();
    let config = create_test_config(&urban.uri(), None);
    let result = expect_result(run_pipeline(&client, &config, &Query::new("rizz", "en", "ja")).await);

    assert_eq!(result.from, "en");
    assert_eq!(result.to, "ja");
    assert_eq!(result.from_paragraphs, vec!["rizz"]);
    assert_eq!(
        result.to_paragraphs,
        vec![
            "1. Short for charisma\n\nExample: W rizz\n\n(👍 20 | 👎 2)",
            "2. Charm, when flirting\n\nExample: He has rizz\n\n(👍 5 | 👎 1)",
            "3. Game\n\nExample: Rizz her up\n\n(👍 1 | 👎 0)",
        ]
    );
    assert!(!result.to_paragraphs.iter().any(|p| p.contains("GPT Analysis")));
}

#[tokio::test]
async fn test_source_paragraph_is_original_text() {
    let urban = MockServer::start().await;
    mount_definitions(&urban, &[("a greeting", "yo", 1, 0)]).await;

    let client = reqwest::Client::new();
    let config = create_test_config(&urban.uri(), None);
    let result = expect_result(run_pipeline(&client, &config, &Query::new("  yo ", "auto", "en")).await);

    assert_eq!(result.from_paragraphs, vec!["  yo "]);
    assert_eq!(result.to_paragraphs.len(), 1);
}

#[tokio::test]
async fn test_definitions_with_successful_explanation() {
    let urban = MockServer::start().await;
    let openai = MockServer::start().await;
    mount_definitions(&urban, &[("Charisma", "He has rizz", 10, 1)]).await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(create_openai_response(
            "# Rizz\n\n**Meaning:** charm.\n\n\n\n- Very casual\n- Mostly online",
        )))
        .expect(1)
        .mount(&openai)
        .await;

    let client = reqwest::Client::new();
    let config = create_test_config(&urban.uri(), Some(openai.uri().as_str()));
    let result = expect_result(run_pipeline(&client, &config, &Query::new("rizz", "auto", "fr")).await);

    assert_eq!(
        result.to_paragraphs,
        vec![
            "1. Charisma\n\nExample: He has rizz\n\n(👍 10 | 👎 1)",
            SECTION_SEPARATOR,
            ANALYSIS_HEADER,
            "Rizz",
            "Meaning: charm.",
            "• Very casual\n• Mostly online",
        ]
    );
}

#[tokio::test]
async fn test_explanation_failure_keeps_definitions() {
    let urban = MockServer::start().await;
    let openai = MockServer::start().await;
    mount_definitions(&urban, &[("one", "", 3, 0), ("two", "", 4, 0)]).await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": {"message": "You exceeded your current quota", "type": "insufficient_quota"}
        })))
        .mount(&openai)
        .await;

    let client = reqwest::Client::new();
    let config = create_test_config(&urban.uri(), Some(openai.uri().as_str()));
    let result = expect_result(run_pipeline(&client, &config, &Query::new("rizz", "auto", "en")).await);

    assert_eq!(result.to_paragraphs.len(), 5);
    assert!(result.to_paragraphs[0].starts_with("1. two"));
    assert!(result.to_paragraphs[1].starts_with("2. one"));
    assert_eq!(result.to_paragraphs[2], SECTION_SEPARATOR);
    assert_eq!(result.to_paragraphs[3], ANALYSIS_ERROR_HEADER);
    assert_eq!(
        result.to_paragraphs[4],
        "OpenAI API Error: You exceeded your current quota"
    );
}

#[tokio::test]
async fn test_explanation_unreachable_keeps_definitions() {
    let urban = MockServer::start().await;
    mount_definitions(&urban, &[("one", "", 3, 0)]).await;

    let client = reqwest::Client::new();
    let config = Config {
        openai_api_key: Some("test-openai-key".to_string()),
        openai_api_url: "http://127.0.0.1:1/v1/chat/completions".to_string(),
        ..create_test_config(&urban.uri(), None)
    };
    let result = expect_result(run_pipeline(&client, &config, &Query::new("rizz", "auto", "en")).await);

    assert!(result.to_paragraphs[0].starts_with("1. one"));
    assert_eq!(result.to_paragraphs[2], ANALYSIS_ERROR_HEADER);
    assert!(result.to_paragraphs[3].starts_with("OpenAI API Error:"));
}

// ==================== Error Outcome Tests ====================

#[tokio::test]
async fn test_not_found() {
    let urban = MockServer::start().await;
    mount_definitions(&urban, &[]).await;

    let client = reqwest::Client::new();
    let config = create_test_config(&urban.uri(), None);
    let outcome = run_pipeline(&client, &config, &Query::new("qwxzv", "auto", "en")).await;

    assert_eq!(expect_error_kind(outcome), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_lookup_failure_skips_explanation() {
    let urban = MockServer::start().await;
    let openai = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/define"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&urban)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(create_openai_response("never")))
        .expect(0)
        .mount(&openai)
        .await;

    let client = reqwest::Client::new();
    let config = create_test_config(&urban.uri(), Some(openai.uri().as_str()));
    let outcome = run_pipeline(&client, &config, &Query::new("rizz", "auto", "en")).await;

    match outcome {
        Outcome::Error(e) => {
            assert_eq!(e.kind, ErrorKind::Network);
            assert_eq!(e.message, "Network error");
            assert!(e.addition.unwrap().contains("500"));
        }
        other => panic!("Expected network error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_completion_called_exactly_once() {
    let urban = MockServer::start().await;
    mount_definitions(&urban, &[("one", "", 1, 0)]).await;

    let client = reqwest::Client::new();
    let config = create_test_config(&urban.uri(), None);

    let mut calls = 0;
    translate(&client, &config, &Query::new("rizz", "auto", "en"), |outcome| {
        calls += 1;
        assert!(!outcome.is_error());
    })
    .await;

    assert_eq!(calls, 1);
}

// ==================== Server Tests ====================

async fn spawn_server(config: Config) -> String {
    let app = router(AppState::new(config).expect("state"));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_server_health_and_languages() {
    let base = spawn_server(Config::default()).await;
    let client = reqwest::Client::new();

    let health = client.get(format!("{}/health", base)).send().await.expect("request");
    assert!(health.status().is_success());
    assert_eq!(health.text().await.expect("body"), "OK");

    let languages: Vec<String> = client
        .get(format!("{}/languages", base))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json");
    assert_eq!(
        languages,
        vec!["auto", "en", "zh-Hans", "zh-Hant", "ja", "ko", "fr", "de", "es", "ru"]
    );
}

#[tokio::test]
async fn test_server_translate_round_trip() {
    let urban = MockServer::start().await;
    mount_definitions(&urban, &[("Charisma", "He has rizz", 10, 1)]).await;

    let base = spawn_server(create_test_config(&urban.uri(), None)).await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .post(format!("{}/translate", base))
        .json(&serde_json::json!({"text": "rizz", "detectFrom": "en", "detectTo": "ko"}))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json");

    assert_eq!(body["result"]["to"], "ko");
    assert_eq!(body["result"]["fromParagraphs"][0], "rizz");
    assert_eq!(
        body["result"]["toParagraphs"][0],
        "1. Charisma\n\nExample: He has rizz\n\n(👍 10 | 👎 1)"
    );
}

#[tokio::test]
async fn test_server_returns_errors_in_band() {
    let base = spawn_server(Config::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/translate", base))
        .json(&serde_json::json!({"text": "héllo"}))
        .send()
        .await
        .expect("request");

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("json");
    assert_eq!(body["error"]["type"], "unsupportedLanguage");
    assert_eq!(body["error"]["addition"], "Please enter an English word or phrase.");
}

#[tokio::test]
async fn test_server_missing_text_is_param_error() {
    let base = spawn_server(Config::default()).await;
    let client = reqwest::Client::new();

    for body in [
        serde_json::json!({"detectFrom": "auto", "detectTo": "en"}),
        serde_json::json!({"text": null}),
    ] {
        let response = client
            .post(format!("{}/translate", base))
            .json(&body)
            .send()
            .await
            .expect("request");

        assert!(response.status().is_success(), "body {}", body);
        let outcome: serde_json::Value = response.json().await.expect("json");
        assert_eq!(outcome["error"]["type"], "param", "body {}", body);
        assert_eq!(outcome["error"]["message"], "Translation source is empty.");
    }
}

#[tokio::test]
async fn test_server_requires_api_key_when_configured() {
    let config = Config {
        api_key: Some("host-secret".to_string()),
        ..Config::default()
    };
    let base = spawn_server(config).await;
    let client = reqwest::Client::new();

    let rejected = client
        .post(format!("{}/translate", base))
        .json(&serde_json::json!({"text": ""}))
        .send()
        .await
        .expect("request");
    assert_eq!(rejected.status().as_u16(), 401);

    let wrong = client
        .post(format!("{}/translate", base))
        .header(API_KEY_HEADER, "nope")
        .json(&serde_json::json!({"text": ""}))
        .send()
        .await
        .expect("request");
    assert_eq!(wrong.status().as_u16(), 401);

    let accepted: serde_json::Value = client
        .post(format!("{}/translate", base))
        .header(API_KEY_HEADER, "host-secret")
        .json(&serde_json::json!({"text": ""}))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json");
    assert_eq!(accepted["error"]["type"], "param");
}
