use serde_json::json;
use voicegenie::error::PipelineError;
use voicegenie::resolver::FALLBACK_MODEL;
use voicegenie::PipelineBuilder;

const MPEG_BYTES: &[u8] = &[0xFF, 0xFB, 0x90, 0x44, 0x00, 0x01, 0x02, 0x03];

fn generation_body(text: &str) -> String {
    json!({"candidates": [{"content": {"parts": [{"text": text}]}}]}).to_string()
}

#[tokio::test]
async fn missing_credential_short_circuits_before_any_remote_call() {
    // No mock server at all: a missing key must never reach the network.
    let err = PipelineBuilder::new()
        .text_api_key("g-key")
        .build()
        .unwrap_err();
    assert!(matches!(err, PipelineError::CredentialMissing(_)));
}

#[tokio::test]
async fn full_run_resolves_generates_and_synthesizes() {
    let mut text_server = mockito::Server::new_async().await;
    let mut speech_server = mockito::Server::new_async().await;

    let list = text_server
        .mock("GET", "/models?key=g-key")
        .with_status(200)
        .with_body(
            json!({
                "models": [
                    {"name": "models/gemini-1.5-flash", "supportedGenerationMethods": ["generateContent"]}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let generate = text_server
        .mock("POST", "/models/gemini-1.5-flash:generateContent?key=g-key")
        .with_status(200)
        .with_body(generation_body("Hi! I'm doing great, thanks for asking."))
        .expect(1)
        .create_async()
        .await;

    let synthesize = speech_server
        .mock("POST", "/text-to-speech/21m00Tcm4TlvDq8ikWAM")
        .match_body(mockito::Matcher::PartialJson(json!({
            "text": "Hi! I'm doing great, thanks for asking."
        })))
        .with_status(200)
        .with_body(MPEG_BYTES)
        .expect(1)
        .create_async()
        .await;

    let pipeline = PipelineBuilder::new()
        .text_api_key("g-key")
        .speech_api_key("xi-key")
        .text_base_url(text_server.url())
        .speech_base_url(speech_server.url())
        .build()
        .unwrap();

    let run = pipeline.run("Hello").await.unwrap();

    assert_eq!(run.model, "gemini-1.5-flash");
    assert!(!run.text.is_empty());
    // MPEG frame sync marker at the front of the audio.
    assert_eq!(run.audio[..2], [0xFF, 0xFB]);

    list.assert_async().await;
    generate.assert_async().await;
    synthesize.assert_async().await;
}

#[tokio::test]
async fn generated_text_reaches_synthesis_verbatim() {
    let mut text_server = mockito::Server::new_async().await;
    let mut speech_server = mockito::Server::new_async().await;

    // Tricky text: quotes, newline escapes, non-ASCII. Must survive the
    // round-trip into the synthesis body character for character.
    let text = "She said: \"d\u{e9}j\u{e0} vu\"\n\t— and 50,000 \u{20ac}";

    let _list = text_server
        .mock("GET", "/models?key=g-key")
        .with_status(200)
        .with_body(
            json!({
                "models": [
                    {"name": "models/gemini-1.5-flash", "supportedGenerationMethods": ["generateContent"]}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let _generate = text_server
        .mock("POST", "/models/gemini-1.5-flash:generateContent?key=g-key")
        .with_status(200)
        .with_body(generation_body(text))
        .create_async()
        .await;

    let synthesize = speech_server
        .mock("POST", "/text-to-speech/21m00Tcm4TlvDq8ikWAM")
        .match_body(mockito::Matcher::PartialJson(json!({"text": text})))
        .with_status(200)
        .with_body(MPEG_BYTES)
        .expect(1)
        .create_async()
        .await;

    let pipeline = PipelineBuilder::new()
        .text_api_key("g-key")
        .speech_api_key("xi-key")
        .text_base_url(text_server.url())
        .speech_base_url(speech_server.url())
        .build()
        .unwrap();

    let run = pipeline.run("Hello").await.unwrap();
    assert_eq!(run.text, text);
    synthesize.assert_async().await;
}

#[tokio::test]
async fn generate_text_alone_never_falls_back() {
    let mut text_server = mockito::Server::new_async().await;

    let primary = text_server
        .mock("POST", "/models/gemini-1.5-flash:generateContent?key=g-key")
        .with_status(404)
        .with_body(r#"{"error": {"code": 404, "status": "NOT_FOUND"}}"#)
        .expect(1)
        .create_async()
        .await;

    let fallback = text_server
        .mock(
            "POST",
            format!("/models/{}:generateContent?key=g-key", FALLBACK_MODEL).as_str(),
        )
        .with_status(200)
        .with_body(generation_body("fallback answer"))
        .expect(0)
        .create_async()
        .await;

    let pipeline = PipelineBuilder::new()
        .text_api_key("g-key")
        .speech_api_key("xi-key")
        .text_base_url(text_server.url())
        .build()
        .unwrap();

    let err = pipeline
        .generate_text("Hello", "gemini-1.5-flash")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(err.is_model_not_found());

    primary.assert_async().await;
    // The fallback model was never contacted.
    fallback.assert_async().await;
}

#[tokio::test]
async fn explicit_fallback_path_retries_the_fixed_model_once() {
    let mut text_server = mockito::Server::new_async().await;

    let primary = text_server
        .mock("POST", "/models/gemini-1.5-flash:generateContent?key=g-key")
        .with_status(404)
        .with_body(r#"{"error": {"code": 404, "status": "NOT_FOUND"}}"#)
        .expect(1)
        .create_async()
        .await;

    let fallback = text_server
        .mock(
            "POST",
            format!("/models/{}:generateContent?key=g-key", FALLBACK_MODEL).as_str(),
        )
        .with_status(200)
        .with_body(generation_body("fallback answer"))
        .expect(1)
        .create_async()
        .await;

    let pipeline = PipelineBuilder::new()
        .text_api_key("g-key")
        .speech_api_key("xi-key")
        .text_base_url(text_server.url())
        .build()
        .unwrap();

    let text = pipeline
        .generate_text_with_fallback("Hello", "gemini-1.5-flash")
        .await
        .unwrap();
    assert_eq!(text, "fallback answer");

    primary.assert_async().await;
    fallback.assert_async().await;
}

#[tokio::test]
async fn non_404_failures_do_not_trigger_the_fallback() {
    let mut text_server = mockito::Server::new_async().await;

    let _primary = text_server
        .mock("POST", "/models/gemini-1.5-flash:generateContent?key=g-key")
        .with_status(429)
        .with_body(r#"{"error": {"code": 429, "message": "quota exceeded"}}"#)
        .expect(1)
        .create_async()
        .await;

    let fallback = text_server
        .mock(
            "POST",
            format!("/models/{}:generateContent?key=g-key", FALLBACK_MODEL).as_str(),
        )
        .with_status(200)
        .with_body(generation_body("should not be reached"))
        .expect(0)
        .create_async()
        .await;

    let pipeline = PipelineBuilder::new()
        .text_api_key("g-key")
        .speech_api_key("xi-key")
        .text_base_url(text_server.url())
        .build()
        .unwrap();

    let err = pipeline
        .generate_text_with_fallback("Hello", "gemini-1.5-flash")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(429));
    fallback.assert_async().await;
}

#[tokio::test]
async fn audio_stage_failure_is_terminal_and_verbatim() {
    let mut text_server = mockito::Server::new_async().await;
    let mut speech_server = mockito::Server::new_async().await;

    let _list = text_server
        .mock("GET", "/models?key=g-key")
        .with_status(200)
        .with_body(
            json!({
                "models": [
                    {"name": "models/gemini-1.5-flash", "supportedGenerationMethods": ["generateContent"]}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let _generate = text_server
        .mock("POST", "/models/gemini-1.5-flash:generateContent?key=g-key")
        .with_status(200)
        .with_body(generation_body("some answer"))
        .create_async()
        .await;

    let block_body =
        r#"{"detail": {"status": "detected_unusual_activity", "message": "Unusual activity detected."}}"#;
    let _synthesize = speech_server
        .mock("POST", "/text-to-speech/21m00Tcm4TlvDq8ikWAM")
        .with_status(401)
        .with_body(block_body)
        .create_async()
        .await;

    let pipeline = PipelineBuilder::new()
        .text_api_key("g-key")
        .speech_api_key("xi-key")
        .text_base_url(text_server.url())
        .speech_base_url(speech_server.url())
        .build()
        .unwrap();

    let err = pipeline.run("Hello").await.unwrap_err();
    assert!(err.is_anti_abuse_block());
    assert!(err.to_string().contains("Unusual activity detected."));
}
