use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use mini_gen::ai::{ChatService, GroqChatClient, MockChatClient};
use mini_gen::config::TextgenConfig;
use mini_gen::frontend::{self, FrontendState, TextgenClient};
use mini_gen::textgen::{self, TextgenState};
use mini_gen::words::{word_count, MAX_WORDS};
use pretty_assertions::assert_eq;
use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const THIRTY_WORDS: &str = "Gravity is the invisible force that pulls objects toward each other, \
    keeping planets in orbit around the sun and making things fall to the ground when dropped \
    on our planet.";

fn first_words(text: &str, n: usize) -> String {
    text.split_whitespace().take(n).collect::<Vec<_>>().join(" ")
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn post_generate(app: Router, body: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let json = serde_json::from_str(&body_string(response).await).unwrap();
    (status, json)
}

async fn post_index(app: Router, content_type: Option<&str>, body: &str) -> (StatusCode, String) {
    let mut request = Request::builder().method("POST").uri("/");
    if let Some(content_type) = content_type {
        request = request.header(header::CONTENT_TYPE, content_type);
    }
    let response = app
        .oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_string(response).await)
}

async fn post_form(app: Router, body: &str) -> (StatusCode, String) {
    post_index(app, Some("application/x-www-form-urlencoded"), body).await
}

fn textgen_app(mock: &Arc<MockChatClient>) -> Router {
    textgen::build_router(TextgenState::new(Some(
        mock.clone() as Arc<dyn ChatService>
    )))
}

fn frontend_app(textgen_url: &str) -> Router {
    let client = TextgenClient::new(textgen_url, Duration::from_secs(5)).unwrap();
    frontend::build_router(FrontendState::new(client))
}

async fn spawn_textgen(state: TextgenState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, textgen::build_router(state)).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn mount_vendor_reply(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_generate_caps_thirty_word_answer_at_twenty() {
    assert_eq!(word_count(THIRTY_WORDS), 30);
    let mock = Arc::new(MockChatClient::new().with_response(THIRTY_WORDS.to_string()));

    let (status, json) =
        post_generate(textgen_app(&mock), r#"{"prompt": "Explain gravity simply."}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["generated"], first_words(THIRTY_WORDS, MAX_WORDS));
    assert_eq!(mock.requests()[0].1, "Explain gravity simply.");
}

#[tokio::test]
async fn test_generate_against_stub_vendor_api() {
    let vendor = MockServer::start().await;
    mount_vendor_reply(&vendor, THIRTY_WORDS).await;

    let client = GroqChatClient::new(
        SecretString::new("test-key".to_string()),
        "llama-3.1-8b-instant".to_string(),
        Duration::from_secs(5),
    )
    .unwrap()
    .with_base_url(vendor.uri());
    let app = textgen::build_router(TextgenState::new(Some(Arc::new(client))));

    let (status, json) = post_generate(app, r#"{"prompt": "Explain gravity simply."}"#).await;

    assert_eq!(status, StatusCode::OK);
    let generated = json["generated"].as_str().unwrap();
    assert_eq!(generated, first_words(THIRTY_WORDS, 20));
    assert!(generated.ends_with("making"));
}

#[tokio::test]
async fn test_generate_rejects_blank_prompt() {
    let mock = Arc::new(MockChatClient::new());

    for body in [r#"{"prompt": "   "}"#, r#"{}"#, "not json at all", ""] {
        let (status, json) = post_generate(textgen_app(&mock), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {:?}", body);
        assert_eq!(json["error"], "Missing 'prompt' in JSON body");
    }

    assert_eq!(mock.get_call_count(), 0);
}

#[tokio::test]
async fn test_generate_without_credential_never_calls_vendor() {
    let vendor = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&vendor)
        .await;

    let mut config = TextgenConfig::from_lookup(|_| None).unwrap();
    config.groq_base_url = vendor.uri();
    let app = textgen::build_router(TextgenState::from_config(&config));

    let (status, json) = post_generate(app, r#"{"prompt": "hello"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = json["error"].as_str().unwrap();
    assert!(error.contains("API key not set"));
}

#[tokio::test]
async fn test_generate_reports_vendor_failure() {
    let vendor = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limit exceeded"))
        .expect(1)
        .mount(&vendor)
        .await;

    let config = TextgenConfig::from_lookup(|key| match key {
        "GROQ_API_KEY" => Some("gsk_do_not_leak".to_string()),
        "GROQ_BASE_URL" => Some(vendor.uri()),
        _ => None,
    })
    .unwrap();
    let app = textgen::build_router(TextgenState::from_config(&config));

    let (status, json) = post_generate(app, r#"{"prompt": "hello"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = json["error"].as_str().unwrap();
    assert!(error.contains("Exception while calling Groq API"));
    assert!(error.contains("rate limit exceeded"));
    assert!(!error.contains("gsk_do_not_leak"));
}

#[tokio::test]
async fn test_frontend_get_renders_empty_form() {
    let response = frontend_app("http://127.0.0.1:1")
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("name=\"prompt\""));
    assert!(!html.contains("<h3>Error</h3>"));
}

#[tokio::test]
async fn test_frontend_relays_through_textgen_to_vendor() {
    let vendor = MockServer::start().await;
    mount_vendor_reply(&vendor, THIRTY_WORDS).await;

    let client = GroqChatClient::new(
        SecretString::new("test-key".to_string()),
        "llama-3.1-8b-instant".to_string(),
        Duration::from_secs(5),
    )
    .unwrap()
    .with_base_url(vendor.uri());
    let textgen_url = spawn_textgen(TextgenState::new(Some(Arc::new(client)))).await;

    let (status, html) =
        post_form(frontend_app(&textgen_url), "prompt=++Explain+gravity+simply.++").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Generated (20-word limit)"));
    assert!(html.contains(&first_words(THIRTY_WORDS, 20)));
    assert!(!html.contains("dropped"));
    assert!(html.contains(">Explain gravity simply.</textarea>"));
}

#[tokio::test]
async fn test_frontend_rejects_blank_prompt() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend)
        .await;

    let (status, html) = post_form(frontend_app(&backend.uri()), "prompt=+++").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Prompt cannot be empty."));
    assert!(html.contains("data-kind=\"validation\""));
}

#[tokio::test]
async fn test_frontend_missing_field_is_blank_prompt() {
    let (status, html) = post_form(frontend_app("http://127.0.0.1:1"), "").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Prompt cannot be empty."));
}

#[tokio::test]
async fn test_frontend_non_form_body_is_blank_prompt() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend)
        .await;

    let multipart = "--x\r\nContent-Disposition: form-data; name=\"prompt\"\r\n\r\nhi\r\n--x--\r\n";
    for (content_type, body) in [
        (None, "prompt=hello"),
        (Some("multipart/form-data; boundary=x"), multipart),
        (Some("text/plain"), "prompt=hello"),
    ] {
        let (status, html) = post_index(frontend_app(&backend.uri()), content_type, body).await;
        assert_eq!(status, StatusCode::OK, "content type: {:?}", content_type);
        assert!(html.contains("Prompt cannot be empty."));
        assert!(html.contains("data-kind=\"validation\""));
    }
}

#[tokio::test]
async fn test_frontend_repeated_prompt_field_uses_first_value() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .and(body_json(serde_json::json!({ "prompt": "first" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "generated": "first answer" })),
        )
        .expect(1)
        .mount(&backend)
        .await;

    let (status, html) =
        post_form(frontend_app(&backend.uri()), "prompt=first&prompt=second").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("first answer"));
    assert!(html.contains(">first</textarea>"));
}

#[tokio::test]
async fn test_frontend_reports_unreachable_backend() {
    let (status, html) = post_form(frontend_app("http://127.0.0.1:1"), "prompt=hello").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("data-kind=\"upstream-unreachable\""));
    assert!(!html.contains("Generated (20-word limit)"));
}

#[tokio::test]
async fn test_frontend_reports_backend_error_status_and_body() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({ "error": "boom" })),
        )
        .mount(&backend)
        .await;

    let (status, html) = post_form(frontend_app(&backend.uri()), "prompt=hello").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("data-kind=\"upstream-error\""));
    assert!(html.contains("500"));
    assert!(html.contains("boom"));
}

#[tokio::test]
async fn test_health_endpoints() {
    let mock = Arc::new(MockChatClient::new());
    for app in [textgen_app(&mock), frontend_app("http://127.0.0.1:1")] {
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
