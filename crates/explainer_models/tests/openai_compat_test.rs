//! OpenAI-compatible client tests against a local one-shot HTTP server.
//!
//! The server answers a single request with a canned response and hands the
//! raw request back to the test, so no real provider is contacted.

use explainer_core::{GenerateRequest, Message};
use explainer_error::{ExplainerErrorKind, ModelsErrorKind};
use explainer_interface::ExplainerDriver;
use explainer_models::OpenAICompatibleClient;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve one request, replying with `status` and `body`; yields the raw request.
async fn serve_once(
    status: &'static str,
    body: String,
) -> anyhow::Result<(String, JoinHandle<String>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let url = format!("http://{}/v1/chat/completions", listener.local_addr()?);

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.expect("read");
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
            if request_complete(&raw) {
                break;
            }
        }
        let response = format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.expect("write");
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&raw).into_owned()
    });

    Ok((url, handle))
}

fn request_complete(raw: &[u8]) -> bool {
    let text = String::from_utf8_lossy(raw);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..header_end]
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    raw.len() >= header_end + 4 + content_length
}

fn request() -> GenerateRequest {
    GenerateRequest::builder()
        .messages(vec![
            Message::system("You are a Manim expert."),
            Message::user("Plan the scene for the following topic: why is the sky blue"),
        ])
        .temperature(Some(0.2f32))
        .json_mode(true)
        .build()
        .expect("request")
}

#[tokio::test]
async fn test_successful_completion() -> anyhow::Result<()> {
    let body = serde_json::json!({
        "id": "chatcmpl-42",
        "model": "llama-3.3-70b-versatile",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "{\"scene\": \"...\", \"scene_class_name\": \"Sky\"}"},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 300, "completion_tokens": 40, "total_tokens": 340}
    })
    .to_string();
    let (url, server) = serve_once("200 OK", body).await?;

    let client = OpenAICompatibleClient::with_timeout(
        "secret",
        "llama-3.3-70b-versatile",
        url,
        "local",
        Duration::from_secs(5),
    )?;
    let response = client.generate(&request()).await?;

    assert!(response.text().contains("scene_class_name"));
    assert_eq!(response.usage().map(|u| u.total()), Some(340));

    let raw = server.await?;
    assert!(raw.starts_with("POST /v1/chat/completions"));
    assert!(raw.to_ascii_lowercase().contains("authorization: bearer secret"));
    assert!(raw.contains("\"json_object\""));
    assert!(raw.contains("\"role\":\"system\""));
    Ok(())
}

#[tokio::test]
async fn test_rate_limit_maps_to_models_error() -> anyhow::Result<()> {
    let body = r#"{"error": {"message": "Rate limit reached", "type": "rate_limit"}}"#.to_string();
    let (url, server) = serve_once("429 Too Many Requests", body).await?;

    let client = OpenAICompatibleClient::new("secret", "m", url, "local");
    let err = client.generate(&request()).await.expect_err("429 must fail");

    match err.kind() {
        ExplainerErrorKind::Models(models) => {
            assert_eq!(models.provider, "local");
            assert_eq!(models.kind, ModelsErrorKind::RateLimit);
            assert!(models.is_rate_limit());
        }
        other => panic!("unexpected error kind: {other}"),
    }
    server.await?;
    Ok(())
}

#[tokio::test]
async fn test_malformed_body_is_a_parse_error() -> anyhow::Result<()> {
    let (url, server) = serve_once("200 OK", "not json".to_string()).await?;

    let client = OpenAICompatibleClient::new("secret", "m", url, "local");
    let err = client.generate(&request()).await.expect_err("bad body must fail");

    assert!(matches!(
        err.kind(),
        ExplainerErrorKind::Models(m) if matches!(m.kind, ModelsErrorKind::ResponseParsing(_))
    ));
    server.await?;
    Ok(())
}

#[tokio::test]
async fn test_unreachable_endpoint_is_http_error() -> anyhow::Result<()> {
    // Bind then drop to get a port nothing is listening on.
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let url = format!("http://{}/v1/chat/completions", listener.local_addr()?);
    drop(listener);

    let client =
        OpenAICompatibleClient::with_timeout("secret", "m", url, "local", Duration::from_secs(2))?;
    let err = client.generate(&request()).await.expect_err("no server");

    assert!(matches!(
        err.kind(),
        ExplainerErrorKind::Models(m) if matches!(m.kind, ModelsErrorKind::Http(_))
    ));
    Ok(())
}
