//! Chat completion against a mock OpenAI-compatible server.

use mockito::Matcher;
use openai_client::OpenAIClient;

const COMPLETION_BODY: &str = r#"{
    "id": "chatcmpl-1",
    "object": "chat.completion",
    "created": 1706529600,
    "model": "gpt-4o-mini",
    "choices": [{
        "index": 0,
        "message": {"role": "assistant", "content": "Hello, world"},
        "finish_reason": "stop"
    }],
    "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
}"#;

/// **Test: complete() sends system + user turns and returns the first choice.**
#[tokio::test]
async fn complete_returns_first_choice() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("\"role\":\"system\"".to_string()),
            Matcher::Regex("Привет, мир".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(COMPLETION_BODY)
        .create_async()
        .await;

    let client = OpenAIClient::with_base_url("sk-test-key-123456".to_string(), server.url());
    let reply = client
        .complete("gpt-4o-mini", "Translate to English.", "Привет, мир")
        .await
        .unwrap();

    assert_eq!(reply, "Hello, world");
    mock.assert_async().await;
}

/// **Test: vision_completion() embeds the image URL as a content part.**
#[tokio::test]
async fn vision_completion_sends_image_part() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("data:image/png;base64,AAAA".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(COMPLETION_BODY)
        .create_async()
        .await;

    let client = OpenAIClient::with_base_url("sk-test-key-123456".to_string(), server.url());
    let reply = client
        .vision_completion("gpt-4o-mini", "Read the text.", "data:image/png;base64,AAAA")
        .await
        .unwrap();

    assert_eq!(reply, "Hello, world");
    mock.assert_async().await;
}
