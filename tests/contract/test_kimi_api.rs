use mockito::{Matcher, Server};
use rentguard::analyzer::transport::{ChatCompletionRequest, ChatMessage, HttpTransport, KimiTransport, Tool};
use rentguard::analyzer::{KimiClient, LlmConfig};
use rentguard::error::{RentGuardError, DEFAULT_REMOTE_ERROR};
use rentguard::models::{ContractFile, RiskLevel, RiskType};
use serde_json::json;
use std::time::Duration;

fn transport(base_url: &str) -> HttpTransport {
    HttpTransport::new(base_url, "sk-test", Some(Duration::from_secs(10))).unwrap()
}

fn completion_body(content: serde_json::Value) -> String {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "model": "kimi-k2-turbo-preview",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

fn request() -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: "kimi-k2-turbo-preview".to_string(),
        messages: vec![ChatMessage::system("sys"), ChatMessage::user("contract")],
        temperature: 0.3,
        max_tokens: 4000,
        tools: vec![Tool::web_search()],
    }
}

#[tokio::test]
async fn test_upload_sends_multipart_with_bearer_token() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/files")
        .match_header("authorization", "Bearer sk-test")
        .match_header("content-type", Matcher::Regex("^multipart/form-data".to_string()))
        .match_body(Matcher::Regex("file-extract".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": "file-abc", "object": "file" }).to_string())
        .create_async()
        .await;

    let file = ContractFile::new("page1.jpg", "image/jpeg", b"JPEGDATA".to_vec());
    let file_id = transport(&server.url()).upload_file(&file).await.unwrap();

    assert_eq!(file_id, "file-abc");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_file_content_unwraps_envelope() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/files/file-abc/content")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "content": "第一条 押金为两个月租金", "file_type": "image/jpeg" }).to_string())
        .create_async()
        .await;

    let text = transport(&server.url()).file_content("file-abc").await.unwrap();
    assert_eq!(text, "第一条 押金为两个月租金");
}

#[tokio::test]
async fn test_file_content_plain_body_used_as_is() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/files/file-xyz/content")
        .with_status(200)
        .with_body("plain extracted text")
        .create_async()
        .await;

    let text = transport(&server.url()).file_content("file-xyz").await.unwrap();
    assert_eq!(text, "plain extracted text");
}

#[tokio::test]
async fn test_chat_completion_request_format() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({
                "model": "kimi-k2-turbo-preview",
                "max_tokens": 4000
            })),
            Matcher::Regex(r#""\$web_search""#.to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(json!("{\"riskLevel\": \"low\"}")))
        .create_async()
        .await;

    let reply = transport(&server.url()).chat_completion(&request()).await.unwrap();

    assert_eq!(reply, "{\"riskLevel\": \"low\"}");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_null_completion_content_is_empty() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(completion_body(serde_json::Value::Null))
        .create_async()
        .await;

    let reply = transport(&server.url()).chat_completion(&request()).await.unwrap();
    assert_eq!(reply, "");
}

#[tokio::test]
async fn test_upstream_error_message_is_surfaced() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_header("content-type", "application/json")
        .with_body(json!({ "error": { "message": "rate limited", "type": "rate_limit_reached_error" } }).to_string())
        .create_async()
        .await;

    let err = transport(&server.url()).chat_completion(&request()).await.unwrap_err();

    assert!(matches!(err, RentGuardError::Remote(_)));
    assert_eq!(err.to_string(), "rate limited");
}

#[tokio::test]
async fn test_error_without_message_uses_default() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let err = transport(&server.url()).chat_completion(&request()).await.unwrap_err();
    assert_eq!(err.to_string(), DEFAULT_REMOTE_ERROR);
}

#[tokio::test]
async fn test_connection_failure_uses_default_message() {
    // Nothing listens on port 1.
    let err = transport("http://127.0.0.1:1")
        .chat_completion(&request())
        .await
        .unwrap_err();

    assert!(matches!(err, RentGuardError::Remote(_)));
    assert_eq!(err.to_string(), DEFAULT_REMOTE_ERROR);
}

#[tokio::test]
async fn test_upload_connection_failure_keeps_cause() {
    let page = ContractFile::new("page.png", "image/png", vec![0x89, 0x50]);

    let err = transport("http://127.0.0.1:1").upload_file(&page).await.unwrap_err();

    assert!(matches!(err, RentGuardError::Remote(_)));
    assert!(!err.to_string().trim().is_empty());
    assert_ne!(err.to_string(), DEFAULT_REMOTE_ERROR);
}

#[tokio::test]
async fn test_extraction_placeholder_names_connection_error() {
    let client = KimiClient::new("sk-test", LlmConfig::default().with_base_url("http://127.0.0.1:1/v1")).unwrap();
    let files = [ContractFile::new("lease.pdf", "application/pdf", b"%PDF-1.7".to_vec())];

    let texts = client.upload_and_extract(&files).await;

    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("[文件 lease.pdf 处理失败: "));
    assert!(!texts[0].contains(DEFAULT_REMOTE_ERROR));
}

#[tokio::test]
async fn test_content_timeout_is_reported() {
    // Accepts connections through the backlog but never answers.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let transport = HttpTransport::new(&base_url, "sk-test", Some(Duration::from_millis(300))).unwrap();

    let err = transport.file_content("file-1").await.unwrap_err();

    assert!(err.to_string().starts_with("request timed out"));
    drop(listener);
}

#[tokio::test]
async fn test_full_analysis_against_mock_server() {
    let mut server = Server::new_async().await;

    let upload = server
        .mock("POST", "/files")
        .with_status(200)
        .with_body(json!({ "id": "file-1" }).to_string())
        .expect(2)
        .create_async()
        .await;

    let _content = server
        .mock("GET", "/files/file-1/content")
        .with_status(200)
        .with_body(json!({ "content": "押金不予退还" }).to_string())
        .expect(2)
        .create_async()
        .await;

    let reply = "分析如下：\n```json\n{\"riskLevel\": \"HIGH\", \"summary\": \"押金条款不合理\", \
                 \"riskItems\": [{\"type\": \"高风险\", \"title\": \"押金\", \"content\": \"押金不予退还\", \
                 \"suggestion\": \"协商修改\", \"references\": [{\"title\": \"案例\"}]}]}\n```";
    let completion = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("押金不予退还".to_string()))
        .with_status(200)
        .with_body(completion_body(json!(reply)))
        .expect(1)
        .create_async()
        .await;

    let client = KimiClient::new("sk-test", LlmConfig::default().with_base_url(server.url())).unwrap();
    let files = vec![
        ContractFile::new("p1.jpg", "image/jpeg", vec![1, 2, 3]),
        ContractFile::new("p2.pdf", "application/pdf", vec![4, 5, 6]),
    ];

    let result = client.analyze(&files).await.unwrap();

    assert_eq!(result.risk_level, RiskLevel::High);
    assert_eq!(result.summary, "押金条款不合理");
    assert_eq!(result.risk_items.len(), 1);
    assert_eq!(result.risk_items[0].risk_type, RiskType::High);
    assert_eq!(result.risk_items[0].source, "Kimi AI分析");
    assert_eq!(result.risk_items[0].references[0].url, "#");

    upload.assert_async().await;
    completion.assert_async().await;
}
