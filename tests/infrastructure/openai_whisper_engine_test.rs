use bytes::Bytes;
use mockito::Matcher;

use parlance::application::ports::{TranscriptionEngine, TranscriptionError};
use parlance::domain::UploadedFile;
use parlance::infrastructure::audio::OpenAiWhisperEngine;
use parlance::infrastructure::llm::{ApiProvider, OpenAiEndpoint};

fn engine(url: &str) -> OpenAiWhisperEngine {
    OpenAiWhisperEngine::new(
        OpenAiEndpoint::new(
            reqwest::Client::new(),
            ApiProvider::OpenAi,
            url,
            "sk-test".to_string(),
        ),
        "whisper-1".to_string(),
    )
}

fn recording() -> UploadedFile {
    UploadedFile::new(
        "recording.webm",
        Some("audio/webm".to_string()),
        Bytes::from_static(b"\x1a\x45\xdf\xa3fake-webm"),
    )
}

#[tokio::test]
async fn given_audio_when_transcribing_then_posts_multipart_and_strips_trailing_newline() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/audio/transcriptions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="model"\r\n\r\nwhisper-1"#.to_string()),
            Matcher::Regex(r#"name="response_format"\r\n\r\ntext"#.to_string()),
            Matcher::Regex(r#"filename="recording.webm""#.to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("Hello from the recording.\n")
        .create_async()
        .await;

    let text = engine(&server.url()).transcribe(&recording()).await.unwrap();

    assert_eq!(text, "Hello from the recording.");
    mock.assert_async().await;
}

#[tokio::test]
async fn given_unnamed_upload_when_transcribing_then_uses_fallback_filename() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/audio/transcriptions")
        .match_body(Matcher::Regex(r#"filename="audio.webm""#.to_string()))
        .with_status(200)
        .with_body("ok")
        .create_async()
        .await;

    let audio = UploadedFile::new("", None, Bytes::from_static(b"data"));

    let text = engine(&server.url()).transcribe(&audio).await.unwrap();

    assert_eq!(text, "ok");
    mock.assert_async().await;
}

#[tokio::test]
async fn given_bad_request_when_transcribing_then_returns_api_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/audio/transcriptions")
        .with_status(400)
        .with_body("Invalid file format.")
        .create_async()
        .await;

    let result = engine(&server.url()).transcribe(&recording()).await;

    match result {
        Err(TranscriptionError::ApiRequestFailed(message)) => {
            assert!(message.contains("Invalid file format."));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
