use mockito::Matcher;
use serde_json::json;

use parlance::application::ports::{Embedder, EmbedderError};
use parlance::infrastructure::llm::{ApiProvider, OpenAiEmbedder, OpenAiEndpoint};

fn embedder(url: &str) -> OpenAiEmbedder {
    OpenAiEmbedder::new(
        OpenAiEndpoint::new(
            reqwest::Client::new(),
            ApiProvider::OpenAi,
            url,
            "sk-test".to_string(),
        ),
        "text-embedding-3-small".to_string(),
    )
}

#[tokio::test]
async fn given_out_of_order_response_when_embedding_batch_then_results_follow_input_order() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/embeddings")
        .match_body(Matcher::PartialJson(json!({
            "model": "text-embedding-3-small",
            "input": ["first", "second"]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data":[
                {"index":1,"embedding":[0.0,1.0]},
                {"index":0,"embedding":[1.0,0.0]}
            ]}"#,
        )
        .create_async()
        .await;

    let embeddings = embedder(&server.url())
        .embed_batch(&["first", "second"])
        .await
        .unwrap();

    assert_eq!(embeddings[0].values, vec![1.0, 0.0]);
    assert_eq!(embeddings[1].values, vec![0.0, 1.0]);
    mock.assert_async().await;
}

#[tokio::test]
async fn given_empty_batch_when_embedding_then_no_request_is_sent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/embeddings")
        .expect(0)
        .create_async()
        .await;

    let embeddings = embedder(&server.url()).embed_batch(&[]).await.unwrap();

    assert!(embeddings.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn given_count_mismatch_when_embedding_then_returns_invalid_response() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/embeddings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data":[{"index":0,"embedding":[1.0]}]}"#)
        .create_async()
        .await;

    let result = embedder(&server.url()).embed_batch(&["a", "b"]).await;

    assert!(matches!(result, Err(EmbedderError::InvalidResponse(_))));
}

#[tokio::test]
async fn given_unauthorized_when_embedding_then_returns_api_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/embeddings")
        .with_status(401)
        .with_body(r#"{"error":{"message":"Incorrect API key"}}"#)
        .create_async()
        .await;

    let result = embedder(&server.url()).embed("text").await;

    assert!(matches!(result, Err(EmbedderError::ApiRequestFailed(_))));
}
