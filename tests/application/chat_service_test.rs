use std::sync::Arc;

use parlance::application::ports::ChatMemory;
use parlance::application::services::{ChatError, render_user_prompt};
use parlance::domain::{ChatRequest, ConversationId, MessageRole};
use parlance::infrastructure::persistence::InMemoryChatMemory;

use crate::helpers::{
    FailingLlmClient, RecordingLlmClient, RecordingVectorStore, chat_service, scored_chunk, upload,
};

#[tokio::test]
async fn given_no_files_when_responding_then_query_is_sent_without_annotation() {
    let llm = Arc::new(RecordingLlmClient::new("Paris."));
    let store = Arc::new(RecordingVectorStore::default());
    let service = chat_service(llm.clone(), store.clone(), Arc::new(InMemoryChatMemory::default()));

    let outcome = service
        .respond(ChatRequest::new("What is the capital of France?"))
        .await
        .unwrap();

    assert_eq!(outcome.reply, "Paris.");
    let prompt = llm.last_prompt().unwrap();
    assert_eq!(
        prompt.user,
        render_user_prompt("What is the capital of France?", "")
    );
    assert!(!prompt.user.contains("The following files were provided"));
    assert_eq!(store.upsert_count(), 0);
}

#[tokio::test]
async fn given_some_unparseable_files_when_responding_then_only_parsed_files_are_stored_and_listed() {
    let llm = Arc::new(RecordingLlmClient::new("Summary."));
    let store = Arc::new(RecordingVectorStore::default());
    let service = chat_service(llm.clone(), store.clone(), Arc::new(InMemoryChatMemory::default()));

    let request = ChatRequest::new("Summarise these").with_files(vec![
        upload("a.txt", "alpha document"),
        upload("corrupt.pdf", "garbage"),
        upload("b.txt", "beta document"),
    ]);

    let outcome = service.respond(request).await.unwrap();

    assert_eq!(outcome.ingested, vec!["a.txt".to_string(), "b.txt".to_string()]);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].filename, "corrupt.pdf");
    assert_eq!(store.upsert_count(), 2);
    assert_eq!(store.upserted_sources(), vec!["a.txt", "b.txt"]);

    let prompt = llm.last_prompt().unwrap();
    assert!(prompt.user.starts_with(
        "Summarise these\n\nThe following files were provided:\n- a.txt\n- b.txt\n"
    ));
    assert!(!prompt.user.contains("corrupt.pdf"));
}

#[tokio::test]
async fn given_all_files_fail_when_responding_then_header_is_kept_with_empty_list() {
    let llm = Arc::new(RecordingLlmClient::new("ok"));
    let store = Arc::new(RecordingVectorStore::default());
    let service = chat_service(llm.clone(), store, Arc::new(InMemoryChatMemory::default()));

    let request =
        ChatRequest::new("Read this").with_files(vec![upload("corrupt.pdf", "garbage")]);

    let outcome = service.respond(request).await.unwrap();

    assert!(outcome.ingested.is_empty());
    assert_eq!(outcome.skipped.len(), 1);
    let prompt = llm.last_prompt().unwrap();
    assert!(
        prompt
            .user
            .starts_with("Read this\n\nThe following files were provided:\n\n")
    );
}

#[tokio::test]
async fn given_retrieved_chunks_when_responding_then_context_is_in_prompt() {
    let llm = Arc::new(RecordingLlmClient::new("ok"));
    let store = Arc::new(RecordingVectorStore::with_results(vec![
        scored_chunk("Rust has ownership.", 0.9),
        scored_chunk("Borrowing is checked.", 0.8),
    ]));
    let service = chat_service(llm.clone(), store, Arc::new(InMemoryChatMemory::default()));

    service
        .respond(ChatRequest::new("Explain Rust"))
        .await
        .unwrap();

    let prompt = llm.last_prompt().unwrap();
    assert_eq!(
        prompt.user,
        render_user_prompt("Explain Rust", "Rust has ownership.\n\nBorrowing is checked.")
    );
}

#[tokio::test]
async fn given_previous_exchange_when_responding_then_history_is_prepended() {
    let llm = Arc::new(RecordingLlmClient::new("second answer"));
    let store = Arc::new(RecordingVectorStore::default());
    let memory = Arc::new(InMemoryChatMemory::default());
    let service = chat_service(llm.clone(), store, memory.clone());

    service.respond(ChatRequest::new("first")).await.unwrap();
    service.respond(ChatRequest::new("second")).await.unwrap();

    let prompt = llm.last_prompt().unwrap();
    assert_eq!(prompt.history.len(), 2);
    assert_eq!(prompt.history[0].role, MessageRole::User);
    assert_eq!(prompt.history[0].content, "first");
    assert_eq!(prompt.history[1].role, MessageRole::Assistant);

    let stored = memory.history(&ConversationId::default()).await.unwrap();
    assert_eq!(stored.len(), 4);
    assert_eq!(stored[2].content, "second");
    assert_eq!(stored[3].content, "second answer");
}

#[tokio::test]
async fn given_separate_conversations_when_responding_then_histories_do_not_mix() {
    let llm = Arc::new(RecordingLlmClient::new("ok"));
    let memory = Arc::new(InMemoryChatMemory::default());
    let service = chat_service(
        llm.clone(),
        Arc::new(RecordingVectorStore::default()),
        memory.clone(),
    );

    service
        .respond(ChatRequest::new("hello").with_conversation(ConversationId::new("alice")))
        .await
        .unwrap();
    service
        .respond(ChatRequest::new("hi").with_conversation(ConversationId::new("bob")))
        .await
        .unwrap();

    assert!(llm.last_prompt().unwrap().history.is_empty());
    assert_eq!(
        memory.history(&ConversationId::new("alice")).await.unwrap().len(),
        2
    );
}

#[tokio::test]
async fn given_completion_failure_when_responding_then_error_propagates_and_memory_is_unchanged() {
    let memory = Arc::new(InMemoryChatMemory::default());
    let service = chat_service(
        Arc::new(FailingLlmClient),
        Arc::new(RecordingVectorStore::default()),
        memory.clone(),
    );

    let result = service.respond(ChatRequest::new("anything")).await;

    assert!(matches!(result, Err(ChatError::Completion(_))));
    assert!(
        memory
            .history(&ConversationId::default())
            .await
            .unwrap()
            .is_empty()
    );
}
