use axum::extract::{Multipart, State};
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};

use crate::domain::{ChatRequest, ConversationId, UploadedFile};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::ApiError;

pub const SKIPPED_FILES_HEADER: &str = "x-skipped-files";

const QUERY_FIELD: &str = "query";
const CONVERSATION_FIELD: &str = "conversation_id";

#[tracing::instrument(skip(state, multipart))]
pub async fn chat_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut query: Option<String> = None;
    let mut conversation_id = ConversationId::default();
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            QUERY_FIELD => query = Some(field.text().await?),
            CONVERSATION_FIELD => conversation_id = ConversationId::new(field.text().await?),
            _ => {
                let Some(filename) = field.file_name().map(str::to_string) else {
                    tracing::debug!(field = %name, "Ignoring unknown text field");
                    continue;
                };
                let content_type = field.content_type().map(str::to_string);
                // Empty parts still go through ingestion and come back as skipped.
                let data = field.bytes().await?;
                files.push(UploadedFile::new(filename, content_type, data));
            }
        }
    }

    let query = query.ok_or_else(|| ApiError::BadRequest("missing 'query' field".to_string()))?;

    tracing::debug!(
        prompt = %sanitize_prompt(&query),
        conversation = %conversation_id,
        files = files.len(),
        "Chat request received"
    );

    let request = ChatRequest::new(query)
        .with_conversation(conversation_id)
        .with_files(files);

    let outcome = state.chat_service.respond(request).await?;

    let mut response = outcome.reply.into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    if !outcome.skipped.is_empty() {
        response.headers_mut().insert(
            SKIPPED_FILES_HEADER,
            HeaderValue::from(outcome.skipped.len()),
        );
    }

    Ok(response)
}
