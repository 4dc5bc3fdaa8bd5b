use axum::extract::{Multipart, State};

use crate::domain::UploadedFile;
use crate::presentation::state::AppState;

use super::ApiError;

const AUDIO_FIELD: &str = "audioFile";

#[tracing::instrument(skip(state, multipart))]
pub async fn audio_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<String, ApiError> {
    let mut audio: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await? {
        let named_audio = field.name() == Some(AUDIO_FIELD);
        let Some(filename) = field
            .file_name()
            .map(str::to_string)
            .or_else(|| named_audio.then(String::new))
        else {
            continue;
        };

        // The named field wins over any file part seen before it.
        if audio.is_some() && !named_audio {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;
        audio = Some(UploadedFile::new(filename, content_type, data));

        if named_audio {
            break;
        }
    }

    let audio = audio
        .filter(|a| !a.data.is_empty())
        .ok_or_else(|| ApiError::BadRequest("missing audio file".to_string()))?;

    tracing::debug!(
        filename = %audio.filename,
        bytes = audio.data.len(),
        "Transcription request received"
    );

    Ok(state.transcription_service.transcribe(&audio).await?)
}
