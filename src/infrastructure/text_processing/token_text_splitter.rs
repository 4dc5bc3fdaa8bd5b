use async_trait::async_trait;
use tiktoken_rs::{CoreBPE, cl100k_base};

use crate::application::ports::{TextSplitter, TextSplitterError};
use crate::domain::{Chunk, Document};

pub const DEFAULT_CHUNK_TOKENS: usize = 800;
pub const DEFAULT_MIN_CHUNK_SIZE_CHARS: usize = 350;
pub const DEFAULT_MIN_CHUNK_LENGTH_TO_EMBED: usize = 5;
pub const DEFAULT_MAX_NUM_CHUNKS: usize = 10_000;

const SENTENCE_BREAKS: [char; 4] = ['.', '?', '!', '\n'];

/// Cuts text into windows of `chunk_tokens` cl100k tokens. A window is pulled
/// back to its last sentence break when that break lies past
/// `min_chunk_size_chars`; the rest of the window starts the next chunk.
/// Chunks of `min_chunk_length_to_embed` characters or fewer are discarded.
pub struct TokenTextSplitter {
    bpe: CoreBPE,
    chunk_tokens: usize,
    min_chunk_size_chars: usize,
    min_chunk_length_to_embed: usize,
    max_num_chunks: usize,
}

impl TokenTextSplitter {
    pub fn new(
        chunk_tokens: usize,
        min_chunk_size_chars: usize,
        min_chunk_length_to_embed: usize,
        max_num_chunks: usize,
    ) -> Result<Self, TextSplitterError> {
        let bpe = cl100k_base().map_err(|e| {
            TextSplitterError::TokenizationFailed(format!("Failed to load tokenizer: {}", e))
        })?;

        Ok(Self {
            bpe,
            chunk_tokens: chunk_tokens.max(1),
            min_chunk_size_chars,
            min_chunk_length_to_embed,
            max_num_chunks,
        })
    }

    pub fn with_defaults() -> Result<Self, TextSplitterError> {
        Self::new(
            DEFAULT_CHUNK_TOKENS,
            DEFAULT_MIN_CHUNK_SIZE_CHARS,
            DEFAULT_MIN_CHUNK_LENGTH_TO_EMBED,
            DEFAULT_MAX_NUM_CHUNKS,
        )
    }

    fn keep(&self, text: &str) -> bool {
        text.chars().count() > self.min_chunk_length_to_embed
    }
}

#[async_trait]
impl TextSplitter for TokenTextSplitter {
    async fn split(
        &self,
        text: &str,
        document: &Document,
        page: Option<u32>,
    ) -> Result<Vec<Chunk>, TextSplitterError> {
        let tokens = self.bpe.encode_with_special_tokens(text);
        let mut chunks = Vec::new();
        let mut cursor = 0;
        let mut char_offset = 0;

        let push = |chunks: &mut Vec<Chunk>, raw: &str, char_offset: usize| {
            let leading = raw.len() - raw.trim_start().len();
            chunks.push(Chunk::new(
                raw.trim().to_string(),
                document.id,
                document.filename.clone(),
                page,
                char_offset + raw[..leading].chars().count(),
            ));
        };

        while cursor < tokens.len() && chunks.len() < self.max_num_chunks {
            let mut end = (cursor + self.chunk_tokens).min(tokens.len());

            // a window can end inside a multi-byte character
            let window = loop {
                match self.bpe.decode(tokens[cursor..end].to_vec()) {
                    Ok(decoded) => break Some(decoded),
                    Err(_) if end - cursor > 1 => end -= 1,
                    Err(_) => break None,
                }
            };
            let Some(window) = window else {
                cursor += 1;
                continue;
            };

            if window.trim().is_empty() {
                char_offset += window.chars().count();
                cursor = end;
                continue;
            }

            // rfind yields a byte index; the minimum is in characters
            let chunk_text = match window.rfind(SENTENCE_BREAKS) {
                Some(idx) if window[..idx].chars().count() > self.min_chunk_size_chars => {
                    &window[..=idx]
                }
                _ => window.as_str(),
            };

            if self.keep(chunk_text.trim()) {
                push(&mut chunks, chunk_text, char_offset);
            }

            let consumed = self
                .bpe
                .encode_with_special_tokens(chunk_text)
                .len()
                .clamp(1, end - cursor);
            char_offset += chunk_text.chars().count();
            cursor += consumed;
        }

        if cursor < tokens.len() {
            let rest = self
                .bpe
                .decode(tokens[cursor..].to_vec())
                .map_err(|e| TextSplitterError::TokenizationFailed(e.to_string()))?;
            if self.keep(rest.trim()) {
                push(&mut chunks, &rest, char_offset);
            }
        }

        Ok(chunks)
    }
}
