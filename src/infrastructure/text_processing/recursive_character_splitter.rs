use async_trait::async_trait;

use crate::application::ports::{TextSplitter, TextSplitterError};
use crate::domain::{Chunk, Document};

/// Fixed-width character windows with overlap. Whitespace-only windows are
/// dropped.
pub struct RecursiveCharacterSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveCharacterSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            chunk_overlap,
        }
    }
}

#[async_trait]
impl TextSplitter for RecursiveCharacterSplitter {
    async fn split(
        &self,
        text: &str,
        document: &Document,
        page: Option<u32>,
    ) -> Result<Vec<Chunk>, TextSplitterError> {
        let mut chunks = Vec::new();
        let chars: Vec<char> = text.chars().collect();
        let total_len = chars.len();

        let step = if self.chunk_size > self.chunk_overlap {
            self.chunk_size - self.chunk_overlap
        } else {
            self.chunk_size
        };

        let mut offset = 0;
        while offset < total_len {
            let end = (offset + self.chunk_size).min(total_len);
            let chunk_text: String = chars[offset..end].iter().collect();

            if !chunk_text.trim().is_empty() {
                chunks.push(Chunk::new(
                    chunk_text,
                    document.id,
                    document.filename.clone(),
                    page,
                    offset,
                ));
            }

            if end == total_len {
                break;
            }
            offset += step;
        }

        Ok(chunks)
    }
}
