use std::sync::Arc;

use serde::Deserialize;

use crate::application::ports::{TextSplitter, TextSplitterError};

use super::{RecursiveCharacterSplitter, TokenTextSplitter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkingStrategy {
    Token,
    Character,
}

#[derive(Debug, Clone)]
pub struct ChunkingOptions {
    pub strategy: ChunkingStrategy,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub min_chunk_size_chars: usize,
    pub min_chunk_length_to_embed: usize,
    pub max_num_chunks: usize,
}

pub struct TextSplitterFactory;

impl TextSplitterFactory {
    pub fn create(options: &ChunkingOptions) -> Result<Arc<dyn TextSplitter>, TextSplitterError> {
        match options.strategy {
            ChunkingStrategy::Token => Ok(Arc::new(TokenTextSplitter::new(
                options.chunk_size,
                options.min_chunk_size_chars,
                options.min_chunk_length_to_embed,
                options.max_num_chunks,
            )?)),
            ChunkingStrategy::Character => Ok(Arc::new(RecursiveCharacterSplitter::new(
                options.chunk_size,
                options.chunk_overlap,
            ))),
        }
    }
}
