mod openai_client;
mod openai_embedder;
mod openai_endpoint;

pub use openai_client::OpenAiClient;
pub use openai_embedder::OpenAiEmbedder;
pub use openai_endpoint::{ApiProvider, OpenAiEndpoint};
