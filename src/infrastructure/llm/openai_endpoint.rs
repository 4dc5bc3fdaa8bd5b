use reqwest::{Client, RequestBuilder};
use serde::Deserialize;

const DEFAULT_AZURE_API_VERSION: &str = "2024-10-21";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiProvider {
    #[serde(rename = "openai")]
    OpenAi,
    Azure,
}

/// Connection details shared by every OpenAI-compatible adapter. Azure
/// deployments differ only in URL shape and auth header.
#[derive(Debug, Clone)]
pub struct OpenAiEndpoint {
    client: Client,
    provider: ApiProvider,
    base_url: String,
    api_key: String,
    api_version: String,
}

impl OpenAiEndpoint {
    pub fn new(client: Client, provider: ApiProvider, base_url: &str, api_key: String) -> Self {
        Self {
            client,
            provider,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            api_version: DEFAULT_AZURE_API_VERSION.to_string(),
        }
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// `model` doubles as the deployment name on Azure.
    pub fn url(&self, model: &str, path: &str) -> String {
        match self.provider {
            ApiProvider::OpenAi => format!("{}/{}", self.base_url, path),
            ApiProvider::Azure => format!(
                "{}/openai/deployments/{}/{}?api-version={}",
                self.base_url, model, path, self.api_version
            ),
        }
    }

    pub fn post(&self, model: &str, path: &str) -> RequestBuilder {
        let request = self.client.post(self.url(model, path));
        match self.provider {
            ApiProvider::OpenAi => request.bearer_auth(&self.api_key),
            ApiProvider::Azure => request.header("api-key", &self.api_key),
        }
    }
}
