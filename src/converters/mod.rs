mod importer;
mod openrouter;
mod prompt;

pub use importer::ExternalImporter;
pub use openrouter::OpenRouterConverter;
pub use prompt::{PromptTemplate, COOKLANG_CONVERTER_PROMPT};

use crate::error::GatewayError;
use crate::model::RecipeSource;
use crate::providers::Provider;

/// A producer of raw Cooklang text.
#[async_trait::async_trait]
pub trait ConvertToCooklang: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    async fn convert(&self, source: &RecipeSource) -> Result<String, GatewayError>;
}

/// Which conversion path serves a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionStrategy {
    /// Prompt the remote chat-completion model
    RemoteModel,
    /// Run the external importer, forwarding the requested provider
    ExternalImporter { provider: Option<String> },
}

impl ConversionStrategy {
    /// Pick the strategy for one request.
    ///
    /// An explicit `openrouter` request always goes to the remote model. With
    /// no provider requested, a configured remote credential makes the remote
    /// model the default. Everything else runs the importer.
    pub fn select(requested: Option<&str>, remote_configured: bool) -> Self {
        let requested = requested.map(str::trim).filter(|p| !p.is_empty());

        match requested {
            Some(provider) if provider == Provider::OpenRouter.as_str() => {
                ConversionStrategy::RemoteModel
            }
            None if remote_configured => ConversionStrategy::RemoteModel,
            provider => ConversionStrategy::ExternalImporter {
                provider: provider.map(str::to_string),
            },
        }
    }
}
