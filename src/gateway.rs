//! Request orchestration: fetch, convert, normalize, extract, assemble.

use crate::config::GatewayConfig;
use crate::converters::{
    ConversionStrategy, ConvertToCooklang, ExternalImporter, OpenRouterConverter,
};
use crate::error::GatewayError;
use crate::extractors::extract_metadata;
use crate::fetcher::PageFetcher;
use crate::markup::{extract_title, normalize};
use crate::model::{ImportFromTextRequest, ImportFromUrlRequest, ImportResponse, RecipeSource};
use crate::providers::ProviderCredentials;
use log::{debug, info};

/// Everything a request needs, built once at startup and shared read-only.
pub struct Gateway {
    fetcher: PageFetcher,
    importer: ExternalImporter,
    remote: OpenRouterConverter,
    credentials: ProviderCredentials,
}

impl Gateway {
    pub fn new(
        fetcher: PageFetcher,
        importer: ExternalImporter,
        remote: OpenRouterConverter,
        credentials: ProviderCredentials,
    ) -> Self {
        Gateway {
            fetcher,
            importer,
            remote,
            credentials,
        }
    }

    /// Build the gateway from configuration and the process environment.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let remote = OpenRouterConverter::new(&config.openrouter)?;
        let mut credentials = ProviderCredentials::from_env();
        if remote.is_configured() {
            credentials = credentials.with_openrouter();
        }

        Ok(Self::new(
            PageFetcher::new(&config.fetch)?,
            ExternalImporter::from_config(&config.importer),
            remote,
            credentials,
        ))
    }

    /// Import a recipe page.
    ///
    /// On the remote-model path the page is fetched once and the same HTML
    /// feeds both the prompt and metadata extraction. The importer fetches
    /// pages itself, so that path reports no image or servings.
    pub async fn import_url(
        &self,
        request: ImportFromUrlRequest,
    ) -> Result<ImportResponse, GatewayError> {
        let strategy = self.strategy(request.provider.as_deref());
        info!("Importing {} via {:?}", request.url, strategy);

        let (cooklang, metadata) = match strategy {
            ConversionStrategy::RemoteModel => {
                let html = self.fetcher.fetch(&request.url).await?;
                let metadata = extract_metadata(&html);
                if metadata.is_empty() {
                    debug!("No image or servings found on {}", request.url);
                } else {
                    debug!("Metadata for {}: {:?}", request.url, metadata);
                }

                let cooklang = self.run(&self.remote, &RecipeSource::Html(html)).await?;
                (cooklang, metadata)
            }
            ConversionStrategy::ExternalImporter { provider } => {
                let importer = self.importer.for_provider(provider);
                let cooklang = self.run(&importer, &RecipeSource::Url(request.url)).await?;
                (cooklang, Default::default())
            }
        };

        Ok(ImportResponse {
            title: extract_title(&cooklang),
            cooklang,
            image: metadata.image,
            servings: metadata.servings,
        })
    }

    /// Import raw recipe text. A caller-supplied title wins over one found
    /// in the generated markup.
    pub async fn import_text(
        &self,
        request: ImportFromTextRequest,
    ) -> Result<ImportResponse, GatewayError> {
        let strategy = self.strategy(request.provider.as_deref());
        info!("Importing {} bytes of text via {:?}", request.text.len(), strategy);

        let source = RecipeSource::Text(request.text);
        let cooklang = match strategy {
            ConversionStrategy::RemoteModel => self.run(&self.remote, &source).await?,
            ConversionStrategy::ExternalImporter { provider } => {
                self.run(&self.importer.for_provider(provider), &source).await?
            }
        };

        let title = request
            .title
            .filter(|title| !title.trim().is_empty())
            .or_else(|| extract_title(&cooklang));

        Ok(ImportResponse {
            cooklang,
            title,
            ..Default::default()
        })
    }

    /// Providers with a configured credential, plus the local one.
    pub fn providers(&self) -> Vec<String> {
        self.credentials.names()
    }

    fn strategy(&self, requested: Option<&str>) -> ConversionStrategy {
        ConversionStrategy::select(requested, self.remote.is_configured())
    }

    async fn run(
        &self,
        converter: &dyn ConvertToCooklang,
        source: &RecipeSource,
    ) -> Result<String, GatewayError> {
        let raw = converter.convert(source).await?;
        debug!("{} returned {} bytes", converter.name(), raw.len());
        normalize(&raw)
    }
}
