use super::{ConvertToCooklang, PromptTemplate};
use crate::config::OpenRouterConfig;
use crate::error::GatewayError;
use crate::model::RecipeSource;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;

/// Converts recipes by prompting an OpenRouter chat-completion model.
pub struct OpenRouterConverter {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    max_tokens: u32,
    prompt: PromptTemplate,
}

impl OpenRouterConverter {
    /// Create a converter from configuration
    ///
    /// A missing API key is not an error here: the converter is still built
    /// and every conversion reports the missing key instead.
    pub fn new(config: &OpenRouterConfig) -> Result<Self, GatewayError> {
        let prompt = match &config.prompt_file {
            Some(path) => PromptTemplate::from_file(path)?,
            None => PromptTemplate::default(),
        };

        Ok(OpenRouterConverter {
            client: build_client(config.timeout())?,
            api_key: config.api_key().map(str::to_string),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            prompt,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(
        api_key: Option<String>,
        base_url: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        Ok(OpenRouterConverter {
            client: build_client(timeout)?,
            api_key,
            base_url,
            model,
            max_tokens: 4096,
            prompt: PromptTemplate::default(),
        })
    }

    /// Whether a credential is available.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

fn build_client(timeout: Duration) -> Result<Client, GatewayError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| GatewayError::configuration(format!("Failed to create HTTP client: {e}")))
}

fn request_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout("OpenRouter request timed out".to_string())
    } else {
        GatewayError::upstream(500, format!("OpenRouter error: {e}"))
    }
}

#[async_trait]
impl ConvertToCooklang for OpenRouterConverter {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn convert(&self, source: &RecipeSource) -> Result<String, GatewayError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| GatewayError::configuration("OPENROUTER_API_KEY not configured"))?;

        let recipe_text = match source {
            RecipeSource::Url(text) | RecipeSource::Text(text) | RecipeSource::Html(text) => text,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "user", "content": self.prompt.render(recipe_text)}
                ],
                "max_tokens": self.max_tokens
            }))
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!("OpenRouter returned {}: {}", status, body);
            return Err(GatewayError::upstream(
                500,
                format!("OpenRouter error: {body}"),
            ));
        }

        let response_body: Value = response.json().await.map_err(request_error)?;
        debug!("OpenRouter response: {:?}", response_body);

        let cooklang_recipe = response_body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                GatewayError::upstream(500, "OpenRouter error: response contained no message")
            })?
            .to_string();

        Ok(cooklang_recipe)
    }
}
