use serde::{Deserialize, Serialize};

/// Body of `POST /import/url`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportFromUrlRequest {
    pub url: String,
    #[serde(default)]
    pub provider: Option<String>,
}

/// Body of `POST /import/text`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportFromTextRequest {
    pub text: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
}

/// What a converter is asked to turn into Cooklang.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeSource {
    /// A recipe page address, handed to the importer as-is
    Url(String),
    /// Raw recipe text typed or pasted by the user
    Text(String),
    /// A fetched recipe page, only ever given to the remote model
    Html(String),
}

/// Image and serving count recovered from a recipe page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeMetadata {
    pub image: Option<String>,
    pub servings: Option<u32>,
}

impl RecipeMetadata {
    pub fn is_empty(&self) -> bool {
        self.image.is_none() && self.servings.is_none()
    }
}

/// Response body shared by both import endpoints.
///
/// Text imports never carry `image` or `servings`; absent fields are left
/// out of the JSON rather than sent as placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResponse {
    pub cooklang: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersResponse {
    pub providers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
