use crate::error::GatewayError;
use std::path::Path;

/// The default prompt template for converting recipes to Cooklang format.
///
/// The prompt is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax.
///
/// Contains a `{recipe_text}` placeholder that is replaced with the raw
/// recipe text or fetched page.
pub const COOKLANG_CONVERTER_PROMPT: &str = include_str!("prompt.txt");

const PLACEHOLDER: &str = "{recipe_text}";

/// Instructional prompt sent to the remote model.
///
/// The wording is configuration: a deployment may point `prompt_file` at its
/// own template without touching the conversion pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            template: COOKLANG_CONVERTER_PROMPT.to_string(),
        }
    }
}

impl PromptTemplate {
    /// Wrap a template string. It must contain `{recipe_text}`.
    pub fn new(template: impl Into<String>) -> Result<Self, GatewayError> {
        let template = template.into();
        if !template.contains(PLACEHOLDER) {
            return Err(GatewayError::configuration(format!(
                "Prompt template is missing the {PLACEHOLDER} placeholder"
            )));
        }
        Ok(Self { template })
    }

    /// Read a template from disk.
    pub fn from_file(path: &Path) -> Result<Self, GatewayError> {
        let template = std::fs::read_to_string(path).map_err(|e| {
            GatewayError::configuration(format!(
                "Failed to read prompt template {}: {e}",
                path.display()
            ))
        })?;
        Self::new(template)
    }

    /// Fill the template with the recipe.
    pub fn render(&self, recipe_text: &str) -> String {
        self.template.replace(PLACEHOLDER, recipe_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_embedded() {
        assert!(!COOKLANG_CONVERTER_PROMPT.is_empty());

        // Verify it contains key Cooklang syntax elements
        assert!(COOKLANG_CONVERTER_PROMPT.contains("Cooklang"));
        assert!(COOKLANG_CONVERTER_PROMPT.contains("@flour{2%cups}"));
        assert!(COOKLANG_CONVERTER_PROMPT.contains("#cookware{}"));
        assert!(COOKLANG_CONVERTER_PROMPT.contains("~timer{time%unit}"));
        assert!(COOKLANG_CONVERTER_PROMPT.contains(PLACEHOLDER));
    }

    #[test]
    fn test_render_injects_recipe() {
        let prompt = PromptTemplate::default().render("2 eggs, beaten");
        assert!(prompt.contains("Recipe:\n2 eggs, beaten\n"));
        assert!(!prompt.contains(PLACEHOLDER));
        // Literal Cooklang braces survive rendering
        assert!(prompt.contains("@eggs{3}"));
    }

    #[test]
    fn test_custom_template() {
        let template = PromptTemplate::new("Cooklang please:\n{recipe_text}").unwrap();
        assert_eq!(template.render("toast"), "Cooklang please:\ntoast");
    }

    #[test]
    fn test_template_without_placeholder_is_rejected() {
        let result = PromptTemplate::new("Convert the recipe.");
        assert!(matches!(result, Err(GatewayError::Configuration(_))));
    }

    #[test]
    fn test_missing_template_file() {
        let result = PromptTemplate::from_file(Path::new("/nonexistent/prompt.txt"));
        assert!(matches!(result, Err(GatewayError::Configuration(_))));
    }
}
