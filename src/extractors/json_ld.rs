use super::MetadataExtractor;
use crate::model::RecipeMetadata;
use html_escape::decode_html_entities;
use log::debug;
use regex::Regex;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;

static SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script").expect("Invalid script selector"));

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("Invalid digit regex"));

/// Reads image and servings from `application/ld+json` blocks.
///
/// Each block is parsed on its own; a block that is not valid JSON is skipped.
/// Within a block only the first Recipe entity is consulted. Across blocks
/// the first value found for a field is kept.
pub struct JsonLdExtractor;

impl MetadataExtractor for JsonLdExtractor {
    fn extract(&self, document: &Html) -> RecipeMetadata {
        let mut metadata = RecipeMetadata::default();

        let blocks = document.select(&SCRIPT_SELECTOR).filter(|script| {
            script
                .value()
                .attr("type")
                .is_some_and(|kind| kind.trim().eq_ignore_ascii_case("application/ld+json"))
        });

        for (index, script) in blocks.enumerate() {
            let raw_json = script.text().collect::<String>();
            let json_ld = match serde_json::from_str::<Value>(&raw_json) {
                Ok(value) => value,
                Err(e) => {
                    debug!("JsonLdExtractor: Failed to parse JSON-LD {}: {}", index, e);
                    continue;
                }
            };

            let Some(found) = metadata_from_block(&json_ld) else {
                debug!("JsonLdExtractor: No recipe found in JSON-LD {}", index);
                continue;
            };
            debug!("JsonLdExtractor: JSON-LD {} yielded {:?}", index, found);

            if metadata.image.is_none() {
                metadata.image = found.image;
            }
            if metadata.servings.is_none() {
                metadata.servings = found.servings;
            }
        }

        metadata
    }
}

/// Metadata of the first Recipe entity in one parsed block, if there is one.
fn metadata_from_block(json_ld: &Value) -> Option<RecipeMetadata> {
    let candidates = flatten_candidates(json_ld);

    // First pass: index every entity by its `@id` so references can be followed.
    let by_id: HashMap<&str, &Value> = candidates
        .iter()
        .filter_map(|item| {
            item.get("@id")
                .and_then(Value::as_str)
                .map(|id| (id, *item))
        })
        .collect();

    // Second pass: only the first Recipe of the block counts.
    let recipe = candidates.iter().find(|item| is_recipe_type(item))?;

    Some(RecipeMetadata {
        image: recipe
            .get("image")
            .and_then(ImageRef::from_value)
            .and_then(|image| image.resolve(&by_id)),
        servings: recipe.get("recipeYield").and_then(parse_servings),
    })
}

/// Turn a top-level JSON-LD value into the ordered list of entities it holds.
fn flatten_candidates(json_ld: &Value) -> Vec<&Value> {
    match json_ld {
        Value::Array(items) => items.iter().collect(),
        Value::Object(object) => match object.get("@graph") {
            Some(Value::Array(graph)) => graph.iter().collect(),
            Some(graph @ Value::Object(_)) => vec![graph],
            _ => vec![json_ld],
        },
        _ => Vec::new(),
    }
}

fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(kind)) => kind.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(kinds)) => kinds
            .iter()
            .filter_map(Value::as_str)
            .any(|kind| kind.eq_ignore_ascii_case("recipe")),
        _ => false,
    }
}

#[derive(Debug, Default, Deserialize)]
struct ImageObject {
    #[serde(rename = "@id")]
    id: Option<String>,
    url: Option<Value>,
    #[serde(rename = "contentUrl")]
    content_url: Option<Value>,
}

impl ImageObject {
    fn best_url(&self) -> Option<String> {
        non_empty_str(self.url.as_ref()).or_else(|| non_empty_str(self.content_url.as_ref()))
    }
}

/// The shapes a recipe's `image` field takes once a list is reduced to its
/// first element.
#[derive(Debug)]
enum ImageRef {
    /// A bare URL string
    Direct(String),
    /// An object carrying an `@id`; the referenced entity wins if the block
    /// defines it, otherwise the object's own urls are used
    ByIdentifier { id: String, local: ImageObject },
    /// An object with no `@id`
    Inline(ImageObject),
}

impl ImageRef {
    fn from_value(value: &Value) -> Option<Self> {
        let value = match value {
            Value::Array(items) => items.first()?,
            other => other,
        };

        match value {
            Value::String(url) => Some(ImageRef::Direct(url.clone())),
            Value::Object(_) => {
                let object: ImageObject = serde_json::from_value(value.clone()).ok()?;
                match object.id.clone() {
                    Some(id) => Some(ImageRef::ByIdentifier { id, local: object }),
                    None => Some(ImageRef::Inline(object)),
                }
            }
            _ => None,
        }
    }

    fn resolve(self, by_id: &HashMap<&str, &Value>) -> Option<String> {
        let url = match self {
            ImageRef::Direct(url) => Some(url),
            ImageRef::ByIdentifier { id, local } => match by_id.get(id.as_str()) {
                Some(target) => serde_json::from_value::<ImageObject>((*target).clone())
                    .unwrap_or_default()
                    .best_url(),
                None => local.best_url(),
            },
            ImageRef::Inline(object) => object.best_url(),
        }?;

        let decoded = decode_html_symbols(url.trim());
        if decoded.is_empty() {
            None
        } else {
            Some(decoded)
        }
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn decode_html_symbols(text: &str) -> String {
    // Some sites double-encode entities inside JSON-LD
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

/// Serving count from a `recipeYield` value: the first run of digits in its
/// textual form. "serves 4-6" gives 4.
fn parse_servings(value: &Value) -> Option<u32> {
    let value = match value {
        Value::Array(items) => items.first()?,
        other => other,
    };

    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    let digits = DIGIT_RUN.find(&text)?;
    digits.as_str().parse::<u32>().ok().filter(|n| *n > 0)
}
