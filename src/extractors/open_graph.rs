use super::MetadataExtractor;
use crate::model::RecipeMetadata;
use log::debug;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta").expect("Invalid meta selector"));

/// Reads the Open Graph `og:image` meta tag.
///
/// Attributes are looked up on the parsed element, so `property` and
/// `content` may appear in either order.
pub struct OpenGraphExtractor;

impl MetadataExtractor for OpenGraphExtractor {
    fn extract(&self, document: &Html) -> RecipeMetadata {
        let image = document
            .select(&META_SELECTOR)
            .filter(|meta| {
                meta.value()
                    .attr("property")
                    .is_some_and(|property| property.trim().eq_ignore_ascii_case("og:image"))
            })
            .filter_map(|meta| meta.value().attr("content"))
            .map(str::trim)
            .find(|content| !content.is_empty())
            .map(str::to_string);

        debug!("OpenGraphExtractor: og:image = {:?}", image);

        RecipeMetadata {
            image,
            servings: None,
        }
    }
}
