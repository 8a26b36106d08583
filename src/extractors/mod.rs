use crate::model::RecipeMetadata;
use scraper::Html;

mod json_ld;
mod open_graph;

pub use json_ld::JsonLdExtractor;
pub use open_graph::OpenGraphExtractor;

/// A best-effort source of recipe metadata inside a parsed page.
///
/// Implementations never fail: anything they cannot read is reported as an
/// absent field.
pub trait MetadataExtractor {
    fn extract(&self, document: &Html) -> RecipeMetadata;
}

/// Recover the image and serving count of the recipe on a page.
///
/// JSON-LD structured data is authoritative. When it yields no image the
/// page's `og:image` meta tag is used instead.
pub fn extract_metadata(html: &str) -> RecipeMetadata {
    let document = Html::parse_document(html);

    let mut metadata = JsonLdExtractor.extract(&document);
    if metadata.image.is_none() {
        metadata.image = OpenGraphExtractor.extract(&document).image;
    }
    metadata
}
