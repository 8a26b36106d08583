use cooklang_gateway::{extract_metadata, RecipeMetadata};

fn create_recipe_html(head: &str) -> String {
    format!(
        r#"
        <!DOCTYPE html>
        <html>
        <head>
            <title>Recipe Page</title>
            {head}
        </head>
        <body>
            <h1>Recipe</h1>
        </body>
        </html>
        "#
    )
}

fn json_ld(body: &str) -> String {
    format!(r#"<script type="application/ld+json">{body}</script>"#)
}

#[test]
fn test_inline_image_and_integer_yield() {
    let html = create_recipe_html(&json_ld(
        r#"{
            "@context": "https://schema.org",
            "@type": "Recipe",
            "name": "Easy Black Bean Soup",
            "image": "https://example.com/blackbean.jpg",
            "recipeYield": 6
        }"#,
    ));

    assert_eq!(
        extract_metadata(&html),
        RecipeMetadata {
            image: Some("https://example.com/blackbean.jpg".to_string()),
            servings: Some(6),
        }
    );
}

#[test]
fn test_yoast_style_graph() {
    // WordPress sites publish one @graph with the image referenced by @id
    let html = create_recipe_html(&json_ld(
        r##"{
            "@context": "https://schema.org",
            "@graph": [
                {"@type": "Article", "@id": "https://example.com/blt/#article"},
                {"@type": "WebPage", "@id": "https://example.com/blt/"},
                {
                    "@type": "ImageObject",
                    "@id": "https://example.com/blt/#primaryimage",
                    "contentUrl": "https://example.com/uploads/blt.jpg"
                },
                {
                    "@type": "Recipe",
                    "@id": "https://example.com/blt/#recipe",
                    "name": "BLT Pasta Salad",
                    "image": [{"@id": "https://example.com/blt/#primaryimage"}],
                    "recipeYield": ["8", "8 servings"]
                }
            ]
        }"##,
    ));

    let metadata = extract_metadata(&html);
    assert_eq!(
        metadata.image.as_deref(),
        Some("https://example.com/uploads/blt.jpg")
    );
    assert_eq!(metadata.servings, Some(8));
}

#[test]
fn test_malformed_json_ld_falls_back_to_open_graph() {
    for meta in [
        r#"<meta property="og:image" content="https://example.com/og.jpg">"#,
        r#"<meta content="https://example.com/og.jpg" property="og:image">"#,
    ] {
        let head = format!(
            "{}\n{}",
            json_ld(r#"{"@type": "Recipe", "recipeYield": "4",,, "#),
            meta
        );
        let metadata = extract_metadata(&create_recipe_html(&head));
        assert_eq!(
            metadata,
            RecipeMetadata {
                image: Some("https://example.com/og.jpg".to_string()),
                servings: None,
            }
        );
    }
}

#[test]
fn test_page_without_structured_data() {
    let html = create_recipe_html(r#"<meta name="description" content="Grandma's pie">"#);
    assert_eq!(extract_metadata(&html), RecipeMetadata::default());
}

#[test]
fn test_descriptive_yield() {
    let html = create_recipe_html(&json_ld(
        r#"{"@type": "Recipe", "recipeYield": "serves 4-6"}"#,
    ));
    assert_eq!(extract_metadata(&html).servings, Some(4));
}

#[test]
fn test_recipe_type_list() {
    let html = create_recipe_html(&json_ld(
        r#"{"@type": ["Thing", "Recipe"], "image": {"url": "https://example.com/inline.jpg"}}"#,
    ));
    assert_eq!(
        extract_metadata(&html).image.as_deref(),
        Some("https://example.com/inline.jpg")
    );
}

#[test]
fn test_json_ld_without_image_still_uses_open_graph() {
    let head = format!(
        "{}\n{}",
        json_ld(r#"{"@type": "Recipe", "recipeYield": "12 cookies"}"#),
        r#"<meta property="og:image" content="https://example.com/cookies.jpg" />"#
    );

    assert_eq!(
        extract_metadata(&create_recipe_html(&head)),
        RecipeMetadata {
            image: Some("https://example.com/cookies.jpg".to_string()),
            servings: Some(12),
        }
    );
}
