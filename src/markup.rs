//! Clean-up of converter output.

use crate::error::GatewayError;

const FENCE: &str = "```";

/// Remove a markdown code fence wrapped around the whole document.
///
/// Only an opening fence on the first line (with an optional language tag)
/// and a closing fence on the last line are removed. Fences inside the
/// document are left alone.
pub fn strip_code_fences(text: &str) -> String {
    let mut body = text.trim();

    if body.starts_with(FENCE) {
        let opening_line = body.lines().next().unwrap_or_default();
        if is_opening_fence(opening_line) {
            body = body
                .split_once('\n')
                .map(|(_, rest)| rest)
                .unwrap_or_default();
        }
    }

    let trimmed = body.trim_end();
    match trimmed.rsplit_once('\n') {
        Some((rest, last)) if last.trim() == FENCE => body = rest,
        None if trimmed.trim() == FENCE => body = "",
        _ => {}
    }

    body.trim().to_string()
}

fn is_opening_fence(line: &str) -> bool {
    line.trim()
        .strip_prefix(FENCE)
        .map(str::trim)
        .is_some_and(|tag| !tag.contains(char::is_whitespace) && !tag.contains('`'))
}

/// Title from the first `title:` or `>> title:` line, trimmed.
pub fn extract_title(markup: &str) -> Option<String> {
    markup
        .lines()
        .find(|line| line.starts_with(">> title:") || line.starts_with("title:"))
        .and_then(|line| line.split_once(':'))
        .map(|(_, value)| value.trim().to_string())
}

/// Strip fences and reject output that is empty afterwards.
pub fn normalize(raw: &str) -> Result<String, GatewayError> {
    let markup = strip_code_fences(raw);
    if markup.is_empty() {
        return Err(GatewayError::EmptyOutput);
    }
    Ok(markup)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fenced_with_language() {
        let raw = "```cooklang\n---\ntitle: Soup\n---\nBoil @water{1%l}.\n```\n";
        assert_eq!(
            strip_code_fences(raw),
            "---\ntitle: Soup\n---\nBoil @water{1%l}."
        );
    }

    #[test]
    fn test_strip_fence_with_spaced_language() {
        assert_eq!(
            strip_code_fences("``` cooklang\nSimmer @beans{400%g}.\n```"),
            "Simmer @beans{400%g}."
        );
        assert_eq!(
            strip_code_fences("``` two words\n@oil\n```"),
            "``` two words\n@oil"
        );
    }

    #[test]
    fn test_strip_bare_fence() {
        assert_eq!(strip_code_fences("  ```\n@eggs{2}\n```  "), "@eggs{2}");
    }

    #[test]
    fn test_unfenced_text_is_only_trimmed() {
        assert_eq!(strip_code_fences("\n  @salt and #pot{}\n"), "@salt and #pot{}");
    }

    #[test]
    fn test_inner_fences_are_kept() {
        let raw = "Step one.\n```\nnot a wrapper\n```\nStep two.";
        assert_eq!(strip_code_fences(raw), raw);
    }

    #[test]
    fn test_only_opening_fence() {
        assert_eq!(strip_code_fences("```text\nMix @flour{200%g}."), "Mix @flour{200%g}.");
    }

    #[test]
    fn test_only_closing_fence() {
        assert_eq!(strip_code_fences("Mix @flour{200%g}.\n```"), "Mix @flour{200%g}.");
    }

    #[test]
    fn test_strip_is_idempotent() {
        let inputs = [
            "```cooklang\n>> title: Pie\nBake ~{30%minutes}.\n```",
            "plain @butter{50%g}",
            "```\n\n```",
            "",
            "   ```md\nStep.\n```\n\n",
        ];
        for input in inputs {
            let once = strip_code_fences(input);
            assert_eq!(strip_code_fences(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_extract_title_plain() {
        assert_eq!(
            extract_title("title: Pasta Carbonara\n@spaghetti{400%g}"),
            Some("Pasta Carbonara".to_string())
        );
    }

    #[test]
    fn test_extract_title_metadata_block() {
        let markup = ">> servings: 4\n>> title:  Lemon: Tart \nZest @lemon{1}.";
        assert_eq!(extract_title(markup), Some("Lemon: Tart".to_string()));
    }

    #[test]
    fn test_extract_title_inside_front_matter() {
        let markup = "---\ntitle: Shakshuka\nservings: 2\n---\nCrack @eggs{4}.";
        assert_eq!(extract_title(markup), Some("Shakshuka".to_string()));
    }

    #[test]
    fn test_extract_title_absent() {
        assert_eq!(extract_title("Boil @water{1%l}.\nsubtitle: no"), None);
        assert_eq!(extract_title(""), None);
    }

    #[test]
    fn test_normalize_rejects_empty_output() {
        assert!(matches!(normalize("```\n```"), Err(GatewayError::EmptyOutput)));
        assert!(matches!(normalize("   "), Err(GatewayError::EmptyOutput)));
        assert_eq!(normalize("```\n@salt\n```").unwrap(), "@salt");
    }
}
