//! Preview image derivation for documents whose front-matter omits `image`.

use regex::Regex;
use std::sync::LazyLock;

static MD_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[.*?\]\((.*?)\)").unwrap());

static HTML_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<img[^>]+src=["']([^"']+)["']"#).unwrap());

/// First image referenced in the body. Markdown syntax wins over HTML syntax,
/// regardless of which one appears first in the document.
pub fn first_image(body: &str) -> Option<String> {
    if let Some(captures) = MD_IMAGE.captures(body) {
        return Some(captures[1].to_string());
    }

    HTML_IMAGE
        .captures(body)
        .map(|captures| captures[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_image() {
        assert_eq!(
            first_image("intro\n![map](maps/ground-zero.png)\n"),
            Some("maps/ground-zero.png".to_string())
        );
    }

    #[test]
    fn test_html_image() {
        assert_eq!(
            first_image(r#"<img class="w-full" src="bar.png" alt="x" />"#),
            Some("bar.png".to_string())
        );
    }

    #[test]
    fn test_markdown_beats_html() {
        let body = r#"<img src="bar.png"> then ![x](foo.png)"#;
        assert_eq!(first_image(body), Some("foo.png".to_string()));
    }

    #[test]
    fn test_no_image() {
        assert_eq!(first_image("just text"), None);
    }
}
