//! Table-of-contents extraction.
//!
//! A line-oriented scan over the raw document body for `## text` and
//! `### text`. Level-1 headings are ignored on purpose: the page title comes
//! from front-matter, never from the body.

use serde::Serialize;

use super::slugger::Slugger;

/// A level-2 or level-3 heading of a document, with its anchor slug.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
    pub slug: String,
}

pub fn extract_headings(body: &str) -> Vec<Heading> {
    let mut slugger = Slugger::new();
    let mut headings = Vec::new();

    for line in body.lines() {
        let hashes = line.chars().take_while(|&c| c == '#').count();
        if !(2..=3).contains(&hashes) {
            continue;
        }

        let rest = &line[hashes..];
        // `##text` is not a heading, there must be whitespace after the markers.
        if !rest.starts_with(|c: char| c.is_whitespace()) {
            continue;
        }

        let text = rest.trim();
        if text.is_empty() {
            continue;
        }

        let slug = slugger.slugify(text);
        headings.push(Heading {
            level: hashes as u8,
            text: text.to_string(),
            slug,
        });
    }

    headings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_levels_two_and_three() {
        let body = "# Title\n## Alpha\ntext\n### Beta\n#### Deep";
        let headings = extract_headings(body);

        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0].level, 2);
        assert_eq!(headings[0].text, "Alpha");
        assert_eq!(headings[0].slug, "alpha");
        assert_eq!(headings[1].level, 3);
        assert_eq!(headings[1].text, "Beta");
    }

    #[test]
    fn test_duplicate_headings_get_unique_slugs() {
        let body = "## Alpha\n\n## Alpha";
        let headings = extract_headings(body);

        assert_eq!(headings[0].slug, "alpha");
        assert_eq!(headings[1].slug, "alpha-1");
    }

    #[test]
    fn test_requires_space_after_markers() {
        let headings = extract_headings("##NotAHeading\n## Real");
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].text, "Real");
    }

    #[test]
    fn test_ignores_empty_heading() {
        assert!(extract_headings("##   \n").is_empty());
    }
}
