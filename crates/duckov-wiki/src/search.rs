//! The site search filter.
//!
//! Runs over the flattened cross-category article list (guides, maps, mods,
//! tools, each date-descending). Matching is pure substring filtering with no
//! scoring: results keep the input order.

use serde::{Deserialize, Serialize};

use crate::content::{Article, Category};

/// The searchable projection of an article, also the row format of the
/// `search-index.json` emitted at build time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRecord {
    pub slug: String,
    pub category: Category,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub date: String,
}

impl From<&Article> for SearchRecord {
    fn from(article: &Article) -> Self {
        Self {
            slug: article.slug.clone(),
            category: article.category,
            title: article.title.clone(),
            description: article.description.clone(),
            tags: article.tags.clone(),
            image: article.image.clone(),
            date: article.date.clone(),
        }
    }
}

/// A record matches when *every* whitespace-separated term of the query
/// matches, each either as a raw lowercase substring of
/// `title + " " + description + " " + tags`, or with all non-alphanumeric
/// characters stripped from both sides. The stripped pass is what lets a
/// query for `ak47` find an article titled `AK-47 Guide`.
///
/// An empty or whitespace-only query returns nothing, not everything.
pub fn search<'a>(query: &str, records: &'a [SearchRecord]) -> Vec<&'a SearchRecord> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let raw_terms: Vec<String> = query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    let stripped_terms: Vec<String> = raw_terms.iter().map(|term| strip(term)).collect();

    records
        .iter()
        .filter(|record| {
            let haystack = format!(
                "{} {} {}",
                record.title.to_lowercase(),
                record.description.to_lowercase(),
                record.tags.join(" ").to_lowercase()
            );
            let stripped_haystack = strip(&haystack);

            raw_terms
                .iter()
                .zip(&stripped_terms)
                .all(|(raw, stripped)| {
                    haystack.contains(raw.as_str())
                        || (!stripped.is_empty() && stripped_haystack.contains(stripped.as_str()))
                })
        })
        .collect()
}

/// Lowercases and drops everything outside `[a-z0-9]`.
fn strip(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(slug: &str, title: &str, description: &str, tags: &[&str]) -> SearchRecord {
        SearchRecord {
            slug: slug.to_string(),
            category: Category::Guides,
            title: title.to_string(),
            description: description.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            image: None,
            date: "2024-01-01".to_string(),
        }
    }

    fn fixture() -> Vec<SearchRecord> {
        vec![
            record("ak47-guide", "AK-47 Guide", "Budget loadout breakdown", &["weapons"]),
            record("ground-zero", "Ground Zero Map", "All extraction points", &["maps", "exfil"]),
            record("ammo-chart", "Ammo Chart", "Damage and penetration data", &[]),
        ]
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let records = fixture();
        assert!(search("", &records).is_empty());
        assert!(search("   ", &records).is_empty());
    }

    #[test]
    fn test_raw_substring_match() {
        let records = fixture();
        let results = search("extraction", &records);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].slug, "ground-zero");
    }

    #[test]
    fn test_stripped_match_tolerates_punctuation() {
        let records = fixture();
        let results = search("ak47", &records);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].slug, "ak47-guide");
    }

    #[test]
    fn test_all_terms_must_match() {
        let records = fixture();
        assert_eq!(search("ammo damage", &records).len(), 1);
        assert!(search("ammo extraction", &records).is_empty());
    }

    #[test]
    fn test_tags_are_searched() {
        let records = fixture();
        let results = search("exfil", &records);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].slug, "ground-zero");
    }

    #[test]
    fn test_no_match() {
        let records = fixture();
        assert!(search("zz-nonexistent", &records).is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let records = fixture();
        // "a" appears in all three records.
        let results = search("a", &records);
        let slugs: Vec<&str> = results.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["ak47-guide", "ground-zero", "ammo-chart"]);
    }
}
