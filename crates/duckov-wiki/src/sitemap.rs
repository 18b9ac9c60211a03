//! Sitemap generation.
//!
//! Enumerates every locale × route combination the site publishes: the home
//! page, the four category hubs, the static info pages, and every article.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::content::{Article, Category};
use crate::errors::BuildError;
use crate::i18n::Locale;

/// The static informational routes, present under every locale prefix.
pub const INFO_PAGES: [&str; 5] = ["about", "contact", "privacy", "terms", "disclaimer"];

/// Change frequency values for sitemap entries.
///
/// See: https://www.sitemaps.org/protocol.html#changefreqdef for more details.
/// This property is often ignored by search engines nowadays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    fn as_str(&self) -> &str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }
}

/// Represents a single URL entry in the sitemap.
#[derive(Debug)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<String>,
    pub changefreq: Option<ChangeFreq>,
    pub priority: Option<f32>,
}

impl SitemapEntry {
    fn to_xml(&self) -> String {
        let mut xml = String::from("<url>");
        xml.push_str(&format!("<loc>{}</loc>", escape_xml(&self.loc)));

        if let Some(ref lastmod) = self.lastmod {
            xml.push_str(&format!("<lastmod>{}</lastmod>", lastmod));
        }

        if let Some(changefreq) = self.changefreq {
            xml.push_str(&format!("<changefreq>{}</changefreq>", changefreq.as_str()));
        }

        if let Some(priority) = self.priority {
            xml.push_str(&format!("<priority>{:.1}</priority>", priority));
        }

        xml.push_str("</url>");
        xml
    }
}

/// Escapes XML special characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Builds the full URL inventory for both locales. Article listings are
/// passed in so callers that already loaded them do not parse twice.
pub fn collect_entries(articles: &[Article], base_url: &str) -> Vec<SitemapEntry> {
    let base_url = base_url.trim_end_matches('/');
    let mut entries = Vec::new();

    for locale in Locale::ALL {
        entries.push(SitemapEntry {
            loc: format!("{}/{}", base_url, locale),
            lastmod: None,
            changefreq: Some(ChangeFreq::Daily),
            priority: Some(1.0),
        });

        for category in Category::ALL {
            entries.push(SitemapEntry {
                loc: format!("{}/{}/{}", base_url, locale, category),
                lastmod: None,
                changefreq: Some(ChangeFreq::Daily),
                priority: Some(0.9),
            });
        }

        for page in INFO_PAGES {
            entries.push(SitemapEntry {
                loc: format!("{}/{}/{}", base_url, locale, page),
                lastmod: None,
                changefreq: Some(ChangeFreq::Monthly),
                priority: Some(0.3),
            });
        }

    }

    for article in articles {
        entries.push(SitemapEntry {
            loc: format!(
                "{}/{}/{}/{}",
                base_url, article.locale, article.category, article.slug
            ),
            lastmod: Some(article.date.clone()),
            changefreq: Some(ChangeFreq::Weekly),
            priority: Some(0.8),
        });
    }

    entries
}

/// Writes a single sitemap file. The wiki is nowhere near the 50k URL limit
/// where a sitemap index would become necessary.
pub fn write_sitemap(
    entries: Vec<SitemapEntry>,
    output_dir: &Path,
    filename: &str,
) -> Result<(), BuildError> {
    // Sort entries by URL for consistency
    let mut sorted_entries = entries;
    sorted_entries.sort_by(|a, b| a.loc.cmp(&b.loc));

    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">");

    for entry in &sorted_entries {
        xml.push_str(&entry.to_xml());
    }

    xml.push_str("</urlset>");

    let path = output_dir.join(filename);
    let write = |path: &Path| -> std::io::Result<()> {
        let mut file = fs::File::create(path)?;
        file.write_all(xml.as_bytes())
    };

    write(&path).map_err(|source| BuildError::WriteFailed {
        path: path.clone(),
        source,
    })?;

    log::info!(
        target: "sitemap",
        "Generated sitemap with {} URLs at {}",
        sorted_entries.len(),
        path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("a&b"), "a&amp;b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(
            escape_xml("it's \"quoted\""),
            "it&apos;s &quot;quoted&quot;"
        );
    }

    #[test]
    fn test_changefreq_as_str() {
        assert_eq!(ChangeFreq::Always.as_str(), "always");
        assert_eq!(ChangeFreq::Daily.as_str(), "daily");
        assert_eq!(ChangeFreq::Never.as_str(), "never");
    }

    #[test]
    fn test_sitemap_entry_to_xml() {
        let entry = SitemapEntry {
            loc: "https://example.com/page".to_string(),
            lastmod: Some("2024-01-01".to_string()),
            changefreq: Some(ChangeFreq::Weekly),
            priority: Some(0.8),
        };

        let xml = entry.to_xml();
        assert!(xml.contains("<loc>https://example.com/page</loc>"));
        assert!(xml.contains("<lastmod>2024-01-01</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.8</priority>"));
    }

    #[test]
    fn test_sitemap_entry_minimal() {
        let entry = SitemapEntry {
            loc: "https://example.com/".to_string(),
            lastmod: None,
            changefreq: None,
            priority: None,
        };

        let xml = entry.to_xml();
        assert!(xml.contains("<loc>https://example.com/</loc>"));
        assert!(!xml.contains("<lastmod>"));
        assert!(!xml.contains("<changefreq>"));
        assert!(!xml.contains("<priority>"));
    }

    #[test]
    fn test_collect_entries_covers_all_static_routes() {
        // No articles: only home, hubs, and info pages remain.
        let entries = collect_entries(&[], "https://duckovwiki.example/");
        // Per locale: 1 home + 4 hubs + 5 info pages.
        assert_eq!(entries.len(), 2 * (1 + 4 + 5));
        assert!(entries.iter().any(|e| e.loc == "https://duckovwiki.example/en"));
        assert!(
            entries
                .iter()
                .any(|e| e.loc == "https://duckovwiki.example/zh/guides")
        );
        assert!(
            entries
                .iter()
                .any(|e| e.loc == "https://duckovwiki.example/en/disclaimer")
        );
    }

    #[test]
    fn test_collect_entries_includes_passed_articles() {
        let article = Article {
            slug: "ak47".to_string(),
            locale: Locale::En,
            category: Category::Guides,
            title: "AK-47 Guide".to_string(),
            description: "Budget loadout".to_string(),
            date: "2024-03-01".to_string(),
            sort_key: chrono::Utc::now(),
            subcategory: None,
            tags: Vec::new(),
            image: None,
            headings: Vec::new(),
            html: String::new(),
            raw_body: String::new(),
            seo_title: None,
            seo_description: None,
            seo_keywords: None,
            schema_type: None,
            schema_data: None,
        };

        let entries = collect_entries(
            std::slice::from_ref(&article),
            "https://duckovwiki.example",
        );
        assert_eq!(entries.len(), 2 * (1 + 4 + 5) + 1);

        let entry = entries
            .iter()
            .find(|e| e.loc == "https://duckovwiki.example/en/guides/ak47")
            .unwrap();
        assert_eq!(entry.lastmod.as_deref(), Some("2024-03-01"));
        assert_eq!(entry.changefreq, Some(ChangeFreq::Weekly));
    }

    #[test]
    fn test_write_sitemap_sorts_by_loc() {
        let dir = tempfile::tempdir().unwrap();
        let entries = vec![
            SitemapEntry {
                loc: "https://example.com/b".to_string(),
                lastmod: None,
                changefreq: None,
                priority: None,
            },
            SitemapEntry {
                loc: "https://example.com/a".to_string(),
                lastmod: None,
                changefreq: None,
                priority: None,
            },
        ];

        write_sitemap(entries, dir.path(), "sitemap.xml").unwrap();

        let xml = std::fs::read_to_string(dir.path().join("sitemap.xml")).unwrap();
        let a = xml.find("https://example.com/a").unwrap();
        let b = xml.find("https://example.com/b").unwrap();
        assert!(a < b);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    }
}
