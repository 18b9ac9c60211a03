//! Content loading for the wiki.
//!
//! The markdown tree under `content/` is scanned once into an immutable
//! [`ContentIndex`] keyed by `(locale, category, slug)`. Articles are derived,
//! read-only records: every load re-reads the source file, parses its YAML
//! front-matter, and recomputes headings, preview image, and subcategory.
//! There is no write path and no runtime cache invalidation to get wrong.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use glob::glob;
use log::warn;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

pub mod headings;
mod image;
mod slugger;

pub use headings::Heading;
pub use slugger::Slugger;

use crate::errors::ContentError;
use crate::i18n::Locale;

/// The four fixed content buckets. The category of an article comes from its
/// directory, never from front-matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Guides,
    Maps,
    Mods,
    Tools,
}

impl Category {
    /// Also the aggregation order of cross-category listings, e.g. the search
    /// index.
    pub const ALL: [Category; 4] = [
        Category::Guides,
        Category::Maps,
        Category::Mods,
        Category::Tools,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Guides => "guides",
            Category::Maps => "maps",
            Category::Mods => "mods",
            Category::Tools => "tools",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guides" => Ok(Category::Guides),
            "maps" => Ok(Category::Maps),
            "mods" => Ok(Category::Mods),
            "tools" => Ok(Category::Tools),
            _ => Err(()),
        }
    }
}

/// The YAML front-matter block of a document. Keys are camelCase in the
/// source files.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleFrontmatter {
    pub title: String,
    pub description: String,
    pub date: Option<String>,
    pub subcategory: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub image: Option<String>,

    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<Vec<String>>,
    pub schema_type: Option<String>,
    pub schema_data: Option<serde_yaml::Value>,
}

/// A normalized, read-only content record. Belongs to exactly one
/// (locale, category); its slug is unique within that pairing.
#[derive(Debug, Clone)]
pub struct Article {
    pub slug: String,
    pub locale: Locale,
    pub category: Category,
    pub title: String,
    pub description: String,
    /// The date as written in front-matter, or the load time when absent.
    pub date: String,
    pub(crate) sort_key: DateTime<Utc>,
    pub subcategory: Option<String>,
    pub tags: Vec<String>,
    pub image: Option<String>,
    /// Empty for summary loads; category listings never need the TOC.
    pub headings: Vec<Heading>,
    /// Rendered body HTML, empty for summary loads.
    pub html: String,
    pub raw_body: String,

    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<Vec<String>>,
    pub schema_type: Option<String>,
    pub schema_data: Option<serde_yaml::Value>,
}

/// One row of the build-time content manifest.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub locale: Locale,
    pub category: Category,
    pub subfolder: Option<String>,
    pub slug: String,
    pub path: PathBuf,
}

/// Immutable manifest of every content document, built by directory
/// traversal. Lookups go through this table, never through the filesystem.
pub struct ContentIndex {
    entries: Vec<IndexEntry>,
}

impl ContentIndex {
    /// Walks `{root}/{locale}/{category}[/{subfolder}]/{slug}.mdx` and builds
    /// the manifest. A slug appearing twice within one (locale, category) is a
    /// configuration error and fails the whole scan.
    pub fn scan(root: &Path) -> Result<Self, ContentError> {
        if !root.is_dir() {
            warn!(target: "content", "Content root {} does not exist", root.display());
            return Ok(Self { entries: vec![] });
        }

        let pattern = root.join("**").join("*.mdx");
        let paths = glob(&pattern.to_string_lossy()).map_err(|source| {
            ContentError::InvalidPattern {
                path: pattern.clone(),
                source,
            }
        })?;

        let mut entries: Vec<IndexEntry> = Vec::new();
        let mut seen: FxHashMap<(Locale, Category, String), usize> = FxHashMap::default();

        for path in paths {
            let path = match path {
                Ok(path) => path,
                Err(err) => {
                    warn!(target: "content", "Skipping unreadable path: {}", err);
                    continue;
                }
            };

            let Some(entry) = index_entry_from_path(root, &path) else {
                continue;
            };

            let key = (entry.locale, entry.category, entry.slug.clone());
            if let Some(&existing) = seen.get(&key) {
                return Err(ContentError::DuplicateSlug {
                    slug: entry.slug,
                    locale: entry.locale,
                    category: entry.category,
                    first: entries[existing].path.clone(),
                    second: entry.path,
                });
            }

            seen.insert(key, entries.len());
            entries.push(entry);
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn entry(&self, locale: Locale, category: Category, slug: &str) -> Option<&IndexEntry> {
        self.entries
            .iter()
            .find(|entry| entry.locale == locale && entry.category == category && entry.slug == slug)
    }

    /// Loads one article in full (headings and rendered body included).
    /// `Ok(None)` is the normal not-found outcome; the caller decides what a
    /// missing article means (usually a 404).
    pub fn article_by_slug(
        &self,
        locale: Locale,
        category: Category,
        slug: &str,
    ) -> Result<Option<Article>, ContentError> {
        match self.entry(locale, category, slug) {
            Some(entry) => load_article(entry, true).map(Some),
            None => Ok(None),
        }
    }

    /// Every article of one (locale, category), date-descending, ties stable
    /// in traversal order. Summary loads only: no headings, no rendered body.
    ///
    /// A document that fails to parse is logged and excluded; it never aborts
    /// the rest of the listing.
    pub fn articles(&self, locale: Locale, category: Category) -> Vec<Article> {
        let mut articles: Vec<Article> = Vec::new();

        for entry in self
            .entries
            .iter()
            .filter(|entry| entry.locale == locale && entry.category == category)
        {
            match load_article(entry, false) {
                Ok(article) => articles.push(article),
                Err(err) => {
                    warn!(target: "content", "Skipping {}: {}", entry.path.display(), err);
                }
            }
        }

        articles.sort_by(|a, b| b.sort_key.cmp(&a.sort_key));
        articles
    }

    /// The flattened cross-category list for one locale, in the fixed
    /// aggregation order guides, maps, mods, tools.
    pub fn all_articles(&self, locale: Locale) -> Vec<Article> {
        Category::ALL
            .iter()
            .flat_map(|&category| self.articles(locale, category))
            .collect()
    }
}

/// Prev/next navigation over a date-descending listing. "Previous" is the
/// chronologically *newer* neighbor and "next" the older one, matching the
/// reading direction of the listing rather than the calendar.
pub fn prev_next<'a>(
    articles: &'a [Article],
    slug: &str,
) -> (Option<&'a Article>, Option<&'a Article>) {
    let Some(index) = articles.iter().position(|article| article.slug == slug) else {
        return (None, None);
    };

    let previous = index.checked_sub(1).map(|i| &articles[i]);
    let next = articles.get(index + 1);
    (previous, next)
}

fn index_entry_from_path(root: &Path, path: &Path) -> Option<IndexEntry> {
    let relative = path.strip_prefix(root).ok()?;
    let components: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if components.len() < 3 {
        warn!(target: "content", "Ignoring {}: not under a locale/category directory", path.display());
        return None;
    }

    let locale = match components[0].parse::<Locale>() {
        Ok(locale) => locale,
        Err(()) => {
            warn!(target: "content", "Ignoring {}: unknown locale `{}`", path.display(), components[0]);
            return None;
        }
    };

    let category = match components[1].parse::<Category>() {
        Ok(category) => category,
        Err(()) => {
            warn!(target: "content", "Ignoring {}: unknown category `{}`", path.display(), components[1]);
            return None;
        }
    };

    // Only the first directory below the category acts as a subfolder.
    let subfolder = if components.len() > 3 {
        Some(components[2].clone())
    } else {
        None
    };

    let slug = path.file_stem()?.to_string_lossy().into_owned();

    Some(IndexEntry {
        locale,
        category,
        subfolder,
        slug,
        path: path.to_path_buf(),
    })
}

fn load_article(entry: &IndexEntry, render_body: bool) -> Result<Article, ContentError> {
    let source =
        std::fs::read_to_string(&entry.path).map_err(|source| ContentError::ReadFailed {
            path: entry.path.clone(),
            source,
        })?;

    let (frontmatter_raw, body) =
        split_frontmatter(&source).ok_or_else(|| ContentError::FrontmatterMissing {
            path: entry.path.clone(),
        })?;

    let frontmatter: ArticleFrontmatter = serde_yaml::from_str(frontmatter_raw).map_err(
        |source| ContentError::FrontmatterInvalid {
            path: entry.path.clone(),
            source,
        },
    )?;

    let image = frontmatter.image.clone().or_else(|| image::first_image(body));
    let subcategory = resolve_subcategory(&frontmatter, entry.category, entry.subfolder.as_deref());

    // An undated document sorts as "published right now", i.e. first. Odd, but
    // long-standing site behavior; see DESIGN.md before changing it.
    let now = Utc::now();
    let (date, sort_key) = match &frontmatter.date {
        Some(raw) => {
            let sort_key = parse_date(raw).unwrap_or_else(|| {
                warn!(target: "content", "Unparseable date `{}` in {}", raw, entry.path.display());
                now
            });
            (raw.clone(), sort_key)
        }
        None => (now.to_rfc3339(), now),
    };

    let (headings, html) = if render_body {
        (headings::extract_headings(body), render_markdown(body))
    } else {
        (Vec::new(), String::new())
    };

    Ok(Article {
        slug: entry.slug.clone(),
        locale: entry.locale,
        category: entry.category,
        title: frontmatter.title,
        description: frontmatter.description,
        date,
        sort_key,
        subcategory,
        tags: frontmatter.tags,
        image,
        headings,
        html,
        raw_body: body.to_string(),
        seo_title: frontmatter.seo_title,
        seo_description: frontmatter.seo_description,
        seo_keywords: frontmatter.seo_keywords,
        schema_type: frontmatter.schema_type,
        schema_data: frontmatter.schema_data,
    })
}

/// Resolution order: explicit front-matter value, then the capitalized
/// subfolder name when it differs from the category, then nothing.
fn resolve_subcategory(
    frontmatter: &ArticleFrontmatter,
    category: Category,
    subfolder: Option<&str>,
) -> Option<String> {
    if let Some(subcategory) = &frontmatter.subcategory {
        return Some(subcategory.clone());
    }

    match subfolder {
        Some(subfolder) if subfolder != category.as_str() => Some(capitalize(subfolder)),
        _ => None,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Splits `---\nyaml\n---\nbody`. Returns `None` when the document does not
/// open with a front-matter fence.
fn split_frontmatter(source: &str) -> Option<(&str, &str)> {
    let rest = source.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

fn render_markdown(body: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH);

    let mut events: Vec<Event> = Parser::new_ext(body, options).collect();
    inject_heading_ids(&mut events);

    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, events.into_iter());
    html
}

/// Gives every h2/h3 an anchor id matching the extracted TOC slugs. The same
/// slugger rules run in the same order, so ids and TOC links line up.
fn inject_heading_ids(events: &mut [Event]) {
    let mut slugger = Slugger::new();

    for i in 0..events.len() {
        let needs_id = matches!(
            &events[i],
            Event::Start(Tag::Heading {
                level: HeadingLevel::H2 | HeadingLevel::H3,
                id: None,
                ..
            })
        );
        if !needs_id {
            continue;
        }

        let mut text = String::new();
        for event in events.iter().skip(i + 1) {
            match event {
                Event::End(pulldown_cmark::TagEnd::Heading(_)) => break,
                Event::Text(t) | Event::Code(t) => text.push_str(t),
                _ => {}
            }
        }

        let slug = slugger.slugify(&text);
        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            *id = Some(slug.into());
        }
    }
}
