//! Renders the whole site into the output directory.

use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{info, warn};
use maud::Markup;

use duckov_wiki::content::{Category, ContentIndex, prev_next};
use duckov_wiki::errors::BuildError;
use duckov_wiki::i18n::{Dictionaries, Locale};
use duckov_wiki::search::SearchRecord;
use duckov_wiki::sitemap::{self, INFO_PAGES};
use duckov_wiki::{WikiError, logging};

use crate::pages;

/// How many articles the home page shows.
const HOME_RECENT: usize = 6;

pub fn build(
    content_dir: &Path,
    locales_dir: &Path,
    out_dir: &Path,
    base_url: &str,
) -> Result<(), WikiError> {
    let start = Instant::now();
    info!(target: "build", "Building site from {}", content_dir.display());

    let index = ContentIndex::scan(content_dir)?;
    let dicts = Dictionaries::load(locales_dir)?;

    let mut page_count = 0;
    // Every listing rendered below also feeds the sitemap, so articles are
    // parsed exactly once per build.
    let mut site_articles = Vec::new();

    for locale in Locale::ALL {
        // Category order, date-descending within each, matching the hubs.
        let listings: Vec<_> = Category::ALL
            .into_iter()
            .map(|category| (category, index.articles(locale, category)))
            .collect();
        let all: Vec<_> = listings
            .iter()
            .flat_map(|(_, listing)| listing.iter().cloned())
            .collect();

        let recent: Vec<_> = all.iter().take(HOME_RECENT).cloned().collect();
        write_page(
            out_dir,
            &format!("{}/index.html", locale),
            pages::home_page(locale, &dicts, &recent),
        )?;
        page_count += 1;

        for (category, listing) in &listings {
            let category = *category;
            write_page(
                out_dir,
                &format!("{}/{}/index.html", locale, category),
                pages::category_page(locale, &dicts, category, listing),
            )?;
            page_count += 1;

            for summary in listing {
                // Full load: headings and rendered body this time.
                let article = match index.article_by_slug(locale, category, &summary.slug) {
                    Ok(Some(article)) => article,
                    Ok(None) => continue,
                    Err(err) => {
                        warn!(target: "build", "Skipping {}/{}/{}: {}", locale, category, summary.slug, err);
                        continue;
                    }
                };

                let (previous, next) = prev_next(listing, &article.slug);
                write_page(
                    out_dir,
                    &format!("{}/{}/{}/index.html", locale, category, article.slug),
                    pages::article_page(locale, &dicts, &article, previous, next),
                )?;
                page_count += 1;
            }
        }

        write_page(
            out_dir,
            &format!("{}/search/index.html", locale),
            pages::search_page(locale, &dicts, "", &[]),
        )?;
        page_count += 1;

        let records: Vec<SearchRecord> = all.iter().map(SearchRecord::from).collect();
        let relative = format!("{}/search-index.json", locale);
        let json = serde_json::to_string(&records).map_err(|source| BuildError::SerializeFailed {
            path: out_dir.join(&relative),
            source,
        })?;
        write_file(out_dir, &relative, &json)?;

        for page in INFO_PAGES {
            write_page(
                out_dir,
                &format!("{}/{}/index.html", locale, page),
                pages::info_page(locale, &dicts, page),
            )?;
            page_count += 1;
        }

        site_articles.extend(all);
    }

    write_page(out_dir, "404.html", pages::not_found_page(&dicts))?;
    page_count += 1;

    sitemap::write_sitemap(
        sitemap::collect_entries(&site_articles, base_url),
        out_dir,
        "sitemap.xml",
    )?;

    info!(
        target: "build",
        "Rendered {} pages to {} in {}",
        page_count,
        out_dir.display(),
        logging::format_elapsed_time(start.elapsed())
    );

    Ok(())
}

fn write_page(out_dir: &Path, relative: &str, markup: Markup) -> Result<(), BuildError> {
    write_file(out_dir, relative, &markup.into_string())
}

fn write_file(out_dir: &Path, relative: &str, contents: &str) -> Result<(), BuildError> {
    let path: PathBuf = out_dir.join(relative);

    let write = |path: &Path| -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)
    };

    write(&path).map_err(|source| BuildError::WriteFailed { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn seed_site(root: &Path) {
        let doc = |title: &str, date: &str| {
            format!(
                "---\ntitle: {title}\ndescription: About {title}\ndate: \"{date}\"\n---\n\n## Intro\n\nHello.\n"
            )
        };

        for locale in ["en", "zh"] {
            fs::create_dir_all(root.join("content").join(locale).join("guides")).unwrap();
            fs::write(
                root.join("content").join(locale).join("guides").join("alpha.mdx"),
                doc("Alpha", "2024-01-01"),
            )
            .unwrap();
        }

        fs::create_dir_all(root.join("locales")).unwrap();
        fs::write(root.join("locales/en.json"), r#"{"nav.home": "Home"}"#).unwrap();
        fs::write(root.join("locales/zh.json"), r#"{"nav.home": "首页"}"#).unwrap();
    }

    #[test]
    fn test_build_writes_expected_tree() {
        let dir = tempfile::tempdir().unwrap();
        seed_site(dir.path());

        let out = dir.path().join("dist");
        build(
            &dir.path().join("content"),
            &dir.path().join("locales"),
            &out,
            "https://duckovwiki.example",
        )
        .unwrap();

        assert!(out.join("en/index.html").is_file());
        assert!(out.join("en/guides/index.html").is_file());
        assert!(out.join("en/guides/alpha/index.html").is_file());
        assert!(out.join("zh/guides/alpha/index.html").is_file());
        assert!(out.join("en/search/index.html").is_file());
        assert!(out.join("en/search-index.json").is_file());
        assert!(out.join("en/about/index.html").is_file());
        assert!(out.join("404.html").is_file());
        assert!(out.join("sitemap.xml").is_file());

        let article = fs::read_to_string(out.join("en/guides/alpha/index.html")).unwrap();
        assert!(article.contains(r##"href="#intro""##));
        assert!(article.contains(r#"<script type="application/ld+json">"#));
        assert!(article.contains(r#""@type":"HowTo""#));

        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://duckovwiki.example/en/guides/alpha</loc>"));
        assert!(sitemap.contains("<lastmod>2024-01-01</lastmod>"));

        let records: Vec<SearchRecord> =
            serde_json::from_str(&fs::read_to_string(out.join("en/search-index.json")).unwrap())
                .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].slug, "alpha");
    }
}
