//! Maud templates for every page the site renders.
//!
//! Presentation only: everything interesting (listing order, prev/next
//! pairing, search results) is computed by the `duckov-wiki` crate and passed
//! in here already decided.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use duckov_wiki::content::{Article, Category};
use duckov_wiki::i18n::{Dictionaries, Locale};
use duckov_wiki::search::SearchRecord;
use duckov_wiki::seo::{PageKey, SeoData, SITE_NAME, article_json_ld, article_seo, static_seo};
use duckov_wiki::sitemap::INFO_PAGES;

fn layout(
    locale: Locale,
    dicts: &Dictionaries,
    title: &str,
    description: &str,
    keywords: &[&str],
    body: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(locale.html_lang()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                meta name="description" content=(description);
                @if !keywords.is_empty() {
                    meta name="keywords" content=(keywords.join(", "));
                }
            }
            body {
                (navbar(locale, dicts))
                main { (body) }
                (footer(locale, dicts))
            }
        }
    }
}

fn navbar(locale: Locale, dicts: &Dictionaries) -> Markup {
    html! {
        nav {
            a href=(format!("/{}", locale)) { (SITE_NAME) }
            ul {
                @for category in Category::ALL {
                    li {
                        a href=(format!("/{}/{}", locale, category)) {
                            (dicts.get(locale, &format!("nav.{}", category)))
                        }
                    }
                }
                li {
                    a href=(format!("/{}/search", locale)) { (dicts.get(locale, "nav.search")) }
                }
            }
        }
    }
}

fn footer(locale: Locale, dicts: &Dictionaries) -> Markup {
    html! {
        footer {
            ul {
                @for page in INFO_PAGES {
                    li {
                        a href=(format!("/{}/{}", locale, page)) {
                            (dicts.get(locale, &format!("page.{}.title", page)))
                        }
                    }
                }
            }
            p { (dicts.get(locale, "footer.disclaimer")) }
        }
    }
}

fn article_card(locale: Locale, article: &Article) -> Markup {
    html! {
        article {
            a href=(format!("/{}/{}/{}", locale, article.category, article.slug)) {
                @if let Some(image) = &article.image {
                    img src=(image) alt=(article.title);
                }
                h3 { (article.title) }
                @if let Some(subcategory) = &article.subcategory {
                    span.subcategory { (subcategory) }
                }
                p { (article.description) }
                time datetime=(article.date) { (article.date) }
            }
        }
    }
}

pub fn home_page(locale: Locale, dicts: &Dictionaries, recent: &[Article]) -> Markup {
    let seo = static_seo(PageKey::Home, locale);
    layout(
        locale,
        dicts,
        seo.title,
        seo.description,
        seo.keywords,
        html! {
            header {
                h1 { (SITE_NAME) }
                p { (dicts.get(locale, "home.tagline")) }
            }
            section {
                h2 { (dicts.get(locale, "home.recent")) }
                @for article in recent {
                    (article_card(locale, article))
                }
            }
        },
    )
}

pub fn category_page(
    locale: Locale,
    dicts: &Dictionaries,
    category: Category,
    articles: &[Article],
) -> Markup {
    let seo = seo_for_category(category, locale);
    layout(
        locale,
        dicts,
        seo.title,
        seo.description,
        seo.keywords,
        html! {
            h1 { (dicts.get(locale, &format!("nav.{}", category))) }
            @if articles.is_empty() {
                p { (dicts.get(locale, "category.empty")) }
            } @else {
                section {
                    @for article in articles {
                        (article_card(locale, article))
                    }
                }
            }
        },
    )
}

pub fn article_page(
    locale: Locale,
    dicts: &Dictionaries,
    article: &Article,
    previous: Option<&Article>,
    next: Option<&Article>,
) -> Markup {
    let (title, description, keywords) = article_seo(article);
    let keywords: Vec<&str> = keywords.iter().map(String::as_str).collect();

    layout(
        locale,
        dicts,
        &title,
        &description,
        &keywords,
        html! {
            script type="application/ld+json" {
                (PreEscaped(article_json_ld(article)))
            }
            nav.breadcrumbs {
                a href=(format!("/{}", locale)) { (dicts.get(locale, "nav.home")) }
                " / "
                a href=(format!("/{}/{}", locale, article.category)) {
                    (dicts.get(locale, &format!("nav.{}", article.category)))
                }
                " / "
                span { (article.title) }
            }
            header {
                @if let Some(subcategory) = &article.subcategory {
                    span.subcategory { (subcategory) }
                }
                h1 { (article.title) }
                time datetime=(article.date) { (article.date) }
                @if !article.tags.is_empty() {
                    ul.tags {
                        @for tag in &article.tags {
                            li { (tag) }
                        }
                    }
                }
            }
            @if !article.headings.is_empty() {
                aside.toc {
                    h2 { (dicts.get(locale, "article.toc")) }
                    ul {
                        @for heading in &article.headings {
                            li class=(format!("level-{}", heading.level)) {
                                a href=(format!("#{}", heading.slug)) { (heading.text) }
                            }
                        }
                    }
                }
            }
            section.prose {
                (PreEscaped(article.html.clone()))
            }
            nav.prev-next {
                // "Previous" leads to the newer article, "next" to the older one.
                @if let Some(previous) = previous {
                    a.prev href=(format!("/{}/{}/{}", locale, previous.category, previous.slug)) {
                        (dicts.get(locale, "article.prev")) ": " (previous.title)
                    }
                }
                @if let Some(next) = next {
                    a.next href=(format!("/{}/{}/{}", locale, next.category, next.slug)) {
                        (dicts.get(locale, "article.next")) ": " (next.title)
                    }
                }
            }
        },
    )
}

pub fn search_page(
    locale: Locale,
    dicts: &Dictionaries,
    query: &str,
    results: &[&SearchRecord],
) -> Markup {
    let seo = default_search_seo(locale);
    layout(
        locale,
        dicts,
        &seo.0,
        &seo.1,
        &[],
        html! {
            h1 { (dicts.get(locale, "search.title")) }
            form method="get" action=(format!("/{}/search", locale)) {
                input type="text" name="q" value=(query) placeholder=(dicts.get(locale, "search.placeholder")) autofocus;
                button type="submit" { (dicts.get(locale, "search.button")) }
            }
            @if !query.trim().is_empty() {
                p {
                    (results.len()) " " (dicts.get(locale, "search.results")) " \"" (query) "\""
                }
                @if results.is_empty() {
                    p { (dicts.get(locale, "search.empty")) }
                } @else {
                    section {
                        @for record in results {
                            article {
                                a href=(format!("/{}/{}/{}", locale, record.category, record.slug)) {
                                    h3 { (record.title) }
                                    span.category { (record.category) }
                                    p { (record.description) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn info_page(locale: Locale, dicts: &Dictionaries, page: &str) -> Markup {
    // Unsupported keys degrade to the generic site record instead of failing.
    let seo = page
        .parse::<PageKey>()
        .map(|key| static_seo(key, locale))
        .unwrap_or_else(|_| duckov_wiki::seo::default_seo(locale));

    layout(
        locale,
        dicts,
        seo.title,
        seo.description,
        seo.keywords,
        html! {
            h1 { (dicts.get(locale, &format!("page.{}.title", page))) }
            p { (dicts.get(locale, &format!("page.{}.body", page))) }
        },
    )
}

pub fn not_found_page(dicts: &Dictionaries) -> Markup {
    let locale = Locale::DEFAULT;
    layout(
        locale,
        dicts,
        "404",
        "Page not found",
        &[],
        html! {
            h1 { "404" }
            p { (dicts.get(locale, "notfound.body")) }
            a href=(format!("/{}", locale)) { (dicts.get(locale, "notfound.back")) }
        },
    )
}

fn seo_for_category(category: Category, locale: Locale) -> SeoData {
    let key = match category {
        Category::Guides => PageKey::Guides,
        Category::Maps => PageKey::Maps,
        Category::Mods => PageKey::Mods,
        Category::Tools => PageKey::Tools,
    };
    static_seo(key, locale)
}

fn default_search_seo(locale: Locale) -> (String, String) {
    (
        format!("Search | {}", SITE_NAME),
        match locale {
            Locale::En => "Search the database for guides, maps, tools, and mods.".to_string(),
            Locale::Zh => "搜索攻略、地图、工具与MOD。".to_string(),
        },
    )
}
