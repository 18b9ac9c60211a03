//! Static SEO metadata, one record per (page, locale).
//!
//! Pure data. Unknown page keys fall back to the site-wide default record so
//! a metadata miss can never fail a request.

use std::str::FromStr;

use crate::content::Article;
use crate::i18n::Locale;

pub const SITE_NAME: &str = "DuckovWiki";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKey {
    Home,
    Guides,
    Maps,
    Mods,
    Tools,
    About,
    Contact,
    Privacy,
    Terms,
    Disclaimer,
}

impl FromStr for PageKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(PageKey::Home),
            "guides" => Ok(PageKey::Guides),
            "maps" => Ok(PageKey::Maps),
            "mods" => Ok(PageKey::Mods),
            "tools" => Ok(PageKey::Tools),
            "about" => Ok(PageKey::About),
            "contact" => Ok(PageKey::Contact),
            "privacy" => Ok(PageKey::Privacy),
            "terms" => Ok(PageKey::Terms),
            "disclaimer" => Ok(PageKey::Disclaimer),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SeoData {
    pub title: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
}

/// The generic record used when no specific entry exists.
pub fn default_seo(locale: Locale) -> SeoData {
    match locale {
        Locale::En => SeoData {
            title: "DuckovWiki: Unofficial Escape from Duckov Wiki",
            description: "Community-maintained guides, maps, mods and tools for Escape from Duckov. Not affiliated with Team Soda.",
            keywords: &["Escape from Duckov", "DuckovWiki", "unofficial wiki"],
        },
        Locale::Zh => SeoData {
            title: "DuckovWiki: 逃离鸭科夫非官方维基",
            description: "《逃离鸭科夫》玩家社区维护的攻略、地图、MOD与工具站。本站独立于Team Soda。",
            keywords: &["逃离鸭科夫", "DuckovWiki", "非官方维基"],
        },
    }
}

pub fn static_seo(page: PageKey, locale: Locale) -> SeoData {
    match (page, locale) {
        (PageKey::Home, Locale::En) => SeoData {
            title: "DuckovWiki: #1 Unofficial Escape from Duckov Wiki - Guides",
            description: "DuckovWiki is your unofficial survival bible. Stop dying in Ground Zero with interactive maps and verified mods. Not affiliated with Team Soda.",
            keywords: &["Escape from Duckov wiki", "unofficial fan site", "survival guide", "game maps"],
        },
        (PageKey::Home, Locale::Zh) => SeoData {
            title: "DuckovWiki: 逃离鸭科夫非官方维基 - 萌新生存圣经与地图",
            description: "DuckovWiki是《逃离鸭科夫》玩家的非官方生存圣经。拒绝落地成盒！全地图撤离点、武器数据及汉化MOD。",
            keywords: &["逃离鸭科夫", "非官方维基", "生存指南", "新手攻略"],
        },
        (PageKey::Guides, Locale::En) => SeoData {
            title: "Escape from Duckov Strategy Guides: Survive, Loot & Extract",
            description: "Master the game with verified community guides, from inventory management to boss strategies.",
            keywords: &["Escape from Duckov guides", "survival tips", "leveling guide"],
        },
        (PageKey::Guides, Locale::Zh) => SeoData {
            title: "逃离鸭科夫进阶攻略：从萌新到大佬的生存与撤离指南",
            description: "掌握活下来的艺术。深度攻略库：跑图路线、保险箱技巧及BOSS打法。",
            keywords: &["逃离鸭科夫攻略", "生存技巧", "BOSS打法"],
        },
        (PageKey::Maps, Locale::En) => SeoData {
            title: "Escape from Duckov Interactive Maps: All Exfils & Loot Locations",
            description: "High-res maps pinpointing every extraction point, hidden stash, and keycard room.",
            keywords: &["Escape from Duckov maps", "extraction points", "loot locations"],
        },
        (PageKey::Maps, Locale::Zh) => SeoData {
            title: "逃离鸭科夫全地图指引：撤离点、钥匙房与资源分布图",
            description: "高清交互式地图，精准定位所有撤离点、隐藏资源堆及红卡房位置。",
            keywords: &["逃离鸭科夫地图", "撤离点地图", "资源分布"],
        },
        (PageKey::Mods, Locale::En) => SeoData {
            title: "Safe Escape from Duckov Mods: Translations, FPS Boost & Tools",
            description: "Community-tested mods: language patches, inventory expanders, and performance presets.",
            keywords: &["Escape from Duckov mods", "safe mod download", "fps boost"],
        },
        (PageKey::Mods, Locale::Zh) => SeoData {
            title: "逃离鸭科夫MOD下载：安全无毒的汉化补丁与辅助工具",
            description: "经社区验证的安全MOD：汉化补丁、帧数优化及大背包工具。",
            keywords: &["逃离鸭科夫MOD", "汉化补丁", "帧数优化"],
        },
        (PageKey::Tools, Locale::En) => SeoData {
            title: "Escape from Duckov Tools: Ammo Damage Chart & Market Prices",
            description: "Interactive damage calculator, loadout builder, and market tracker.",
            keywords: &["Escape from Duckov tools", "ammo chart", "damage calculator"],
        },
        (PageKey::Tools, Locale::Zh) => SeoData {
            title: "逃离鸭科夫必备工具箱：弹药伤害表与实时物价查询",
            description: "弹药穿透计算器、负重模拟器及实时市场物价表。",
            keywords: &["弹药伤害表", "伤害计算器", "物价查询"],
        },
        (PageKey::About, Locale::En) => SeoData {
            title: "About DuckovWiki - Built by Fans, For Fans (Unofficial)",
            description: "A non-profit volunteer team documenting Escape from Duckov while respecting Team Soda's IP.",
            keywords: &["About DuckovWiki", "fan community", "unofficial site"],
        },
        (PageKey::About, Locale::Zh) => SeoData {
            title: "关于DuckovWiki - 玩家共建的非官方避难所",
            description: "由热爱游戏的资深玩家维护的非营利性社区。",
            keywords: &["关于我们", "玩家社区", "非官方站点"],
        },
        (PageKey::Contact, Locale::En) => SeoData {
            title: "Contact DuckovWiki - Submit Guides & Feedback",
            description: "Guide submissions, bug reports, and partnership proposals.",
            keywords: &["Contact us", "submit guide", "feedback"],
        },
        (PageKey::Contact, Locale::Zh) => SeoData {
            title: "联系DuckovWiki - 攻略投稿与意见反馈通道",
            description: "攻略投稿、网站Bug反馈与商务合作渠道。",
            keywords: &["联系我们", "攻略投稿", "意见反馈"],
        },
        (PageKey::Privacy, Locale::En) => SeoData {
            title: "Privacy Policy - DuckovWiki",
            description: "What data DuckovWiki collects and how it is used.",
            keywords: &["privacy policy", "data protection"],
        },
        (PageKey::Privacy, Locale::Zh) => SeoData {
            title: "隐私政策 - DuckovWiki",
            description: "DuckovWiki收集哪些数据以及如何使用。",
            keywords: &["隐私政策", "数据保护"],
        },
        (PageKey::Terms, Locale::En) => SeoData {
            title: "Terms of Use - DuckovWiki User Agreement & Rules",
            description: "The agreement governing your access to DuckovWiki: user rights, copyright compliance, and conduct.",
            keywords: &["Terms of use", "user agreement", "community rules"],
        },
        (PageKey::Terms, Locale::Zh) => SeoData {
            title: "使用条款 - DuckovWiki 用户协议与社区规则",
            description: "本协议规范您对DuckovWiki的访问权限与社区行为准则。",
            keywords: &["使用条款", "用户协议", "社区规则"],
        },
        (PageKey::Disclaimer, Locale::En) => SeoData {
            title: "Disclaimer - DuckovWiki is an Unofficial Fan Site",
            description: "DuckovWiki is not affiliated with, endorsed by, or sponsored by Team Soda.",
            keywords: &["disclaimer", "unofficial", "fan site"],
        },
        (PageKey::Disclaimer, Locale::Zh) => SeoData {
            title: "免责声明 - DuckovWiki为非官方粉丝网站",
            description: "DuckovWiki与Team Soda无任何关联，亦未获其认可或赞助。",
            keywords: &["免责声明", "非官方", "粉丝网站"],
        },
    }
}

/// Metadata for an article page: the seo_* front-matter overrides win, then
/// the article's own title and description.
pub fn article_seo(article: &Article) -> (String, String, Vec<String>) {
    let title = article
        .seo_title
        .clone()
        .unwrap_or_else(|| format!("{} | {}", article.title, SITE_NAME));
    let description = article
        .seo_description
        .clone()
        .unwrap_or_else(|| article.description.clone());
    let keywords = article
        .seo_keywords
        .clone()
        .unwrap_or_else(|| article.tags.clone());

    (title, description, keywords)
}

/// schema.org JSON-LD for an article page. `schemaType` front-matter picks
/// the `@type` (default HowTo) and `schemaData` fields are merged over the
/// base object, so authors can add or override any property.
pub fn article_json_ld(article: &Article) -> String {
    let mut object = serde_json::Map::new();
    object.insert("@context".into(), serde_json::json!("https://schema.org"));
    object.insert(
        "@type".into(),
        serde_json::json!(article.schema_type.as_deref().unwrap_or("HowTo")),
    );
    object.insert("headline".into(), serde_json::json!(article.title));
    object.insert("description".into(), serde_json::json!(article.description));
    object.insert("datePublished".into(), serde_json::json!(article.date));

    if let Some(data) = &article.schema_data {
        if let Ok(serde_json::Value::Object(extra)) = serde_json::to_value(data) {
            for (key, value) in extra {
                object.insert(key, value);
            }
        }
    }

    serde_json::Value::Object(object).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_page_has_both_locales() {
        let pages = [
            PageKey::Home,
            PageKey::Guides,
            PageKey::Maps,
            PageKey::Mods,
            PageKey::Tools,
            PageKey::About,
            PageKey::Contact,
            PageKey::Privacy,
            PageKey::Terms,
            PageKey::Disclaimer,
        ];

        for page in pages {
            for locale in Locale::ALL {
                let data = static_seo(page, locale);
                assert!(!data.title.is_empty());
                assert!(!data.description.is_empty());
            }
        }
    }

    #[test]
    fn test_unknown_page_key_falls_back_to_default() {
        assert!("not-a-page".parse::<PageKey>().is_err());
        let data = default_seo(Locale::En);
        assert!(data.title.contains("DuckovWiki"));
    }

    fn sample_article() -> Article {
        Article {
            slug: "ak47".to_string(),
            locale: Locale::En,
            category: crate::content::Category::Guides,
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
        }
    }

    #[test]
    fn test_json_ld_defaults_to_howto() {
        let json: serde_json::Value =
            serde_json::from_str(&article_json_ld(&sample_article())).unwrap();
        assert_eq!(json["@context"], "https://schema.org");
        assert_eq!(json["@type"], "HowTo");
        assert_eq!(json["headline"], "AK-47 Guide");
        assert_eq!(json["datePublished"], "2024-03-01");
    }

    #[test]
    fn test_json_ld_merges_front_matter_overrides() {
        let mut article = sample_article();
        article.schema_type = Some("VideoGame".to_string());
        article.schema_data =
            Some(serde_yaml::from_str("totalTime: PT10M\nheadline: Custom").unwrap());

        let json: serde_json::Value =
            serde_json::from_str(&article_json_ld(&article)).unwrap();
        assert_eq!(json["@type"], "VideoGame");
        assert_eq!(json["totalTime"], "PT10M");
        assert_eq!(json["headline"], "Custom");
    }
}
