//! Content engine for DuckovWiki, a bilingual fan wiki for Escape from Duckov.
//!
//! The crate owns everything that is not presentation: scanning the markdown
//! content tree into an immutable index, loading articles (front-matter,
//! headings, preview image, subcategory), listing them per category with
//! prev/next navigation, filtering them with the site search, negotiating a
//! locale from an `Accept-Language` header, and generating the sitemap.
//!
//! The `duckov-wiki` binary crate drives this to render the actual pages.

// Modules the end-user will interact directly or indirectly with
pub mod content;
pub mod errors;
pub mod i18n;
pub mod search;
pub mod seo;
pub mod sitemap;

pub mod logging;

pub use content::{Article, Category, ContentIndex, prev_next};
pub use errors::WikiError;
pub use i18n::{Dictionaries, Locale, negotiate};
pub use search::{SearchRecord, search};
