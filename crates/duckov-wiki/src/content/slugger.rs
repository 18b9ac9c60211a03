//! Heading slug generation, GitHub style.
//!
//! Slugs are unique within one [`Slugger`]: repeating the same heading text
//! yields `text`, `text-1`, `text-2`, and so on.

use rustc_hash::FxHashMap;

pub struct Slugger {
    seen: FxHashMap<String, usize>,
}

impl Slugger {
    pub fn new() -> Self {
        Self {
            seen: FxHashMap::default(),
        }
    }

    pub fn slugify(&mut self, text: &str) -> String {
        let base = slugify_once(text);

        match self.seen.get_mut(&base) {
            Some(count) => {
                *count += 1;
                let slug = format!("{}-{}", base, count);
                // A literal "text-1" heading could collide with a generated
                // suffix, so the generated slug is recorded as seen too.
                self.seen.entry(slug.clone()).or_insert(0);
                slug
            }
            None => {
                self.seen.insert(base.clone(), 0);
                base
            }
        }
    }
}

impl Default for Slugger {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercases, drops punctuation, and joins the rest with hyphens. Unicode
/// letters (e.g. Chinese heading text) are kept as-is.
fn slugify_once(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.trim().to_lowercase().chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_hyphen = true;
        }
        // Everything else (punctuation) is dropped without acting as a separator.
    }

    slug
}
