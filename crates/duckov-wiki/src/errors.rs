//! Error types for the wiki engine.
use std::fmt::{self, Debug, Formatter};
use std::path::PathBuf;
use thiserror::Error;

use crate::content::Category;
use crate::i18n::Locale;

macro_rules! impl_debug_for_error {
    ($($t:ty),*) => {
        $(
            impl Debug for $t {
                fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                    // Rust uses the Debug trait to show errors when they're returned from main,
                    // while thiserror renders through Display. This redirects Debug to Display.
                    write!(f, "{}", self)
                }
            }
        )*
    };
}

#[derive(Error)]
pub enum ContentError {
    /// Two documents in the same (locale, category) claim the same slug. This is
    /// rejected at index-build time instead of resolving to whichever file the
    /// directory walk happens to yield first.
    #[error(
        "Duplicate slug `{slug}` under {locale}/{category}: {} and {} resolve to the same URL",
        .first.display(),
        .second.display()
    )]
    DuplicateSlug {
        slug: String,
        locale: Locale,
        category: Category,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Failed to read content file: {path}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Document has no front-matter block: {path}")]
    FrontmatterMissing { path: PathBuf },

    #[error("Invalid front-matter in {path}")]
    FrontmatterInvalid {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid glob pattern for content root: {path}")]
    InvalidPattern {
        path: PathBuf,
        #[source]
        source: glob::PatternError,
    },
}

#[derive(Error)]
pub enum DictionaryError {
    #[error("Failed to read dictionary file: {path}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dictionary JSON in {path}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error)]
pub enum BuildError {
    #[error("Failed to write {path}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize {path}")]
    SerializeFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum WikiError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl_debug_for_error!(ContentError, DictionaryError, BuildError);
