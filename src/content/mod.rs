//! Translatable content primitives
//!
//! - `locale`: `{en, it}` payloads and the read-side fallback chain
//! - `form`: editor state for the admin forms (active language, slug)

pub mod form;
pub mod locale;

pub use form::{DraftValue, LocaleDraft, SlugField, slugify};
pub use locale::{
    Locale, LocalizedList, LocalizedText, localized, localized_list, parse_locales,
};
