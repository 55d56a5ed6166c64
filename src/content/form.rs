//! Editor state for the admin forms
//!
//! Each editor keeps per-language values and an active language. Typing only
//! writes the active language. On submit the active value is mirrored into
//! the legacy flat column and the `{en, it}` payload is dropped if both
//! languages are blank.

use super::locale::{Locale, LocalizedList, LocalizedText};

/// A value that can be stored per language in an editor
pub trait DraftValue: Clone + Default {
    type Payload;

    fn is_blank(&self) -> bool;
    fn into_payload(en: Self, it: Self) -> Option<Self::Payload>;
}

impl DraftValue for String {
    type Payload = LocalizedText;

    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }

    fn into_payload(en: Self, it: Self) -> Option<LocalizedText> {
        LocalizedText { en, it }.into_payload()
    }
}

impl DraftValue for Vec<String> {
    type Payload = LocalizedList;

    fn is_blank(&self) -> bool {
        self.iter().all(|s| s.trim().is_empty())
    }

    fn into_payload(en: Self, it: Self) -> Option<LocalizedList> {
        LocalizedList { en, it }.into_payload()
    }
}

/// Per-language editor field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocaleDraft<T: DraftValue> {
    active: Locale,
    en: T,
    it: T,
}

impl<T: DraftValue> LocaleDraft<T> {
    pub fn new(active: Locale) -> Self {
        Self {
            active,
            en: T::default(),
            it: T::default(),
        }
    }

    pub fn with_values(active: Locale, en: T, it: T) -> Self {
        Self { active, en, it }
    }

    pub fn active(&self) -> Locale {
        self.active
    }

    /// Switch the language being edited. Stored values are untouched.
    pub fn set_active(&mut self, locale: Locale) {
        self.active = locale;
    }

    /// Write to the active language only.
    pub fn input(&mut self, value: T) {
        *self.slot_mut(self.active) = value;
    }

    pub fn value(&self, locale: Locale) -> &T {
        match locale {
            Locale::En => &self.en,
            Locale::It => &self.it,
        }
    }

    fn slot_mut(&mut self, locale: Locale) -> &mut T {
        match locale {
            Locale::En => &mut self.en,
            Locale::It => &mut self.it,
        }
    }

    /// Value mirrored into the legacy single-language column.
    /// Falls back to English when the active language is blank.
    pub fn legacy_value(&self) -> T {
        let active = self.value(self.active);
        if active.is_blank() {
            self.en.clone()
        } else {
            active.clone()
        }
    }

    /// `(legacy value, locale payload)`; the payload is `None` when both
    /// languages are blank.
    pub fn submit(self) -> (T, Option<T::Payload>) {
        let legacy = self.legacy_value();
        (legacy, T::into_payload(self.en, self.it))
    }
}

impl LocaleDraft<String> {
    pub fn from_text(active: Locale, text: LocalizedText) -> Self {
        Self::with_values(active, text.en, text.it)
    }
}

impl LocaleDraft<Vec<String>> {
    pub fn from_list(active: Locale, list: LocalizedList) -> Self {
        Self::with_values(active, list.en, list.it)
    }
}

/// Slug derived from the English title until the user edits it by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlugField {
    value: String,
    touched: bool,
}

impl SlugField {
    /// A slug loaded from a stored record counts as touched.
    pub fn existing(slug: impl Into<String>) -> Self {
        Self {
            value: slug.into(),
            touched: true,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn on_title_change(&mut self, en_title: &str) {
        if !self.touched {
            self.value = slugify(en_title);
        }
    }

    pub fn override_with(&mut self, slug: &str) {
        self.value = slugify(slug);
        self.touched = true;
    }

    /// Final slug on submit: the current value, or one derived from the
    /// English title if it ended up empty.
    pub fn resolve(&self, en_title: &str) -> String {
        if self.value.is_empty() {
            slugify(en_title)
        } else {
            self.value.clone()
        }
    }
}

/// Lowercase, strip punctuation, hyphenate.
///
/// `"Heat-Resistant Glove!!"` becomes `"heat-resistant-glove"`.
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        let ch = fold_accent(ch);
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch);
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_dash = true;
        }
        // 其他标点直接丢弃
    }

    out
}

fn fold_accent(ch: char) -> char {
    match ch {
        'à' | 'á' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ò' | 'ó' | 'ô' | 'ö' | 'õ' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}
