//! In-memory translation store.
//!
//! [`TranslationSet`] implements [`TranslationStore`] over plain vectors and
//! maps. It is enough for tests and small tools; larger pipelines plug in
//! their own store through the traits in [`crate::traits`].

use std::{
    collections::{BTreeMap, BTreeSet},
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    traits::{Row, Section, TranslationStore},
};

/// Section that receives keys read from a file but unknown to the set.
pub const UNCATEGORIZED_SECTION: &str = "Uncategorized";

/// All sections and languages of a translation project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TranslationSet {
    /// Known language codes; the first one is the base language.
    pub language_codes: Vec<String>,

    #[serde(default)]
    pub sections: Vec<TranslationSection>,

    /// Add unknown keys to the `Uncategorized` section instead of dropping them.
    #[serde(skip)]
    pub consume_all: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TranslationSection {
    pub name: String,

    #[serde(default)]
    pub rows: Vec<TranslationRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TranslationRow {
    pub key: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub comment: Option<String>,

    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    #[serde(default)]
    pub tags: BTreeSet<String>,

    /// Text per language code.
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
}

impl TranslationSet {
    pub fn new<I, S>(language_codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TranslationSet {
            language_codes: language_codes.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_consume_all(mut self, consume_all: bool) -> Self {
        self.consume_all = consume_all;
        self
    }

    pub fn add_section(&mut self, section: TranslationSection) {
        self.sections.push(section);
    }

    pub fn add_language_code(&mut self, language: &str) {
        if !self.language_codes.iter().any(|code| code == language) {
            self.language_codes.push(language.to_string());
        }
    }

    pub fn find_row(&self, key: &str) -> Option<&TranslationRow> {
        self.sections
            .iter()
            .flat_map(|section| section.rows.iter())
            .find(|row| row.key == key)
    }

    pub fn find_row_mut(&mut self, key: &str) -> Option<&mut TranslationRow> {
        self.sections
            .iter_mut()
            .flat_map(|section| section.rows.iter_mut())
            .find(|row| row.key == key)
    }

    /// Saves the set as JSON.
    pub fn cache_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Loads a set previously saved with [`TranslationSet::cache_to_file`].
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    fn uncategorized_section(&mut self) -> &mut TranslationSection {
        let position = match self
            .sections
            .iter()
            .position(|section| section.name == UNCATEGORIZED_SECTION)
        {
            Some(position) => position,
            None => {
                self.sections
                    .insert(0, TranslationSection::new(UNCATEGORIZED_SECTION));
                0
            }
        };
        &mut self.sections[position]
    }
}

impl TranslationStore for TranslationSet {
    type Section = TranslationSection;

    fn language_codes(&self) -> &[String] {
        &self.language_codes
    }

    fn sections(&self) -> impl Iterator<Item = &TranslationSection> {
        self.sections.iter()
    }

    fn translation(&self, key: &str, language: &str) -> Option<&str> {
        self.find_row(key)?
            .translations
            .get(language)
            .map(String::as_str)
    }

    fn set_translation(&mut self, key: &str, language: &str, text: String) {
        if let Some(row) = self.find_row_mut(key) {
            row.translations.insert(language.to_string(), text);
        } else if self.consume_all {
            tracing::info!(key, "Adding new string to the uncategorized section");
            let mut row = TranslationRow::new(key);
            row.translations.insert(language.to_string(), text);
            self.uncategorized_section().rows.push(row);
        } else {
            tracing::warn!(key, language, "String not found in translation set, skipping");
        }
        self.add_language_code(language);
    }
}

impl TranslationSection {
    pub fn new(name: impl Into<String>) -> Self {
        TranslationSection {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn with_row(mut self, row: TranslationRow) -> Self {
        self.rows.push(row);
        self
    }
}

impl Section for TranslationSection {
    type Row = TranslationRow;

    fn name(&self) -> &str {
        &self.name
    }

    fn rows(&self) -> impl Iterator<Item = &TranslationRow> {
        self.rows.iter()
    }
}

impl TranslationRow {
    pub fn new(key: impl Into<String>) -> Self {
        TranslationRow {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_translation(mut self, language: impl Into<String>, text: impl Into<String>) -> Self {
        self.translations.insert(language.into(), text.into());
        self
    }
}

impl Row for TranslationRow {
    fn key(&self) -> &str {
        &self.key
    }

    fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    fn matches_filter(&self, tags: &[String], include_untagged: bool) -> bool {
        if tags.is_empty() {
            return true;
        }
        if include_untagged && self.tags.is_empty() {
            return true;
        }
        tags.iter().any(|tag| self.tags.contains(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> TranslationSet {
        let mut set = TranslationSet::new(["en", "fr"]);
        set.add_section(
            TranslationSection::new("General")
                .with_row(
                    TranslationRow::new("greeting")
                        .with_comment("Shown on launch")
                        .with_tag("android")
                        .with_translation("en", "Hello")
                        .with_translation("fr", "Bonjour"),
                )
                .with_row(TranslationRow::new("farewell").with_translation("en", "Bye")),
        );
        set
    }

    #[test]
    fn test_translation_lookup() {
        let set = sample_set();
        assert_eq!(set.translation("greeting", "fr"), Some("Bonjour"));
        assert_eq!(set.translation("farewell", "fr"), None);
        assert_eq!(set.translation("missing", "en"), None);
        assert_eq!(set.base_language(), Some("en"));
    }

    #[test]
    fn test_set_translation_updates_known_key() {
        let mut set = sample_set();
        set.set_translation("farewell", "de", "Tschüss".to_string());
        assert_eq!(set.translation("farewell", "de"), Some("Tschüss"));
        assert_eq!(set.language_codes, vec!["en", "fr", "de"]);
    }

    #[test]
    fn test_set_translation_drops_unknown_key() {
        let mut set = sample_set();
        set.set_translation("unknown", "en", "Text".to_string());
        assert!(set.find_row("unknown").is_none());
        assert_eq!(set.sections.len(), 1);
    }

    #[test]
    fn test_set_translation_consumes_unknown_key() {
        let mut set = sample_set().with_consume_all(true);
        set.set_translation("unknown", "en", "Text".to_string());
        set.set_translation("other", "en", "More".to_string());
        assert_eq!(set.sections[0].name, UNCATEGORIZED_SECTION);
        assert_eq!(set.sections[0].rows.len(), 2);
        assert_eq!(set.translation("other", "en"), Some("More"));
    }

    #[test]
    fn test_matches_filter() {
        let tagged = TranslationRow::new("a").with_tag("android");
        let untagged = TranslationRow::new("b");
        let android = vec!["android".to_string()];
        let ios = vec!["ios".to_string()];

        assert!(tagged.matches_filter(&[], false));
        assert!(untagged.matches_filter(&[], false));
        assert!(tagged.matches_filter(&android, false));
        assert!(!tagged.matches_filter(&ios, true));
        assert!(!untagged.matches_filter(&android, false));
        assert!(untagged.matches_filter(&android, true));
    }

    #[test]
    fn test_cache_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache").join("set.json");
        let set = sample_set();
        set.cache_to_file(&path).unwrap();
        let loaded = TranslationSet::load_from_file(&path).unwrap();
        assert_eq!(loaded, set);
    }
}
