//! Options controlling which rows are written and how missing translations are handled.

/// Write behavior options for [`crate::formats::AndroidStringsFormat::from_store`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormatterOptions {
    /// Only rows carrying one of these tags are written. Empty means all rows.
    pub tags: Vec<String>,
    /// Also write rows without any tag when `tags` is not empty.
    pub untagged: bool,
    /// Fall back to the base language for rows missing a translation.
    pub include_untranslated: bool,
}

impl FormatterOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tag filter.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Enables/disables writing untagged rows alongside tagged ones.
    pub fn with_untagged(mut self, untagged: bool) -> Self {
        self.untagged = untagged;
        self
    }

    /// Enables/disables the base-language fallback.
    pub fn with_include_untranslated(mut self, include_untranslated: bool) -> Self {
        self.include_untranslated = include_untranslated;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_select_everything() {
        let options = FormatterOptions::new();
        assert!(options.tags.is_empty());
        assert!(!options.untagged);
        assert!(!options.include_untranslated);
    }

    #[test]
    fn test_builder_methods() {
        let options = FormatterOptions::new()
            .with_tags(["android", "shared"])
            .with_untagged(true)
            .with_include_untranslated(true);
        assert_eq!(options.tags, vec!["android".to_string(), "shared".to_string()]);
        assert!(options.untagged);
        assert!(options.include_untranslated);
    }
}
