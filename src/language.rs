//! Language codes for Android resource directories.
//!
//! Android keeps one `strings.xml` per `values[-<qualifier>]` directory. The
//! unsuffixed `values` directory holds the base language; a suffix such as
//! `zh-rCN` names a locale, with `-r` introducing the region.

use std::{collections::HashMap, fs, path::Path};

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;

/// Name of the directory holding base-language resources.
pub const BASE_DIRECTORY: &str = "values";

lazy_static! {
    static ref LANGUAGE_DIRECTORY_REGEX: Regex = Regex::new(r"^values-(.+)$").unwrap();
    static ref RESOURCE_DIRECTORY_REGEX: Regex = Regex::new(r"^values(-.+)?$").unwrap();

    /// Android qualifiers whose canonical code differs from the qualifier itself.
    static ref LANGUAGE_CODES: HashMap<&'static str, &'static str> = HashMap::from([
        ("zh", "zh-Hans"),
        ("zh-rCN", "zh-Hans"),
        ("zh-rHK", "zh-Hant"),
        ("en-rGB", "en-UK"),
        ("in", "id"),
        ("nb", "no"),
    ]);

    /// Languages to try before giving up on a missing translation.
    static ref DEFAULT_LANGUAGE_CODES: HashMap<&'static str, &'static str> =
        HashMap::from([("zh-TW", "zh-Hant")]);
}

/// Canonical language code for an Android `values-` qualifier.
///
/// ```rust
/// use android_strings_codec::language::language_for_qualifier;
/// assert_eq!(language_for_qualifier("zh-rCN"), "zh-Hans");
/// assert_eq!(language_for_qualifier("pt-rBR"), "pt-BR");
/// assert_eq!(language_for_qualifier("fr"), "fr");
/// ```
pub fn language_for_qualifier(qualifier: &str) -> String {
    let code = LANGUAGE_CODES.get(qualifier).copied().unwrap_or(qualifier);
    code.replacen("-r", "-", 1)
}

/// Determines the language of a resource file from its path.
///
/// Returns `base_language` for a file under the unsuffixed `values`
/// directory and `None` when no path segment is a `values` directory.
///
/// ```rust
/// use android_strings_codec::language::determine_language_given_path;
/// assert_eq!(
///     determine_language_given_path("res/values-zh-rCN/strings.xml", "en"),
///     Some("zh-Hans".to_string())
/// );
/// assert_eq!(
///     determine_language_given_path("res/values/strings.xml", "en"),
///     Some("en".to_string())
/// );
/// assert_eq!(determine_language_given_path("res/raw/strings.xml", "en"), None);
/// ```
pub fn determine_language_given_path<P: AsRef<Path>>(
    path: P,
    base_language: &str,
) -> Option<String> {
    path.as_ref().components().find_map(|component| {
        let segment = component.as_os_str().to_str()?;
        if segment == BASE_DIRECTORY {
            return Some(base_language.to_string());
        }
        LANGUAGE_DIRECTORY_REGEX
            .captures(segment)
            .and_then(|caps| caps.get(1))
            .map(|qualifier| language_for_qualifier(qualifier.as_str()))
    })
}

/// Language to fall back to when `language` has no translation of its own.
pub fn default_language_for(language: &str) -> Option<&'static str> {
    DEFAULT_LANGUAGE_CODES.get(language).copied()
}

/// Whether `name` follows the `values[-<code>]` directory convention.
pub fn is_resource_directory_name(name: &str) -> bool {
    RESOURCE_DIRECTORY_REGEX.is_match(name)
}

/// Whether `path` is an Android `res` directory, i.e. any of its entries is
/// a `values[-<code>]` directory.
pub fn can_handle_directory<P: AsRef<Path>>(path: P) -> Result<bool, Error> {
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if entry
            .file_name()
            .to_str()
            .is_some_and(is_resource_directory_name)
        {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_for_qualifier_uses_table() {
        assert_eq!(language_for_qualifier("zh"), "zh-Hans");
        assert_eq!(language_for_qualifier("zh-rCN"), "zh-Hans");
        assert_eq!(language_for_qualifier("zh-rHK"), "zh-Hant");
        assert_eq!(language_for_qualifier("en-rGB"), "en-UK");
        assert_eq!(language_for_qualifier("in"), "id");
        assert_eq!(language_for_qualifier("nb"), "no");
    }

    #[test]
    fn test_language_for_qualifier_collapses_region() {
        assert_eq!(language_for_qualifier("pt-rBR"), "pt-BR");
        assert_eq!(language_for_qualifier("zh-rTW"), "zh-TW");
        assert_eq!(language_for_qualifier("de"), "de");
    }

    #[test]
    fn test_language_for_qualifier_is_case_sensitive() {
        assert_eq!(language_for_qualifier("ZH-rCN"), "ZH-CN");
        assert_eq!(language_for_qualifier("NB"), "NB");
    }

    #[test]
    fn test_determine_language_uses_first_values_segment() {
        assert_eq!(
            determine_language_given_path("values-fr/values-de/strings.xml", "en"),
            Some("fr".to_string())
        );
        assert_eq!(
            determine_language_given_path("values/values-de/strings.xml", "en"),
            Some("en".to_string())
        );
    }

    #[test]
    fn test_determine_language_ignores_lookalike_segments() {
        assert_eq!(determine_language_given_path("valuesfr/strings.xml", "en"), None);
        assert_eq!(determine_language_given_path("values-/strings.xml", "en"), None);
        assert_eq!(determine_language_given_path("strings.xml", "en"), None);
    }

    #[test]
    fn test_default_language_for() {
        assert_eq!(default_language_for("zh-TW"), Some("zh-Hant"));
        assert_eq!(default_language_for("fr"), None);
    }

    #[test]
    fn test_is_resource_directory_name() {
        assert!(is_resource_directory_name("values"));
        assert!(is_resource_directory_name("values-es"));
        assert!(is_resource_directory_name("values-zh-rCN"));
        assert!(!is_resource_directory_name("values-"));
        assert!(!is_resource_directory_name("layout"));
        assert!(!is_resource_directory_name("my-values"));
    }

    #[test]
    fn test_can_handle_directory() {
        let res = tempfile::tempdir().unwrap();
        assert!(!can_handle_directory(res.path()).unwrap());

        fs::create_dir(res.path().join("layout")).unwrap();
        assert!(!can_handle_directory(res.path()).unwrap());

        fs::create_dir(res.path().join("values-de")).unwrap();
        assert!(can_handle_directory(res.path()).unwrap());
    }

    #[test]
    fn test_can_handle_missing_directory_is_error() {
        let res = tempfile::tempdir().unwrap();
        assert!(can_handle_directory(res.path().join("missing")).is_err());
    }
}
