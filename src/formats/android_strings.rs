//! Support for Android `strings.xml` localization format.
//!
//! Only `<string>` elements directly under `<resources>` are entries; plurals
//! and string arrays are skipped. Values are decoded into canonical text on
//! read and encoded back on write, see [`crate::escape`].

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use serde::Serialize;
use std::{
    io::{BufRead, Write},
    path::Path,
};

use crate::{
    error::Error,
    escape::{decode, encode},
    language::{default_language_for, determine_language_given_path},
    options::FormatterOptions,
    traits::{Parser, Row, Section, TranslationStore},
};

pub const FORMAT_NAME: &str = "android";
pub const EXTENSION: &str = ".xml";
pub const DEFAULT_FILE_NAME: &str = "strings.xml";

/// A `strings.xml` document holding canonical (decoded) text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Format {
    /// Language the document is written for. Parsed documents leave this
    /// empty since `strings.xml` does not name its language.
    pub language: String,
    pub sections: Vec<FormatSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormatSection {
    pub name: String,
    pub entries: Vec<Entry>,
}

/// One translatable string of a single language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub key: String,
    /// Canonical text: unescaped, canonical placeholders.
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Parser for Format {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);

        let mut buf = Vec::new();
        let mut open_elements: Vec<Vec<u8>> = Vec::new();
        let mut entries = Vec::new();

        loop {
            let in_resources = open_elements.len() == 1 && open_elements[0] == b"resources";
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) if in_resources && e.name().as_ref() == b"string" => {
                    let key = parse_name(e)?;
                    let raw = read_raw_text(&mut xml_reader)?;
                    entries.push(Entry::new(key, decode(&raw)));
                }
                Ok(Event::Empty(ref e)) if in_resources && e.name().as_ref() == b"string" => {
                    entries.push(Entry::new(parse_name(e)?, String::new()));
                }
                Ok(Event::Start(ref e)) => open_elements.push(e.name().as_ref().to_vec()),
                Ok(Event::End(_)) => {
                    open_elements.pop();
                }
                Ok(Event::Eof) => {
                    if let Some(name) = open_elements.last() {
                        return Err(Error::invalid_resource(format!(
                            "unclosed element <{}>",
                            String::from_utf8_lossy(name)
                        )));
                    }
                    break;
                }
                Ok(_) => {}
                Err(e) => return Err(Error::XmlParse(e)),
            }
            buf.clear();
        }

        Ok(Format {
            language: String::new(),
            sections: vec![FormatSection {
                name: String::new(),
                entries,
            }],
        })
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new(&mut writer);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        write_raw(&mut xml_writer, "\n")?;
        write_comment(&mut xml_writer, "Android Strings File")?;
        write_raw(&mut xml_writer, "\n")?;
        write_comment(
            &mut xml_writer,
            &format!("Generated by {}", env!("CARGO_PKG_NAME")),
        )?;
        write_raw(&mut xml_writer, "\n")?;
        write_comment(&mut xml_writer, &format!("Language: {}", self.language))?;
        write_raw(&mut xml_writer, "\n")?;

        xml_writer.write_event(Event::Start(BytesStart::new("resources")))?;
        write_raw(&mut xml_writer, "\n")?;

        for section in self.sections.iter().filter(|s| !s.entries.is_empty()) {
            write_raw(&mut xml_writer, "\n")?;
            if !section.name.is_empty() {
                write_raw(&mut xml_writer, "\t")?;
                write_comment(&mut xml_writer, &section.name)?;
                write_raw(&mut xml_writer, "\n")?;
            }

            for entry in &section.entries {
                if let Some(comment) = entry.comment.as_deref().filter(|c| !c.is_empty()) {
                    write_raw(&mut xml_writer, "\t")?;
                    write_comment(&mut xml_writer, comment)?;
                    write_raw(&mut xml_writer, "\n")?;
                }

                let mut elem = BytesStart::new("string");
                elem.push_attribute(("name", entry.key.as_str()));

                write_raw(&mut xml_writer, "\t")?;
                xml_writer.write_event(Event::Start(elem))?;
                write_raw(&mut xml_writer, &encode_content(&entry.text))?;
                xml_writer.write_event(Event::End(BytesEnd::new("string")))?;
                write_raw(&mut xml_writer, "\n")?;
            }
        }

        xml_writer.write_event(Event::End(BytesEnd::new("resources")))?;
        write_raw(&mut xml_writer, "\n")?;
        Ok(())
    }
}

impl Format {
    /// Every entry of the document in order, regardless of section.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.sections.iter().flat_map(|section| section.entries.iter())
    }

    /// Builds the document for `language` from the rows of `store` that pass
    /// the tag filter in `options`.
    ///
    /// A row without text for `language` falls back to the language's
    /// default (e.g. `zh-TW` to `zh-Hant`), then to the base language when
    /// `include_untranslated` is set. Rows still without text are left out so
    /// Android's own resource fallback can supply them. Sections without any
    /// written row are left out as well.
    pub fn from_store<S: TranslationStore>(
        store: &S,
        language: &str,
        options: &FormatterOptions,
    ) -> Self {
        let default_language = default_language_for(language);
        let base_language = if options.include_untranslated {
            store.base_language()
        } else {
            None
        };

        let mut sections = Vec::new();
        for section in store.sections() {
            let mut entries = Vec::new();
            for row in section
                .rows()
                .filter(|row| row.matches_filter(&options.tags, options.untagged))
            {
                let key = row.key();
                let text = store
                    .translation(key, language)
                    .or_else(|| default_language.and_then(|lang| store.translation(key, lang)))
                    .or_else(|| base_language.and_then(|lang| store.translation(key, lang)));

                match text {
                    Some(text) => entries.push(Entry {
                        key: key.to_string(),
                        text: text.to_string(),
                        comment: row.comment().map(str::to_string),
                    }),
                    None => tracing::debug!(key, language, "No translation, row omitted"),
                }
            }

            if !entries.is_empty() {
                sections.push(FormatSection {
                    name: section.name().to_string(),
                    entries,
                });
            }
        }

        Format {
            language: language.to_string(),
            sections,
        }
    }

    /// Hands every entry to `store` as a translation in `language`.
    /// Returns the number of entries stored.
    pub fn apply_to<S: TranslationStore>(self, store: &mut S, language: &str) -> usize {
        let mut count = 0;
        for entry in self.sections.into_iter().flat_map(|section| section.entries) {
            store.set_translation(&entry.key, language, entry.text);
            count += 1;
        }
        count
    }
}

impl Entry {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Entry {
            key: key.into(),
            text: text.into(),
            comment: None,
        }
    }
}

/// Reads the `strings.xml` at `path` into `store`.
///
/// The language is taken from `language` or, when `None`, from the
/// `values[-<qualifier>]` directory in `path`. The whole file is parsed
/// before anything is stored, so a malformed file leaves `store` untouched.
pub fn read_file<P, S>(path: P, language: Option<&str>, store: &mut S) -> Result<usize, Error>
where
    P: AsRef<Path>,
    S: TranslationStore,
{
    let path = path.as_ref();
    let language = match language {
        Some(language) => language.to_string(),
        None => {
            let base_language = store.base_language().unwrap_or_default();
            determine_language_given_path(path, base_language)
                .filter(|language| !language.is_empty())
                .ok_or_else(|| Error::UndeterminedLanguage(path.display().to_string()))?
        }
    };

    let format = Format::read_from(path)?;
    let count = format.apply_to(store, &language);
    tracing::debug!(path = %path.display(), language, count, "Read strings file");
    Ok(count)
}

/// Writes the `strings.xml` for `language` to `path`.
pub fn write_file<P, S>(
    path: P,
    store: &S,
    language: &str,
    options: &FormatterOptions,
) -> Result<(), Error>
where
    P: AsRef<Path>,
    S: TranslationStore,
{
    let path = path.as_ref();
    let format = Format::from_store(store, language, options);
    format.write_to(path)?;
    tracing::debug!(
        path = %path.display(),
        language,
        count = format.entries().count(),
        "Wrote strings file"
    );
    Ok(())
}

fn parse_name(e: &BytesStart) -> Result<String, Error> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::invalid_resource(e.to_string()))?;
        if attr.key.as_ref() == b"name" {
            return Ok(attr.unescape_value()?.to_string());
        }
    }
    Err(Error::invalid_resource("string tag missing 'name'"))
}

/// Collects the raw, still escaped text of the current element up to its
/// end tag. Inline markup is dropped, its text is kept.
fn read_raw_text<R: BufRead>(xml_reader: &mut Reader<R>) -> Result<String, Error> {
    let mut buf = Vec::new();
    let mut value = String::new();
    let mut depth = 0usize;
    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Text(e)) => value.push_str(&String::from_utf8(e.into_inner().into_owned())?),
            Ok(Event::CData(e)) => value.push_str(&String::from_utf8(e.into_inner().into_owned())?),
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(e)) if depth == 0 => {
                if e.name().as_ref() != b"string" {
                    return Err(Error::invalid_resource("string tag closed by another element"));
                }
                break;
            }
            Ok(Event::End(_)) => depth -= 1,
            Ok(Event::Eof) => return Err(Error::invalid_resource("Unexpected EOF")),
            Ok(_) => (),
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    }
    // XML line-end normalization; raw text still carries `\r\n` and `\r`.
    Ok(value.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Encodes `text` for element content. `]]>` may not appear in character
/// data, so its `>` is written as an entity.
fn encode_content(text: &str) -> String {
    encode(text).replace("]]>", "]]&gt;")
}

fn write_raw<W: Write>(xml_writer: &mut Writer<W>, text: &str) -> Result<(), Error> {
    xml_writer.write_event(Event::Text(BytesText::from_escaped(text)))?;
    Ok(())
}

/// Writes `<!-- text -->`. `--` is not allowed inside XML comments and is
/// replaced by an em dash.
fn write_comment<W: Write>(xml_writer: &mut Writer<W>, text: &str) -> Result<(), Error> {
    let text = format!(" {} ", text.replace("--", "—"));
    xml_writer.write_event(Event::Comment(BytesText::from_escaped(text)))?;
    Ok(())
}
