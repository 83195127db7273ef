#![deny(unsafe_code)]

//! Per-test header dictionaries and the section marker table.
//!
//! Every test owns a private namespace: the same raw header text may map to
//! different canonical fields under different tests. Lookups never cross
//! from one test into another.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::str::FromStr;

use qa_model::TestId;
use tracing::debug;

use crate::error::{Result, StandardsError};
use crate::normalize::{normalize_header, normalize_title};
use crate::schema::{DICTIONARY_SCHEMA, DICTIONARY_SCHEMA_VERSION, DictionaryFile, TestEntry};

/// A section title prefix and the test it opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMarker {
    /// Uppercased title prefix.
    pub title: String,
    pub test: TestId,
}

impl SectionMarker {
    pub fn new(title: &str, test: TestId) -> Self {
        Self {
            title: normalize_title(title),
            test,
        }
    }
}

/// Accepted header spellings for one test, many-to-one onto canonical fields.
#[derive(Debug, Clone)]
pub struct TestHeaders {
    test: TestId,
    inline_pairs: bool,
    by_normalized: HashMap<String, String>,
    spellings: BTreeMap<String, String>,
}

impl TestHeaders {
    pub fn new(test: TestId) -> Self {
        Self {
            test,
            inline_pairs: false,
            by_normalized: HashMap::new(),
            spellings: BTreeMap::new(),
        }
    }

    /// Admit label/value settings rows for this test.
    #[must_use]
    pub fn with_inline_pairs(mut self, enable: bool) -> Self {
        self.inline_pairs = enable;
        self
    }

    /// Adds a header spelling for `field`.
    ///
    /// Re-adding a spelling for the same field is a no-op; a spelling that
    /// already resolves to a different field is rejected.
    pub fn insert(&mut self, alias: &str, field: &str) -> Result<()> {
        let key = normalize_header(alias);
        if let Some(existing) = self.by_normalized.get(&key) {
            if existing != field {
                return Err(StandardsError::ConflictingAlias {
                    test: self.test,
                    alias: alias.trim().to_string(),
                    existing: existing.clone(),
                    field: field.to_string(),
                });
            }
            return Ok(());
        }
        self.by_normalized.insert(key, field.to_string());
        self.spellings
            .insert(alias.trim().to_string(), field.to_string());
        Ok(())
    }

    /// Builder form of [`TestHeaders::insert`].
    pub fn with_field(mut self, field: &str, aliases: &[&str]) -> Result<Self> {
        self.insert(field, field)?;
        for alias in aliases {
            self.insert(alias, field)?;
        }
        Ok(self)
    }

    /// Resolves raw header text to its canonical field.
    pub fn lookup(&self, raw: &str) -> Option<&str> {
        let key = normalize_header(raw);
        if key.is_empty() {
            return None;
        }
        self.by_normalized.get(&key).map(String::as_str)
    }

    pub fn is_header(&self, raw: &str) -> bool {
        self.lookup(raw).is_some()
    }

    pub fn test(&self) -> TestId {
        self.test
    }

    pub fn accepts_inline_pairs(&self) -> bool {
        self.inline_pairs
    }

    /// Raw spellings and the field each maps to, sorted by spelling.
    pub fn spellings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.spellings
            .iter()
            .map(|(alias, field)| (alias.as_str(), field.as_str()))
    }

    /// Distinct canonical fields.
    pub fn fields(&self) -> BTreeSet<&str> {
        self.by_normalized.values().map(String::as_str).collect()
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.by_normalized.values().any(|f| f == field)
    }

    /// Number of accepted spellings after normalization.
    pub fn len(&self) -> usize {
        self.by_normalized.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_normalized.is_empty()
    }

    fn absorb(&mut self, other: TestHeaders) -> Result<()> {
        self.inline_pairs |= other.inline_pairs;
        for (alias, field) in other.spellings {
            self.insert(&alias, &field)?;
        }
        Ok(())
    }
}

/// The complete header dictionary: ordered section markers plus one
/// [`TestHeaders`] per test.
#[derive(Debug, Clone, Default)]
pub struct HeaderDictionary {
    origin: String,
    markers: Vec<SectionMarker>,
    tests: BTreeMap<TestId, TestHeaders>,
}

impl HeaderDictionary {
    /// Creates an empty dictionary; `origin` names it in error messages.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            ..Self::default()
        }
    }

    /// Appends a section marker. Earlier markers take priority.
    #[must_use]
    pub fn with_marker(mut self, title: &str, test: TestId) -> Self {
        self.markers.push(SectionMarker::new(title, test));
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: TestHeaders) -> Self {
        self.tests.insert(headers.test, headers);
        self
    }

    /// Parses and builds a dictionary from TOML text.
    ///
    /// Marker coverage is not checked here because an overlay may add
    /// markers for tests defined elsewhere; see [`HeaderDictionary::validate`].
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self> {
        let file: DictionaryFile = toml::from_str(text).map_err(|source| StandardsError::Toml {
            origin: origin.to_string(),
            source,
        })?;
        Self::from_file(file, origin)
    }

    pub fn from_file(file: DictionaryFile, origin: &str) -> Result<Self> {
        if file.dictionary.schema != DICTIONARY_SCHEMA
            || file.dictionary.schema_version != DICTIONARY_SCHEMA_VERSION
        {
            return Err(StandardsError::UnsupportedSchema {
                origin: origin.to_string(),
                schema: file.dictionary.schema,
                version: file.dictionary.schema_version,
            });
        }

        let mut dictionary = Self::new(origin);
        for marker in &file.markers {
            let test = parse_test(&marker.test, origin)?;
            let marker = SectionMarker::new(&marker.title, test);
            if marker.title.is_empty() {
                return Err(StandardsError::EmptyEntry {
                    origin: origin.to_string(),
                    test,
                    what: "marker title",
                });
            }
            dictionary.markers.push(marker);
        }
        for (name, entry) in &file.tests {
            let test = parse_test(name, origin)?;
            let headers = build_test_headers(test, entry, origin)?;
            dictionary.tests.insert(test, headers);
        }

        debug!(
            origin,
            markers = dictionary.markers.len(),
            tests = dictionary.tests.len(),
            "header dictionary built"
        );
        Ok(dictionary)
    }

    /// Checks that every marker opens a test that has headers.
    pub fn validate(&self) -> Result<()> {
        for marker in &self.markers {
            let covered = self
                .tests
                .get(&marker.test)
                .is_some_and(|headers| !headers.is_empty());
            if !covered {
                return Err(StandardsError::MarkerWithoutHeaders {
                    title: marker.title.clone(),
                    test: marker.test,
                });
            }
        }
        Ok(())
    }

    /// Layers `overlay` on top of this dictionary.
    ///
    /// Overlay markers are consulted before the existing ones. Overlay
    /// spellings are added to the matching test and may enable, but never
    /// disable, inline pairs.
    pub fn merge(&mut self, overlay: HeaderDictionary) -> Result<()> {
        let mut markers = overlay.markers;
        markers.append(&mut self.markers);
        self.markers = markers;

        for (test, headers) in overlay.tests {
            match self.tests.get_mut(&test) {
                Some(existing) => existing.absorb(headers)?,
                None => {
                    self.tests.insert(test, headers);
                }
            }
        }
        self.origin = format!("{} + {}", self.origin, overlay.origin);
        Ok(())
    }

    /// Maps a free-text section title to a test: the first marker whose
    /// title is a prefix of the uppercased title wins.
    pub fn match_title(&self, title: &str) -> Option<TestId> {
        let title = normalize_title(title);
        self.markers
            .iter()
            .find(|marker| title.starts_with(&marker.title))
            .map(|marker| marker.test)
    }

    pub fn headers(&self, test: TestId) -> Option<&TestHeaders> {
        self.tests.get(&test)
    }

    pub fn markers(&self) -> &[SectionMarker] {
        &self.markers
    }

    /// Markers that open `test`, in priority order.
    pub fn markers_for(&self, test: TestId) -> impl Iterator<Item = &SectionMarker> {
        self.markers.iter().filter(move |marker| marker.test == test)
    }

    pub fn tests(&self) -> impl Iterator<Item = &TestHeaders> {
        self.tests.values()
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }
}

fn parse_test(name: &str, origin: &str) -> Result<TestId> {
    TestId::from_str(name).map_err(|_| StandardsError::UnknownTest {
        origin: origin.to_string(),
        name: name.to_string(),
    })
}

fn build_test_headers(test: TestId, entry: &TestEntry, origin: &str) -> Result<TestHeaders> {
    let mut headers = TestHeaders::new(test).with_inline_pairs(entry.inline_pairs);
    let empty = |what| StandardsError::EmptyEntry {
        origin: origin.to_string(),
        test,
        what,
    };

    for (field, aliases) in &entry.fields {
        if field.trim().is_empty() {
            return Err(empty("canonical field"));
        }
        headers.insert(field, field)?;
        for alias in aliases {
            if normalize_header(alias).is_empty() {
                return Err(empty("header alias"));
            }
            headers.insert(alias, field)?;
        }
    }

    for pattern in &entry.numbered {
        if pattern.count == 0 {
            return Err(StandardsError::InvalidNumbered {
                origin: origin.to_string(),
                test,
                reason: "count must be at least 1".to_string(),
            });
        }
        if pattern.field_prefix.trim().is_empty() {
            return Err(empty("numbered field prefix"));
        }
        for alias in &pattern.aliases {
            let alias = alias.trim();
            if alias.is_empty() {
                return Err(empty("numbered alias"));
            }
            for offset in 0..pattern.count {
                let number = pattern.start + offset;
                let field = format!("{}{offset}", pattern.field_prefix);
                headers.insert(&format!("{alias} {number}"), &field)?;
                headers.insert(&format!("{alias}{number}"), &field)?;
            }
        }
    }

    Ok(headers)
}
