#![deny(unsafe_code)]

//! On-disk TOML layout of a header dictionary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const DICTIONARY_SCHEMA: &str = "qa-headers";
pub const DICTIONARY_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryFile {
    pub dictionary: DictionaryHeader,
    #[serde(default)]
    pub markers: Vec<MarkerEntry>,
    #[serde(default)]
    pub tests: BTreeMap<String, TestEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryHeader {
    pub schema: String,
    pub schema_version: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerEntry {
    pub title: String,
    pub test: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestEntry {
    #[serde(default)]
    pub inline_pairs: bool,
    /// Canonical field -> accepted raw spellings.
    #[serde(default)]
    pub fields: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub numbered: Vec<NumberedEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumberedEntry {
    pub aliases: Vec<String>,
    pub field_prefix: String,
    pub count: u32,
    #[serde(default = "default_start")]
    pub start: u32,
}

fn default_start() -> u32 {
    1
}
