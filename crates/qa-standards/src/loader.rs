//! Loading the built-in dictionary and optional overlays.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::dictionary::HeaderDictionary;
use crate::error::{Result, StandardsError};

/// Environment variable naming an overlay dictionary file.
pub const HEADERS_ENV_VAR: &str = "QA_HEADERS_FILE";

/// Built-in dictionary shipped with the workspace.
const BUILTIN_HEADERS: &str = include_str!("../../../standards/headers.toml");

const BUILTIN_ORIGIN: &str = "builtin:standards/headers.toml";

/// Loads the built-in header dictionary and marker table.
pub fn load_default_dictionary() -> Result<HeaderDictionary> {
    let dictionary = HeaderDictionary::from_toml_str(BUILTIN_HEADERS, BUILTIN_ORIGIN)?;
    dictionary.validate()?;
    Ok(dictionary)
}

/// Loads a standalone dictionary file (no built-in entries).
pub fn load_dictionary(path: &Path) -> Result<HeaderDictionary> {
    let dictionary = read_dictionary_file(path)?;
    dictionary.validate()?;
    Ok(dictionary)
}

/// Loads the built-in dictionary with an optional overlay file on top.
pub fn load_dictionary_with_overlay(overlay: Option<&Path>) -> Result<HeaderDictionary> {
    let mut dictionary = HeaderDictionary::from_toml_str(BUILTIN_HEADERS, BUILTIN_ORIGIN)?;
    if let Some(path) = overlay {
        let extra = read_dictionary_file(path)?;
        info!(path = %path.display(), "applying header dictionary overlay");
        dictionary.merge(extra)?;
    }
    dictionary.validate()?;
    Ok(dictionary)
}

/// Overlay path from `QA_HEADERS_FILE`, if set and non-empty.
pub fn overlay_path_from_env() -> Option<PathBuf> {
    std::env::var_os(HEADERS_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn read_dictionary_file(path: &Path) -> Result<HeaderDictionary> {
    let text = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    HeaderDictionary::from_toml_str(&text, &path.display().to_string())
}
