#![deny(unsafe_code)]

//! Header dictionary and section marker table for QA spreadsheets.
//!
//! The dictionary is declarative TOML (`standards/headers.toml`) compiled
//! into the crate; an overlay file can extend it without touching any
//! parsing code.
//!
//! ```ignore
//! use qa_model::TestId;
//! use qa_standards::load_default_dictionary;
//!
//! let dictionary = load_default_dictionary()?;
//! let test = dictionary.match_title("ACCURACY OF OPERATING POTENTIAL");
//! assert_eq!(test, Some(TestId::AccuracyOfOperatingPotential));
//! ```

pub mod dictionary;
pub mod error;
pub mod loader;
pub mod normalize;
pub mod schema;

pub use crate::dictionary::{HeaderDictionary, SectionMarker, TestHeaders};
pub use crate::error::{Result, StandardsError};
pub use crate::loader::{
    HEADERS_ENV_VAR, load_default_dictionary, load_dictionary, load_dictionary_with_overlay,
    overlay_path_from_env,
};
pub use crate::normalize::{normalize_header, normalize_title};
