//! Named entity table.
//!
//! Entity nodes with a named body (`&eacute;`) are checked against this table.
//! The table is process-wide and immutable once installed. Installation is
//! explicit: call [`initialize_extra_validations`] for the built-in table, or
//! [`load_named_entities_from_json`] with the WHATWG `entities.json` data.
//! Until one of them runs, named-entity validation is skipped.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::de::IgnoredAny;
use thiserror::Error;

/// The installed table of entity names, stored without `&` and `;`.
static NAMED_ENTITIES: OnceLock<HashSet<String>> = OnceLock::new();

/// Set after the first lookup made without a table has been logged.
static UNLOADED_LOOKUP_LOGGED: AtomicBool = AtomicBool::new(false);

/// Errors from loading or installing a named-entity table.
#[derive(Debug, Error)]
pub enum EntityTableError {
    /// The JSON document could not be parsed.
    #[error("invalid entity table JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The JSON document parsed but contained no `;`-terminated entities.
    #[error("entity table contains no named entities")]
    Empty,
    /// A table was already installed for this process.
    #[error("a named entity table is already installed")]
    AlreadyInstalled,
}

/// Every `;`-terminated name in the WHATWG `entities.json`, without `&` and
/// `;`, separated by whitespace.
const BUILTIN_ENTITY_NAMES: &str = include_str!("entity_names.txt");

/// Install the built-in entity table if no table is installed yet.
///
/// Safe to call any number of times; later calls are no-ops. Returns the
/// number of entities in whichever table ends up installed.
pub fn initialize_extra_validations() -> usize {
    NAMED_ENTITIES
        .get_or_init(|| BUILTIN_ENTITY_NAMES.split_whitespace().map(str::to_string).collect())
        .len()
}

/// Parse a WHATWG-format `entities.json` document into a set of entity names.
///
/// Only `;`-terminated keys are kept (legacy forms such as `&amp` are
/// references without a terminator, which the scanner never produces as
/// entities). Names are stored without the leading `&` and trailing `;`.
///
/// # Errors
///
/// Returns [`EntityTableError::Json`] if `json` is not a JSON object of
/// entity entries, or [`EntityTableError::Empty`] if it has no usable names.
pub fn parse_entity_table(json: &str) -> Result<HashSet<String>, EntityTableError> {
    let entries: HashMap<String, IgnoredAny> = serde_json::from_str(json)?;
    let names: HashSet<String> = entries
        .keys()
        .filter_map(|key| key.strip_suffix(';'))
        .map(|key| key.strip_prefix('&').unwrap_or(key).to_string())
        .collect();

    if names.is_empty() {
        return Err(EntityTableError::Empty);
    }
    Ok(names)
}

/// Install `names` as the process-wide entity table.
///
/// # Errors
///
/// Returns [`EntityTableError::AlreadyInstalled`] if a table is already in
/// place; the installed table is never replaced.
pub fn install_named_entities(names: HashSet<String>) -> Result<(), EntityTableError> {
    NAMED_ENTITIES
        .set(names)
        .map_err(|_| EntityTableError::AlreadyInstalled)
}

/// Parse and install a WHATWG-format `entities.json` document.
///
/// Returns the number of installed names.
///
/// # Errors
///
/// Returns any error from [`parse_entity_table`] or
/// [`install_named_entities`].
pub fn load_named_entities_from_json(json: &str) -> Result<usize, EntityTableError> {
    let names = parse_entity_table(json)?;
    let count = names.len();
    install_named_entities(names)?;
    Ok(count)
}

/// Returns true once an entity table has been installed.
#[must_use]
pub fn named_entities_loaded() -> bool {
    NAMED_ENTITIES.get().is_some()
}

/// Look up an entity name (without `&` and `;`).
///
/// Returns `None` when no table is installed, in which case the caller must
/// skip validation. Lookups are case-sensitive, as entity names are.
#[must_use]
pub fn is_known_entity(name: &str) -> Option<bool> {
    let names = NAMED_ENTITIES.get();
    if names.is_none() && !UNLOADED_LOOKUP_LOGGED.swap(true, Ordering::Relaxed) {
        log::warn!(
            target: "lintel_html::entities",
            "named entity table not loaded; skipping entity name validation"
        );
    }
    names.map(|names| names.contains(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entity_table_keeps_terminated_names() {
        let json = r#"{
            "&amp": { "codepoints": [38], "characters": "&" },
            "&amp;": { "codepoints": [38], "characters": "&" },
            "&eacute;": { "codepoints": [233], "characters": "é" }
        }"#;
        let names = parse_entity_table(json).unwrap();
        assert_eq!(names.len(), 2);
        assert!(names.contains("amp"));
        assert!(names.contains("eacute"));
    }

    #[test]
    fn test_parse_entity_table_ignores_entry_contents() {
        let json = r#"{"&check;": null, "&NewLine;": {"characters": "\n", "extra": [1, 2]}}"#;
        let names = parse_entity_table(json).unwrap();
        assert_eq!(names, HashSet::from(["check".to_string(), "NewLine".to_string()]));
    }

    #[test]
    fn test_parse_entity_table_rejects_garbage() {
        assert!(matches!(parse_entity_table("[1, 2]"), Err(EntityTableError::Json(_))));
        assert!(matches!(
            parse_entity_table(r#"{"&amp": {"codepoints": [38], "characters": "&"}}"#),
            Err(EntityTableError::Empty)
        ));
    }

    #[test]
    fn test_builtin_names_cover_html5() {
        let names: Vec<&str> = BUILTIN_ENTITY_NAMES.split_whitespace().collect();
        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(unique.len(), names.len());
        assert_eq!(names.len(), 2125);
        for name in ["eacute", "euro", "apos", "check", "AMP", "NewLine", "rarrw"] {
            assert!(unique.contains(name), "missing {name}");
        }
        assert!(names.iter().all(|name| !name.starts_with('&') && !name.ends_with(';')));
    }
}
