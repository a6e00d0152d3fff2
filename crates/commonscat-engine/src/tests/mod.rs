//! Shared fixtures for unit tests.

use std::cell::Cell;
use std::collections::HashMap;

use crate::classify::DefinitionSource;
use crate::io::StoreError;
use crate::wikitext::normalize_name;

/// Splits on `\n` only, so blank and trailing lines are kept as written.
pub fn lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n').map(str::to_string).collect()
}

/// In-memory template definitions that count how often they are read.
pub struct MapSource {
    definitions: HashMap<String, String>,
    fetches: Cell<usize>,
}

impl MapSource {
    pub fn new(definitions: &[(&str, &str)]) -> Self {
        Self {
            definitions: definitions
                .iter()
                .map(|(name, body)| (normalize_name(name), body.to_string()))
                .collect(),
            fetches: Cell::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.get()
    }
}

impl DefinitionSource for MapSource {
    fn fetch_definition(&self, name: &str) -> Result<Option<String>, StoreError> {
        self.fetches.set(self.fetches.get() + 1);
        Ok(self.definitions.get(&normalize_name(name)).cloned())
    }
}

/// Fails every lookup the way a dropped connection would.
pub struct FailingSource;

impl DefinitionSource for FailingSource {
    fn fetch_definition(&self, _name: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Api {
            code: "internal_api_error".to_string(),
            info: "connection reset".to_string(),
        })
    }
}
