use std::collections::HashMap;

use log::{debug, warn};

use crate::io::{StoreError, WikiClient};
use crate::registry::AliasRegistry;
use crate::wikitext::kinds::Comment;
use crate::wikitext::normalize_name;

/// Read access to template definitions.
pub trait DefinitionSource {
    /// Source text of the named template, `None` if it does not exist.
    fn fetch_definition(&self, name: &str) -> Result<Option<String>, StoreError>;
}

impl DefinitionSource for WikiClient {
    fn fetch_definition(&self, name: &str) -> Result<Option<String>, StoreError> {
        self.fetch_template(name)
    }
}

/// A source that knows no definitions. Used offline, where every template
/// not classified statically is treated as ordinary content.
pub struct NullSource;

impl DefinitionSource for NullSource {
    fn fetch_definition(&self, _name: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }
}

/// Decides whether a template is a navbox wrapper by reading its definition.
///
/// Lives for one resolution: each distinct normalized name is fetched at most
/// once, and any failure answers `false`.
pub struct AggregatorClassifier<'a> {
    source: &'a dyn DefinitionSource,
    registry: &'a AliasRegistry,
    verdicts: HashMap<String, bool>,
}

impl<'a> AggregatorClassifier<'a> {
    pub fn new(source: &'a dyn DefinitionSource, registry: &'a AliasRegistry) -> Self {
        Self {
            source,
            registry,
            verdicts: HashMap::new(),
        }
    }

    pub fn is_aggregator(&mut self, name: &str) -> bool {
        let key = normalize_name(name);
        if key.is_empty() {
            return false;
        }
        if let Some(&verdict) = self.verdicts.get(&key) {
            return verdict;
        }

        let verdict = self.classify(Comment::strip(name).trim());
        self.verdicts.insert(key, verdict);
        verdict
    }

    /// Number of distinct names looked up so far.
    pub fn lookups(&self) -> usize {
        self.verdicts.len()
    }

    fn classify(&self, name: &str) -> bool {
        match self.source.fetch_definition(name) {
            Ok(Some(definition)) if !definition.trim().is_empty() => {
                let definition = definition.to_lowercase();
                let verdict = self
                    .registry
                    .aggregator_signatures()
                    .iter()
                    .any(|signature| definition.contains(signature));
                debug!("Template {name} navbox: {verdict}");
                verdict
            }
            Ok(_) => {
                debug!("Template {name} has no definition");
                false
            }
            Err(e) => {
                warn!("Could not classify template {name}: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{FailingSource, MapSource};

    #[test]
    fn navbox_definition_is_aggregator() {
        let source = MapSource::new(&[(
            "Europe topic",
            "{{Navbox\n| name = Europe topic\n| list1 = ...}}",
        )]);
        let mut classifier = AggregatorClassifier::new(&source, AliasRegistry::global());
        assert!(classifier.is_aggregator("Europe topic"));
    }

    #[test]
    fn signature_match_ignores_case() {
        let source = MapSource::new(&[("Planets", "{{NAVBOX WITH COLUMNS|...}}")]);
        let mut classifier = AggregatorClassifier::new(&source, AliasRegistry::global());
        assert!(classifier.is_aggregator("Planets"));
    }

    #[test]
    fn ordinary_template_is_not_aggregator() {
        let source = MapSource::new(&[("Reflist", "<div class=\"reflist\">{{{1}}}</div>")]);
        let mut classifier = AggregatorClassifier::new(&source, AliasRegistry::global());
        assert!(!classifier.is_aggregator("Reflist"));
    }

    #[test]
    fn missing_or_empty_definition_is_not_aggregator() {
        let source = MapSource::new(&[("Blank", "   ")]);
        let mut classifier = AggregatorClassifier::new(&source, AliasRegistry::global());
        assert!(!classifier.is_aggregator("Blank"));
        assert!(!classifier.is_aggregator("Nowhere"));
    }

    #[test]
    fn fetch_failure_is_not_aggregator() {
        let mut classifier = AggregatorClassifier::new(&FailingSource, AliasRegistry::global());
        assert!(!classifier.is_aggregator("Europe topic"));
    }

    #[test]
    fn each_name_is_fetched_once() {
        let source = MapSource::new(&[("Europe topic", "{{Navbox}}")]);
        let mut classifier = AggregatorClassifier::new(&source, AliasRegistry::global());
        assert!(classifier.is_aggregator("Europe topic"));
        assert!(classifier.is_aggregator("europe_topic"));
        assert!(classifier.is_aggregator(" Europe topic "));
        assert_eq!(source.fetches(), 1);
        assert_eq!(classifier.lookups(), 1);
    }

    #[test]
    fn failures_are_memoized_too() {
        let source = FailingSource;
        let mut classifier = AggregatorClassifier::new(&source, AliasRegistry::global());
        classifier.is_aggregator("A");
        classifier.is_aggregator("a");
        assert_eq!(classifier.lookups(), 1);
    }

    #[test]
    fn null_source_knows_nothing() {
        let mut classifier = AggregatorClassifier::new(&NullSource, AliasRegistry::global());
        assert!(!classifier.is_aggregator("Europe topic"));
    }
}
