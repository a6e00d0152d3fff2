use log::debug;

use crate::classify::DefinitionSource;
use crate::detect::{detect, unkeyed_composite};
use crate::document::Document;
use crate::mutate::{Marker, apply};
use crate::plan::InsertionPlan;
use crate::registry::AliasRegistry;
use crate::resolve::resolve;

/// Outcome of examining one article.
#[derive(Debug)]
pub enum Decision {
    /// A marker (or a keyed composite container) is already there.
    AlreadyPresent,
    Pending(Pending),
}

/// A resolved plan waiting for its Commons category.
#[derive(Debug, Clone)]
pub struct Pending {
    lines: Vec<String>,
    plan: InsertionPlan,
    composite: crate::registry::CompositeContainer,
}

impl Pending {
    pub fn plan(&self) -> &InsertionPlan {
        &self.plan
    }

    /// The article text with the marker for `category` added.
    pub fn mutate(&self, category: &str) -> String {
        let marker = Marker::commonscat(category);
        apply(&self.lines, &self.plan, &marker, &self.composite).join("\n")
    }
}

/// Detects an existing marker and, if there is none, plans where one goes.
///
/// An un-keyed `{{Sister project links}}` takes precedence over any line
/// position: the marker keys are added to it and no line is inserted.
pub fn decide(
    document: &Document,
    registry: &AliasRegistry,
    source: &dyn DefinitionSource,
) -> Decision {
    let templates = document.templates();
    if detect(&templates, registry) {
        return Decision::AlreadyPresent;
    }

    let composite = *registry.composite();
    let lines = document.lines();
    let plan = match unkeyed_composite(&templates, registry) {
        Some(container) => InsertionPlan::ParameterAugment {
            template: container.full,
            missing: composite
                .keys()
                .into_iter()
                .filter(|key| !container.has(key))
                .collect(),
        },
        None => resolve(&lines, registry, source),
    };
    debug!("Plan: {plan}");

    Decision::Pending(Pending {
        lines,
        plan,
        composite,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::NullSource;
    use crate::tests::MapSource;

    fn pending(text: &str) -> Pending {
        match decide(&Document::new(text), AliasRegistry::global(), &NullSource) {
            Decision::Pending(p) => p,
            Decision::AlreadyPresent => panic!("marker unexpectedly present in {text:?}"),
        }
    }

    #[test]
    fn present_marker_short_circuits() {
        let decision = decide(
            &Document::new("Text.\n{{Commonscat|X}}"),
            AliasRegistry::global(),
            &NullSource,
        );
        assert!(matches!(decision, Decision::AlreadyPresent));
    }

    #[test]
    fn present_marker_skips_definition_lookups() {
        let source = MapSource::new(&[]);
        let text = "Text.\n{{Commonscat|X}}\n{{Europe topic}}";
        decide(&Document::new(text), AliasRegistry::global(), &source);
        assert_eq!(source.fetches(), 0);
    }

    #[test]
    fn composite_augmentation_supersedes_insertion() {
        let p = pending("Text.\n== Other websites ==\n{{Sister project links|wikt=x}}\n{{Stub}}");
        assert!(matches!(
            p.plan(),
            InsertionPlan::ParameterAugment { missing, .. } if missing == &vec!["commonscat", "c"]
        ));
        assert_eq!(
            p.mutate("Towers"),
            "Text.\n== Other websites ==\n{{Sister project links|wikt=x|commonscat=yes|c=Towers}}\n{{Stub}}"
        );
    }

    #[test]
    fn mutate_inserts_line() {
        let p = pending("Text.\n\n{{Stub}}");
        assert_eq!(p.mutate("Towers"), "Text.\n\n{{Commonscat|Towers}}\n{{Stub}}");
    }

    #[test]
    fn crlf_document_spans_line_up() {
        let p = pending("Text.\r\n{{Sister project links}}\r\n");
        assert_eq!(
            p.mutate("Towers"),
            "Text.\n{{Sister project links|commonscat=yes|c=Towers}}"
        );
    }
}
