use crate::registry::AliasRegistry;
use crate::wikitext::Template;

/// Whether any template in the list already is a Commons category marker.
///
/// A plain alias matches by name alone. The composite container only counts
/// when it carries its flag or value key; without them the scan continues.
pub fn detect(templates: &[Template], registry: &AliasRegistry) -> bool {
    let composite = registry.composite();
    templates.iter().any(|template| {
        if registry.is_composite(&template.name) {
            composite.keys().iter().any(|key| template.has(key))
        } else {
            registry.is_marker(&template.name)
        }
    })
}

/// The first composite container that does not carry any marker key yet.
pub fn unkeyed_composite<'t>(
    templates: &'t [Template],
    registry: &AliasRegistry,
) -> Option<&'t Template> {
    let composite = registry.composite();
    templates.iter().find(|t| {
        registry.is_composite(&t.name) && !composite.keys().iter().any(|k| t.has(k))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MARKER_NAMES;
    use crate::wikitext::parse_templates;
    use rstest::rstest;

    fn detect_in(text: &str) -> bool {
        detect(&parse_templates(text), AliasRegistry::global())
    }

    #[test]
    fn every_alias_is_detected() {
        for name in MARKER_NAMES {
            assert!(detect_in(&format!("{{{{{name}}}}}")), "missed {name}");
            assert!(
                detect_in(&format!("{{{{{}|Foo}}}}", name.to_lowercase())),
                "missed lowercase {name}"
            );
        }
    }

    #[rstest]
    #[case("Text.\n{{Commons category|Towers}}\n")]
    #[case("{{ commons_cat |Towers}}")]
    #[case("{{Template:Commonscat|Towers}}")]
    #[case("{{Infobox|footer={{Commonscat|Towers}}}}")]
    #[case("{{Commonscat<!-- moved -->|Towers}}")]
    fn detects_variant_spellings(#[case] text: &str) {
        assert!(detect_in(text));
    }

    #[rstest]
    #[case("")]
    #[case("Plain prose with no templates.")]
    #[case("{{Stub}}\n{{Navbox}}")]
    #[case("<!-- {{Commonscat|Old}} -->")]
    #[case("{{Commonscat-like}}")]
    fn absent(#[case] text: &str) {
        assert!(!detect_in(text));
    }

    #[test]
    fn composite_without_keys_is_not_a_marker() {
        assert!(!detect_in("{{Sister project links|wikt=tower|b=yes}}"));
    }

    #[rstest]
    #[case("{{Sister project links|wikt=tower|commonscat=yes}}")]
    #[case("{{Sister project links|wikt=tower|c=Towers}}")]
    #[case("{{sister project links\n| c = Towers\n}}")]
    fn composite_with_either_key_is_a_marker(#[case] text: &str) {
        assert!(detect_in(text));
    }

    #[test]
    fn unkeyed_composite_does_not_stop_the_scan() {
        assert!(detect_in("{{Sister project links|wikt=x}}\n{{Commonscat|X}}"));
    }

    #[test]
    fn finds_unkeyed_composite() {
        let templates = parse_templates("{{Stub}} {{Sister project links|wikt=x}}");
        let found = unkeyed_composite(&templates, AliasRegistry::global());
        assert_eq!(found.map(|t| t.name.as_str()), Some("Sister project links"));

        let keyed = parse_templates("{{Sister project links|c=X}}");
        assert!(unkeyed_composite(&keyed, AliasRegistry::global()).is_none());
    }
}
