//! # Alias Registry
//!
//! Read-only classification tables for template names. A single registry is
//! built on first use ([`AliasRegistry::global`]) and shared by reference with
//! the detector, the resolver and the classifier; nothing mutates it.

use std::collections::HashSet;
use std::sync::OnceLock;

use crate::wikitext::normalize_name;

/// Every known spelling and redirect of `{{Commonscat}}`.
pub const MARKER_NAMES: &[&str] = &[
    "Commonscat",
    "Commons cat",
    "Commonscat2",
    "Ccat",
    "Wikimedia commons cat",
    "Category commons",
    "C cat",
    "Commonscategory",
    "Commonsimages cat",
    "Container cat",
    "Commons category",
    "Commons category multi",
    "Commonscats",
    "Commons cat multi",
    "Commonscat multi",
    "Commons",
    "Wikimedia Commons",
    "Commons category-inline",
    "Commonscat-inline",
    "Commons cat-inline",
    "Commons category inline",
    "Commonscat inline",
    "Commonscatinline",
    "Commons-cat-inline",
    "Commons and category",
    "Commons+cat",
    "C18 year in topic",
];

pub const STUB_NAMES: &[&str] = &[
    "Multistub",
    "Stub",
    "Acid-base disorders",
    "Actor-stub",
    "Asia-stub",
    "Biography-stub",
    "Biology-stub",
    "Canada-stub",
    "Chem-stub",
    "Consequences of external causes",
    "Disorders of the breast",
    "Europe-stub",
    "Expand list",
    "Food-stub",
    "France-geo-stub",
    "Geo-stub",
    "History-stub",
    "Infobox medical intervention",
    "Japan-sports-bio-stub",
    "Japan-stub",
    "Lit-stub",
    "Math-stub",
    "Med-stub",
    "Military-stub",
    "Movie-stub",
    "Music-stub",
    "North-America-stub",
    "Performing-arts-stub",
    "Physics-stub",
    "Politics-stub",
    "Religion-stub",
    "Sci-stub",
    "Shock types",
    "Sport-stub",
    "Sports-biography-stub",
    "Switzerland-stub",
    "Tech-stub",
    "Transport-stub",
    "Tv-stub",
    "UK-stub",
    "US-actor-stub",
    "US-biography-stub",
    "US-geo-stub",
    "US-sports-bio-stub",
    "US-stub",
    "Video-game-stub",
    "Weather-stub",
];

/// Any template whose normalized name ends with this is a stub notice.
pub const STUB_SUFFIX: &str = "-stub";

pub const NAVIGATION_NAMES: &[&str] = &["Navbox", "Navbox with columns", "Navbox subgroup"];

pub const AUTHORITY_NAMES: &[&str] = &["Authority control", "Taxonbar", "Persondata"];

/// Substrings of a template definition that mark it as a navbox wrapper.
pub const AGGREGATOR_SIGNATURES: &[&str] =
    &["{{navbox", "{{navbox with columns", "{{navbox subgroup"];

pub const LINK_SECTION_NAMES: &[&str] = &["Other websites", "External links"];

/// `{{Sister project links}}` counts as a marker only when it carries one of
/// these keys.
pub const COMPOSITE: CompositeContainer = CompositeContainer {
    name: "sister project links",
    flag_key: "commonscat",
    value_key: "c",
};

/// A template that aggregates several sister-project links as parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeContainer {
    /// Normalized template name.
    pub name: &'static str,
    /// Boolean switch, set to `yes` when augmenting.
    pub flag_key: &'static str,
    /// Takes the Commons category itself.
    pub value_key: &'static str,
}

impl CompositeContainer {
    pub fn keys(&self) -> [&'static str; 2] {
        [self.flag_key, self.value_key]
    }
}

/// The kinds of boilerplate conventionally stacked at the end of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailerKind {
    Stub,
    Navigation,
    Authority,
}

/// A set of template names compared in normalized form.
#[derive(Debug, Clone, Default)]
pub struct AliasSet {
    names: HashSet<String>,
}

impl AliasSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| normalize_name(n.as_ref()))
                .collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&normalize_name(name))
    }
}

#[derive(Debug, Clone)]
pub struct AliasRegistry {
    markers: AliasSet,
    composite: CompositeContainer,
    stubs: AliasSet,
    navigation: AliasSet,
    authority: AliasSet,
    link_sections: AliasSet,
    aggregator_signatures: &'static [&'static str],
}

impl Default for AliasRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AliasRegistry {
    pub fn new() -> Self {
        Self {
            markers: AliasSet::new(MARKER_NAMES),
            composite: COMPOSITE,
            stubs: AliasSet::new(STUB_NAMES),
            navigation: AliasSet::new(NAVIGATION_NAMES),
            authority: AliasSet::new(AUTHORITY_NAMES),
            link_sections: AliasSet::new(LINK_SECTION_NAMES),
            aggregator_signatures: AGGREGATOR_SIGNATURES,
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static AliasRegistry {
        static REGISTRY: OnceLock<AliasRegistry> = OnceLock::new();
        REGISTRY.get_or_init(AliasRegistry::new)
    }

    pub fn is_marker(&self, name: &str) -> bool {
        self.markers.contains(name)
    }

    pub fn composite(&self) -> &CompositeContainer {
        &self.composite
    }

    pub fn is_composite(&self, name: &str) -> bool {
        normalize_name(name) == self.composite.name
    }

    /// Static trailer classification: stub list, `-stub` suffix, navbox
    /// wrappers, authority blocks. Names that only a template's definition
    /// can reveal as navboxes come back `None`.
    pub fn trailer_kind(&self, name: &str) -> Option<TrailerKind> {
        let normalized = normalize_name(name);
        if normalized.is_empty() {
            return None;
        }
        if self.stubs.contains(&normalized) || normalized.ends_with(STUB_SUFFIX) {
            Some(TrailerKind::Stub)
        } else if self.navigation.contains(&normalized) {
            Some(TrailerKind::Navigation)
        } else if self.authority.contains(&normalized) {
            Some(TrailerKind::Authority)
        } else {
            None
        }
    }

    pub fn is_link_section(&self, heading: &str) -> bool {
        self.link_sections.contains(heading)
    }

    pub fn aggregator_signatures(&self) -> &[&'static str] {
        self.aggregator_signatures
    }
}
