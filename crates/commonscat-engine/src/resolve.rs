//! # Insertion Point Resolution
//!
//! Picks the one line position where a new marker belongs. Rules, first match
//! wins for the whole document:
//!
//! 1. **Link section.** Under the first `== Other websites ==` /
//!    `== External links ==` heading. If the line after the heading already
//!    starts with a template the marker is merged onto the front of it,
//!    otherwise it gets its own line. No blank separator.
//! 2. **Trailer stack.** Walking up from the bottom over blank lines, stubs,
//!    navboxes and authority blocks, the marker goes above the topmost member
//!    of that terminal stack, after a blank separator.
//! 3. **End of document**, after a blank separator.
//!
//! A document with no content gets the marker at line 0.

use log::debug;

use crate::classify::{AggregatorClassifier, DefinitionSource};
use crate::lines::{TemplateBlocks, classify_line};
use crate::plan::InsertionPlan;
use crate::registry::AliasRegistry;
use crate::wikitext::kinds::Comment;
use crate::wikitext::parse_templates;

pub fn resolve(
    lines: &[String],
    registry: &AliasRegistry,
    source: &dyn DefinitionSource,
) -> InsertionPlan {
    if lines.iter().all(|line| line.trim().is_empty()) {
        return InsertionPlan::LineInsert {
            index: 0,
            blank_before: false,
        };
    }

    if let Some(plan) = link_section_plan(lines, registry) {
        debug!("Link section anchor: {plan}");
        return plan;
    }

    let mut classifier = AggregatorClassifier::new(source, registry);
    let plan = trailer_plan(lines, registry, &mut classifier);
    debug!(
        "Trailer anchor: {plan} ({} definitions fetched)",
        classifier.lookups()
    );
    plan
}

fn link_section_plan(lines: &[String], registry: &AliasRegistry) -> Option<InsertionPlan> {
    // Headings inside comments are not headings.
    let visible = Comment::mask(&lines.join("\n"));
    let header = visible.split('\n').position(|line| {
        classify_line(line)
            .heading
            .is_some_and(|title| registry.is_link_section(&title))
    })?;

    let index = header + 1;
    let plan = match lines.get(index) {
        Some(next) if classify_line(next).opens_template => InsertionPlan::LineMerge { index },
        _ => InsertionPlan::LineInsert {
            index,
            blank_before: false,
        },
    };
    Some(plan)
}

fn trailer_plan(
    lines: &[String],
    registry: &AliasRegistry,
    classifier: &mut AggregatorClassifier<'_>,
) -> InsertionPlan {
    let templates = parse_templates(&lines.join("\n"));
    let blocks = TemplateBlocks::new(lines, &templates);

    let mut topmost = None;
    let mut cursor = lines.len();
    while cursor > 0 {
        cursor -= 1;
        let class = classify_line(&lines[cursor]);
        if class.is_blank {
            continue;
        }

        let (first, name) = match blocks.ending_at(cursor) {
            Some((first, name)) => (first, Some(name.to_string())),
            None => (cursor, class.template_name),
        };
        let is_trailer = name.as_deref().is_some_and(|name| {
            registry.trailer_kind(name).is_some() || classifier.is_aggregator(name)
        });
        if !is_trailer {
            break;
        }

        topmost = Some(first);
        cursor = first;
    }

    InsertionPlan::LineInsert {
        index: topmost.unwrap_or(lines.len()),
        blank_before: true,
    }
}
