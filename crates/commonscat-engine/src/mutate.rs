use xi_rope::Rope;

use crate::plan::InsertionPlan;
use crate::registry::CompositeContainer;
use crate::wikitext::parse_templates;

/// A constructed `{{Commonscat|<category>}}` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    category: String,
    text: String,
}

impl Marker {
    /// `category` is the Commons category, already looked up and non-empty.
    pub fn commonscat(category: &str) -> Self {
        let category = category.trim().to_string();
        let text = format!("{{{{Commonscat|{category}}}}}");
        Self { category, text }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Applies `plan` to a copy of `lines`.
///
/// A composite-container plan is applied to the text the lines join into,
/// which is the text its span was computed on.
pub fn apply(
    lines: &[String],
    plan: &InsertionPlan,
    marker: &Marker,
    composite: &CompositeContainer,
) -> Vec<String> {
    let mut out = lines.to_vec();
    match plan {
        InsertionPlan::LineInsert {
            index,
            blank_before,
        } => {
            let index = (*index).min(out.len());
            out.insert(index, marker.as_str().to_string());
            let previous_blank = index > 0 && out[index - 1].trim().is_empty();
            if *blank_before && index > 0 && !previous_blank {
                out.insert(index, String::new());
            }
        }
        InsertionPlan::LineMerge { index } => {
            debug_assert!(*index < out.len(), "merge target {index} past the last line");
            if let Some(line) = out.get_mut(*index) {
                *line = format!("{} {}", marker.as_str(), line.trim());
            }
        }
        InsertionPlan::ParameterAugment { template, missing } => {
            let text = augment(&lines.join("\n"), template.start, missing, marker, composite);
            out = text.split('\n').map(str::to_string).collect();
        }
    }
    out
}

/// Adds `missing` keys to the composite container that starts at byte
/// `at`, keeping its single-line or one-parameter-per-line layout.
///
/// Returns the text unchanged if no template starts there.
pub fn augment(
    text: &str,
    at: usize,
    missing: &[&str],
    marker: &Marker,
    composite: &CompositeContainer,
) -> String {
    let Some(template) = parse_templates(text)
        .into_iter()
        .find(|t| t.full.start == at)
    else {
        return text.to_string();
    };

    let separator = if template.is_multiline(text) { "\n|" } else { "|" };
    let addition: String = missing
        .iter()
        .map(|key| {
            let value = if *key == composite.flag_key {
                "yes"
            } else {
                marker.category()
            };
            format!("{separator}{key}={value}")
        })
        .collect();

    let mut rope = Rope::from(text);
    let insert_at = template.append_at(text);
    rope.edit(insert_at..insert_at, addition.as_str());
    rope.to_string()
}
