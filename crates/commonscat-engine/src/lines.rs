use std::sync::OnceLock;

use regex::Regex;

use crate::wikitext::Template;

/// Local facts about one document line, computed without looking at its
/// neighbours.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineClass {
    pub is_blank: bool,
    /// Trimmed title of a `== Title ==` heading.
    pub heading: Option<String>,
    /// The line starts a template invocation.
    pub opens_template: bool,
    /// Name of the leading template when the line reads `{{Name ...}}`.
    pub template_name: Option<String>,
}

pub fn classify_line(line: &str) -> LineClass {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    static LEADING_TEMPLATE: OnceLock<Regex> = OnceLock::new();
    let heading_re =
        HEADING.get_or_init(|| Regex::new(r"^==+\s*([^=]+?)\s*==+").expect("Invalid heading regex"));
    let template_re = LEADING_TEMPLATE
        .get_or_init(|| Regex::new(r"^\{\{\s*([^|}]+)").expect("Invalid template regex"));

    let trimmed = line.trim();
    let opens_template = trimmed.starts_with("{{");
    let template_name = if opens_template && trimmed.contains("}}") {
        template_re
            .captures(trimmed)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|name| !name.is_empty())
    } else {
        None
    };

    LineClass {
        is_blank: trimmed.is_empty(),
        heading: heading_re
            .captures(line)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string()),
        opens_template,
        template_name,
    }
}

/// Maps each line that closes a multi-line template onto the line where
/// that template opened, so a bottom-up scan can step over a whole
/// `{{Navbox ... }}` block as one unit.
#[derive(Debug, Default)]
pub struct TemplateBlocks {
    closing: Vec<Option<(usize, String)>>,
}

impl TemplateBlocks {
    /// Only top-level templates that occupy whole lines count.
    pub fn new(lines: &[String], templates: &[Template]) -> Self {
        let mut starts = Vec::with_capacity(lines.len());
        let mut offset = 0;
        for line in lines {
            starts.push(offset);
            offset += line.len() + 1;
        }
        let line_of = |at: usize| starts.partition_point(|&s| s <= at).saturating_sub(1);
        let line_end = |i: usize| starts[i] + lines[i].len();

        let mut closing = vec![None; lines.len()];
        let mut covered_until = 0;
        for template in templates {
            if template.full.start < covered_until || template.full.is_empty() {
                continue;
            }
            covered_until = template.full.end;

            let first = line_of(template.full.start);
            let last = line_of(template.full.end - 1);
            if first == last || last >= lines.len() {
                continue;
            }
            let before = &lines[first][..template.full.start - starts[first]];
            let after_len = line_end(last).saturating_sub(template.full.end);
            let after = &lines[last][lines[last].len() - after_len..];
            if before.trim().is_empty() && after.trim().is_empty() {
                closing[last] = Some((first, template.name.trim().to_string()));
            }
        }

        Self { closing }
    }

    /// Opening line and template name of the block that ends on `line`.
    pub fn ending_at(&self, line: usize) -> Option<(usize, &str)> {
        self.closing
            .get(line)?
            .as_ref()
            .map(|(first, name)| (*first, name.as_str()))
    }
}
