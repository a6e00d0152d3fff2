use std::fmt;

use crate::wikitext::Span;

/// Where and how a new marker goes into a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertionPlan {
    /// Insert the marker as its own line at `index` (`0..=line count`).
    LineInsert { index: usize, blank_before: bool },
    /// Prefix the marker to the existing line at `index`, separated by one
    /// space.
    LineMerge { index: usize },
    /// Add the missing keys to the composite container spanning `template`
    /// instead of inserting a line.
    ParameterAugment {
        template: Span,
        missing: Vec<&'static str>,
    },
}

impl InsertionPlan {
    /// Line the plan touches, if it is line based.
    pub fn line(&self) -> Option<usize> {
        match self {
            InsertionPlan::LineInsert { index, .. } | InsertionPlan::LineMerge { index } => {
                Some(*index)
            }
            InsertionPlan::ParameterAugment { .. } => None,
        }
    }
}

impl fmt::Display for InsertionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertionPlan::LineInsert {
                index,
                blank_before: true,
            } => write!(f, "insert new line at {index} after a blank separator"),
            InsertionPlan::LineInsert { index, .. } => write!(f, "insert new line at {index}"),
            InsertionPlan::LineMerge { index } => write!(f, "prefix existing line {index}"),
            InsertionPlan::ParameterAugment { template, missing } => write!(
                f,
                "add {} to container at bytes {}..{}",
                missing.join(", "),
                template.start,
                template.end
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let insert = InsertionPlan::LineInsert {
            index: 4,
            blank_before: true,
        };
        assert_eq!(insert.to_string(), "insert new line at 4 after a blank separator");
        assert_eq!(InsertionPlan::LineMerge { index: 2 }.to_string(), "prefix existing line 2");

        let augment = InsertionPlan::ParameterAugment {
            template: Span::new(10, 40),
            missing: vec!["commonscat", "c"],
        };
        assert_eq!(augment.to_string(), "add commonscat, c to container at bytes 10..40");
        assert_eq!(augment.line(), None);
    }
}
