use super::{names::normalize_name, span::Span};

/// One `{{name|param|key=value}}` invocation found in a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// Span from the opening `{{` through the closing `}}`.
    pub full: Span,
    /// Span between the `{{` and `}}` delimiters.
    pub inner: Span,
    /// The name exactly as authored, comments and whitespace included.
    pub name: String,
    pub params: Vec<Param>,
}

/// A template parameter. Positional parameters are keyed `"1"`, `"2"`, ...
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub key: String,
    pub value: String,
    pub positional: bool,
}

impl Template {
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// Whether a parameter with this key is present, ignoring surrounding
    /// whitespace in the authored key.
    pub fn has(&self, key: &str) -> bool {
        self.params.iter().any(|p| p.key == key.trim())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.key == key.trim())
            .map(|p| p.value.as_str())
    }

    /// Whether the invocation spreads its parameters over several lines.
    pub fn is_multiline(&self, text: &str) -> bool {
        self.inner.slice(text).trim_end().contains('\n')
    }

    /// Offset just after the last parameter's content, where an appended
    /// parameter goes. Trailing whitespace before `}}` stays after it.
    pub fn append_at(&self, text: &str) -> usize {
        self.inner.start + self.inner.slice(text).trim_end().len()
    }

    /// Adds or replaces a parameter. A repeated key overrides the earlier
    /// one, as it does when MediaWiki expands the template.
    pub(crate) fn set_param(&mut self, param: Param) {
        match self.params.iter_mut().find(|p| p.key == param.key) {
            Some(existing) => *existing = param,
            None => self.params.push(param),
        }
    }
}
