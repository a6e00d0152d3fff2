//! Delimiters for the wikitext constructs the template parser must see
//! through.

pub struct Template;

impl Template {
    pub const OPEN: &'static [u8; 2] = b"{{";
    pub const CLOSE: &'static [u8; 2] = b"}}";
    pub const PIPE: u8 = b'|';
    pub const EQUALS: u8 = b'=';
}

/// `{{{name|default}}}` argument placeholders, only meaningful inside
/// template definitions but harmless to skip in articles.
pub struct Argument;

impl Argument {
    pub const OPEN: &'static [u8; 3] = b"{{{";
    pub const CLOSE: &'static [u8; 3] = b"}}}";
}

/// `[[target|label]]`: the pipe inside a link must not split a template
/// parameter.
pub struct WikiLink;

impl WikiLink {
    pub const OPEN: &'static [u8; 2] = b"[[";
    pub const CLOSE: &'static [u8; 2] = b"]]";
}

pub struct Comment;

impl Comment {
    pub const OPEN: &'static [u8; 4] = b"<!--";
    pub const CLOSE: &'static [u8; 3] = b"-->";

    /// Removes every `<!-- ... -->`; an unclosed comment swallows the rest.
    pub fn strip(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut rest = s;
        while let Some(open) = rest.find("<!--") {
            out.push_str(&rest[..open]);
            match rest[open + Self::OPEN.len()..].find("-->") {
                Some(close) => rest = &rest[open + Self::OPEN.len() + close + Self::CLOSE.len()..],
                None => return out,
            }
        }
        out.push_str(rest);
        out
    }

    /// Blanks every `<!-- ... -->` out with spaces but keeps its line breaks,
    /// so line `n` of the result is line `n` of the input.
    pub fn mask(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut rest = s;
        while let Some(open) = rest.find("<!--") {
            out.push_str(&rest[..open]);
            let end = rest[open + Self::OPEN.len()..]
                .find("-->")
                .map_or(rest.len(), |close| {
                    open + Self::OPEN.len() + close + Self::CLOSE.len()
                });
            out.extend(
                rest[open..end]
                    .chars()
                    .map(|c| if c == '\n' { '\n' } else { ' ' }),
            );
            rest = &rest[end..];
        }
        out.push_str(rest);
        out
    }
}
