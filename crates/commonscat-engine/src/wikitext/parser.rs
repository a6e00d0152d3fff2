use std::collections::HashSet;

use super::{
    cursor::Cursor,
    kinds::{Argument, Comment, Template as Delim, WikiLink},
    span::Span,
    types::{Param, Template},
};

/// A `|`-separated piece of a template body, with the position of its first
/// top-level `=` if it has one.
struct Segment {
    span: Span,
    equals: Option<usize>,
}

/// Result of trying to read a template at the cursor.
enum Attempt {
    /// No `{{` here.
    Absent,
    /// A `{{` that runs off the end of the text.
    Unclosed,
    /// The template followed by everything nested inside it.
    Found(Vec<Template>),
}

/// Parses every template invocation in `text`.
///
/// Templates are returned in document order with an outer template ahead
/// of the templates nested in its parameters, so a marker hidden inside
/// another template's argument is still reported.
///
/// # Raw Zones
/// HTML comments hide everything inside them. `{{{argument}}}` placeholders
/// are skipped. An unclosed `{{` is plain text.
///
/// Runs in linear time on unbalanced input: every opener that fails to close
/// is remembered, and is never scanned again.
pub fn parse_templates(text: &str) -> Vec<Template> {
    let mut cur = Cursor::new(text, 0);
    let mut unclosed = HashSet::new();
    let mut out = vec![];

    while !cur.eof() {
        if skip_comment(&mut cur) || skip_argument(&mut cur) {
            continue;
        }
        if let Attempt::Found(found) = try_parse_template(&mut cur, &mut unclosed) {
            out.extend(found);
            continue;
        }
        cur.bump();
    }

    out
}

fn skip_comment(cur: &mut Cursor<'_>) -> bool {
    if !cur.starts_with(Comment::OPEN) {
        return false;
    }
    cur.bump_n(Comment::OPEN.len());
    cur.skip_past(Comment::CLOSE);
    true
}

fn skip_argument(cur: &mut Cursor<'_>) -> bool {
    if !cur.starts_with(Argument::OPEN) {
        return false;
    }
    cur.bump_n(Argument::OPEN.len());
    cur.skip_past(Argument::CLOSE);
    true
}

/// Attempts to parse a template at the current position.
///
/// Restores the cursor when the template never closes. An opener nested
/// inside it that runs off the end means it cannot close either: from there
/// both scans see the same text, so the failure is passed straight up and
/// recorded in `unclosed` for every enclosing opener.
fn try_parse_template(cur: &mut Cursor<'_>, unclosed: &mut HashSet<usize>) -> Attempt {
    if !cur.starts_with(Delim::OPEN) {
        return Attempt::Absent;
    }
    let start = cur.pos();
    if unclosed.contains(&start) {
        return Attempt::Unclosed;
    }

    let saved = cur.clone();
    let (src, base) = (cur.s, cur.base);
    cur.bump_n(Delim::OPEN.len());
    let inner_start = cur.pos();

    let mut nested = vec![];
    let mut segments = vec![];
    let mut seg_start = cur.pos();
    let mut equals = None;
    let mut link_depth = 0usize;

    loop {
        if cur.eof() {
            unclosed.insert(start);
            *cur = saved;
            return Attempt::Unclosed;
        }
        if cur.starts_with(Delim::CLOSE) {
            break;
        }
        if skip_comment(cur) || skip_argument(cur) {
            continue;
        }
        match try_parse_template(cur, unclosed) {
            Attempt::Found(found) => {
                nested.extend(found);
                continue;
            }
            Attempt::Unclosed => {
                unclosed.insert(start);
                *cur = saved;
                return Attempt::Unclosed;
            }
            Attempt::Absent => {}
        }
        if cur.starts_with(WikiLink::OPEN) {
            link_depth += 1;
            cur.bump_n(WikiLink::OPEN.len());
            continue;
        }
        if link_depth > 0 && cur.starts_with(WikiLink::CLOSE) {
            link_depth -= 1;
            cur.bump_n(WikiLink::CLOSE.len());
            continue;
        }

        match cur.peek() {
            // A pipe inside [[target|label]] belongs to the link.
            Some(Delim::PIPE) if link_depth == 0 => {
                segments.push(Segment {
                    span: Span::new(seg_start, cur.pos()),
                    equals: equals.take(),
                });
                cur.bump();
                seg_start = cur.pos();
            }
            Some(Delim::EQUALS) if link_depth == 0 && equals.is_none() => {
                equals = Some(cur.pos());
                cur.bump();
            }
            _ => {
                cur.bump();
            }
        }
    }

    segments.push(Segment {
        span: Span::new(seg_start, cur.pos()),
        equals,
    });
    let inner_end = cur.pos();
    cur.bump_n(Delim::CLOSE.len());
    let end = cur.pos();

    let text_of = |sp: Span| &src[sp.start - base..sp.end - base];

    let mut template = Template {
        full: Span::new(start, end),
        inner: Span::new(inner_start, inner_end),
        name: text_of(segments[0].span).to_string(),
        params: vec![],
    };

    let mut position = 0usize;
    for seg in &segments[1..] {
        let param = match seg.equals {
            Some(eq) => Param {
                key: text_of(Span::new(seg.span.start, eq)).trim().to_string(),
                value: text_of(Span::new(eq + 1, seg.span.end)).trim().to_string(),
                positional: false,
            },
            None => {
                position += 1;
                Param {
                    key: position.to_string(),
                    value: text_of(seg.span).to_string(),
                    positional: true,
                }
            }
        };
        template.set_param(param);
    }

    let mut found = vec![template];
    found.extend(nested);
    Attempt::Found(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(text: &str) -> Vec<String> {
        parse_templates(text).into_iter().map(|t| t.name).collect()
    }

    #[test]
    fn parse_bare_template() {
        let text = "Intro {{Stub}} outro";
        let templates = parse_templates(text);
        assert_eq!(templates.len(), 1);
        let t = &templates[0];
        assert_eq!(t.name, "Stub");
        assert_eq!(t.full.slice(text), "{{Stub}}");
        assert_eq!(t.inner.slice(text), "Stub");
        assert!(t.params.is_empty());
    }

    #[test]
    fn parse_positional_and_named_params() {
        let templates = parse_templates("{{Commonscat|Paris| show = yes }}");
        let t = &templates[0];
        assert_eq!(t.get("1"), Some("Paris"));
        assert_eq!(t.get("show"), Some("yes"));
        assert!(t.params[0].positional);
        assert!(!t.params[1].positional);
    }

    #[test]
    fn positional_values_keep_whitespace() {
        let templates = parse_templates("{{Foo| a b }}");
        assert_eq!(templates[0].get("1"), Some(" a b "));
    }

    #[test]
    fn equals_in_value_stays_in_value() {
        let templates = parse_templates("{{Foo|url=http://x.org/?a=b}}");
        assert_eq!(templates[0].get("url"), Some("http://x.org/?a=b"));
    }

    #[test]
    fn repeated_key_overrides_earlier() {
        let templates = parse_templates("{{Foo|c=first|c=second}}");
        assert_eq!(templates[0].params.len(), 1);
        assert_eq!(templates[0].get("c"), Some("second"));
    }

    #[test]
    fn nested_templates_follow_their_parent() {
        assert_eq!(
            names("{{Infobox|image={{Commonscat|X}}}} {{Stub}}"),
            vec!["Infobox", "Commonscat", "Stub"]
        );
    }

    #[test]
    fn nested_template_does_not_split_parent_params() {
        let templates = parse_templates("{{Outer|a={{Inner|x|y}}|b=2}}");
        let outer = &templates[0];
        assert_eq!(outer.get("a"), Some("{{Inner|x|y}}"));
        assert_eq!(outer.get("b"), Some("2"));
    }

    #[test]
    fn link_pipe_does_not_split_params() {
        let templates = parse_templates("{{Note|text=[[Paris|the capital]]|n=1}}");
        let t = &templates[0];
        assert_eq!(t.get("text"), Some("[[Paris|the capital]]"));
        assert_eq!(t.get("n"), Some("1"));
    }

    #[test]
    fn templates_inside_links_are_found() {
        assert_eq!(
            names("[[File:Tower.jpg|thumb|{{Commons category|Towers}}]]"),
            vec!["Commons category"]
        );
    }

    #[test]
    fn comments_hide_templates() {
        assert_eq!(names("<!-- {{Commonscat|Old}} --> {{Stub}}"), vec!["Stub"]);
    }

    #[test]
    fn comment_inside_name_is_kept_raw() {
        let templates = parse_templates("{{Commonscat<!-- redirect -->|X}}");
        assert_eq!(templates[0].name, "Commonscat<!-- redirect -->");
        assert_eq!(templates[0].normalized_name(), "commonscat");
    }

    #[test]
    fn unclosed_template_is_text() {
        assert_eq!(names("{{Broken|x\n{{Stub}}"), vec!["Stub"]);
    }

    #[test]
    fn unclosed_opener_before_closed_nested_template() {
        assert_eq!(names("{{ x {{Stub}}"), vec!["Stub"]);
        assert_eq!(names("{{a|{{b}} {{c|{{d}}"), vec!["b", "d"]);
    }

    #[test]
    fn many_unclosed_openers_parse_in_linear_time() {
        let text = format!("Intro.\n{}\n{{{{Stub}}}}", "{{ x ".repeat(200));
        let started = std::time::Instant::now();
        assert_eq!(names(&text), vec!["Stub"]);
        assert!(started.elapsed() < std::time::Duration::from_secs(2));
    }

    #[test]
    fn unclosed_openers_after_a_closed_template() {
        let text = format!("{{{{Commonscat|X}}}}{}", "{{ y ".repeat(200));
        assert_eq!(names(&text), vec!["Commonscat"]);
    }

    #[test]
    fn argument_placeholders_are_skipped() {
        assert_eq!(names("{{Foo|{{{1}}}}} {{{bar}}}"), vec!["Foo"]);
    }

    #[test]
    fn multiline_template() {
        let text = "{{Sister project links\n| wikt = tower\n| b = yes\n}}";
        let templates = parse_templates(text);
        let t = &templates[0];
        assert_eq!(t.normalized_name(), "sister project links");
        assert_eq!(t.get("wikt"), Some("tower"));
        assert_eq!(t.get("b"), Some("yes"));
        assert!(t.is_multiline(text));
        assert_eq!(&text[..t.append_at(text)], "{{Sister project links\n| wikt = tower\n| b = yes");
    }

    #[test]
    fn single_line_append_point_is_before_close() {
        let text = "{{Sister project links|wikt=tower }}";
        let t = &parse_templates(text)[0];
        assert!(!t.is_multiline(text));
        assert_eq!(&text[t.append_at(text)..], " }}");
    }

    #[test]
    fn spans_are_byte_offsets_with_unicode() {
        let text = "Zürich café {{Commonscat|Zürich}}";
        let t = &parse_templates(text)[0];
        assert_eq!(t.full.slice(text), "{{Commonscat|Zürich}}");
        assert_eq!(t.get("1"), Some("Zürich"));
    }

    #[test]
    fn empty_text_has_no_templates() {
        assert!(parse_templates("").is_empty());
    }
}
