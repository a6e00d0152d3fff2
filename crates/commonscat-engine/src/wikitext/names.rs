use super::kinds::Comment;

const TEMPLATE_NAMESPACE: &str = "template:";

/// Canonical form used for every template-name comparison.
///
/// MediaWiki treats `Commons_cat`, `commons  cat` and `Template:Commons cat`
/// as the same transclusion, so all of them fold to `commons cat`. Comments
/// inside the name are dropped first.
pub fn normalize_name(raw: &str) -> String {
    let stripped = Comment::strip(raw);
    let lowered = stripped.trim().to_lowercase();
    let bare = lowered
        .strip_prefix(TEMPLATE_NAMESPACE)
        .unwrap_or(&lowered);

    bare.replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
