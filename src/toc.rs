//! Index links and heading anchors for assembled records.

/// Generate an index link for a record.
pub fn render_toc_link(title: &str, slug: &str) -> String {
    format!("[{}](#{})", escape_link_text(title), anchor(slug))
}

/// Generate an index list item.
pub fn render_toc_item(title: &str, slug: &str) -> String {
    format!("* {}", render_toc_link(title, slug))
}

/// Heading anchor for a slug.
///
/// Slugs are authored by hand, so normalize them the way GitHub does:
/// - lowercase
/// - keep alphanumerics, spaces, underscores and hyphens
/// - replace spaces with hyphens
pub fn anchor(slug: &str) -> String {
    let mut out = String::with_capacity(slug.len());
    for c in slug.trim().to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
            out.push(c);
        }
    }
    out.replace(' ', "-")
}

fn escape_link_text(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}
