use crate::types::Timestamp;

/// HTML-escape text content.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// HTML-escape attribute values (same rules as text for this codebase).
pub fn escape_attr(s: &str) -> String {
    escape_text(s)
}

/// Slug the CMS derives from a title: lower-case, spaces to dashes, anything
/// outside `[A-Za-z0-9_-]` dropped.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '_' || *ch == '-')
        .collect()
}

/// File stem for a new post, `YYYY-MM-DD-<slug>`.
pub fn post_file_stem(date: &Timestamp, slug: Option<&str>, title: &str) -> String {
    let slug = match slug.filter(|s| !s.trim().is_empty()) {
        Some(s) => s.to_string(),
        None => slugify(title),
    };
    format!("{}-{slug}", date.date_str())
}

/// Drop a leading `YYYY-MM-DD-` from a file stem.
pub fn strip_date_prefix(stem: &str) -> &str {
    let bytes = stem.as_bytes();
    let dated = bytes.len() > 11
        && bytes[..10].iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
        && bytes[10] == b'-';
    if dated { &stem[11..] } else { stem }
}

pub fn format_reading_time(minutes: u32) -> String {
    format!("{minutes} min read")
}
