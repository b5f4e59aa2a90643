//! Reply markers on titles.
//!
//! Stored titles may carry a leading `[RE]` left over from older edits. Rows
//! always hold the bare title; the marker is added back only when a reply row
//! is displayed, so repeated edits never stack prefixes.

/// The marker prefixed to reply titles.
pub const REPLY_MARKER: &str = "[RE]";

/// Prefixes one reply marker and a space.
pub fn add_reply_marker(title: &str) -> String {
    format!("{REPLY_MARKER} {title}")
}

/// Removes exactly one leading marker and the single space after it.
///
/// `strip_reply_marker(&add_reply_marker(t)) == t` for every `t`.
pub fn strip_reply_marker(title: &str) -> &str {
    match title.strip_prefix(REPLY_MARKER) {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => title,
    }
}

/// Removes every leading marker, leaving the bare title.
pub fn bare_title(title: &str) -> &str {
    let mut current = title;
    while current.starts_with(REPLY_MARKER) {
        current = strip_reply_marker(current);
    }
    current
}

/// The title as a table shows it: bare for questions, one marker for replies.
pub fn display_title(title: &str, is_reply: bool) -> String {
    let bare = bare_title(title);
    if is_reply {
        add_reply_marker(bare)
    } else {
        bare.to_string()
    }
}
