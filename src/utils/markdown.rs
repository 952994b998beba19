//! Telegram MarkdownV2 helpers.
//!
//! Every user- or admin-supplied string that ends up in a MarkdownV2 reply
//! (names, subjects, homework text) goes through [`escape_markdown`].

/// Escapes markdown special characters for MarkdownV2 parsing mode
/// 
/// This function escapes all characters that have special meaning in Telegram's
/// MarkdownV2 format to ensure they are displayed as literal text.
/// 
/// # Arguments
/// * `text` - The text to escape
/// 
/// # Returns
/// A string with all markdown special characters escaped with backslashes
/// 
/// # Example
/// ```
/// use school_admin_bot::utils::markdown::escape_markdown;
/// 
/// let text = "Hello *world* (test)";
/// let escaped = escape_markdown(text);
/// assert_eq!(escaped, "Hello \\*world\\* \\(test\\)");
/// ```
pub fn escape_markdown(text: &str) -> String {
    text.replace('_', "\\_")
        .replace('*', "\\*")
        .replace('[', "\\[")
        .replace(']', "\\]")
        .replace('(', "\\(")
        .replace(')', "\\)")
        .replace('~', "\\~")
        .replace('`', "\\`")
        .replace('>', "\\>")
        .replace('#', "\\#")
        .replace('+', "\\+")
        .replace('-', "\\-")
        .replace('=', "\\=")
        .replace('|', "\\|")
        .replace('{', "\\{")
        .replace('}', "\\}")
        .replace('.', "\\.")
        .replace('!', "\\!")
}

/// Wraps already-escaped text in MarkdownV2 bold markers.
pub fn bold(escaped: &str) -> String {
    format!("*{escaped}*")
}
