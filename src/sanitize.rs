//! Turn caller-supplied keys into safe file names.

/// Placeholder for keys that have no usable final segment.
const EMPTY_SEGMENT: &str = "_";

/// Sanitize a key into a single lowercase file name component.
///
/// # Steps
/// - Keep only the final segment; `/` and `\` both count as separators on
///   every platform and trailing separators are ignored.
/// - Lexically clean the segment. A segment that is empty, `.` or `..` would
///   name a directory rather than a file and becomes `_`.
/// - Lowercase the result one character at a time, so a capital sigma is
///   always `σ` and never the word-final `ς`.
/// - Replace every space with `_`.
///
/// The output never contains a separator, so joining it onto a directory
/// cannot escape that directory.
///
/// ```
/// use hashcopy::sanitize_file_path;
///
/// assert_eq!(sanitize_file_path("My File.TXT"), "my_file.txt");
/// assert_eq!(sanitize_file_path("../../etc/passwd"), "passwd");
/// assert_eq!(sanitize_file_path("a/b/c d"), "c_d");
/// ```
pub fn sanitize_file_path(key: &str) -> String {
    let segment = final_segment(key);
    let cleaned = match segment {
        "" | "." | ".." => EMPTY_SEGMENT,
        other => other,
    };
    cleaned
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

fn final_segment(key: &str) -> &str {
    let trimmed = key.trim_end_matches(is_separator);
    match trimmed.rfind(is_separator) {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}
