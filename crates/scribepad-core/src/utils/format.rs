/// Truncate a string to a maximum number of characters, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format a date string to a more readable format
pub fn format_date(date: &str) -> String {
    // Try to parse ISO format and convert to readable
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        dt.format("%b %d, %Y").to_string()
    } else if date.len() >= 10 {
        // Keep the YYYY-MM-DD prefix
        date.chars().take(10).collect()
    } else {
        date.to_string()
    }
}

/// Collapse the article body onto a single line for list previews
pub fn preview_line(content: &str, max_len: usize) -> String {
    let flattened = content.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_string(&flattened, max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
        assert_eq!(truncate_string("héllo wörld", 8), "héllo...");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-05T10:20:30.000Z"), "Mar 05, 2024");
        assert_eq!(format_date("2024-03-05 10:20"), "2024-03-05");
        assert_eq!(format_date("soon"), "soon");
    }

    #[test]
    fn test_preview_line() {
        assert_eq!(preview_line("line one\n\nline   two", 40), "line one line two");
        assert_eq!(preview_line("abcdefghijkl", 8), "abcde...");
    }
}
