use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

/// Removes markup from CMS `rendered` HTML.
pub fn strip_html(html: &str) -> String {
    TAG_RE.replace_all(html, "").trim().to_string()
}

/// Shortens to `max_chars` characters, appending an ellipsis when cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

/// Formats a Belarus number as `+375 (XX) XXX-XX-XX`; anything else is
/// returned unchanged.
pub fn format_phone_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 12 && digits.starts_with("375") {
        format!(
            "+{} ({}) {}-{}-{}",
            &digits[0..3],
            &digits[3..5],
            &digits[5..8],
            &digits[8..10],
            &digits[10..12]
        )
    } else {
        phone.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags() {
        assert_eq!(strip_html("<p>Повар <strong>гриля</strong></p>\n"), "Повар гриля");
        assert_eq!(strip_html(""), "");
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_text("Шеф-повар", 20), "Шеф-повар");
        assert_eq!(truncate_text("Шеф повар", 4), "Шеф...");
    }

    #[test]
    fn formats_belarus_numbers() {
        assert_eq!(format_phone_number("375293251515"), "+375 (29) 325-15-15");
        assert_eq!(format_phone_number("8 029 325"), "8 029 325");
    }
}
