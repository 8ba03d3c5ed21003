//! US-style phone, fax and toll-free number rendering.
//!
//! Values that do not reduce to exactly ten digits are returned as given.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_DIGIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9]").expect("valid non-digit regex"));

const NATIONAL_NUMBER_DIGITS: usize = 10;

/// Renders `raw` as `(AAA) BBB-CCCC` when it holds exactly ten digits.
pub fn format_us_number(raw: &str) -> String {
    match national_digits(raw) {
        Some(digits) => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
        None => raw.to_string(),
    }
}

/// Renders `raw` as `1-AAA-BBB-CCCC` when it holds exactly ten digits.
pub fn format_toll_free_number(raw: &str) -> String {
    match national_digits(raw) {
        Some(digits) => format!("1-{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..]),
        None => raw.to_string(),
    }
}

fn national_digits(raw: &str) -> Option<String> {
    let digits = NON_DIGIT_RE.replace_all(raw, "");
    (digits.len() == NATIONAL_NUMBER_DIGITS).then(|| digits.into_owned())
}

#[cfg(test)]
mod tests {
    use super::{format_toll_free_number, format_us_number};

    #[test]
    fn ten_digits_render_with_area_code_parens() {
        assert_eq!(format_us_number("555-123-4567"), "(555) 123-4567");
        assert_eq!(format_us_number("5551234567"), "(555) 123-4567");
        assert_eq!(format_us_number(" 555.123.4567 "), "(555) 123-4567");
    }

    #[test]
    fn non_ten_digit_values_pass_through_unchanged() {
        assert_eq!(format_us_number("12345"), "12345");
        assert_eq!(format_us_number("+1 (555) 123-4567"), "+1 (555) 123-4567");
        assert_eq!(format_us_number("call me"), "call me");
        assert_eq!(format_us_number(""), "");
    }

    #[test]
    fn toll_free_gets_leading_country_digit() {
        assert_eq!(format_toll_free_number("8005551234"), "1-800-555-1234");
        assert_eq!(format_toll_free_number("(888) 555-0000"), "1-888-555-0000");
    }

    #[test]
    fn toll_free_with_country_digit_already_present_passes_through() {
        assert_eq!(format_toll_free_number("1-800-555-1234"), "1-800-555-1234");
        assert_eq!(format_toll_free_number("18005551234"), "18005551234");
    }

    #[test]
    fn fullwidth_digits_do_not_count() {
        assert_eq!(format_us_number("５５５1234567"), "５５５1234567");
    }
}
