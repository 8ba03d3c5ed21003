//! Postal address rendering.
//!
//! # Invariants
//! - Output never starts or ends with a separator.
//! - Absent segments never leave doubled separators behind.

use crate::format::non_empty;
use crate::model::addressable::Addressable;

/// Line separator used when callers do not choose one.
pub const DEFAULT_LINE_SEPARATOR: &str = "\n";

const CITY_STATE_JOINER: &str = ", ";
const POSTCODE_JOINER: &str = " ";

/// Renders up to four address lines: street, secondary street,
/// `"City, State Postcode"` and country.
pub fn format_address<A: Addressable + ?Sized>(record: &A, line_separator: &str) -> String {
    let separator = normalize_separator(line_separator);

    let mut locality = String::new();
    append_segment(&mut locality, record.city(), "");
    append_segment(&mut locality, record.state_name(), CITY_STATE_JOINER);
    append_segment(&mut locality, record.postcode(), POSTCODE_JOINER);

    let mut output = String::new();
    append_segment(&mut output, record.address(), separator);
    append_segment(&mut output, record.address2(), separator);
    append_segment(&mut output, Some(locality.as_str()), separator);
    append_segment(&mut output, record.country_name(), separator);
    output
}

fn normalize_separator(line_separator: &str) -> &str {
    if line_separator == "," {
        ", "
    } else {
        line_separator
    }
}

fn append_segment(target: &mut String, segment: Option<&str>, joiner: &str) {
    let Some(segment) = non_empty(segment) else {
        return;
    };
    if !target.is_empty() {
        target.push_str(joiner);
    }
    target.push_str(segment);
}

#[cfg(test)]
mod tests {
    use super::{format_address, DEFAULT_LINE_SEPARATOR};
    use crate::model::record::{AddressableRecord, NamedRef};

    fn full_record() -> AddressableRecord {
        let mut record = AddressableRecord::new();
        record.address = Some("1600 Pennsylvania Ave NW".to_string());
        record.address2 = Some("Suite 100".to_string());
        record.city = Some("Washington".to_string());
        record.state = Some(NamedRef::new(9, "DC"));
        record.postcode = Some("20500".to_string());
        record.country = Some(NamedRef::new(1, "United States"));
        record
    }

    #[test]
    fn renders_all_lines_with_newlines() {
        assert_eq!(
            format_address(&full_record(), DEFAULT_LINE_SEPARATOR),
            "1600 Pennsylvania Ave NW\nSuite 100\nWashington, DC 20500\nUnited States"
        );
    }

    #[test]
    fn bare_comma_separator_is_widened() {
        assert_eq!(
            format_address(&full_record(), ","),
            "1600 Pennsylvania Ave NW, Suite 100, Washington, DC 20500, United States"
        );
    }

    #[test]
    fn other_separators_pass_through() {
        let mut record = AddressableRecord::new();
        record.address = Some("1 Main St".to_string());
        record.city = Some("Springfield".to_string());
        assert_eq!(format_address(&record, " | "), "1 Main St | Springfield");
        assert_eq!(format_address(&record, ";"), "1 Main St;Springfield");
    }

    #[test]
    fn locality_line_skips_missing_parts() {
        let mut record = AddressableRecord::new();
        record.state = Some(NamedRef::new(5, "CA"));
        record.postcode = Some("94105".to_string());
        assert_eq!(format_address(&record, "\n"), "CA 94105");

        record.state = None;
        record.city = Some("San Francisco".to_string());
        assert_eq!(format_address(&record, "\n"), "San Francisco 94105");

        record.postcode = None;
        record.state = Some(NamedRef::new(5, "CA"));
        assert_eq!(format_address(&record, "\n"), "San Francisco, CA");
    }

    #[test]
    fn secondary_line_without_primary_has_no_leading_separator() {
        let mut record = AddressableRecord::new();
        record.address2 = Some("PO Box 12".to_string());
        record.country = Some(NamedRef::new(2, "Canada"));
        assert_eq!(format_address(&record, ", "), "PO Box 12, Canada");
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let mut record = AddressableRecord::new();
        record.address = Some(String::new());
        record.city = Some(String::new());
        record.postcode = Some("10001".to_string());
        record.country = Some(NamedRef::new(1, ""));
        assert_eq!(format_address(&record, "\n"), "10001");
    }

    #[test]
    fn empty_record_renders_empty_string() {
        assert_eq!(format_address(&AddressableRecord::new(), ", "), "");
    }

    #[test]
    fn never_emits_doubled_or_dangling_separators() {
        let values = [None, Some(""), Some("x")];
        for address in values {
            for address2 in values {
                for city in values {
                    for postcode in values {
                        for country in [None, Some(NamedRef::new(1, "Y"))] {
                            let mut record = AddressableRecord::new();
                            record.address = address.map(str::to_string);
                            record.address2 = address2.map(str::to_string);
                            record.city = city.map(str::to_string);
                            record.postcode = postcode.map(str::to_string);
                            record.country = country;

                            let rendered = format_address(&record, "|");
                            assert!(!rendered.contains("||"), "doubled: {rendered}");
                            assert!(!rendered.starts_with('|'), "leading: {rendered}");
                            assert!(!rendered.ends_with('|'), "trailing: {rendered}");
                        }
                    }
                }
            }
        }
    }
}
