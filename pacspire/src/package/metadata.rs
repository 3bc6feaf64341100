//! Parsing of `pkginfo.txt` metadata.
//!
//! The format is one `key=value` pair per line. Only `name`, `version` and
//! `timestamp` are recognised; anything else invalidates the whole file.
//!
//! ```text
//! name=foo
//! version=1.0
//! timestamp=0x5f5e100
//! ```

use thiserror::Error;

use super::record::{truncate_to, PackageRecord, RecordLimits};

/// Errors produced while parsing package metadata.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// A non-empty line has no `=` delimiter.
    #[error("line {line}: missing '=' delimiter")]
    MalformedLine { line: usize },

    /// A key other than `name`, `version` or `timestamp`.
    #[error("line {line}: unknown key '{key}'")]
    UnknownKey { line: usize, key: String },

    /// The timestamp is zero or not a number.
    #[error("line {line}: invalid timestamp '{value}'")]
    InvalidTimestamp { line: usize, value: String },

    /// One or more of name, version and timestamp was never set.
    #[error("incomplete record: missing {0}")]
    IncompleteRecord(&'static str),

    /// The metadata bytes are not valid UTF-8.
    #[error("metadata is not valid UTF-8")]
    InvalidEncoding,
}

/// Parse package metadata text into a [`PackageRecord`].
///
/// Lines may end in `\n` or `\r\n`; empty lines are ignored. Later keys
/// overwrite earlier ones. Name and version are truncated to the lengths in
/// `limits`.
///
/// # Example
///
/// ```
/// use pacspire::package::{parse_package_info, RecordLimits};
///
/// let text = "name=foo\r\nversion=1.0\r\ntimestamp=0x64\r\n";
/// let record = parse_package_info(text, &RecordLimits::default()).unwrap();
///
/// assert_eq!(record.version, "1.0");
/// assert_eq!(record.timestamp, 100);
/// ```
pub fn parse_package_info(
    text: &str,
    limits: &RecordLimits,
) -> Result<PackageRecord, MetadataError> {
    let mut name: Option<String> = None;
    let mut version: Option<String> = None;
    let mut timestamp: Option<u64> = None;

    // A lone '\r' also ends a line, but only '\n' advances the line count.
    let lines = text
        .split('\n')
        .enumerate()
        .flat_map(|(index, line)| line.split('\r').map(move |part| (index + 1, part)))
        .filter(|(_, line)| !line.is_empty());

    for (line_no, line) in lines {
        let (key, value) = line
            .split_once('=')
            .ok_or(MetadataError::MalformedLine { line: line_no })?;

        match key {
            "name" => name = Some(truncate_to(value, limits.max_name_len).to_string()),
            "version" => version = Some(truncate_to(value, limits.max_version_len).to_string()),
            "timestamp" => {
                let parsed = parse_timestamp(value).ok_or_else(|| {
                    MetadataError::InvalidTimestamp {
                        line: line_no,
                        value: value.to_string(),
                    }
                })?;
                timestamp = Some(parsed);
            }
            other => {
                return Err(MetadataError::UnknownKey {
                    line: line_no,
                    key: other.to_string(),
                })
            }
        }
    }

    let name = name
        .filter(|n| !n.is_empty())
        .ok_or(MetadataError::IncompleteRecord("name"))?;
    let version = version
        .filter(|v| !v.is_empty())
        .ok_or(MetadataError::IncompleteRecord("version"))?;
    let timestamp = timestamp.ok_or(MetadataError::IncompleteRecord("timestamp"))?;

    Ok(PackageRecord {
        name,
        version,
        timestamp,
    })
}

/// Parse raw metadata bytes, as read from an archive or from disk.
pub fn parse_package_info_bytes(
    bytes: &[u8],
    limits: &RecordLimits,
) -> Result<PackageRecord, MetadataError> {
    let text = std::str::from_utf8(bytes).map_err(|_| MetadataError::InvalidEncoding)?;
    parse_package_info(text, limits)
}

/// Parse a non-zero unsigned integer using C literal prefixes.
///
/// `0x`/`0X` selects hexadecimal, a leading `0` selects octal, anything else
/// is decimal. Returns `None` for zero, overflow, or trailing garbage.
///
/// Stricter than `strtoul`: the whole value must be a number, so `12abc`
/// is rejected rather than read as 12.
fn parse_timestamp(value: &str) -> Option<u64> {
    let value = value.trim_matches(|c: char| c.is_ascii_whitespace());

    let parsed = if let Some(hex) = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16).ok()?
    } else if value.len() > 1 && value.starts_with('0') {
        u64::from_str_radix(&value[1..], 8).ok()?
    } else {
        // from_str_radix accepts a leading '+', which C's strtoul also does
        u64::from_str_radix(value, 10).ok()?
    };

    (parsed != 0).then_some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse(text: &str) -> Result<PackageRecord, MetadataError> {
        parse_package_info(text, &RecordLimits::default())
    }

    #[test]
    fn test_parse_valid() {
        let record = parse("name=foo\nversion=1.0\ntimestamp=100").unwrap();
        assert_eq!(record.name, "foo");
        assert_eq!(record.version, "1.0");
        assert_eq!(record.timestamp, 100);
    }

    #[test]
    fn test_parse_crlf_and_blank_lines() {
        let record = parse("\r\nname=foo\r\n\r\nversion=1.0\r\ntimestamp=7\r\n\r\n").unwrap();
        assert_eq!(record.name, "foo");
        assert_eq!(record.timestamp, 7);
    }

    #[test]
    fn test_parse_any_key_order() {
        let record = parse("timestamp=5\nversion=0.1\nname=bar").unwrap();
        assert_eq!(record.name, "bar");
        assert_eq!(record.version, "0.1");
    }

    #[test]
    fn test_value_split_at_first_delimiter() {
        let record = parse("name=a=b\nversion=1\ntimestamp=1").unwrap();
        assert_eq!(record.name, "a=b");
    }

    #[test]
    fn test_later_key_overwrites() {
        let record = parse("name=foo\nname=bar\nversion=1\ntimestamp=1").unwrap();
        assert_eq!(record.name, "bar");
    }

    #[test]
    fn test_truncates_name_and_version() {
        let text = format!("name={}\nversion={}\ntimestamp=1", "n".repeat(30), "v".repeat(15));
        let record = parse(&text).unwrap();
        assert_eq!(record.name, "n".repeat(20));
        assert_eq!(record.version, "v".repeat(10));
    }

    #[test]
    fn test_custom_limits() {
        let limits = RecordLimits::default().with_max_name_len(3);
        let record = parse_package_info("name=foobar\nversion=1\ntimestamp=1", &limits).unwrap();
        assert_eq!(record.name, "foo");
    }

    #[test]
    fn test_timestamp_hex() {
        let record = parse("name=foo\nversion=1\ntimestamp=0xFF").unwrap();
        assert_eq!(record.timestamp, 255);

        let record = parse("name=foo\nversion=1\ntimestamp=0X10").unwrap();
        assert_eq!(record.timestamp, 16);
    }

    #[test]
    fn test_timestamp_octal() {
        let record = parse("name=foo\nversion=1\ntimestamp=010").unwrap();
        assert_eq!(record.timestamp, 8);
    }

    #[test]
    fn test_timestamp_whitespace_ignored() {
        let record = parse("name=foo\nversion=1\ntimestamp= 42 ").unwrap();
        assert_eq!(record.timestamp, 42);
    }

    #[test]
    fn test_missing_delimiter() {
        let err = parse("name=foo\nversion\ntimestamp=1").unwrap_err();
        assert_eq!(err, MetadataError::MalformedLine { line: 2 });
    }

    #[test]
    fn test_unknown_key() {
        let err = parse("name=foo\nversion=1\ntimestamp=1\nauthor=me").unwrap_err();
        assert!(matches!(err, MetadataError::UnknownKey { ref key, .. } if key == "author"));
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let err = parse("Name=foo\nversion=1\ntimestamp=1").unwrap_err();
        assert!(matches!(err, MetadataError::UnknownKey { .. }));
    }

    #[test]
    fn test_zero_timestamp() {
        let err = parse("name=foo\nversion=1\ntimestamp=0").unwrap_err();
        assert!(matches!(err, MetadataError::InvalidTimestamp { .. }));

        let err = parse("name=foo\nversion=1\ntimestamp=0x0").unwrap_err();
        assert!(matches!(err, MetadataError::InvalidTimestamp { .. }));
    }

    #[test]
    fn test_unparseable_timestamps() {
        for value in ["", "abc", "12abc", "0xZZ", "09", "-5", "99999999999999999999999"] {
            let text = format!("name=foo\nversion=1\ntimestamp={}", value);
            let err = parse(&text).unwrap_err();
            assert!(
                matches!(err, MetadataError::InvalidTimestamp { .. }),
                "expected InvalidTimestamp for {:?}, got {:?}",
                value,
                err
            );
        }
    }

    #[test]
    fn test_incomplete_record() {
        assert_eq!(
            parse("name=foo").unwrap_err(),
            MetadataError::IncompleteRecord("version")
        );
        assert_eq!(
            parse("name=foo\nversion=1").unwrap_err(),
            MetadataError::IncompleteRecord("timestamp")
        );
        assert_eq!(
            parse("version=1\ntimestamp=1").unwrap_err(),
            MetadataError::IncompleteRecord("name")
        );
        assert_eq!(parse("").unwrap_err(), MetadataError::IncompleteRecord("name"));
    }

    #[test]
    fn test_empty_values_are_incomplete() {
        assert_eq!(
            parse("name=\nversion=1\ntimestamp=1").unwrap_err(),
            MetadataError::IncompleteRecord("name")
        );
        assert_eq!(
            parse("name=foo\nversion=\ntimestamp=1").unwrap_err(),
            MetadataError::IncompleteRecord("version")
        );
    }

    #[test]
    fn test_parse_bytes_rejects_invalid_utf8() {
        let err = parse_package_info_bytes(&[0xff, 0xfe, b'='], &RecordLimits::default())
            .unwrap_err();
        assert_eq!(err, MetadataError::InvalidEncoding);
    }

    #[test]
    fn test_error_display() {
        let err = MetadataError::UnknownKey {
            line: 3,
            key: "author".to_string(),
        };
        assert_eq!(err.to_string(), "line 3: unknown key 'author'");
    }

    proptest! {
        #[test]
        fn prop_valid_records_round_trip(
            name in "[a-zA-Z0-9_.-]{1,40}",
            version in "[a-zA-Z0-9_.-]{1,20}",
            timestamp in 1u64..=u64::MAX,
        ) {
            let text = format!("name={}\nversion={}\ntimestamp={}\n", name, version, timestamp);
            let record = parse(&text).unwrap();

            prop_assert_eq!(record.name, truncate_to(&name, 20));
            prop_assert_eq!(record.version, truncate_to(&version, 10));
            prop_assert_eq!(record.timestamp, timestamp);
        }

        #[test]
        fn prop_unknown_key_always_fails(key in "[a-z]{1,12}") {
            prop_assume!(key != "name" && key != "version" && key != "timestamp");
            let text = format!("name=foo\nversion=1\ntimestamp=1\n{}=x", key);
            prop_assert!(parse(&text).is_err());
        }

        #[test]
        fn prop_line_without_delimiter_fails(line in "[a-z0-9 ]{1,20}") {
            let text = format!("name=foo\n{}\nversion=1\ntimestamp=1", line);
            prop_assert_eq!(parse(&text).unwrap_err(), MetadataError::MalformedLine { line: 2 });
        }
    }
}
