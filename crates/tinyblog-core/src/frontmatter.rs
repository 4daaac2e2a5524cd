//! Front matter parsing for markdown articles.
//!
//! An article may start with a header block between two `---` delimiters.
//! Each header line of the form `key: value` sets one field; the key must start
//! at the beginning of the line and is matched case-sensitively.
//!
//! ```text
//! ---
//! title: Hello
//! date: 2024-06-01
//! hidden: false
//! ---
//! # Body starts here
//! ```

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::{
    error::{CoreError, Result},
    log::BuildLog,
    source::SourceFile,
};

/// Delimiter opening and closing the header block.
pub const DELIMITER: &str = "---";

/// Title used when a header block exists but has no `title` key.
pub const UNTITLED: &str = "Untitled post";

/// Resolved article metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: String,
    pub author: String,
    pub date: DateTime<FixedOffset>,
    pub hidden: bool,
    pub published: bool,
}

/// Values used for fields missing from the header.
#[derive(Debug, Clone, Copy)]
pub struct PostDefaults<'a> {
    /// Author used when the header has none.
    pub default_author: &'a str,
    /// Build start time; used when the header has no date.
    pub now: DateTime<FixedOffset>,
}

/// Split text into header region and trimmed body.
///
/// Returns `None` when the text does not start with `---` or when the
/// opening delimiter is never closed; the whole text is then body.
pub fn split_front_matter(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix(DELIMITER)?;
    let close = rest.find(DELIMITER)?;

    Some((&rest[..close], rest[close + DELIMITER.len()..].trim()))
}

/// Key/value pairs from a header region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFields<'a> {
    fields: HashMap<&'a str, &'a str>,
}

impl<'a> HeaderFields<'a> {
    /// Collect `key: value` lines in one pass. The first occurrence of a key wins.
    #[must_use]
    pub fn parse(header: &'a str) -> Self {
        let mut fields = HashMap::new();
        for line in header.lines() {
            if let Some((key, value)) = line.split_once(':') {
                fields.entry(key).or_insert(value.trim());
            }
        }
        Self { fields }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.fields.get(key).copied()
    }

    /// True only for the literal value `true`; `default` when the key is absent.
    #[must_use]
    pub fn flag(&self, key: &str, default: bool) -> bool {
        self.get(key).map_or(default, |value| value == "true")
    }
}

/// Parse an article's front matter.
///
/// Returns the resolved metadata and the markdown body with the header
/// stripped. Missing fields fall back to `defaults`; a missing title or date
/// is reported on `log` as a warning. A date that is present but unparseable
/// is an error.
pub fn parse_front_matter<'t>(
    text: &'t str,
    source: &SourceFile,
    defaults: &PostDefaults<'_>,
    log: &dyn BuildLog,
) -> Result<(FrontMatter, &'t str)> {
    let file_name = source.file_name();

    let Some((header, body)) = split_front_matter(text) else {
        log.warning(&format!(
            "{file_name} has no date, using current date instead."
        ));
        let front_matter = FrontMatter {
            title: source.stem().to_string(),
            author: defaults.default_author.to_string(),
            date: defaults.now,
            hidden: false,
            published: true,
        };
        return Ok((front_matter, text));
    };

    let fields = HeaderFields::parse(header);

    let title = match fields.get("title") {
        Some(title) => title.to_string(),
        None => {
            log.warning(&format!("{file_name} has no title."));
            UNTITLED.to_string()
        }
    };

    let author = fields
        .get("author")
        .unwrap_or(defaults.default_author)
        .to_string();

    let date = match fields.get("date") {
        Some(value) => {
            parse_date(value).ok_or_else(|| CoreError::invalid_date(source.path(), value))?
        }
        None => {
            log.warning(&format!(
                "{file_name} has no date, using current date instead."
            ));
            defaults.now
        }
    };

    let front_matter = FrontMatter {
        title,
        author,
        date,
        hidden: fields.flag("hidden", false),
        published: fields.flag("published", true),
    };

    Ok((front_matter, body))
}

/// Parse a front matter date.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` with or without a numeric offset,
/// `YYYY-MM-DDTHH:MM:SS`, both of those without seconds, and `YYYY-MM-DD`.
/// Seconds may carry a fraction. Values without an offset are taken in the
/// local time zone.
#[must_use]
pub fn parse_date(value: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date);
    }

    const WITH_OFFSET: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f %:z", "%Y-%m-%d %H:%M:%S%.f %z"];
    if let Some(date) = WITH_OFFSET
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
    {
        return Some(date);
    }

    const NAIVE: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    if let Some(naive) = NAIVE
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(in_local_zone(naive));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(in_local_zone)
}

fn in_local_zone(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    match Local.from_local_datetime(&naive).earliest() {
        Some(local) => local.fixed_offset(),
        // Skipped by a DST transition.
        None => naive.and_utc().fixed_offset(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;
    use crate::log::{LogCategory, MemoryLog};

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2025-03-04T05:06:07+01:00").unwrap()
    }

    fn defaults() -> PostDefaults<'static> {
        PostDefaults {
            default_author: "Anonymous",
            now: now(),
        }
    }

    fn parse(text: &str, log: &MemoryLog) -> Result<(FrontMatter, String)> {
        let source = SourceFile::new("src/post.md").unwrap();
        parse_front_matter(text, &source, &defaults(), log).map(|(fm, body)| (fm, body.to_string()))
    }

    #[test]
    fn test_split_front_matter() {
        let text = "---\ntitle: Hello\n---\n\n# Body\n";
        let (header, body) = split_front_matter(text).unwrap();
        assert_eq!(header, "\ntitle: Hello\n");
        assert_eq!(body, "# Body");
    }

    #[test]
    fn test_split_requires_delimiter_at_start() {
        assert!(split_front_matter("\n---\ntitle: x\n---\n").is_none());
        assert!(split_front_matter("# Just markdown").is_none());
    }

    #[test]
    fn test_unterminated_front_matter_is_body() {
        assert!(split_front_matter("---\ntitle: Never closed\n# Body").is_none());

        let log = MemoryLog::new();
        let text = "---\ntitle: Never closed\n# Body";
        let (fm, body) = parse(text, &log).unwrap();
        assert_eq!(fm.title, "post");
        assert_eq!(body, text);
    }

    #[test]
    fn test_header_fields_first_match_wins() {
        let fields = HeaderFields::parse("title: First\ntitle: Second\n");
        assert_eq!(fields.get("title"), Some("First"));
    }

    #[test]
    fn test_header_fields_anchored_and_case_sensitive() {
        let fields = HeaderFields::parse("  title: Indented\nTitle: Capital\nnote without colon\n");
        assert_eq!(fields.get("title"), None);
        assert_eq!(fields.get("Title"), Some("Capital"));
    }

    #[test]
    fn test_header_value_keeps_inner_colons() {
        let fields = HeaderFields::parse("date: 2024-01-01T10:00:00+02:00\n");
        assert_eq!(fields.get("date"), Some("2024-01-01T10:00:00+02:00"));
    }

    #[test]
    fn test_full_header() {
        let log = MemoryLog::new();
        let text = "---\ntitle: Hello\nauthor: Ada\ndate: 2024-06-01T08:30:00+02:00\nhidden: true\npublished: true\nmood: sunny\n---\nBody text";
        let (fm, body) = parse(text, &log).unwrap();

        assert_eq!(fm.title, "Hello");
        assert_eq!(fm.author, "Ada");
        assert_eq!(
            fm.date,
            DateTime::parse_from_rfc3339("2024-06-01T08:30:00+02:00").unwrap()
        );
        assert!(fm.hidden);
        assert!(fm.published);
        assert_eq!(body, "Body text");
        assert!(log.messages(LogCategory::Warning).is_empty());
    }

    #[test]
    fn test_header_without_title_or_date() {
        let log = MemoryLog::new();
        let (fm, _) = parse("---\nauthor: Ada\n---\nBody", &log).unwrap();

        assert_eq!(fm.title, UNTITLED);
        assert_eq!(fm.date, now());
        assert!(log.contains(LogCategory::Warning, "post.md has no title."));
        assert!(log.contains(
            LogCategory::Warning,
            "post.md has no date, using current date instead."
        ));
    }

    #[test]
    fn test_no_header_uses_file_stem() {
        let log = MemoryLog::new();
        let (fm, body) = parse("# Plain article", &log).unwrap();

        assert_eq!(fm.title, "post");
        assert_eq!(fm.author, "Anonymous");
        assert_eq!(fm.date, now());
        assert!(!fm.hidden);
        assert!(fm.published);
        assert_eq!(body, "# Plain article");
        assert!(!log.contains(LogCategory::Warning, "no title"));
        assert!(log.contains(LogCategory::Warning, "no date"));
    }

    #[test]
    fn test_flags_require_literal_true() {
        let log = MemoryLog::new();
        let (fm, _) = parse(
            "---\ntitle: x\ndate: 2024-01-01\nhidden: yes\npublished: True\n---\n",
            &log,
        )
        .unwrap();
        assert!(!fm.hidden);
        assert!(!fm.published);
    }

    #[test]
    fn test_invalid_date_is_error() {
        let log = MemoryLog::new();
        let err = parse("---\ntitle: x\ndate: last tuesday\n---\n", &log).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDate { ref value, .. } if value == "last tuesday"));
    }

    #[test]
    fn test_parse_date_formats() {
        let rfc = parse_date("2024-01-01T10:00:00+02:00").unwrap();
        assert_eq!(rfc.offset().local_minus_utc(), 2 * 3600);

        let spaced = parse_date("2024-01-01 10:00:00 +02:00").unwrap();
        assert_eq!(spaced, rfc);

        let naive = parse_date("2024-01-01 10:00:00").unwrap();
        assert_eq!((naive.hour(), naive.minute()), (10, 0));

        let day = parse_date("2024-06-01").unwrap();
        assert_eq!((day.year(), day.month(), day.day()), (2024, 6, 1));
        assert_eq!(day.hour(), 0);

        let minutes = parse_date("2024-06-01T09:30").unwrap();
        assert_eq!((minutes.hour(), minutes.minute(), minutes.second()), (9, 30, 0));
        assert_eq!(parse_date("2024-06-01 09:30").unwrap(), minutes);

        let fraction = parse_date("2024-06-01 09:30:15.250").unwrap();
        assert_eq!(fraction.second(), 15);
        assert_eq!(fraction.timestamp_subsec_millis(), 250);
        assert!(parse_date("2024-06-01T09:30:15.5").is_some());
        assert!(parse_date("2024-06-01 09:30:15.5 +02:00").is_some());

        assert!(parse_date("01/06/2024").is_none());
        assert!(parse_date("").is_none());
    }
}
