//! Domain label count reduction
//!
//! Turns `count label` lines (the output of `sort | uniq -c` over the
//! labels) into a YAML stats entry. The counts are stored as a JSON
//! string, byte-compatible with the other stats writers of the workflow:
//! `", "` and `": "` separators and every non-ASCII character escaped.

use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use serde_json::{Map, Value};

use crate::error::{DomainError, Result};

/// YAML key the counts are stored under
pub const DOMAIN_LABELS_KEY: &str = "domain_labels";

/// Label counts in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelCounts {
    counts: Map<String, Value>,
}

impl LabelCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the count of a label; an existing label keeps its position
    pub fn insert(&mut self, label: impl Into<String>, count: i64) {
        self.counts.insert(label.into(), Value::from(count));
    }

    pub fn get(&self, label: &str) -> Option<i64> {
        self.counts.get(label).and_then(Value::as_i64)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Labels and counts in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.counts
            .iter()
            .filter_map(|(label, count)| count.as_i64().map(|count| (label.as_str(), count)))
    }

    /// The counts as a JSON object string
    pub fn to_json_string(&self) -> Result<String> {
        let mut out = Vec::new();
        let mut serializer = Serializer::with_formatter(&mut out, SpacedAsciiFormatter);
        self.counts.serialize(&mut serializer)?;
        // every byte written is ASCII
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

/// Parse `count label` lines; extra fields are ignored, blank lines skipped
pub fn read_label_counts<R: BufRead>(reader: R) -> Result<LabelCounts> {
    let mut counts = LabelCounts::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        let mut parts = line.split_whitespace();
        let Some(count) = parts.next() else {
            continue;
        };
        let label = parts.next().ok_or_else(|| DomainError::Stats {
            line: number,
            reason: format!("no label in '{line}'"),
        })?;
        let count = count.parse::<i64>().map_err(|e| DomainError::Stats {
            line: number,
            reason: format!("count '{count}': {e}"),
        })?;
        counts.insert(label, count);
    }
    Ok(counts)
}

/// The YAML document for a set of counts; `{}` when there are none
pub fn domain_labels_document(counts: &LabelCounts) -> Result<String> {
    let mut stats = serde_yaml::Mapping::new();
    if !counts.is_empty() {
        stats.insert(
            serde_yaml::Value::from(DOMAIN_LABELS_KEY),
            serde_yaml::Value::from(counts.to_json_string()?),
        );
    }
    Ok(serde_yaml::to_string(&stats)?)
}

/// Append the YAML document for `counts` to `path`, creating it if needed
pub fn append_domain_labels(path: &Path, counts: &LabelCounts) -> Result<()> {
    let document = domain_labels_document(counts)?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(document.as_bytes())?;
    log::debug!("Appended {} domain labels to {}", counts.len(), path.display());
    Ok(())
}

/// Compact JSON with `", "`/`": "` separators and `\uXXXX` for non-ASCII
struct SpacedAsciiFormatter;

impl Formatter for SpacedAsciiFormatter {
    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        let mut start = 0;
        for (offset, ch) in fragment.char_indices() {
            if (' '..='~').contains(&ch) {
                continue;
            }
            writer.write_all(fragment[start..offset].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = offset + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_counts() {
        let counts = read_label_counts("   10 politics\n      5 sports\n".as_bytes()).unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.get("politics"), Some(10));
        assert_eq!(counts.get("sports"), Some(5));
    }

    #[test]
    fn test_duplicates_keep_first_position() {
        let counts = read_label_counts("1 a\n2 b\n3 a\n".as_bytes()).unwrap();
        let entries: Vec<_> = counts.iter().collect();
        assert_eq!(entries, vec![("a", 3), ("b", 2)]);
    }

    #[test]
    fn test_extra_fields_and_blank_lines() {
        let counts = read_label_counts("\n4 law extra words\n\n".as_bytes()).unwrap();
        assert_eq!(counts.iter().collect::<Vec<_>>(), vec![("law", 4)]);
    }

    #[test]
    fn test_bad_lines() {
        match read_label_counts("1 a\nten b\n".as_bytes()) {
            Err(DomainError::Stats { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result {other:?}"),
        }
        assert!(read_label_counts("7\n".as_bytes()).is_err());
    }

    #[test]
    fn test_json_string_layout() {
        let mut counts = LabelCounts::new();
        counts.insert("politics", 10);
        counts.insert("sports", 5);
        assert_eq!(
            counts.to_json_string().unwrap(),
            r#"{"politics": 10, "sports": 5}"#
        );
    }

    #[test]
    fn test_json_escapes_non_ascii() {
        let mut counts = LabelCounts::new();
        counts.insert("économie", 1);
        counts.insert("𝔸", 2);
        assert_eq!(
            counts.to_json_string().unwrap(),
            r#"{"\u00e9conomie": 1, "\ud835\udd38": 2}"#
        );
    }

    #[test]
    fn test_document() {
        let mut counts = LabelCounts::new();
        counts.insert("politics", 10);
        let document = domain_labels_document(&counts).unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(&document).unwrap();
        assert_eq!(
            parsed[DOMAIN_LABELS_KEY].as_str(),
            Some(r#"{"politics": 10}"#)
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(domain_labels_document(&LabelCounts::new()).unwrap().trim(), "{}");
    }
}
