//! Line-oriented labelling driver
//!
//! Reads documents one per line, labels them in batches and writes one
//! label per line. Output is flushed after every batch.

use std::io::{BufRead, Write};

use serde::Serialize;
use serde_json::Value;

use crate::error::{DomainError, Result};
use crate::labeler::DomainLabeler;
use crate::model::ClassifierModel;

/// Default JSON field holding the text
pub const DEFAULT_FIELD: &str = "text";

/// Default number of documents per model call
pub const DEFAULT_BATCH_SIZE: usize = 256;

/// How each input line is read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// The line is the text
    Raw,
    /// The line is a JSON object and the text is one of its fields
    Json { field: String },
}

impl Default for InputMode {
    fn default() -> Self {
        InputMode::Json {
            field: DEFAULT_FIELD.to_string(),
        }
    }
}

/// What to do with a line that cannot be read as a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnMalformed {
    /// Stop with an error naming the line
    #[default]
    Halt,
    /// Log it and carry on
    Skip,
}

#[derive(Debug, Clone)]
pub struct StreamOptions {
    pub input: InputMode,
    pub batch_size: usize,
    pub on_malformed: OnMalformed,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            input: InputMode::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            on_malformed: OnMalformed::default(),
        }
    }
}

/// Counters collected over one stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreamStats {
    pub lines: usize,
    pub labelled: usize,
    pub empty: usize,
    pub malformed: usize,
    pub batches: usize,
}

/// Label every document of `reader`, writing labels to `writer`
pub fn classify_stream<M, R, W>(
    labeler: &DomainLabeler<M>,
    mut reader: R,
    mut writer: W,
    options: &StreamOptions,
) -> Result<StreamStats>
where
    M: ClassifierModel,
    R: BufRead,
    W: Write,
{
    let batch_size = options.batch_size.max(1);
    let mut stats = StreamStats::default();
    let mut batch: Vec<String> = Vec::with_capacity(batch_size);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        stats.lines += 1;
        let line = String::from_utf8_lossy(strip_terminator(&buf));

        let text = match extract_text(&line, &options.input) {
            Ok(text) => text,
            Err(reason) => match options.on_malformed {
                OnMalformed::Halt => {
                    return Err(DomainError::Malformed {
                        line: stats.lines,
                        reason,
                    })
                }
                OnMalformed::Skip => {
                    log::warn!("Skipping malformed line {}: {reason}", stats.lines);
                    stats.malformed += 1;
                    continue;
                }
            },
        };

        match text {
            Some(text) if !text.is_empty() => batch.push(text),
            _ => stats.empty += 1,
        }

        if batch.len() >= batch_size {
            write_batch(labeler, &batch, &mut writer, &mut stats)?;
            batch.clear();
        }
    }

    if !batch.is_empty() {
        write_batch(labeler, &batch, &mut writer, &mut stats)?;
    }

    log::info!(
        "Labelled {} documents from {} lines in {} batches",
        stats.labelled,
        stats.lines,
        stats.batches
    );
    Ok(stats)
}

fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// The document text of one line; `Ok(None)` when it has none
fn extract_text(line: &str, mode: &InputMode) -> std::result::Result<Option<String>, String> {
    let field = match mode {
        InputMode::Raw => return Ok(Some(line.to_string())),
        InputMode::Json { field } => field,
    };

    let doc: Value = serde_json::from_str(line).map_err(|e| format!("invalid JSON: {e}"))?;
    let Value::Object(mut doc) = doc else {
        return Err("expected a JSON object".to_string());
    };
    match doc.remove(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(other) => Err(format!("field '{field}' is not a string: {other}")),
    }
}

fn write_batch<M, W>(
    labeler: &DomainLabeler<M>,
    batch: &[String],
    writer: &mut W,
    stats: &mut StreamStats,
) -> Result<()>
where
    M: ClassifierModel,
    W: Write,
{
    let texts: Vec<Option<&str>> = batch.iter().map(|text| Some(text.as_str())).collect();
    let labels = labeler.label_batch(&texts)?;
    for label in &labels {
        writeln!(writer, "{}", label.trim())?;
    }
    writer.flush()?;

    stats.batches += 1;
    stats.labelled += labels.len();
    log::debug!("Batch {} labelled ({} documents)", stats.batches, labels.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_mode() -> InputMode {
        InputMode::default()
    }

    #[test]
    fn test_extract_json_field() {
        assert_eq!(
            extract_text(r#"{"text": "Hello", "id": 1}"#, &json_mode()),
            Ok(Some("Hello".to_string()))
        );
        assert_eq!(extract_text(r#"{"id": 1}"#, &json_mode()), Ok(None));
        assert_eq!(extract_text(r#"{"text": null}"#, &json_mode()), Ok(None));
    }

    #[test]
    fn test_extract_other_field() {
        let mode = InputMode::Json {
            field: "body".to_string(),
        };
        assert_eq!(
            extract_text(r#"{"text": "a", "body": "b"}"#, &mode),
            Ok(Some("b".to_string()))
        );
    }

    #[test]
    fn test_extract_malformed() {
        assert!(extract_text("not json", &json_mode()).is_err());
        assert!(extract_text("", &json_mode()).is_err());
        assert!(extract_text("[1, 2]", &json_mode()).is_err());
        assert!(extract_text(r#"{"text": 3}"#, &json_mode()).is_err());
    }

    #[test]
    fn test_extract_raw() {
        assert_eq!(
            extract_text("{not parsed}", &InputMode::Raw),
            Ok(Some("{not parsed}".to_string()))
        );
    }

    #[test]
    fn test_strip_terminator() {
        assert_eq!(strip_terminator(b"abc\r\n"), b"abc");
        assert_eq!(strip_terminator(b"abc\n"), b"abc");
        assert_eq!(strip_terminator(b"abc"), b"abc");
    }
}
