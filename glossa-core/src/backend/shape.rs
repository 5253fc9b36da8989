//! Reply parsing for pipe backends

use std::io::BufRead;

use serde_json::Value;

use crate::error::{BackendError, BackendResult};
use crate::routing::OutputShape;

/// Line closing a `conll` reply
pub const CONLL_END: &str = "#END";

/// Read one reply in the given shape
pub(crate) fn read_reply<R: BufRead>(shape: OutputShape, reader: &mut R) -> BackendResult<Vec<String>> {
    match shape {
        OutputShape::Tokens => {
            let line = read_line(reader)?;
            Ok(line.split_whitespace().map(str::to_string).collect())
        }
        OutputShape::Conll => read_conll(reader),
        OutputShape::Json => parse_json_tokens(&read_line(reader)?),
    }
}

fn read_line<R: BufRead>(reader: &mut R) -> BackendResult<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(BackendError::Closed);
    }
    Ok(line)
}

/// `position\ttoken` lines up to [`CONLL_END`]
///
/// Blank lines separate sentences within one reply and `#` lines are
/// comments; neither ends the reply.
fn read_conll<R: BufRead>(reader: &mut R) -> BackendResult<Vec<String>> {
    let mut tokens = Vec::new();
    loop {
        let line = read_line(reader)?;
        let line = line.trim_end_matches(['\r', '\n']);
        if line == CONLL_END {
            return Ok(tokens);
        }
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(token) = line.split('\t').nth(1) {
            tokens.push(token.to_string());
        }
    }
}

/// A JSON array whose items are tokens, `[kind, token, ...]` tuples or
/// objects carrying a `text` field
pub(crate) fn parse_json_tokens(line: &str) -> BackendResult<Vec<String>> {
    let value: Value = serde_json::from_str(line.trim())
        .map_err(|e| BackendError::Protocol(format!("invalid JSON reply: {e}")))?;
    let Value::Array(items) = value else {
        return Err(BackendError::Protocol("JSON reply is not an array".to_string()));
    };

    items
        .iter()
        .map(|item| {
            let token = match item {
                Value::String(token) => Some(token.as_str()),
                Value::Array(fields) => fields.get(1).and_then(Value::as_str),
                Value::Object(fields) => fields.get("text").and_then(Value::as_str),
                _ => None,
            };
            token
                .map(str::to_string)
                .ok_or_else(|| BackendError::Protocol(format!("no token in {item}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_tokens_reply() {
        let mut reader = Cursor::new("Hello ,  world\nnext\n");
        let tokens = read_reply(OutputShape::Tokens, &mut reader).unwrap();
        assert_eq!(tokens, vec!["Hello", ",", "world"]);
        // the following reply is untouched
        let tokens = read_reply(OutputShape::Tokens, &mut reader).unwrap();
        assert_eq!(tokens, vec!["next"]);
    }

    #[test]
    fn test_conll_reply() {
        let mut reader = Cursor::new(
            "1.1.1.1-5\tHello\n1.1.2.6-6\t,\n1.1.3.8-11\tgood\n1.1.4.13-19\tmorning\n\n#END\n",
        );
        let tokens = read_reply(OutputShape::Conll, &mut reader).unwrap();
        assert_eq!(tokens, vec!["Hello", ",", "good", "morning"]);
    }

    #[test]
    fn test_conll_sentences_share_one_reply() {
        let reply = "# newdoc\n1.1.1.1-5\tHello\n1.1.2.6-6\t.\n\n1.2.1.8-12\tWorld\n\n#END\n";
        let mut reader = Cursor::new(format!("{reply}{reply}"));
        for _ in 0..2 {
            let tokens = read_reply(OutputShape::Conll, &mut reader).unwrap();
            assert_eq!(tokens, vec!["Hello", ".", "World"]);
        }
    }

    #[test]
    fn test_conll_empty_reply() {
        let mut reader = Cursor::new("\n#END\n");
        assert!(read_reply(OutputShape::Conll, &mut reader).unwrap().is_empty());
    }

    #[test]
    fn test_json_tuple_reply() {
        let tokens =
            parse_json_tokens(r#"[["HEBREW", "למכולת", 9, [41, 47]], ["PUNCTUATION", ".", 10, [47, 48]]]"#)
                .unwrap();
        assert_eq!(tokens, vec!["למכולת", "."]);
    }

    #[test]
    fn test_json_mixed_reply() {
        let tokens = parse_json_tokens(r#"["a", {"text": "b", "pos": "NOUN"}]"#).unwrap();
        assert_eq!(tokens, vec!["a", "b"]);
    }

    #[test]
    fn test_json_rejects_non_array() {
        assert!(matches!(
            parse_json_tokens(r#"{"text": "a"}"#),
            Err(BackendError::Protocol(_))
        ));
        assert!(parse_json_tokens("[1, 2]").is_err());
    }

    #[test]
    fn test_closed_stream() {
        let mut reader = Cursor::new("");
        assert!(matches!(
            read_reply(OutputShape::Tokens, &mut reader),
            Err(BackendError::Closed)
        ));

        let mut reader = Cursor::new("1\tunterminated\n\n");
        assert!(matches!(
            read_reply(OutputShape::Conll, &mut reader),
            Err(BackendError::Closed)
        ));
    }
}
