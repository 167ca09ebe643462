use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{IngestError, RecordError};

/// One non-blank line read from a dump, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpLine {
    pub number: usize,
    pub text: String,
}

/// Lazy, single-pass sequence of dump lines.
///
/// Blank lines are skipped but still advance the line counter, so reported line numbers match
/// what an editor shows. A trailing `\r` is removed.
pub struct DumpReader<R> {
    reader: R,
    line_number: usize,
    buf: String,
}

impl<R: BufRead> DumpReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, line_number: 0, buf: String::new() }
    }

    /// Number of lines consumed so far, blank lines included.
    pub fn lines_consumed(&self) -> usize {
        self.line_number
    }
}

impl DumpReader<BufReader<File>> {
    /// Open a dump file for reading.
    pub fn open(path: &Path) -> Result<Self, IngestError> {
        let file = File::open(path)
            .map_err(|source| IngestError::Open { path: path.to_path_buf(), source })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for DumpReader<R> {
    type Item = Result<DumpLine, IngestError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => self.line_number += 1,
                Err(source) => {
                    return Some(Err(IngestError::Read { line: self.line_number + 1, source }));
                }
            }

            let text = self.buf.trim_end_matches(['\n', '\r']);
            if text.trim().is_empty() {
                continue;
            }

            return Some(Ok(DumpLine { number: self.line_number, text: text.to_string() }));
        }
    }
}

/// Pull the JSON object embedded in a dump line.
///
/// Everything before the first `{` is positional metadata and is discarded.
pub fn extract_record(line: &str) -> Result<Map<String, Value>, RecordError> {
    let start = line.find('{').ok_or(RecordError::Extraction)?;
    let json = &line[start..];

    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(RecordError::Parse { message: format!("expected an object, found {other}") }),
        Err(e) => Err(RecordError::Parse { message: e.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_extract_record_discards_prefix() {
        let line = "/type/author\t/authors/OL1A\t3\t2008-04-01T03:28:50.625462\t{\"key\":\"/authors/OL1A\",\"name\":\"Mark Twain\"}";

        let record = extract_record(line).unwrap();
        assert_eq!(record.get("key").and_then(Value::as_str), Some("/authors/OL1A"));
        assert_eq!(record.get("name").and_then(Value::as_str), Some("Mark Twain"));
    }

    #[test]
    fn test_extract_record_without_brace() {
        assert_eq!(extract_record("/type/author\tno json here"), Err(RecordError::Extraction));
        assert_eq!(extract_record(""), Err(RecordError::Extraction));
    }

    #[test]
    fn test_extract_record_invalid_json() {
        let err = extract_record("x\t{\"key\": \"/authors/OL1A\"").unwrap_err();
        assert!(matches!(err, RecordError::Parse { .. }));
    }

    #[test]
    fn test_extract_record_rejects_trailing_garbage() {
        let err = extract_record("x\t{\"key\":\"/works/OL1W\"} trailing").unwrap_err();
        assert!(matches!(err, RecordError::Parse { .. }));
    }

    #[test]
    fn test_dump_reader_numbers_lines_and_skips_blanks() {
        let input = "a\t{}\n\n   \r\nb\t{}\r\nc\t{}";
        let lines: Vec<DumpLine> =
            DumpReader::new(Cursor::new(input)).collect::<Result<_, _>>().unwrap();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], DumpLine { number: 1, text: "a\t{}".to_string() });
        assert_eq!(lines[1], DumpLine { number: 4, text: "b\t{}".to_string() });
        assert_eq!(lines[2], DumpLine { number: 5, text: "c\t{}".to_string() });
    }

    #[test]
    fn test_dump_reader_open_missing_file() {
        let result = DumpReader::open(Path::new("/nonexistent/ol_dump_authors.txt"));
        assert!(matches!(result, Err(IngestError::Open { .. })));
    }
}
