//! Reader and writer for labelled sequence files.
//!
//! Each record is a label line starting with `>` followed immediately by
//! exactly one sequence line. Multi-line sequences are not supported.
//!
//! - Blank lines are ignored anywhere.
//! - A label with no sequence line before the next label (or end of input)
//!   is dropped with a warning.
//! - Lines that are neither a label nor the line right after one are ignored.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use tracing::warn;

use crate::core::sequence::SequenceRecord;
use crate::parsing::{open_text, ParseError};
use crate::utils::validation::{check_record_limit, check_sequence_length};

/// Offset of the window kept by [`save_sequence_file`] in legacy mode
pub const LEGACY_WINDOW_START: usize = 10;

/// Width of the window kept by [`save_sequence_file`] in legacy mode
pub const LEGACY_WINDOW_WIDTH: usize = 10;

/// Parse a sequence file, decompressing `.gz`/`.bgz` input.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read,
/// `ParseError::TooManyRecords` or `ParseError::SequenceTooLong` if a size
/// limit is exceeded.
pub fn parse_sequence_file(path: &Path) -> Result<Vec<SequenceRecord>, ParseError> {
    let reader = open_text(path)?;
    read_sequences(reader)
}

/// Parse sequence records from text
///
/// # Errors
///
/// Returns `ParseError::TooManyRecords` or `ParseError::SequenceTooLong` if a
/// size limit is exceeded.
pub fn parse_sequence_text(text: &str) -> Result<Vec<SequenceRecord>, ParseError> {
    read_sequences(text.as_bytes())
}

/// Parse sequence records from any buffered reader
///
/// # Errors
///
/// Returns `ParseError::Io` on read failure, or a limit error as for
/// [`parse_sequence_text`].
pub fn read_sequences<R: BufRead>(reader: R) -> Result<Vec<SequenceRecord>, ParseError> {
    let mut records = Vec::new();
    // Label waiting for its sequence line, with its 1-based line number
    let mut pending: Option<(String, usize)> = None;
    let mut ignored_lines = 0usize;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(label) = line.strip_prefix('>') {
            if let Some((dropped, line_num)) = pending.replace((label.to_string(), i + 1)) {
                warn!(label = %dropped, line = line_num, "Label has no sequence line, dropping");
            }
        } else if let Some((label, _)) = pending.take() {
            let length = line.chars().count();
            if check_sequence_length(length).is_some() {
                return Err(ParseError::SequenceTooLong { label, length });
            }
            if check_record_limit(records.len()).is_some() {
                return Err(ParseError::TooManyRecords(records.len()));
            }
            records.push(SequenceRecord::new(label, line));
        } else {
            ignored_lines += 1;
        }
    }

    if let Some((dropped, line_num)) = pending {
        warn!(label = %dropped, line = line_num, "Label has no sequence line, dropping");
    }
    if ignored_lines > 0 {
        warn!(
            lines = ignored_lines,
            "Ignored lines that do not follow a label (multi-line sequences are not supported)"
        );
    }

    Ok(records)
}

/// Write records as `>label` / sequence line pairs
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_sequences<W: Write>(
    writer: &mut W,
    records: &[SequenceRecord],
) -> std::io::Result<()> {
    for record in records {
        writeln!(writer, ">{}", record.label)?;
        writeln!(writer, "{}", record.sequence)?;
    }
    Ok(())
}

/// Save records to `path` and return how many were written.
///
/// With `legacy_window`, each sequence is cut down to the
/// [`LEGACY_WINDOW_WIDTH`] symbols starting at [`LEGACY_WINDOW_START`],
/// clamped to the sequence length. Records whose window is empty are skipped
/// with a warning, since an empty sequence line would not read back.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be created or written.
pub fn save_sequence_file(
    path: &Path,
    records: &[SequenceRecord],
    legacy_window: bool,
) -> Result<usize, ParseError> {
    let mut writer = BufWriter::new(File::create(path)?);
    let written = if legacy_window {
        let mut windowed = Vec::with_capacity(records.len());
        for record in records {
            let cut = record.windowed(LEGACY_WINDOW_START, LEGACY_WINDOW_WIDTH);
            if cut.is_empty() {
                warn!(
                    label = %record.label,
                    length = record.len(),
                    "Sequence too short for legacy window, skipping"
                );
            } else {
                windowed.push(cut);
            }
        }
        write_sequences(&mut writer, &windowed)?;
        windowed.len()
    } else {
        write_sequences(&mut writer, records)?;
        records.len()
    };
    writer.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_sequence_text() {
        let text = ">sp|P1 first\nMKTAYIAK\n>sp|P2 second\nMYPEPTIDE\n";
        let records = parse_sequence_text(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].label, "sp|P1 first");
        assert_eq!(records[0].sequence, "MKTAYIAK");
        assert_eq!(records[1].label, "sp|P2 second");
        assert_eq!(records[1].sequence, "MYPEPTIDE");
    }

    #[test]
    fn test_blank_lines_ignored() {
        let text = "\n\n>p1\n\nAAAA\n\n\n>p2\r\nCCCC\r\n\n";
        let records = parse_sequence_text(text).unwrap();
        assert_eq!(
            records,
            vec![
                SequenceRecord::new("p1", "AAAA"),
                SequenceRecord::new("p2", "CCCC"),
            ]
        );
    }

    #[test]
    fn test_label_without_sequence_dropped() {
        let text = ">orphan\n>p1\nAAAA\n>trailing\n";
        let records = parse_sequence_text(text).unwrap();
        assert_eq!(records, vec![SequenceRecord::new("p1", "AAAA")]);
    }

    #[test]
    fn test_only_one_sequence_line_per_label() {
        let text = ">p1\nAAAA\nCCCC\nstray\n>p2\nGGGG\n";
        let records = parse_sequence_text(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sequence, "AAAA");
        assert_eq!(records[1].sequence, "GGGG");
    }

    #[test]
    fn test_duplicate_records_kept() {
        let text = ">p1\nAAAA\n>p1\nAAAA\n";
        let records = parse_sequence_text(text).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_no_final_newline() {
        let records = parse_sequence_text(">p1\nAAAA").unwrap();
        assert_eq!(records, vec![SequenceRecord::new("p1", "AAAA")]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_sequence_text("").unwrap().is_empty());
        assert!(parse_sequence_text("\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_sequence_file() {
        let mut temp = NamedTempFile::with_suffix(".txt").unwrap();
        temp.write_all(b">p1\nMYPEPTIDE\n").unwrap();
        temp.flush().unwrap();

        let records = parse_sequence_file(temp.path()).unwrap();
        assert_eq!(records, vec![SequenceRecord::new("p1", "MYPEPTIDE")]);
    }

    #[test]
    fn test_parse_gzipped_sequence_file() {
        let mut temp = NamedTempFile::with_suffix(".txt.gz").unwrap();
        {
            let mut encoder = GzEncoder::new(&mut temp, Compression::default());
            encoder.write_all(b">p1\nMYPEPTIDE\n>p2\nPIEPCMGA\n").unwrap();
            encoder.finish().unwrap();
        }
        temp.flush().unwrap();

        let records = parse_sequence_file(temp.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].sequence, "PIEPCMGA");
    }

    #[test]
    fn test_missing_file() {
        let result = parse_sequence_file(Path::new("/nonexistent/proteins.txt"));
        assert!(matches!(result, Err(ParseError::Io(_))));
    }

    #[test]
    fn test_write_sequences_round_trip() {
        let records = vec![
            SequenceRecord::new("p1", "MKTAYIAK"),
            SequenceRecord::new("p2", "MYPEPTIDE"),
        ];
        let mut out = Vec::new();
        write_sequences(&mut out, &records).unwrap();
        assert_eq!(
            String::from_utf8(out.clone()).unwrap(),
            ">p1\nMKTAYIAK\n>p2\nMYPEPTIDE\n"
        );
        assert_eq!(read_sequences(out.as_slice()).unwrap(), records);
    }

    #[test]
    fn test_save_legacy_window() {
        let records = vec![
            SequenceRecord::new("long", "ABCDEFGHIJKLMNOPQRSTUVWXYZ"),
            SequenceRecord::new("short", "ABCDE"),
        ];
        let temp = NamedTempFile::with_suffix(".txt").unwrap();
        assert_eq!(save_sequence_file(temp.path(), &records, true).unwrap(), 1);

        let saved = std::fs::read_to_string(temp.path()).unwrap();
        assert_eq!(saved, ">long\nKLMNOPQRST\n");
    }

    #[test]
    fn test_legacy_window_output_reads_back() {
        let records = vec![
            SequenceRecord::new("eleven", "ABCDEFGHIJK"),
            SequenceRecord::new("ten", "ABCDEFGHIJ"),
            SequenceRecord::new("long", "ABCDEFGHIJKLMNOPQRSTUVWXYZ"),
        ];
        let temp = NamedTempFile::with_suffix(".txt").unwrap();
        assert_eq!(save_sequence_file(temp.path(), &records, true).unwrap(), 2);

        let reread = parse_sequence_file(temp.path()).unwrap();
        assert_eq!(
            reread,
            vec![
                SequenceRecord::new("eleven", "K"),
                SequenceRecord::new("long", "KLMNOPQRST"),
            ]
        );
    }

    #[test]
    fn test_save_without_window_keeps_all() {
        let records = vec![SequenceRecord::new("short", "ABC")];
        let temp = NamedTempFile::with_suffix(".txt").unwrap();
        assert_eq!(save_sequence_file(temp.path(), &records, false).unwrap(), 1);
        assert_eq!(parse_sequence_file(temp.path()).unwrap(), records);
    }
}
