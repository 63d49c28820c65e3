//! Append-only CSV result log.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use ca_core::TrialRecord;

use crate::SinkError;

/// Fixed column order shared by every experiment family.
pub const RESULT_HEADER: &str =
    "experiment_name,trial,model,R,passed,failed,adherence,prompt_len,details";

/// Append one trial row to the results file at `path`.
///
/// If the file does not yet exist the header is written first, exactly
/// once, followed by the row; the decision is made from the file's
/// presence on disk, never from in-memory state, so appends compose
/// across process restarts. Header and row go out in a single write.
///
/// Appenders to one path must be serialized externally; two uncoordinated
/// writers can race the header check or interleave partial rows.
pub fn append_result(path: &Path, record: &TrialRecord) -> Result<(), SinkError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| SinkError::io(parent, e))?;
        }
    }

    let header_needed = !path.exists();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| SinkError::io(path, e))?;

    let mut chunk = String::new();
    if header_needed {
        chunk.push_str(RESULT_HEADER);
        chunk.push('\n');
    }
    chunk.push_str(&format_row(record));
    chunk.push('\n');

    file.write_all(chunk.as_bytes())
        .map_err(|e| SinkError::io(path, e))?;
    Ok(())
}

fn format_row(record: &TrialRecord) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{}",
        csv_escape(&record.experiment_name),
        record.trial,
        csv_escape(&record.model),
        record.constraint_count,
        record.passed,
        record.failed,
        record.adherence,
        record.prompt_len,
        csv_escape(&record.details),
    )
}

/// Minimal CSV field escaping (wraps in quotes if needed).
fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(trial: u32) -> TrialRecord {
        TrialRecord {
            experiment_name: "fatigue_R5".to_string(),
            trial,
            model: "phi3:3.8b".to_string(),
            constraint_count: 5,
            passed: 4,
            failed: 1,
            adherence: 0.8,
            prompt_len: 210,
            details: "Volatile components active".to_string(),
        }
    }

    #[test]
    fn test_header_written_exactly_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("results.csv");

        append_result(&path, &sample_record(1)).expect("first append");
        append_result(&path, &sample_record(2)).expect("second append");

        let content = std::fs::read_to_string(&path).expect("read");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], RESULT_HEADER);
        assert!(lines[1].starts_with("fatigue_R5,1,"));
        assert!(lines[2].starts_with("fatigue_R5,2,"));
    }

    #[test]
    fn test_append_preserves_existing_rows() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("results.csv");

        // Simulates a process restart between appends: the header decision
        // must come from the file on disk, not from memory.
        append_result(&path, &sample_record(1)).expect("append");
        let before = std::fs::read_to_string(&path).expect("read");

        append_result(&path, &sample_record(2)).expect("append");
        let after = std::fs::read_to_string(&path).expect("read");

        assert!(after.starts_with(&before));
        assert_eq!(after.matches(RESULT_HEADER).count(), 1);
    }

    #[test]
    fn test_fields_with_delimiters_are_escaped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("results.csv");

        let mut record = sample_record(1);
        record.details = "Tense resolution: mixed_or_ignored; Past: 4, Future: 3".to_string();
        append_result(&path, &record).expect("append");

        let content = std::fs::read_to_string(&path).expect("read");
        assert!(content.contains("\"Tense resolution: mixed_or_ignored; Past: 4, Future: 3\""));
    }

    #[test]
    fn test_quote_doubling() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_zero_values_are_written_not_omitted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("results.csv");

        let record = TrialRecord {
            experiment_name: "format_numbered_R50".to_string(),
            trial: 1,
            model: "gemma2:2b".to_string(),
            constraint_count: 0,
            passed: 0,
            failed: 0,
            adherence: 0.0,
            prompt_len: 0,
            details: String::new(),
        };
        append_result(&path, &record).expect("append");

        let content = std::fs::read_to_string(&path).expect("read");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[1], "format_numbered_R50,1,gemma2:2b,0,0,0,0,0,");
        // Every row has the full column count.
        assert_eq!(lines[1].matches(',').count(), 8);
    }
}
