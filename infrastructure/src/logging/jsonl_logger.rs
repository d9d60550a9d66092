//! JSONL file writer for run transcripts.
//!
//! Each [`ConversationEvent`] becomes one JSON line carrying its payload
//! fields plus `type`, `seq` (0-based line number), `timestamp`, and the
//! optional `run` label. Non-object payloads are nested under `data`.

use huddle_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

struct TranscriptWriter {
    out: BufWriter<File>,
    seq: u64,
}

/// Transcript logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex`. Flushes after each line and on `Drop`.
pub struct JsonlConversationLogger {
    writer: Mutex<TranscriptWriter>,
    path: PathBuf,
    run: Option<String>,
}

impl JsonlConversationLogger {
    /// Create a logger that truncates `path`.
    ///
    /// Creates parent directories as needed. Returns `None` (after a warning)
    /// if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        Self::open(path.as_ref(), false)
    }

    /// Create a logger that appends to `path`, keeping earlier runs
    pub fn append(path: impl AsRef<Path>) -> Option<Self> {
        Self::open(path.as_ref(), true)
    }

    /// Label every record with `run`
    pub fn with_run(mut self, run: impl Into<String>) -> Self {
        self.run = Some(run.into());
        self
    }

    fn open(path: &Path, append: bool) -> Option<Self> {
        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create transcript directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path);
        let file = match file {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open transcript file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(TranscriptWriter {
                out: BufWriter::new(file),
                seq: 0,
            }),
            path: path.to_path_buf(),
            run: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(&self, event: ConversationEvent, seq: u64) -> Value {
        let mut map = match event.payload {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), Value::from(event.event_type));
        map.insert("seq".to_string(), Value::from(seq));
        map.insert(
            "timestamp".to_string(),
            Value::from(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
        );
        if let Some(run) = &self.run {
            map.insert("run".to_string(), Value::from(run.as_str()));
        }
        Value::Object(map)
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        let record = self.record(event, writer.seq);
        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };
        if writeln!(writer.out, "{}", line).is_ok() {
            writer.seq += 1;
        }
        // Flush every line so a killed run keeps its transcript
        let _ = writer.out.flush();
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.out.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        let mut content = String::new();
        File::open(path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
            .trim()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_jsonl_logger_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.transcript.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        logger.log(ConversationEvent::new(
            "message_sent",
            serde_json::json!({ "participant": "p1", "text": "(1 remaining) Tea is best" }),
        ));
        logger.log(ConversationEvent::new(
            "response_accepted",
            serde_json::json!({ "participant": "p1", "text": "a", "total": 1 }),
        ));

        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(line.get("type").is_some());
            assert!(line.get("timestamp").is_some());
        }
        assert_eq!(lines[0]["type"], "message_sent");
        assert_eq!(lines[0]["text"], "(1 remaining) Tea is best");
        assert_eq!(lines[1]["type"], "response_accepted");
        assert_eq!(lines[1]["total"], 1);
        assert_eq!(lines[1]["seq"], 1);
        assert!(lines[1].get("run").is_none());
    }

    #[test]
    fn test_append_keeps_earlier_runs_and_labels_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all.jsonl");

        let first = JsonlConversationLogger::append(&path).unwrap().with_run("first");
        first.log(ConversationEvent::new("message_sent", serde_json::json!({})));
        drop(first);
        let second = JsonlConversationLogger::append(&path).unwrap().with_run("second");
        second.log(ConversationEvent::new("message_sent", serde_json::json!({})));
        drop(second);

        let lines = read_lines(&path);
        let runs: Vec<&str> = lines.iter().map(|l| l["run"].as_str().unwrap()).collect();
        assert_eq!(runs, vec!["first", "second"]);
        assert_eq!(lines[1]["seq"], 0);
    }

    #[test]
    fn test_jsonl_logger_handles_non_object_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("run.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();
        assert_eq!(logger.path(), path.as_path());

        logger.log(ConversationEvent::new(
            "collection_resolved",
            serde_json::json!(true),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "collection_resolved");
        assert_eq!(lines[0]["data"], true);
    }

    #[test]
    fn test_jsonl_logger_returns_none_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        assert!(JsonlConversationLogger::new(blocker.join("run.jsonl")).is_none());
    }
}
