use serde::{Deserialize, Serialize};

use crate::engine::WinSummary;

/// Summary of one finished game.
/// Serialized to JSONL for simulation output and offline analysis.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Unique identifier for this game (format: YYYYMMDD-NNNNNN)
    pub game_id: String,
    /// Shuffle seed of the session (enables deterministic replay)
    pub seed: u64,
    /// Number of distinct symbols in the deck
    pub pairs: usize,
    pub final_score: u32,
    pub tries: u32,
    pub flips: u32,
    pub elapsed_secs: u64,
    pub new_highscore: bool,
    /// Timestamp when the game ended (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl GameRecord {
    pub fn from_summary(
        game_id: String,
        seed: u64,
        pairs: usize,
        summary: &WinSummary,
    ) -> Self {
        Self {
            game_id,
            seed,
            pairs,
            final_score: summary.final_score,
            tries: summary.tries,
            flips: summary.flip_count,
            elapsed_secs: summary.elapsed_secs,
            new_highscore: summary.new_highscore,
            ts: None,
        }
    }
}

pub fn format_game_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug)]
pub struct GameLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl GameLogger {
    /// Opens `path` for appending, creating it and its parent directory.
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_game_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &GameRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
