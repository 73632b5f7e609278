use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::combatant::CombatAction;
use crate::piece::Side;

/// Records a single combat action and the phase it happened in.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub side: Side,
    /// Phase name at the time of the action (see `Phase::name`).
    pub phase: String,
    pub action: CombatAction,
}

/// Complete record of one combat hand, serialized to JSONL for match
/// histories and replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub combat_id: String,
    /// Deck seed, when known; enables deterministic replay
    pub seed: Option<u64>,
    /// Chronological list of betting actions
    pub actions: Vec<ActionRecord>,
    /// Community cards revealed before resolution
    pub community: Vec<Card>,
    /// Result summary (winner, damage, fold/showdown)
    pub result: Option<String>,
    /// Timestamp when the hand resolved (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    /// Showdown detail if the hand reached one
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
}

/// Showdown summary: who won and any notes about how.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    pub winner: Option<Side>,
    #[serde(default)]
    pub notes: Option<String>,
}

pub fn format_combat_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// JSONL writer for combat histories. One record per line, flushed per
/// write so partially-run simulations still leave usable logs.
pub struct CombatLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl CombatLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                let _ = create_dir_all(parent);
            }
        }
        let f = File::create(path)?;
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
        format_combat_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &CombatRecord) -> std::io::Result<()> {
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
