//! Recorders receive snapshot records at match checkpoints.

use std::io::Write;

use serde::{Deserialize, Serialize};

use super::snapshot::{MatchRecord, RoundRecord, RoundStartRecord, TurnEndRecord, TurnStartRecord};

/// Observer of match checkpoints.
///
/// All methods default to doing nothing, so a recorder only implements
/// the checkpoints it cares about.
pub trait Recorder {
    fn round_started(&mut self, _record: &RoundStartRecord) {}
    fn turn_started(&mut self, _record: &TurnStartRecord) {}
    fn turn_ended(&mut self, _record: &TurnEndRecord) {}
    fn round_ended(&mut self, _record: &RoundRecord) {}
    fn match_ended(&mut self, _record: &MatchRecord) {}
}

/// Discards every record.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRecorder;

impl Recorder for NullRecorder {}

/// Collects every record of a match in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchLog {
    pub round_starts: Vec<RoundStartRecord>,
    pub turn_starts: Vec<TurnStartRecord>,
    pub turn_ends: Vec<TurnEndRecord>,
    pub rounds: Vec<RoundRecord>,
    pub matches: Vec<MatchRecord>,
}

impl MatchLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.round_starts.is_empty()
            && self.turn_starts.is_empty()
            && self.turn_ends.is_empty()
            && self.rounds.is_empty()
            && self.matches.is_empty()
    }

    /// Serialize the whole log with bincode.
    pub fn to_bincode(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    /// Load a log written by [`MatchLog::to_bincode`].
    pub fn from_bincode(bytes: &[u8]) -> bincode::Result<Self> {
        bincode::deserialize(bytes)
    }
}

impl Recorder for MatchLog {
    fn round_started(&mut self, record: &RoundStartRecord) {
        self.round_starts.push(record.clone());
    }

    fn turn_started(&mut self, record: &TurnStartRecord) {
        self.turn_starts.push(record.clone());
    }

    fn turn_ended(&mut self, record: &TurnEndRecord) {
        self.turn_ends.push(record.clone());
    }

    fn round_ended(&mut self, record: &RoundRecord) {
        self.rounds.push(record.clone());
    }

    fn match_ended(&mut self, record: &MatchRecord) {
        self.matches.push(record.clone());
    }
}

/// Write one JSON object per row, newline separated.
pub fn write_json_lines<T: Serialize, W: Write>(rows: &[T], mut writer: W) -> serde_json::Result<()> {
    for row in rows {
        serde_json::to_writer(&mut writer, row)?;
        writer.write_all(b"\n").map_err(serde_json::Error::io)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_record(round: u32) -> RoundRecord {
        RoundRecord {
            round,
            initial_turn: 1,
            winner: 2,
            points_gained: 9,
            player1_points: 0,
            player2_points: 9,
            initial_tile: "2|2".to_string(),
            chain_layout: "0:2|2".to_string(),
        }
    }

    #[test]
    fn test_log_collects() {
        let mut log = MatchLog::new();
        assert!(log.is_empty());

        log.round_ended(&round_record(1));
        log.round_ended(&round_record(2));
        assert_eq!(log.rounds.len(), 2);
        assert!(!log.is_empty());
    }

    #[test]
    fn test_json_lines() {
        let rows = vec![round_record(1), round_record(2)];
        let mut out = Vec::new();
        write_json_lines(&rows, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: RoundRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first, rows[0]);
        assert!(lines[1].contains("\"chain_layout\":\"0:2|2\""));
    }

    #[test]
    fn test_bincode_roundtrip() {
        let mut log = MatchLog::new();
        log.round_ended(&round_record(3));
        let bytes = log.to_bincode().unwrap();
        assert_eq!(MatchLog::from_bincode(&bytes).unwrap(), log);
    }

    #[test]
    fn test_null_recorder_accepts_everything() {
        let mut recorder = NullRecorder;
        recorder.round_ended(&round_record(1));
    }
}
