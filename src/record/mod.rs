//! Match history recording for offline analysis.
//!
//! The match driver hands a [`Recorder`] a flat snapshot at each
//! checkpoint: round start, turn start, turn end, round end and match
//! end. Records only read match state; they never decide anything.

pub mod encode;
pub mod snapshot;
pub mod log;

pub use encode::{decode_tile, encode_chain, encode_hand, encode_set, encode_tile};
pub use snapshot::{MatchRecord, RoundRecord, RoundStartRecord, TurnEndRecord, TurnStartRecord};
pub use log::{write_json_lines, MatchLog, NullRecorder, Recorder};
