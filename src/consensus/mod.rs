//! Two-party match result consensus.
//!
//! A match is finalized only when both occupants report the same winner.
//! Each occupant votes through their own slot and may overwrite their own
//! vote while the match is undecided; disagreeing votes are withdrawn in
//! full rather than escalated.

pub mod engine;

pub use engine::{ReportError, VoteOutcome, record_vote};
