//! The per-match vote state machine.

use crate::bracket::MatchNode;
use crate::tournament::UserId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors a report can fail with
#[derive(Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum ReportError {
    #[error("match already finished")]
    AlreadyFinalized,
    #[error("reporter is not a participant in this match")]
    UnknownReporter,
    #[error("claimed winner is not a participant in this match")]
    InvalidWinnerClaim,
}

/// Outcome of applying one vote to a match
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VoteOutcome {
    /// Vote recorded, waiting for the opponent
    Waiting,
    /// Votes disagreed and were both withdrawn
    Conflict,
    /// Votes agreed; the match is finalized with this winner
    Finished(UserId),
}

/// Record `reporter`'s claim that `claimed` won the match.
///
/// The vote lands in the reporter's own slot, replacing any earlier vote of
/// theirs. The agreement check is a total function of the two votes present
/// after the write: one vote is [`VoteOutcome::Waiting`], two disagreeing
/// votes withdraw each other ([`VoteOutcome::Conflict`], no tie-break), and
/// two agreeing votes set `winner` and make the node terminal.
///
/// The caller is responsible for holding the match's lock across this call
/// and for propagating a finalized winner to the parent node.
pub fn record_vote(
    node: &mut MatchNode,
    reporter: UserId,
    claimed: UserId,
) -> Result<VoteOutcome, ReportError> {
    if node.winner.is_some() {
        return Err(ReportError::AlreadyFinalized);
    }
    if !node.has_participant(claimed) {
        return Err(ReportError::InvalidWinnerClaim);
    }

    if node.slot_a == Some(reporter) {
        node.vote_a = Some(claimed);
    } else if node.slot_b == Some(reporter) {
        node.vote_b = Some(claimed);
    } else {
        return Err(ReportError::UnknownReporter);
    }

    match (node.vote_a, node.vote_b) {
        (Some(a), Some(b)) if a == b => {
            node.winner = Some(a);
            Ok(VoteOutcome::Finished(a))
        }
        (Some(_), Some(_)) => {
            node.vote_a = None;
            node.vote_b = None;
            Ok(VoteOutcome::Conflict)
        }
        _ => Ok(VoteOutcome::Waiting),
    }
}
