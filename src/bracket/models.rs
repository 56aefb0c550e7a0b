//! Match tree data models.

use crate::tournament::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a match in the bracket: `(round, match_number)`.
///
/// Rounds are 1-indexed (round 1 is the first played round); match numbers
/// are 0-indexed within their round. The derived `Ord` gives the canonical
/// bracket ordering.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct MatchKey {
    /// Round number (1 = first round)
    pub round: u32,
    /// Match number within the round (0-indexed)
    pub number: u32,
}

impl MatchKey {
    /// Create a new match key
    pub fn new(round: u32, number: u32) -> Self {
        Self { round, number }
    }

    /// Key of the match this one feeds into.
    ///
    /// Purely arithmetic: matches `2i` and `2i + 1` of round `r` feed match
    /// `i` of round `r + 1`. Whether that parent exists depends on the
    /// bracket size; the builder records existence in
    /// [`MatchNode::next_match`].
    pub fn parent(&self) -> MatchKey {
        MatchKey::new(self.round + 1, self.number / 2)
    }

    /// Whether this match's winner fills the parent's `slot_a`.
    ///
    /// Even-numbered matches feed `slot_a`, odd-numbered ones `slot_b`.
    pub fn feeds_slot_a(&self) -> bool {
        self.number % 2 == 0
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}M{}", self.round, self.number)
    }
}

/// A single match in the bracket.
///
/// Slots are `None` until filled (either by seeding or by a child match
/// finalizing). Votes are recorded by the consensus engine; once `winner`
/// is set the node is terminal.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MatchNode {
    /// Position in the bracket
    pub key: MatchKey,
    /// First participant slot
    pub slot_a: Option<UserId>,
    /// Second participant slot
    pub slot_b: Option<UserId>,
    /// Winner claimed by the occupant of `slot_a`
    pub vote_a: Option<UserId>,
    /// Winner claimed by the occupant of `slot_b`
    pub vote_b: Option<UserId>,
    /// Finalized winner; terminal once set
    pub winner: Option<UserId>,
    /// Match the winner advances to; `None` for the final
    pub next_match: Option<MatchKey>,
}

impl MatchNode {
    /// Create an empty match node
    pub fn new(key: MatchKey, next_match: Option<MatchKey>) -> Self {
        Self {
            key,
            slot_a: None,
            slot_b: None,
            vote_a: None,
            vote_b: None,
            winner: None,
            next_match,
        }
    }

    /// Whether this node is the final (no parent to advance into)
    pub fn is_final(&self) -> bool {
        self.next_match.is_none()
    }

    /// Whether `user` occupies one of the two slots
    pub fn has_participant(&self, user: UserId) -> bool {
        self.slot_a == Some(user) || self.slot_b == Some(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_key_arithmetic() {
        assert_eq!(MatchKey::new(1, 0).parent(), MatchKey::new(2, 0));
        assert_eq!(MatchKey::new(1, 1).parent(), MatchKey::new(2, 0));
        assert_eq!(MatchKey::new(1, 5).parent(), MatchKey::new(2, 2));
        assert_eq!(MatchKey::new(3, 1).parent(), MatchKey::new(4, 0));
    }

    #[test]
    fn parity_picks_parent_slot() {
        assert!(MatchKey::new(1, 0).feeds_slot_a());
        assert!(!MatchKey::new(1, 1).feeds_slot_a());
        assert!(MatchKey::new(2, 4).feeds_slot_a());
    }

    #[test]
    fn key_ordering_is_round_then_number() {
        let mut keys = vec![
            MatchKey::new(2, 0),
            MatchKey::new(1, 3),
            MatchKey::new(1, 0),
            MatchKey::new(3, 0),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                MatchKey::new(1, 0),
                MatchKey::new(1, 3),
                MatchKey::new(2, 0),
                MatchKey::new(3, 0),
            ]
        );
    }
}
