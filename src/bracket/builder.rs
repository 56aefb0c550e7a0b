//! Pure roster-to-bracket builder.
//!
//! Builds the complete match tree for a single-elimination bracket from a
//! roster already sorted by ranking (highest first). The bracket size is the
//! smallest power of two that fits the roster; the short side is padded with
//! byes at the tail so the lowest seeds advance automatically.

use super::models::{MatchKey, MatchNode};
use crate::tournament::{Participant, UserId};
use std::collections::BTreeMap;
use thiserror::Error;

/// Bracket construction errors
#[derive(Debug, Error, Eq, PartialEq)]
pub enum BracketError {
    #[error("need at least 2 participants to build a bracket, have {0}")]
    InsufficientParticipants(usize),
}

/// Smallest power of two that can hold `n` participants
pub fn bracket_size(n: usize) -> usize {
    n.next_power_of_two()
}

/// Number of rounds in a bracket of the given (power-of-two) size
pub fn round_count(bracket_size: usize) -> u32 {
    bracket_size.trailing_zeros()
}

/// Build the full match tree for a rank-sorted roster.
///
/// Seeding is positional: round-1 match `i` gets `seeds[2i]` vs
/// `seeds[2i + 1]`, with bye slots (`None`) padding the tail. A round-1
/// match with an opponent-less `slot_a` is resolved immediately and its
/// winner placed into the parent slot chosen by match-number parity. The
/// propagation is a single hop: a parent that ends up opponent-less itself
/// is left for a regular report, it is not resolved in the same pass.
///
/// The builder is pure; on error no partial tree is returned.
pub fn build(
    seeds: &[Participant],
) -> Result<BTreeMap<MatchKey, MatchNode>, BracketError> {
    let n = seeds.len();
    if n < 2 {
        return Err(BracketError::InsufficientParticipants(n));
    }

    let size = bracket_size(n);
    let rounds = round_count(size);

    // Pad the tail with byes so every round-1 slot has an entry.
    let seeded: Vec<Option<UserId>> = seeds
        .iter()
        .map(|p| Some(p.user_id))
        .chain(std::iter::repeat(None))
        .take(size)
        .collect();

    let mut nodes = BTreeMap::new();
    for round in 1..=rounds {
        let count = (size >> round) as u32;
        for number in 0..count {
            let key = MatchKey::new(round, number);
            let next_match = (round < rounds).then(|| key.parent());
            nodes.insert(key, MatchNode::new(key, next_match));
        }
    }

    for i in 0..size / 2 {
        let key = MatchKey::new(1, i as u32);
        let slot_a = seeded[2 * i];
        let slot_b = seeded[2 * i + 1];

        let mut advance = None;
        if let Some(node) = nodes.get_mut(&key) {
            node.slot_a = slot_a;
            node.slot_b = slot_b;
            if let (Some(winner), None) = (slot_a, slot_b) {
                node.winner = Some(winner);
                advance = node.next_match.map(|parent| (parent, winner));
            }
        }
        if let Some((parent, winner)) = advance {
            if let Some(parent_node) = nodes.get_mut(&parent) {
                if key.feeds_slot_a() {
                    parent_node.slot_a = Some(winner);
                } else {
                    parent_node.slot_b = Some(winner);
                }
            }
        }
    }

    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn participant(name: &str, ranking_points: i64) -> Participant {
        Participant {
            user_id: UserId::new(),
            display_name: name.to_string(),
            ranking_points,
            registered_at: Utc::now(),
        }
    }

    fn roster(n: usize) -> Vec<Participant> {
        (0..n)
            .map(|i| participant(&format!("seed{i}"), 1000 - i as i64))
            .collect()
    }

    #[test]
    fn rejects_rosters_smaller_than_two() {
        assert_eq!(
            build(&[]),
            Err(BracketError::InsufficientParticipants(0))
        );
        assert_eq!(
            build(&roster(1)),
            Err(BracketError::InsufficientParticipants(1))
        );
    }

    #[test]
    fn two_participants_build_a_single_final() {
        let seeds = roster(2);
        let nodes = build(&seeds).unwrap();
        assert_eq!(nodes.len(), 1);

        let root = &nodes[&MatchKey::new(1, 0)];
        assert_eq!(root.slot_a, Some(seeds[0].user_id));
        assert_eq!(root.slot_b, Some(seeds[1].user_id));
        assert!(root.is_final());
        assert_eq!(root.winner, None);
    }

    #[test]
    fn seeding_is_positional_not_serpentine() {
        // Serpentine seeding would pair the top seed with the bottom seed;
        // this builder pairs adjacent seeds instead.
        let seeds = roster(4);
        let nodes = build(&seeds).unwrap();

        let m0 = &nodes[&MatchKey::new(1, 0)];
        assert_eq!(m0.slot_a, Some(seeds[0].user_id));
        assert_eq!(m0.slot_b, Some(seeds[1].user_id));

        let m1 = &nodes[&MatchKey::new(1, 1)];
        assert_eq!(m1.slot_a, Some(seeds[2].user_id));
        assert_eq!(m1.slot_b, Some(seeds[3].user_id));
    }

    #[test]
    fn three_participants_resolve_the_bye_and_advance_it() {
        let seeds = roster(3);
        let nodes = build(&seeds).unwrap();
        // Bracket of 4: two first-round matches plus the final.
        assert_eq!(nodes.len(), 3);

        let m0 = &nodes[&MatchKey::new(1, 0)];
        assert_eq!(m0.slot_a, Some(seeds[0].user_id));
        assert_eq!(m0.slot_b, Some(seeds[1].user_id));
        assert_eq!(m0.winner, None);

        let m1 = &nodes[&MatchKey::new(1, 1)];
        assert_eq!(m1.slot_a, Some(seeds[2].user_id));
        assert_eq!(m1.slot_b, None);
        assert_eq!(m1.winner, Some(seeds[2].user_id));

        // Match 1 is odd-numbered, so the bye winner lands in the final's
        // slot_b.
        let root = &nodes[&MatchKey::new(2, 0)];
        assert_eq!(root.slot_a, None);
        assert_eq!(root.slot_b, Some(seeds[2].user_id));
        assert_eq!(root.winner, None);
        assert!(root.is_final());
    }

    #[test]
    fn bye_propagation_is_one_hop_only() {
        // Five seeds in a bracket of 8: match (1,2) is seed4 vs bye and
        // match (1,3) is bye vs bye, so match (2,1) becomes opponent-less.
        // It must NOT be auto-resolved in the same pass.
        let seeds = roster(5);
        let nodes = build(&seeds).unwrap();
        assert_eq!(nodes.len(), 7);

        let m2 = &nodes[&MatchKey::new(1, 2)];
        assert_eq!(m2.winner, Some(seeds[4].user_id));

        let m3 = &nodes[&MatchKey::new(1, 3)];
        assert_eq!(m3.slot_a, None);
        assert_eq!(m3.slot_b, None);
        assert_eq!(m3.winner, None);

        let semifinal = &nodes[&MatchKey::new(2, 1)];
        assert_eq!(semifinal.slot_a, Some(seeds[4].user_id));
        assert_eq!(semifinal.slot_b, None);
        assert_eq!(semifinal.winner, None);
    }

    #[test]
    fn tree_is_fully_linked() {
        let nodes = build(&roster(8)).unwrap();
        assert_eq!(nodes.len(), 7);

        for (key, node) in &nodes {
            if key.round == 3 {
                assert!(node.next_match.is_none());
            } else {
                assert_eq!(node.next_match, Some(key.parent()));
                assert!(nodes.contains_key(&key.parent()));
            }
        }
    }
}
