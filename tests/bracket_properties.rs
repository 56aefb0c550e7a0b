//! Property tests for bracket construction.
//!
//! Checks the structural invariants of the match tree across every roster
//! size the builder is expected to handle.

use bracket_engine::bracket::{self, MatchKey, builder};
use bracket_engine::{Participant, UserId};
use chrono::Utc;
use proptest::prelude::*;

fn roster(n: usize) -> Vec<Participant> {
    (0..n)
        .map(|i| Participant {
            user_id: UserId::new(),
            display_name: format!("seed{i}"),
            ranking_points: 10_000 - i as i64,
            registered_at: Utc::now(),
        })
        .collect()
}

proptest! {
    #[test]
    fn bracket_shape_invariants(n in 2usize..=64) {
        let seeds = roster(n);
        let nodes = builder::build(&seeds).unwrap();

        let size = bracket::bracket_size(n);
        let rounds = bracket::round_count(size);
        prop_assert!(size.is_power_of_two());
        prop_assert!(size >= n && size < 2 * n);

        // Total node count and per-round counts.
        prop_assert_eq!(nodes.len(), size - 1);
        for round in 1..=rounds {
            let count = nodes.keys().filter(|k| k.round == round).count();
            prop_assert_eq!(count, size >> round);
        }
    }

    #[test]
    fn every_node_but_the_root_has_one_parent(n in 2usize..=64) {
        let seeds = roster(n);
        let nodes = builder::build(&seeds).unwrap();
        let rounds = bracket::round_count(bracket::bracket_size(n));

        let mut roots = 0;
        for (key, node) in &nodes {
            if node.next_match.is_none() {
                roots += 1;
                prop_assert_eq!(key.round, rounds);
                prop_assert_eq!(key.number, 0);
            } else {
                prop_assert_eq!(node.next_match, Some(key.parent()));
                prop_assert!(nodes.contains_key(&key.parent()));
            }
        }
        prop_assert_eq!(roots, 1);
    }

    #[test]
    fn round_one_seeding_is_positional(n in 2usize..=64) {
        let seeds = roster(n);
        let nodes = builder::build(&seeds).unwrap();
        let size = bracket::bracket_size(n);

        for i in 0..size / 2 {
            let node = &nodes[&MatchKey::new(1, i as u32)];
            prop_assert_eq!(node.slot_a, seeds.get(2 * i).map(|p| p.user_id));
            prop_assert_eq!(node.slot_b, seeds.get(2 * i + 1).map(|p| p.user_id));
        }
    }

    #[test]
    fn byes_resolve_exactly_one_hop(n in 2usize..=64) {
        let seeds = roster(n);
        let nodes = builder::build(&seeds).unwrap();

        for (key, node) in &nodes {
            if key.round == 1 {
                match (node.slot_a, node.slot_b) {
                    (Some(user), None) => {
                        prop_assert_eq!(node.winner, Some(user));
                        if let Some(parent_key) = node.next_match {
                            let parent = &nodes[&parent_key];
                            if key.feeds_slot_a() {
                                prop_assert_eq!(parent.slot_a, Some(user));
                            } else {
                                prop_assert_eq!(parent.slot_b, Some(user));
                            }
                        }
                    }
                    _ => prop_assert_eq!(node.winner, None),
                }
            } else {
                // One-hop limitation: nothing past round 1 is ever resolved
                // at build time, even when it ends up opponent-less.
                prop_assert_eq!(node.winner, None);
            }
        }
    }
}
