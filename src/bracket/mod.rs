//! Bracket construction and the match tree model.
//!
//! A bracket is a binary tree of match nodes stored flat, keyed by
//! `(round, match_number)`. Round 1 holds the seeded participants; every
//! other round is filled as children finalize. The [`builder`] produces the
//! whole tree in one pass from a rank-ordered roster, resolving first-round
//! byes as it goes.

pub mod builder;
pub mod models;

pub use builder::{BracketError, bracket_size, build, round_count};
pub use models::{MatchKey, MatchNode};
