//! # Bracket Engine
//!
//! A single-elimination tournament bracket engine with two-party match
//! result consensus.
//!
//! The library seeds a rank-ordered roster into a binary bracket, links the
//! match tree round by round, and finalizes match results through a voting
//! protocol in which both participants must agree on the winner. The
//! surrounding application (HTTP routing, auth, persistence) is expected to
//! live outside this crate and call in through [`TournamentManager`].
//!
//! ## Architecture
//!
//! - [`bracket`]: pure roster-to-match-tree builder and the match node model
//! - [`consensus`]: the per-match two-party vote state machine
//! - [`tournament`]: tournament lifecycle, the in-memory match store, and
//!   the manager that ties everything together
//!
//! ## Example
//!
//! ```no_run
//! use bracket_engine::{TournamentConfig, TournamentManager};
//! use chrono::{Duration, Utc};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = TournamentManager::new();
//!
//!     let config = TournamentConfig::new(
//!         "Spring Invitational".to_string(),
//!         16,
//!         Utc::now() + Duration::hours(1),
//!         Utc::now() + Duration::hours(2),
//!     );
//!     let tournament_id = manager.create_tournament(config).await?;
//!
//!     // ... register participants, then:
//!     manager.start_tournament(tournament_id).await?;
//!     Ok(())
//! }
//! ```

/// Bracket construction and the match tree model.
pub mod bracket;
pub use bracket::{BracketError, MatchKey, MatchNode, builder};

/// Two-party match result consensus.
pub mod consensus;
pub use consensus::{ReportError, VoteOutcome, engine};

/// Tournament lifecycle, roster, and the manager facade.
pub mod tournament;
pub use tournament::{
    Participant, ReportStatus, Tournament, TournamentConfig, TournamentError, TournamentId,
    TournamentManager, TournamentResult, TournamentStatus, UserId,
};
