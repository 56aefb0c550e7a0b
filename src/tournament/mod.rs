//! Tournament lifecycle and management.
//!
//! This module provides the tournament-facing surface of the crate:
//! - Tournament creation and participant registration
//! - The open → ongoing → finished lifecycle (with cancellation from open)
//! - Bracket creation at start time
//! - Match result reporting through the consensus engine
//! - The deadline sweep that starts or cancels expired tournaments
//!
//! ## Example
//!
//! ```no_run
//! use bracket_engine::tournament::{TournamentConfig, TournamentManager, UserId};
//! use chrono::{Duration, Utc};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = TournamentManager::new();
//!
//!     let id = manager
//!         .create_tournament(TournamentConfig::new(
//!             "Friday Ladder".to_string(),
//!             8,
//!             Utc::now() + Duration::minutes(30),
//!             Utc::now() + Duration::hours(1),
//!         ))
//!         .await?;
//!
//!     manager
//!         .register_participant(id, UserId::new(), "alice".to_string(), 1200)
//!         .await?;
//!     manager
//!         .register_participant(id, UserId::new(), "bob".to_string(), 1100)
//!         .await?;
//!
//!     manager.start_tournament(id).await?;
//!     Ok(())
//! }
//! ```

pub mod manager;
pub mod models;

pub use manager::{ReportStatus, TournamentError, TournamentManager, TournamentResult};
pub use models::{
    Participant, Tournament, TournamentConfig, TournamentId, TournamentStatus, UserId,
};
