//! Tournament and roster data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque participant identity
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Mint a fresh identity
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tournament identifier
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct TournamentId(Uuid);

impl TournamentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TournamentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TournamentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tournament lifecycle state
///
/// Transitions are monotonic: `Open → Ongoing → Finished`, plus
/// `Open → Cancelled` for deadline-expired tournaments that never gathered
/// enough participants. There is no way out of a terminal state.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum TournamentStatus {
    /// Accepting registrations
    Open,
    /// Bracket built, matches being played
    Ongoing,
    /// Final match decided
    Finished,
    /// Closed without ever starting
    Cancelled,
}

impl TournamentStatus {
    /// Whether no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Cancelled)
    }
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Open => "open",
            Self::Ongoing => "ongoing",
            Self::Finished => "finished",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{repr}")
    }
}

/// Tournament configuration, fixed at creation
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TournamentConfig {
    /// Tournament name
    pub name: String,
    /// Upper bound on roster size (at least 2)
    pub max_participants: usize,
    /// Registration deadline; must precede `start_time`
    pub deadline: DateTime<Utc>,
    /// Scheduled start time
    pub start_time: DateTime<Utc>,
}

impl TournamentConfig {
    /// Create a new configuration
    pub fn new(
        name: String,
        max_participants: usize,
        deadline: DateTime<Utc>,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            name,
            max_participants,
            deadline,
            start_time,
        }
    }
}

/// A tournament and its lifecycle timestamps
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub config: TournamentConfig,
    pub status: TournamentStatus,
    pub created_at: DateTime<Utc>,
    /// Set when the bracket is built
    pub started_at: Option<DateTime<Utc>>,
    /// Set on finish or cancellation
    pub finished_at: Option<DateTime<Utc>>,
}

/// A roster entry. Immutable once the bracket is built.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Participant {
    /// Identity reference, unique within one tournament's roster
    pub user_id: UserId,
    /// Display name
    pub display_name: String,
    /// Ranking score used for seeding (higher seeds first)
    pub ranking_points: i64,
    /// Registration timestamp
    pub registered_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(!TournamentStatus::Open.is_terminal());
        assert!(!TournamentStatus::Ongoing.is_terminal());
        assert!(TournamentStatus::Finished.is_terminal());
        assert!(TournamentStatus::Cancelled.is_terminal());
    }

    #[test]
    fn status_serializes_round_trip() {
        let json = serde_json::to_string(&TournamentStatus::Ongoing).unwrap();
        let back: TournamentStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TournamentStatus::Ongoing);
    }

    #[test]
    fn ids_display_as_uuids() {
        let id = UserId::new();
        assert_eq!(id.to_string().len(), 36);
    }
}
