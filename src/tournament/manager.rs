//! Tournament manager: lifecycle transitions, the match store, and result
//! reporting.
//!
//! The manager keeps every tournament in a flat indexed store. Match nodes
//! are keyed by `(tournament, round, match_number)` and each sits behind its
//! own lock, so the consensus engine's read-modify-write of a node's vote
//! state — and the follow-up write to its parent's slot — happen as one
//! serialized unit per match. Two concurrent reports on the same match
//! cannot both observe themselves as the second vote, and two children of
//! the same parent cannot clobber each other's slot writes.

use super::models::{
    Participant, Tournament, TournamentConfig, TournamentId, TournamentStatus, UserId,
};
use crate::bracket::{BracketError, MatchKey, MatchNode, builder};
use crate::consensus::{ReportError, VoteOutcome, engine};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

/// Tournament errors
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("tournament not found: {0}")]
    NotFound(TournamentId),

    #[error("tournament is not open: status is {0}")]
    NotOpen(TournamentStatus),

    #[error("max participants must be at least 2, got {0}")]
    InvalidCapacity(usize),

    #[error("registration deadline must be before the start time")]
    InvalidSchedule,

    #[error("tournament is full")]
    TournamentFull,

    #[error("user is already registered for this tournament")]
    AlreadyRegistered,

    #[error("registration deadline has passed")]
    RegistrationClosed,

    #[error("match not found: {0}")]
    MatchNotFound(MatchKey),

    #[error(transparent)]
    Bracket(#[from] BracketError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

pub type TournamentResult<T> = Result<T, TournamentError>;

/// Caller-visible outcome of a match report
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ReportStatus {
    /// Vote recorded, waiting for the opponent's report
    Waiting,
    /// Reports disagreed; both votes were withdrawn
    Conflict,
    /// Reports agreed; the match is finalized
    Finished,
}

/// One tournament's state.
///
/// Lock order is `info → roster → matches map → match node → parent node`,
/// with the exception that a report finalizing the root takes `info` while
/// holding the root's node lock. That is safe because nothing holds the
/// matches map guard while waiting on a node lock (handles are cloned out
/// first), so `info` holders never block on a node holder transitively.
struct TournamentRecord {
    info: Mutex<Tournament>,
    roster: Mutex<Vec<Participant>>,
    matches: RwLock<BTreeMap<MatchKey, Arc<Mutex<MatchNode>>>>,
}

/// Tournament manager
#[derive(Clone, Default)]
pub struct TournamentManager {
    tournaments: Arc<RwLock<HashMap<TournamentId, Arc<TournamentRecord>>>>,
}

impl TournamentManager {
    /// Create a new, empty manager
    pub fn new() -> Self {
        Self::default()
    }

    async fn record(&self, id: TournamentId) -> TournamentResult<Arc<TournamentRecord>> {
        self.tournaments
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(TournamentError::NotFound(id))
    }

    /// Create a tournament in the `Open` state.
    ///
    /// Rejects capacities below 2 and schedules whose deadline does not
    /// precede the start time.
    pub async fn create_tournament(
        &self,
        config: TournamentConfig,
    ) -> TournamentResult<TournamentId> {
        if config.max_participants < 2 {
            return Err(TournamentError::InvalidCapacity(config.max_participants));
        }
        if config.deadline >= config.start_time {
            return Err(TournamentError::InvalidSchedule);
        }

        let id = TournamentId::new();
        let tournament = Tournament {
            id,
            config,
            status: TournamentStatus::Open,
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
        };
        info!("created tournament {id} ({})", tournament.config.name);

        let record = Arc::new(TournamentRecord {
            info: Mutex::new(tournament),
            roster: Mutex::new(Vec::new()),
            matches: RwLock::new(BTreeMap::new()),
        });
        self.tournaments.write().await.insert(id, record);
        Ok(id)
    }

    /// Register a participant while the tournament is open.
    pub async fn register_participant(
        &self,
        id: TournamentId,
        user_id: UserId,
        display_name: String,
        ranking_points: i64,
    ) -> TournamentResult<()> {
        let record = self.record(id).await?;
        let info = record.info.lock().await;

        if info.status != TournamentStatus::Open {
            return Err(TournamentError::NotOpen(info.status));
        }
        if Utc::now() > info.config.deadline {
            return Err(TournamentError::RegistrationClosed);
        }

        let mut roster = record.roster.lock().await;
        if roster.len() >= info.config.max_participants {
            return Err(TournamentError::TournamentFull);
        }
        if roster.iter().any(|p| p.user_id == user_id) {
            return Err(TournamentError::AlreadyRegistered);
        }

        debug!("registered {display_name} ({user_id}) for tournament {id}");
        roster.push(Participant {
            user_id,
            display_name,
            ranking_points,
            registered_at: Utc::now(),
        });
        Ok(())
    }

    /// Start a tournament: seed the roster, build the bracket, and flip the
    /// status to `Ongoing`.
    ///
    /// The roster snapshot is ordered by ranking points descending (ties
    /// keep registration order). Bracket installation and the status flip
    /// happen under the tournament's lock, so callers never observe an
    /// `Ongoing` tournament without its tree or a tree without `Ongoing`.
    /// On failure nothing is written and the tournament stays `Open`.
    pub async fn start_tournament(&self, id: TournamentId) -> TournamentResult<()> {
        let record = self.record(id).await?;
        let mut info = record.info.lock().await;

        if info.status != TournamentStatus::Open {
            return Err(TournamentError::NotOpen(info.status));
        }

        let roster = record.roster.lock().await;
        let mut seeds = roster.clone();
        seeds.sort_by(|a, b| b.ranking_points.cmp(&a.ranking_points));

        let nodes = builder::build(&seeds)?;
        let rounds = nodes.keys().map(|k| k.round).max().unwrap_or(0);

        let mut matches = record.matches.write().await;
        *matches = nodes
            .into_iter()
            .map(|(key, node)| (key, Arc::new(Mutex::new(node))))
            .collect();

        info.status = TournamentStatus::Ongoing;
        info.started_at = Some(Utc::now());
        info!(
            "started tournament {id} with {} participants over {rounds} rounds",
            seeds.len()
        );
        Ok(())
    }

    /// Report a match result on behalf of one of its participants.
    ///
    /// The node's lock is held across the vote evaluation and, when the
    /// match finalizes, across the advancement write as well: either the
    /// winner moves into the parent's slot (even match numbers feed
    /// `slot_a`, odd ones `slot_b`), or — for the final — the tournament
    /// transitions to `Finished`.
    pub async fn report_match_result(
        &self,
        id: TournamentId,
        key: MatchKey,
        reporter: UserId,
        claimed_winner: UserId,
    ) -> TournamentResult<ReportStatus> {
        let record = self.record(id).await?;

        // Clone the handles out so the map guard is not held across any
        // node lock below.
        let (node_handle, parent_handle) = {
            let matches = record.matches.read().await;
            let node = matches
                .get(&key)
                .cloned()
                .ok_or(TournamentError::MatchNotFound(key))?;
            let parent = matches.get(&key.parent()).cloned();
            (node, parent)
        };

        let mut node = node_handle.lock().await;
        match engine::record_vote(&mut node, reporter, claimed_winner)? {
            VoteOutcome::Waiting => {
                debug!("match {key} in tournament {id}: vote recorded, waiting");
                Ok(ReportStatus::Waiting)
            }
            VoteOutcome::Conflict => {
                warn!("match {key} in tournament {id}: conflicting reports, votes withdrawn");
                Ok(ReportStatus::Conflict)
            }
            VoteOutcome::Finished(winner) => {
                // Advancement happens while the node's lock is still held.
                if let Some(parent_handle) = parent_handle {
                    let mut parent = parent_handle.lock().await;
                    if key.feeds_slot_a() {
                        parent.slot_a = Some(winner);
                    } else {
                        parent.slot_b = Some(winner);
                    }
                    info!(
                        "match {key} in tournament {id} finalized, {winner} advances to {}",
                        parent.key
                    );
                } else {
                    // Root match: the tournament is decided.
                    let mut info = record.info.lock().await;
                    info.status = TournamentStatus::Finished;
                    info.finished_at = Some(Utc::now());
                    info!("tournament {id} finished, winner {winner}");
                }
                Ok(ReportStatus::Finished)
            }
        }
    }

    /// Sweep every open tournament whose deadline has elapsed: start those
    /// with a viable roster, cancel the rest. Returns the number cancelled.
    pub async fn auto_cancel_expired(&self, now: DateTime<Utc>) -> TournamentResult<usize> {
        let records: Vec<(TournamentId, Arc<TournamentRecord>)> = self
            .tournaments
            .read()
            .await
            .iter()
            .map(|(id, record)| (*id, Arc::clone(record)))
            .collect();

        let mut expired = Vec::new();
        for (id, record) in records {
            let info = record.info.lock().await;
            if info.status == TournamentStatus::Open && info.config.deadline <= now {
                expired.push((id, Arc::clone(&record)));
            }
        }

        let mut cancelled = 0;
        for (id, record) in expired {
            match self.start_tournament(id).await {
                Ok(()) => {}
                Err(TournamentError::Bracket(BracketError::InsufficientParticipants(have))) => {
                    let mut info = record.info.lock().await;
                    if info.status == TournamentStatus::Open {
                        info.status = TournamentStatus::Cancelled;
                        info.finished_at = Some(now);
                        cancelled += 1;
                        warn!(
                            "cancelled tournament {id}: deadline passed with {have} participant(s)"
                        );
                    }
                }
                // A racing organizer started or cancelled it first.
                Err(TournamentError::NotOpen(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(cancelled)
    }

    /// Fetch a snapshot of a tournament
    pub async fn get_tournament(&self, id: TournamentId) -> TournamentResult<Tournament> {
        let record = self.record(id).await?;
        let info = record.info.lock().await;
        Ok(info.clone())
    }

    /// List tournaments, optionally filtered by status
    pub async fn list_tournaments(
        &self,
        status_filter: Option<TournamentStatus>,
    ) -> Vec<Tournament> {
        let records: Vec<Arc<TournamentRecord>> =
            self.tournaments.read().await.values().cloned().collect();

        let mut tournaments = Vec::new();
        for record in records {
            let info = record.info.lock().await;
            if status_filter.is_none() || status_filter == Some(info.status) {
                tournaments.push(info.clone());
            }
        }
        tournaments.sort_by_key(|t| t.created_at);
        tournaments
    }

    /// Fetch the roster in registration order
    pub async fn get_roster(&self, id: TournamentId) -> TournamentResult<Vec<Participant>> {
        let record = self.record(id).await?;
        let roster = record.roster.lock().await;
        Ok(roster.clone())
    }

    /// Fetch one match node
    pub async fn get_match(
        &self,
        id: TournamentId,
        key: MatchKey,
    ) -> TournamentResult<MatchNode> {
        let record = self.record(id).await?;
        let handle = {
            let matches = record.matches.read().await;
            matches
                .get(&key)
                .cloned()
                .ok_or(TournamentError::MatchNotFound(key))?
        };
        let node = handle.lock().await;
        Ok(node.clone())
    }

    /// List every match of a tournament in `(round, match_number)` order.
    ///
    /// Empty until the tournament starts.
    pub async fn list_matches(&self, id: TournamentId) -> TournamentResult<Vec<MatchNode>> {
        let record = self.record(id).await?;
        let handles: Vec<Arc<Mutex<MatchNode>>> = {
            let matches = record.matches.read().await;
            matches.values().cloned().collect()
        };

        let mut nodes = Vec::with_capacity(handles.len());
        for handle in handles {
            let node = handle.lock().await;
            nodes.push(node.clone());
        }
        Ok(nodes)
    }
}
