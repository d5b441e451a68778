use crate::*;
use chrono::SubsecRound;
use log::debug;
use std::collections::BTreeSet;
use std::sync::Arc;

/// First vote id handed out by a fresh ledger
pub const FIRST_VOTE_ID: VoteId = 101;

/// Weight of a standard vote
pub const STANDARD_WEIGHT: u32 = 1;

/// Weight of a weighted vote under the default policy
pub const DEFAULT_WEIGHTED_WEIGHT: u32 = 2;

/// A cast vote. Never modified once appended.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub vote_id: VoteId,
    pub voter_id: VoterId,
    pub candidate_id: CandidateId,
    #[serde(with = "iso_instant")]
    pub timestamp: Instant,
    pub weight: u32,
}

/// How a vote is counted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteKind {
    /// Counts once, and only once per voter
    Standard,

    /// Counts `n` times. Does not consult or set the voter's `has_voted` flag.
    Weighted(u32),
}

impl VoteKind {
    pub fn weight(&self) -> u32 {
        match self {
            VoteKind::Standard => STANDARD_WEIGHT,
            VoteKind::Weighted(weight) => *weight,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub vote_id: VoteId,
    #[serde(with = "iso_instant")]
    pub timestamp: Instant,
}

/// Append-only record of cast votes
pub struct Ledger {
    votes: Vec<Vote>,
    next_vote_id: VoteId,
    last_timestamp: Option<Instant>,

    // voters holding a standard vote
    counted: BTreeSet<VoterId>,
    clock: Arc<dyn Clock>,
}

impl Ledger {
    pub fn new(first_vote_id: VoteId, clock: Arc<dyn Clock>) -> Self {
        Ledger {
            votes: vec![],
            next_vote_id: first_vote_id,
            last_timestamp: None,
            counted: BTreeSet::new(),
            clock,
        }
    }

    /// Record a vote and apply it to the registry.
    ///
    /// All preconditions are checked before anything is touched, so on error neither the
    /// ledger nor the registry has changed. On success the vote is appended, the
    /// candidate's tally grows by the vote's weight and, for a standard vote, the voter
    /// is marked as having voted.
    pub fn record_vote(
        &mut self,
        registry: &mut Registry,
        voter_id: VoterId,
        candidate_id: CandidateId,
        kind: VoteKind,
    ) -> Result<Vote> {
        let weight = kind.weight();
        if weight == 0 {
            return Err(Error::InvalidWeight(weight));
        }

        let voter = registry
            .get_voter(voter_id)
            .ok_or(Error::VoterNotFound(voter_id))?;
        if kind == VoteKind::Standard && voter.has_voted {
            return Err(Error::AlreadyVoted(voter_id));
        }
        if !registry.candidate_exists(candidate_id) {
            return Err(Error::CandidateNotFound(candidate_id));
        }

        let vote = Vote {
            vote_id: self.next_vote_id,
            voter_id,
            candidate_id,
            timestamp: self.stamp(),
            weight,
        };

        if let Some(candidate) = registry.candidate_mut(candidate_id) {
            candidate.votes += u64::from(weight);
        }
        if kind == VoteKind::Standard {
            if let Some(voter) = registry.voter_mut(voter_id) {
                voter.has_voted = true;
            }
            self.counted.insert(voter_id);
        }
        self.next_vote_id += 1;
        self.votes.push(vote.clone());

        debug!(
            "recorded vote {} for candidate {} (weight {})",
            vote.vote_id, candidate_id, weight
        );
        Ok(vote)
    }

    // Timestamps never run backwards, so ledger order is chronological order.
    fn stamp(&mut self) -> Instant {
        let now = self.now();
        let stamped = match self.last_timestamp {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_timestamp = Some(stamped);
        stamped
    }

    /// Current time on the ledger's clock, at the millisecond precision of the wire format
    pub fn now(&self) -> Instant {
        self.clock.now().trunc_subsecs(3)
    }

    /// Whether the ledger holds a standard vote from `voter_id`
    pub fn has_counted_vote(&self, voter_id: VoterId) -> bool {
        self.counted.contains(&voter_id)
    }

    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    fn votes_for(&self, candidate_id: CandidateId) -> impl Iterator<Item = &Vote> {
        self.votes
            .iter()
            .filter(move |v| v.candidate_id == candidate_id)
    }

    /// Sum of weights over all votes for `candidate_id`
    pub fn tally_for(&self, candidate_id: CandidateId) -> u64 {
        self.votes_for(candidate_id)
            .map(|v| u64::from(v.weight))
            .sum()
    }

    /// Votes for `candidate_id` in ledger order
    pub fn timeline_for(&self, candidate_id: CandidateId) -> Vec<TimelineEntry> {
        self.votes_for(candidate_id)
            .map(|v| TimelineEntry {
                vote_id: v.vote_id,
                timestamp: v.timestamp,
            })
            .collect()
    }

    /// Sum of weights over votes for `candidate_id` stamped within `[from, to]`.
    ///
    /// An inverted interval simply matches nothing; rejecting it is up to the caller.
    pub fn sum_in_range(&self, candidate_id: CandidateId, from: Instant, to: Instant) -> u64 {
        self.votes_for(candidate_id)
            .filter(|v| v.timestamp >= from && v.timestamp <= to)
            .map(|v| u64::from(v.weight))
            .sum()
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("votes", &self.votes.len())
            .field("next_vote_id", &self.next_vote_id)
            .field("last_timestamp", &self.last_timestamp)
            .finish()
    }
}
