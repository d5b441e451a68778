use crate::*;
use log::{debug, warn};
use std::sync::Arc;

/// Tunable admission policy
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElectionConfig {
    /// First id handed out by the ledger
    pub first_vote_id: VoteId,

    /// Weight applied to votes cast through the weighted path
    pub weighted_vote_weight: u32,
}

impl Default for ElectionConfig {
    fn default() -> Self {
        ElectionConfig {
            first_vote_id: FIRST_VOTE_ID,
            weighted_vote_weight: DEFAULT_WEIGHTED_WEIGHT,
        }
    }
}

/// Votes gained by a candidate over a closed time interval
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RangeTally {
    pub candidate_id: CandidateId,
    #[serde(with = "iso_instant")]
    pub from: Instant,
    #[serde(with = "iso_instant")]
    pub to: Instant,
    pub votes_gained: u64,
}

/// The whole state of one election: registries and ledger, and the only entry point
/// for changing them.
///
/// Every write goes through `&mut self`, so wrapping an `Election` in a single lock
/// (see [`SharedElection`]) makes each admission one indivisible step.
#[derive(Debug)]
pub struct Election {
    registry: Registry,
    ledger: Ledger,
    config: ElectionConfig,
}

impl Election {
    pub fn new(config: ElectionConfig, clock: Arc<dyn Clock>) -> Self {
        Election {
            registry: Registry::default(),
            ledger: Ledger::new(config.first_vote_id, clock),
            config,
        }
    }

    pub fn config(&self) -> &ElectionConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn report(&self) -> TallyReport<'_> {
        TallyReport::new(&self.registry, &self.ledger)
    }

    /// Register a voter from client input.
    ///
    /// A voter that already holds a counted vote (deleted and registered again) comes
    /// back with `has_voted` set.
    pub fn register_voter(
        &mut self,
        voter_id: VoterId,
        name: String,
        age: Option<&serde_json::Value>,
    ) -> Result<Voter> {
        if self.registry.voter_exists(voter_id) {
            return Err(Error::VoterExists(voter_id));
        }
        let age = validate_age(age)?;
        let has_voted = self.ledger.has_counted_vote(voter_id);
        self.registry
            .register_voter(voter_id, name, age, has_voted)
            .map(Clone::clone)
    }

    pub fn get_voter(&self, voter_id: VoterId) -> Result<Voter> {
        self.registry
            .get_voter(voter_id)
            .cloned()
            .ok_or(Error::VoterNotFound(voter_id))
    }

    pub fn update_voter(
        &mut self,
        voter_id: VoterId,
        name: String,
        age: Option<&serde_json::Value>,
    ) -> Result<Voter> {
        if !self.registry.voter_exists(voter_id) {
            return Err(Error::VoterNotFound(voter_id));
        }
        let age = validate_age(age)?;
        self.registry
            .update_voter(voter_id, name, age)
            .map(Clone::clone)
    }

    pub fn delete_voter(&mut self, voter_id: VoterId) {
        self.registry.delete_voter(voter_id);
    }

    pub fn register_candidate(
        &mut self,
        candidate_id: CandidateId,
        name: String,
        party: String,
    ) -> Result<Candidate> {
        self.registry
            .register_candidate(candidate_id, name, party)
            .map(Clone::clone)
    }

    /// Cast a standard vote: one per voter
    pub fn cast_vote(&mut self, voter_id: VoterId, candidate_id: CandidateId) -> Result<Vote> {
        self.record(voter_id, candidate_id, VoteKind::Standard)
    }

    /// Cast a weighted vote.
    ///
    /// Weighted votes are a separate channel: they are not limited by, and do not
    /// count towards, the one-standard-vote-per-voter rule.
    pub fn cast_weighted_vote(
        &mut self,
        voter_id: VoterId,
        candidate_id: CandidateId,
    ) -> Result<Vote> {
        let kind = VoteKind::Weighted(self.config.weighted_vote_weight);
        self.record(voter_id, candidate_id, kind)
    }

    fn record(&mut self, voter_id: VoterId, candidate_id: CandidateId, kind: VoteKind) -> Result<Vote> {
        self.ledger
            .record_vote(&mut self.registry, voter_id, candidate_id, kind)
            .map_err(|e| {
                warn!("rejected {:?} vote by voter {}: {}", kind, voter_id, e);
                e
            })
    }

    /// Votes gained by `candidate_id` within `[from, to]`
    pub fn range_tally(
        &self,
        candidate_id: CandidateId,
        from: Instant,
        to: Instant,
    ) -> Result<RangeTally> {
        if from > to {
            return Err(Error::InvalidInterval("from > to".to_owned()));
        }
        Ok(RangeTally {
            candidate_id,
            from,
            to,
            votes_gained: self.report().sum_in_range(candidate_id, from, to),
        })
    }

    /// [`Election::range_tally`] for client-supplied instants
    pub fn range_tally_str(&self, candidate_id: CandidateId, from: &str, to: &str) -> Result<RangeTally> {
        let parse = |s: &str| {
            parse_instant(s)
                .ok_or_else(|| Error::InvalidInterval(format!("cannot parse instant '{}'", s)))
        };
        self.range_tally(candidate_id, parse(from)?, parse(to)?)
    }

    /// Admit an encrypted ballot.
    ///
    /// The ballot must carry every required field and its ciphertext must decrypt, under
    /// the voter's public key, to well-formed text. Admission does not touch the ledger.
    pub fn admit_encrypted_ballot(&self, ballot: &EncryptedBallot) -> Result<BallotReceipt> {
        let ballot = ballot.check_fields().map_err(|e| {
            warn!("rejected encrypted ballot: missing field");
            e
        })?;

        let plaintext = decrypt(&ballot.ciphertext, &ballot.voter_pubkey);
        if !is_well_formed(&plaintext) {
            warn!(
                "rejected encrypted ballot for election {}: ciphertext does not decrypt",
                ballot.election_id
            );
            return Err(Error::MalformedProof(ProofKind::ZeroKnowledge));
        }

        debug!("admitted encrypted ballot for election {}", ballot.election_id);
        Ok(BallotReceipt::accepted(&ballot, self.ledger.now()))
    }

    pub fn homomorphic_tally(&self, request: &HomomorphicTallyRequest) -> Result<HomomorphicTally> {
        HomomorphicTally::build(request, self.report().candidate_tallies())
    }
}
