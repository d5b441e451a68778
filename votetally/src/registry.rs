use crate::*;
use indexmap::IndexMap;
use log::info;

/// Minimum voting age
pub const MIN_VOTER_AGE: u64 = 18;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Voter {
    pub voter_id: VoterId,
    pub name: String,
    pub age: u64,
    pub has_voted: bool,
}

/// Public view of a voter, as listed to clients
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VoterSummary {
    pub voter_id: VoterId,
    pub name: String,
    pub age: u64,
}

impl From<&Voter> for VoterSummary {
    fn from(voter: &Voter) -> Self {
        VoterSummary {
            voter_id: voter.voter_id,
            name: voter.name.clone(),
            age: voter.age,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub candidate_id: CandidateId,
    pub name: String,
    pub party: String,

    /// Running tally. Only the ledger writes to it.
    pub votes: u64,
}

/// Public view of a candidate, as listed to clients
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CandidateSummary {
    pub candidate_id: CandidateId,
    pub name: String,
    pub party: String,
}

impl From<&Candidate> for CandidateSummary {
    fn from(candidate: &Candidate) -> Self {
        CandidateSummary {
            candidate_id: candidate.candidate_id,
            name: candidate.name.clone(),
            party: candidate.party.clone(),
        }
    }
}

/// Validate an age as received from a client.
///
/// Anything but a whole number of at least [`MIN_VOTER_AGE`] is rejected.
pub fn validate_age(age: Option<&serde_json::Value>) -> Result<u64> {
    let age = match age {
        None => return Err(Error::InvalidAge("undefined".to_owned())),
        Some(age) => age,
    };
    let years = age.as_u64().or_else(|| {
        age.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    });
    match years {
        Some(years) if years >= MIN_VOTER_AGE => Ok(years),
        _ => Err(Error::InvalidAge(match age {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })),
    }
}

/// Voter and candidate records, kept in registration order.
///
/// Tallies and voting flags on these records are derived from the ledger and are
/// only mutated through [`Ledger::record_vote`].
#[derive(Debug, Default, Clone)]
pub struct Registry {
    voters: IndexMap<VoterId, Voter>,
    candidates: IndexMap<CandidateId, Candidate>,
}

impl Registry {
    pub fn voter_exists(&self, voter_id: VoterId) -> bool {
        self.voters.contains_key(&voter_id)
    }

    pub fn candidate_exists(&self, candidate_id: CandidateId) -> bool {
        self.candidates.contains_key(&candidate_id)
    }

    pub fn get_voter(&self, voter_id: VoterId) -> Option<&Voter> {
        self.voters.get(&voter_id)
    }

    pub fn get_candidate(&self, candidate_id: CandidateId) -> Option<&Candidate> {
        self.candidates.get(&candidate_id)
    }

    pub(crate) fn voter_mut(&mut self, voter_id: VoterId) -> Option<&mut Voter> {
        self.voters.get_mut(&voter_id)
    }

    pub(crate) fn candidate_mut(&mut self, candidate_id: CandidateId) -> Option<&mut Candidate> {
        self.candidates.get_mut(&candidate_id)
    }

    pub fn voters(&self) -> impl Iterator<Item = &Voter> {
        self.voters.values()
    }

    pub fn candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.values()
    }

    /// Register a new voter. `has_voted` is supplied by the caller from the ledger.
    pub fn register_voter(
        &mut self,
        voter_id: VoterId,
        name: String,
        age: u64,
        has_voted: bool,
    ) -> Result<&Voter> {
        if self.voters.contains_key(&voter_id) {
            return Err(Error::VoterExists(voter_id));
        }
        if age < MIN_VOTER_AGE {
            return Err(Error::InvalidAge(age.to_string()));
        }

        info!("registering voter {}", voter_id);
        let voter = Voter {
            voter_id,
            name,
            age,
            has_voted,
        };
        Ok(self.voters.entry(voter_id).or_insert(voter))
    }

    /// Replace a voter's name and age, keeping its voting state
    pub fn update_voter(&mut self, voter_id: VoterId, name: String, age: u64) -> Result<&Voter> {
        let voter = self
            .voters
            .get_mut(&voter_id)
            .ok_or(Error::VoterNotFound(voter_id))?;
        if age < MIN_VOTER_AGE {
            return Err(Error::InvalidAge(age.to_string()));
        }

        info!("updating voter {}", voter_id);
        voter.name = name;
        voter.age = age;
        Ok(voter)
    }

    /// Remove a voter. Removing an unknown voter is not an error.
    pub fn delete_voter(&mut self, voter_id: VoterId) -> Option<Voter> {
        let removed = self.voters.shift_remove(&voter_id);
        if removed.is_some() {
            info!("deleted voter {}", voter_id);
        }
        removed
    }

    /// Register a new candidate with an empty tally
    pub fn register_candidate(
        &mut self,
        candidate_id: CandidateId,
        name: String,
        party: String,
    ) -> Result<&Candidate> {
        if self.candidates.contains_key(&candidate_id) {
            return Err(Error::CandidateExists(candidate_id));
        }

        info!("registering candidate {} ({})", candidate_id, party);
        let candidate = Candidate {
            candidate_id,
            name,
            party,
            votes: 0,
        };
        Ok(self.candidates.entry(candidate_id).or_insert(candidate))
    }

    pub fn list_voters(&self) -> Vec<VoterSummary> {
        self.voters.values().map(VoterSummary::from).collect()
    }

    /// Candidates in registration order, optionally only those of `party`
    pub fn list_candidates(&self, party: Option<&str>) -> Vec<CandidateSummary> {
        self.candidates
            .values()
            .filter(|c| party.map_or(true, |p| c.party == p))
            .map(CandidateSummary::from)
            .collect()
    }
}
