use crate::*;

/// A candidate's standing in the results
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub candidate_id: CandidateId,
    pub name: String,
    pub votes: u64,
}

impl From<&Candidate> for Standing {
    fn from(candidate: &Candidate) -> Self {
        Standing {
            candidate_id: candidate.candidate_id,
            name: candidate.name.clone(),
            votes: candidate.votes,
        }
    }
}

/// Read-only queries over the registry and the ledger
#[derive(Debug, Clone, Copy)]
pub struct TallyReport<'a> {
    registry: &'a Registry,
    ledger: &'a Ledger,
}

impl<'a> TallyReport<'a> {
    pub fn new(registry: &'a Registry, ledger: &'a Ledger) -> Self {
        TallyReport { registry, ledger }
    }

    /// All candidates by descending votes. Ties keep registration order.
    pub fn ranked_results(&self) -> Vec<Standing> {
        let mut results: Vec<Standing> = self.registry.candidates().map(Standing::from).collect();
        // sort_by is stable
        results.sort_by(|a, b| b.votes.cmp(&a.votes));
        results
    }

    /// Every candidate sharing the highest vote count, in registration order
    pub fn winners(&self) -> Vec<Standing> {
        let max = self.registry.candidates().map(|c| c.votes).max().unwrap_or(0);
        self.registry
            .candidates()
            .filter(|c| c.votes == max)
            .map(Standing::from)
            .collect()
    }

    /// A candidate's tally, or 0 for an unknown candidate
    pub fn count_for(&self, candidate_id: CandidateId) -> u64 {
        self.registry
            .get_candidate(candidate_id)
            .map_or(0, |c| c.votes)
    }

    pub fn timeline_for(&self, candidate_id: CandidateId) -> Vec<TimelineEntry> {
        self.ledger.timeline_for(candidate_id)
    }

    pub fn sum_in_range(&self, candidate_id: CandidateId, from: Instant, to: Instant) -> u64 {
        self.ledger.sum_in_range(candidate_id, from, to)
    }

    /// `(candidate_id, votes)` for every candidate, in registration order
    pub fn candidate_tallies(&self) -> Vec<CandidateTally> {
        self.registry
            .candidates()
            .map(|c| CandidateTally {
                candidate_id: c.candidate_id,
                votes: c.votes,
            })
            .collect()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CandidateTally {
    pub candidate_id: CandidateId,
    pub votes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn registry_with(tallies: &[(CandidateId, u32)]) -> (Registry, Ledger) {
        let mut registry = Registry::default();
        let mut ledger = Ledger::new(FIRST_VOTE_ID, Arc::new(SystemClock));
        registry.register_voter(1, "v".into(), 40, false).unwrap();
        for (id, votes) in tallies {
            registry
                .register_candidate(*id, format!("c{}", id), "p".into())
                .unwrap();
            for _ in 0..*votes {
                ledger
                    .record_vote(&mut registry, 1, *id, VoteKind::Weighted(1))
                    .unwrap();
            }
        }
        (registry, ledger)
    }

    fn ids(standings: &[Standing]) -> Vec<CandidateId> {
        standings.iter().map(|s| s.candidate_id).collect()
    }

    #[test]
    fn test_ranked_is_stable_descending() {
        let (registry, ledger) = registry_with(&[(1, 2), (2, 5), (3, 2), (4, 0), (5, 5)]);
        let report = TallyReport::new(&registry, &ledger);
        let ranked = report.ranked_results();
        assert_eq!(ids(&ranked), vec![2, 5, 1, 3, 4]);
        assert!(ranked.windows(2).all(|w| w[0].votes >= w[1].votes));
    }

    #[test]
    fn test_winners() {
        let (registry, ledger) = registry_with(&[(1, 2), (2, 5), (3, 5)]);
        let report = TallyReport::new(&registry, &ledger);
        assert_eq!(ids(&report.winners()), vec![2, 3]);

        let (registry, ledger) = registry_with(&[(1, 0), (2, 0)]);
        let report = TallyReport::new(&registry, &ledger);
        assert_eq!(ids(&report.winners()), vec![1, 2]);

        let (registry, ledger) = registry_with(&[]);
        let report = TallyReport::new(&registry, &ledger);
        assert!(report.winners().is_empty());
        assert!(report.ranked_results().is_empty());
    }

    #[test]
    fn test_count_matches_ledger() {
        let (registry, ledger) = registry_with(&[(1, 3), (2, 1)]);
        let report = TallyReport::new(&registry, &ledger);
        for c in registry.candidates() {
            assert_eq!(report.count_for(c.candidate_id), ledger.tally_for(c.candidate_id));
        }
        assert_eq!(report.count_for(77), 0);
        assert_eq!(
            report.candidate_tallies(),
            vec![
                CandidateTally { candidate_id: 1, votes: 3 },
                CandidateTally { candidate_id: 2, votes: 1 },
            ]
        );
    }
}
