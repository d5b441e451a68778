// Fixed-shape responses for tallying, analytics and audit endpoints that carry no real
// cryptographic or statistical computation.
use crate::*;
use indexmap::IndexMap;
use serde_json::Value;

/// Request for a homomorphic tally. Only presence of the fields is checked.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct HomomorphicTallyRequest {
    #[serde(default)]
    pub cipher_aggregate: Option<Value>,
    #[serde(default)]
    pub tally_key: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Transparency {
    pub ballot_merkle_root: String,
    pub tally_method: String,
    pub threshold: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HomomorphicTally {
    pub election_id: String,
    pub encrypted_tally_root: String,
    pub candidate_tallies: Vec<CandidateTally>,
    pub decryption_proof: String,
    pub transparency: Transparency,
}

impl HomomorphicTally {
    /// Wrap the plain tallies in the fixed homomorphic envelope
    pub fn build(
        request: &HomomorphicTallyRequest,
        candidate_tallies: Vec<CandidateTally>,
    ) -> Result<Self> {
        if field_text(&request.cipher_aggregate).is_none() || field_text(&request.tally_key).is_none()
        {
            return Err(Error::MalformedProof(ProofKind::Homomorphic));
        }

        Ok(HomomorphicTally {
            election_id: "nat-2025".to_owned(),
            encrypted_tally_root: "0x9ab3...".to_owned(),
            candidate_tallies,
            decryption_proof: "base64(batch_proof_linking_cipher_aggregate_to_plain_counts)"
                .to_owned(),
            transparency: Transparency {
                ballot_merkle_root: "0x5d2c...".to_owned(),
                tally_method: "threshold_paillier".to_owned(),
                threshold: "3-of-5".to_owned(),
            },
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PrivacyBudget {
    pub epsilon: f64,
    pub delta: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DpAnalytics {
    pub answer: IndexMap<String, u64>,
    pub noise_mechanism: String,
    pub epsilon_spent: f64,
    pub delta: f64,
    pub remaining_privacy_budget: PrivacyBudget,
    pub composition_method: String,
}

impl Default for DpAnalytics {
    fn default() -> Self {
        let mut answer = IndexMap::new();
        answer.insert("18-24".to_owned(), 10450);
        answer.insert("25-34".to_owned(), 20110);
        answer.insert("35-44".to_owned(), 18001);
        answer.insert("45-64".to_owned(), 17320);
        answer.insert("65+".to_owned(), 9022);

        DpAnalytics {
            answer,
            noise_mechanism: "gaussian".to_owned(),
            epsilon_spent: 0.5,
            delta: 1e-6,
            remaining_privacy_budget: PrivacyBudget {
                epsilon: 1.0,
                delta: 1e-6,
            },
            composition_method: "advanced_composition".to_owned(),
        }
    }
}

/// Descriptor returned when a risk-limiting audit is bootstrapped
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuditBootstrap {
    pub audit_id: String,
    pub initial_sample_size: u64,
    pub sampling_plan: String,
    pub stopping_rule: String,
    pub status: String,
}

impl Default for AuditBootstrap {
    fn default() -> Self {
        AuditBootstrap {
            audit_id: "rla_88a1".to_owned(),
            initial_sample_size: 1200,
            sampling_plan: "base64(csv of county proportions and random seeds)".to_owned(),
            stopping_rule: "Kaplan-Markov".to_owned(),
            status: "in_progress".to_owned(),
        }
    }
}
