use crate::*;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// An encrypted-ballot submission as received from a client.
///
/// Fields are kept as raw JSON: a field counts as missing when it is absent, `null`,
/// `false`, `0` or an empty string.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct EncryptedBallot {
    #[serde(default)]
    pub election_id: Option<Value>,
    #[serde(default)]
    pub ciphertext: Option<Value>,
    #[serde(default)]
    pub zk_proof: Option<Value>,
    #[serde(default)]
    pub voter_pubkey: Option<Value>,
    #[serde(default)]
    pub nullifier: Option<Value>,
    #[serde(default)]
    pub signature: Option<Value>,
}

/// Text of a present field, or `None` when the field is missing
pub fn field_text(field: &Option<Value>) -> Option<String> {
    match field.as_ref()? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// The fields of an [`EncryptedBallot`] once all of them are known to be present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedBallot {
    pub election_id: String,
    pub ciphertext: String,
    pub zk_proof: String,
    pub voter_pubkey: String,
    pub nullifier: String,
    pub signature: String,
}

impl EncryptedBallot {
    pub fn check_fields(&self) -> Result<CheckedBallot> {
        let required = |field: &Option<Value>| {
            field_text(field).ok_or(Error::MalformedProof(ProofKind::ZeroKnowledge))
        };
        Ok(CheckedBallot {
            election_id: required(&self.election_id)?,
            ciphertext: required(&self.ciphertext)?,
            zk_proof: required(&self.zk_proof)?,
            voter_pubkey: required(&self.voter_pubkey)?,
            nullifier: required(&self.nullifier)?,
            signature: required(&self.signature)?,
        })
    }
}

/// Proof that an encrypted ballot was admitted
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BallotReceipt {
    pub ballot_id: String,
    pub status: String,
    pub nullifier: String,
    #[serde(with = "iso_instant")]
    pub anchored_at: Instant,
}

impl BallotReceipt {
    pub fn accepted(ballot: &CheckedBallot, anchored_at: Instant) -> Self {
        BallotReceipt {
            ballot_id: ballot_id(&ballot.election_id, &ballot.nullifier),
            status: "accepted".to_owned(),
            nullifier: ballot.nullifier.clone(),
            anchored_at,
        }
    }
}

/// Synthetic ballot id: `b_` and the first four hex digits of SHA-256(election_id || nullifier)
pub fn ballot_id(election_id: &str, nullifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(election_id.as_bytes());
    hasher.update(nullifier.as_bytes());
    let digest = hasher.finalize();
    format!("b_{}", &hex::encode(&digest[..2]))
}

/// Acknowledgement for a ranked-ballot submission
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RankedBallotAck {
    pub ballot_id: String,
    pub status: String,
}

impl Default for RankedBallotAck {
    fn default() -> Self {
        RankedBallotAck {
            ballot_id: "rb_2219".to_owned(),
            status: "accepted".to_owned(),
        }
    }
}
