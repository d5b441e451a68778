use crate::*;

use thiserror::Error;

/// Coarse error classification shared by every failure the engine reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    InvalidArgument,
}

/// Error types
///
/// Display strings are the messages returned to clients, so they are kept stable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("voter with id: {0} was not found")]
    VoterNotFound(VoterId),

    #[error("candidate with id: {0} was not found")]
    CandidateNotFound(CandidateId),

    #[error("voter with id: {0} has already voted")]
    AlreadyVoted(VoterId),

    #[error("voter with id: {0} already exists")]
    VoterExists(VoterId),

    #[error("candidate with id: {0} already exists")]
    CandidateExists(CandidateId),

    #[error("invalid age: {0}, must be 18 or older")]
    InvalidAge(String),

    #[error("invalid interval: {0}")]
    InvalidInterval(String),

    #[error("invalid vote weight: {0}, must be positive")]
    InvalidWeight(u32),

    #[error("invalid {0} proof")]
    MalformedProof(ProofKind),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::VoterNotFound(_) | Error::CandidateNotFound(_) => ErrorKind::NotFound,
            Error::AlreadyVoted(_) | Error::VoterExists(_) | Error::CandidateExists(_) => {
                ErrorKind::Conflict
            }
            Error::InvalidAge(_)
            | Error::InvalidInterval(_)
            | Error::InvalidWeight(_)
            | Error::MalformedProof(_) => ErrorKind::InvalidArgument,
        }
    }
}

/// Which admission check rejected a proof-carrying request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofKind {
    ZeroKnowledge,
    Homomorphic,
}

impl std::fmt::Display for ProofKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ProofKind::ZeroKnowledge => write!(f, "zk"),
            ProofKind::Homomorphic => write!(f, "homomorphic"),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_wire_format() {
        assert_eq!(
            Error::VoterNotFound(7).to_string(),
            "voter with id: 7 was not found"
        );
        assert_eq!(
            Error::AlreadyVoted(1).to_string(),
            "voter with id: 1 has already voted"
        );
        assert_eq!(
            Error::MalformedProof(ProofKind::ZeroKnowledge).to_string(),
            "invalid zk proof"
        );
        assert_eq!(
            Error::InvalidInterval("from > to".into()).to_string(),
            "invalid interval: from > to"
        );
    }

    #[test]
    fn kinds() {
        assert_eq!(Error::CandidateNotFound(5).kind(), ErrorKind::NotFound);
        assert_eq!(Error::AlreadyVoted(5).kind(), ErrorKind::Conflict);
        assert_eq!(Error::VoterExists(5).kind(), ErrorKind::Conflict);
        assert_eq!(
            Error::InvalidAge("17".into()).kind(),
            ErrorKind::InvalidArgument
        );
    }
}
