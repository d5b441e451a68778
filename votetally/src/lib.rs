#[macro_use]
extern crate serde;

mod admission;
mod audit;
mod ballot;
mod cipher;
mod clock;
mod error;
mod ledger;
mod registry;
mod report;
mod serde_instant;
mod shared;

pub use admission::*;
pub use audit::*;
pub use ballot::*;
pub use cipher::*;
pub use clock::*;
pub use error::*;
pub use ledger::*;
pub use registry::*;
pub use report::*;
pub use serde_instant::*;
pub use shared::*;

/// Voter identifier, as carried on the wire.
pub type VoterId = i64;

/// Candidate identifier, as carried on the wire.
pub type CandidateId = i64;

/// Ledger-assigned vote identifier.
pub type VoteId = u64;

/// A point in time, always UTC.
pub type Instant = chrono::DateTime<chrono::Utc>;
