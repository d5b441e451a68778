use crate::*;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// An [`Election`] shared between request handlers.
///
/// Writers hold the write lock for the whole check-then-act sequence of an admission,
/// so two concurrent votes by the same voter cannot both pass the `has_voted` check.
/// Readers share the read lock and never see a half-applied vote.
#[derive(Debug, Clone)]
pub struct SharedElection {
    inner: Arc<RwLock<Election>>,
}

impl SharedElection {
    pub fn new(election: Election) -> Self {
        SharedElection {
            inner: Arc::new(RwLock::new(election)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Election> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Election> {
        self.inner.write()
    }
}

impl From<Election> for SharedElection {
    fn from(election: Election) -> Self {
        SharedElection::new(election)
    }
}
