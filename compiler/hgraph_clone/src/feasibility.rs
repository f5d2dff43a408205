//! Feasibility tracking for one cloning walk.

use hgraph::{NodeId, NodeKind};

use crate::classify::UnsupportedReason;

/// The first node a walk could not clone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("cannot clone {node} ({kind}): {reason}")]
pub struct CloneFailure {
    pub node: NodeId,
    pub kind: NodeKind,
    pub reason: UnsupportedReason,
}

/// Accumulated "everything so far was clonable" verdict.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Feasibility {
    first_failure: Option<CloneFailure>,
    failures: usize,
}

impl Feasibility {
    /// Record a node that cannot be cloned. Only the first one is kept.
    pub(crate) fn record(&mut self, failure: CloneFailure) {
        self.failures += 1;
        self.first_failure.get_or_insert(failure);
    }

    pub(crate) fn all_okay(&self) -> bool {
        self.first_failure.is_none()
    }

    pub(crate) fn first_failure(&self) -> Option<CloneFailure> {
        self.first_failure
    }

    pub(crate) fn failure_count(&self) -> usize {
        self.failures
    }
}
