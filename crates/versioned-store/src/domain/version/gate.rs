use super::marker::UNINITIALIZED;
use crate::domain::config::SchemaVersion;
use crate::domain::errors::PersistenceError;

/// Outcome of comparing the stored marker to the configured version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// No marker yet: stamp the target, keep everything.
    FirstRun { target: SchemaVersion },
    /// Marker equals the target: nothing to do.
    Unchanged { version: SchemaVersion },
    /// Target is newer: wipe every registered key, then stamp (INVARIANT-3).
    Upgrade { from: u32, to: SchemaVersion },
}

impl GateDecision {
    /// The version the store runs at once the gate has been applied.
    pub fn accepted_version(&self) -> SchemaVersion {
        match *self {
            GateDecision::FirstRun { target } => target,
            GateDecision::Unchanged { version } => version,
            GateDecision::Upgrade { to, .. } => to,
        }
    }

    pub fn requires_wipe(&self) -> bool {
        matches!(self, GateDecision::Upgrade { .. })
    }

    /// Whether the marker has to be rewritten.
    pub fn stamps_marker(&self) -> bool {
        !matches!(self, GateDecision::Unchanged { .. })
    }
}

/// Evaluate the gate.
///
/// Order matters: the uninitialized check runs before the downgrade check,
/// and a downgrade is rejected without any mutation (INVARIANT-2).
pub fn evaluate(stored: u32, target: SchemaVersion) -> Result<GateDecision, PersistenceError> {
    if stored == UNINITIALIZED {
        return Ok(GateDecision::FirstRun { target });
    }

    if stored > target.get() {
        return Err(PersistenceError::VersionTooLow {
            stored,
            requested: target.get(),
        });
    }

    if stored == target.get() {
        return Ok(GateDecision::Unchanged { version: target });
    }

    Ok(GateDecision::Upgrade {
        from: stored,
        to: target,
    })
}
