//! Export phase state machine
//!
//! ```text
//! Idle -> Fetching -> Synthesizing -> Archiving -> Delivering -> Idle
//! ```
//!
//! Every active phase may also fall back to `Idle` on failure. A coordinator
//! runs at most one export at a time: starting a new one while a phase is
//! active fails with `ExportInProgress`.

use crate::domain::{MedirecordError, Result};
use serde::Serialize;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Phase of the export currently running on a coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportPhase {
    #[default]
    Idle,
    Fetching,
    Synthesizing,
    Archiving,
    Delivering,
}

impl ExportPhase {
    pub fn is_active(self) -> bool {
        self != ExportPhase::Idle
    }

    /// Whether moving from `self` to `next` is allowed
    pub fn can_transition_to(self, next: ExportPhase) -> bool {
        use ExportPhase::*;
        match (self, next) {
            (Idle, Fetching)
            | (Fetching, Synthesizing)
            | (Synthesizing, Archiving)
            | (Archiving, Delivering) => true,
            (from, Idle) => from.is_active(),
            _ => false,
        }
    }
}

impl fmt::Display for ExportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportPhase::Idle => "idle",
            ExportPhase::Fetching => "fetching",
            ExportPhase::Synthesizing => "synthesizing",
            ExportPhase::Archiving => "archiving",
            ExportPhase::Delivering => "delivering",
        };
        write!(f, "{name}")
    }
}

/// Shared holder of the current phase
#[derive(Debug, Default)]
pub struct PhaseTracker {
    phase: Mutex<ExportPhase>,
}

impl PhaseTracker {
    pub fn current(&self) -> ExportPhase {
        *self.lock()
    }

    /// Enter `Fetching`, claiming the tracker until the returned handle drops
    ///
    /// # Errors
    ///
    /// Returns [`MedirecordError::ExportInProgress`] if an export is active.
    pub fn begin(&self) -> Result<ActiveExport<'_>> {
        let mut phase = self.lock();
        if phase.is_active() {
            return Err(MedirecordError::ExportInProgress);
        }
        *phase = ExportPhase::Fetching;
        Ok(ActiveExport { tracker: self })
    }

    fn lock(&self) -> MutexGuard<'_, ExportPhase> {
        self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle of a running export; returns the tracker to `Idle` when dropped
#[derive(Debug)]
pub struct ActiveExport<'a> {
    tracker: &'a PhaseTracker,
}

impl ActiveExport<'_> {
    /// Move to the next phase
    ///
    /// # Errors
    ///
    /// Returns a validation error for a transition the state machine forbids.
    pub fn advance(&self, next: ExportPhase) -> Result<()> {
        let mut phase = self.tracker.lock();
        if !phase.can_transition_to(next) {
            return Err(MedirecordError::Validation(format!(
                "illegal export phase transition {} -> {next}",
                *phase
            )));
        }
        tracing::debug!(from = %*phase, to = %next, "Export phase changed");
        *phase = next;
        Ok(())
    }
}

impl Drop for ActiveExport<'_> {
    fn drop(&mut self) {
        *self.tracker.lock() = ExportPhase::Idle;
    }
}
