use serde::{Deserialize, Serialize};

use super::precision::precision;
use super::simplicity::simplicity;
use super::token_replay::fitness;
use crate::event_log::event_log_struct::EventLog;
use crate::petri_net::petri_net_struct::{InvalidModelError, PetriNet};

/// Error for a conformance check that cannot be computed at all
///
/// Per-trace and per-label anomalies (a replay stopping early, a label with no
/// allowed successors) are absorbed inside the individual metrics and never
/// surface here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConformanceError {
    /// The model is structurally invalid
    InvalidModel(InvalidModelError),
    /// The log has no non-empty traces, so there is nothing to replay
    NoNonEmptyTraces,
}

impl std::fmt::Display for ConformanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConformanceError::InvalidModel(e) => write!(f, "{e}"),
            ConformanceError::NoNonEmptyTraces => {
                write!(f, "Event log contains no non-empty traces")
            }
        }
    }
}

impl std::error::Error for ConformanceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConformanceError::InvalidModel(e) => Some(e),
            ConformanceError::NoNonEmptyTraces => None,
        }
    }
}

impl From<InvalidModelError> for ConformanceError {
    fn from(e: InvalidModelError) -> Self {
        Self::InvalidModel(e)
    }
}

/// Fitness, precision and simplicity of one (model, log) pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConformanceReport {
    /// Token-replay fitness (see [`fitness`])
    pub fitness: f64,
    /// Observed-vs-allowed precision (see [`precision`])
    pub precision: f64,
    /// Inverse model size (see [`simplicity`])
    pub simplicity: f64,
}

impl ConformanceReport {
    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

///
/// Compute all three conformance scores of a model against a log
///
/// The model is validated first and the log must contain at least one non-empty
/// trace; either failure aborts before anything is computed. Fitness and
/// precision land in `[0, 1]` for a model discovered from the scored log
/// itself, but are not clamped for arbitrary external models.
///
pub fn check_conformance(
    net: &PetriNet,
    log: &EventLog,
) -> Result<ConformanceReport, ConformanceError> {
    net.validate()?;
    if log.traces.iter().all(|t| t.is_empty()) {
        return Err(ConformanceError::NoNonEmptyTraces);
    }
    Ok(ConformanceReport {
        fitness: fitness(net, &log.traces),
        precision: precision(net, &log.traces),
        simplicity: simplicity(net),
    })
}
