use crate::event_log::event_log_struct::Activity;
use crate::petri_net::petri_net_struct::{Marking, PetriNet};

/// Result of replaying a single trace against a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayResult {
    /// Events matched before the first mismatch
    pub matched: usize,
    /// Total length of the replayed trace
    pub length: usize,
}

impl ReplayResult {
    /// Matched fraction of the trace; `0.0` for an empty trace
    pub fn trace_fitness(&self) -> f64 {
        if self.length == 0 {
            0.0
        } else {
            self.matched as f64 / self.length as f64
        }
    }
}

///
/// Replay one trace against a model, stopping at the first mismatch
///
/// The marking starts as the model's initial marking. Each event that is
/// currently enabled is counted and the marking is replaced by the labels two
/// hops forward through the flow relation ([`PetriNet::successors`]). On the
/// first event that is not enabled the replay stops; the remaining events are
/// simply not counted, they are not separate failures.
///
pub fn replay_trace(net: &PetriNet, trace: &[Activity]) -> ReplayResult {
    let mut marking: Marking<'_> = net.start_marking();
    let mut matched = 0;
    for event in trace {
        if !marking.contains(event.as_str()) {
            break;
        }
        matched += 1;
        marking = net.successors(event);
    }
    ReplayResult {
        matched,
        length: trace.len(),
    }
}

///
/// Token-replay fitness of a model against a set of traces
///
/// Mean of the per-trace matched fractions over all non-empty traces; `0.0` if
/// there are none. Trace frequency is deliberately not weighted in, and replay
/// truncates at the first mismatch: both are the defined coarseness of this
/// token-replay approximation, not accidents (a full alignment-based measure
/// would be a different metric).
///
pub fn fitness<S: AsRef<[Activity]>>(net: &PetriNet, traces: &[S]) -> f64 {
    let mut total_fitness = 0.0;
    let mut non_empty_traces = 0u64;
    for trace in traces {
        let trace = trace.as_ref();
        if trace.is_empty() {
            continue;
        }
        total_fitness += replay_trace(net, trace).trace_fitness();
        non_empty_traces += 1;
    }
    if non_empty_traces == 0 {
        0.0
    } else {
        total_fitness / non_empty_traces as f64
    }
}
