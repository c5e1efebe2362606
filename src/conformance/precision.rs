use std::collections::{HashMap, HashSet};

use crate::event_log::event_log_struct::Activity;
use crate::petri_net::petri_net_struct::PetriNet;

///
/// Precision of a model against a set of traces
///
/// For every label appearing as a source in the flow relation, the observed
/// direct successors in the traces are compared against the successors the
/// model allows; the per-label contribution is `|observed| / |allowed|` and the
/// result is the mean over all flow-relation sources (`0.0` if there are none).
///
/// The ratio is taken at face value: when the traces contain successions the
/// model does not allow, a per-label contribution can exceed `1.0`, and the
/// result is deliberately not clamped.
///
pub fn precision<S: AsRef<[Activity]>>(net: &PetriNet, traces: &[S]) -> f64 {
    let mut observed: HashMap<&str, HashSet<&str>> = HashMap::new();
    for trace in traces {
        for pair in trace.as_ref().windows(2) {
            observed
                .entry(pair[0].as_str())
                .or_default()
                .insert(pair[1].as_str());
        }
    }

    let mut allowed: HashMap<&str, HashSet<&str>> = HashMap::new();
    for (source, target) in &net.flow_relation {
        allowed
            .entry(source.as_str())
            .or_default()
            .insert(target.as_str());
    }
    if allowed.is_empty() {
        return 0.0;
    }

    let contribution_sum: f64 = allowed
        .iter()
        .filter(|(_, targets)| !targets.is_empty())
        .map(|(source, targets)| match observed.get(source) {
            Some(successors) => successors.len() as f64 / targets.len() as f64,
            None => 0.0,
        })
        .sum();
    contribution_sum / allowed.len() as f64
}
