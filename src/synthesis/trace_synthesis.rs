use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::event_log::event_log_struct::Activity;
use crate::petri_net::petri_net_struct::{Marking, PetriNet};

/// Parameters for synthetic trace generation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TraceSynthesisConfig {
    /// Number of random walks to attempt (empty walks are discarded, so fewer
    /// traces may be returned)
    pub num_traces: usize,
    /// Minimum length before early termination may trigger
    pub min_length: usize,
    /// Hard maximum walk length
    pub max_length: usize,
    /// Probability of ending a walk early once `min_length` is reached
    /// (must be in `[0, 1]`)
    pub early_stop_probability: f64,
}

impl Default for TraceSynthesisConfig {
    fn default() -> Self {
        Self {
            num_traces: 20,
            min_length: 1,
            max_length: 10,
            early_stop_probability: 0.1,
        }
    }
}

///
/// Generate synthetic traces as random walks through the model's marking graph
///
/// Each walk starts at the initial marking; the candidates at every step are
/// the transitions currently enabled, one of which is chosen uniformly at
/// random. The marking then advances via [`PetriNet::successors`], exactly as
/// token replay does, so every returned trace replays against the generating
/// model with fitness `1.0` (which is what makes this useful as an independent
/// oracle for the conformance metrics). A walk ends when no candidate is
/// enabled, when `max_length` is reached, or early by chance once `min_length`
/// is reached. Walks that end up empty are discarded.
///
/// Candidates are sorted before the uniform choice, so results depend only on
/// the RNG: the same seed reproduces the same traces.
///
pub fn synthesize_traces<R: Rng>(
    net: &PetriNet,
    config: &TraceSynthesisConfig,
    rng: &mut R,
) -> Vec<Vec<Activity>> {
    let mut synthetic_traces = Vec::with_capacity(config.num_traces);
    for _ in 0..config.num_traces {
        let mut trace: Vec<Activity> = Vec::new();
        let mut marking: Marking<'_> = net.start_marking();
        while trace.len() < config.max_length {
            let mut candidates: Vec<&str> = net
                .transitions
                .iter()
                .map(String::as_str)
                .filter(|t| marking.contains(t))
                .collect();
            if candidates.is_empty() {
                break;
            }
            if trace.len() >= config.min_length && rng.random_bool(config.early_stop_probability) {
                break;
            }
            candidates.sort_unstable();
            if let Some(event) = candidates.choose(rng).copied() {
                trace.push(event.to_string());
                marking = net.successors(event);
            }
        }
        if !trace.is_empty() {
            synthetic_traces.push(trace);
        }
    }
    synthetic_traces
}

///
/// Generate synthetic traces with a fixed seed (see [`synthesize_traces`])
///
pub fn synthesize_traces_seeded(
    net: &PetriNet,
    config: &TraceSynthesisConfig,
    seed: u64,
) -> Vec<Vec<Activity>> {
    let mut rng = StdRng::seed_from_u64(seed);
    synthesize_traces(net, config, &mut rng)
}
