#![warn(
    clippy::doc_markdown,
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs
)]
#![doc = include_str!("../README.md")]

///
/// Event logs, their activity projection, and JSON import/export
///
pub mod event_log {
    /// [`EventLog`] struct, the derived [`ActivityProjection`], and log validation
    pub mod event_log_struct;
    /// JSON import/export of event logs (legacy label arrays and rich event objects)
    pub mod import_json;

    #[doc(inline)]
    pub use event_log_struct::{
        Activity, ActivityProjection, EventLog, InvalidLogError, Trace,
    };
}

///
/// Footprint relation extraction
///
pub mod footprint {
    /// [`FootprintMatrix`] struct and pairwise relation classification
    pub mod footprint_struct;

    #[doc(inline)]
    pub use footprint_struct::{FootprintMatrix, FootprintRelation};
}

///
/// Petri nets
///
pub mod petri_net {
    /// JSON import/export of [`PetriNet`] (case-insensitive field names on load)
    pub mod io;
    /// [`PetriNet`] struct
    pub mod petri_net_struct;

    #[doc(inline)]
    pub use petri_net_struct::PetriNet;
}

///
/// Process discovery
///
pub mod discovery {
    /// Basic alpha discovery: one place per causal pair
    pub mod alpha;
}

///
/// Conformance checking
///
pub mod conformance {
    /// Precision: observed vs. allowed direct successors
    pub mod precision;
    /// Combined conformance report over one (model, log) pair
    pub mod report;
    /// Simplicity: inverse model size
    pub mod simplicity;
    /// Token-replay fitness
    pub mod token_replay;
}

///
/// Synthetic trace generation from a model
///
pub mod synthesis {
    /// Random walks through the marking graph (seedable)
    pub mod trace_synthesis;
}


#[doc(inline)]
pub use event_log::event_log_struct::ActivityProjection;

#[doc(inline)]
pub use event_log::event_log_struct::EventLog;

#[doc(inline)]
pub use event_log::event_log_struct::Trace;

#[doc(inline)]
pub use event_log::import_json::import_log_json_path;

#[doc(inline)]
pub use event_log::import_json::import_log_json_slice;

#[doc(inline)]
pub use event_log::import_json::export_log_json_path;

#[doc(inline)]
pub use footprint::footprint_struct::FootprintMatrix;

#[doc(inline)]
pub use petri_net::petri_net_struct::PetriNet;

#[doc(inline)]
pub use petri_net::io::import_petri_net_json_path;

#[doc(inline)]
pub use petri_net::io::import_petri_net_json_slice;

#[doc(inline)]
pub use petri_net::io::export_petri_net_json_path;

#[doc(inline)]
pub use discovery::alpha::alpha_discover_from_log;

#[doc(inline)]
pub use discovery::alpha::alpha_discover_petri_net;

#[doc(inline)]
pub use conformance::report::check_conformance;

#[doc(inline)]
pub use conformance::report::ConformanceReport;

#[doc(inline)]
pub use conformance::token_replay::fitness;

#[doc(inline)]
pub use conformance::precision::precision;

#[doc(inline)]
pub use conformance::simplicity::simplicity;

#[doc(inline)]
pub use synthesis::trace_synthesis::synthesize_traces;

#[doc(inline)]
pub use synthesis::trace_synthesis::synthesize_traces_seeded;

#[doc(inline)]
pub use synthesis::trace_synthesis::TraceSynthesisConfig;

///
/// Serialize a [`PetriNet`] as a JSON [`String`]
///
pub fn petrinet_to_json(net: &PetriNet) -> String {
    net.to_json()
}

///
/// Deserialize a [`PetriNet`] from a JSON [`String`]
///
/// Field names are matched case-insensitively (see
/// [`import_petri_net_json_slice`]).
///
pub fn json_to_petrinet(net_json: &str) -> Result<PetriNet, petri_net::io::ModelImportError> {
    import_petri_net_json_slice(net_json.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_and_conformance_end_to_end() {
        let log = EventLog::from_label_sequences(vec![
            vec!["A", "B", "D"],
            vec!["A", "C", "D"],
            vec!["A", "B", "D"],
        ]);
        let net = alpha_discover_from_log(&log).unwrap();
        let report = check_conformance(&net, &log).unwrap();
        assert_eq!(report.fitness, 1.0);
        assert_eq!(report.precision, 1.0);

        // the model is its own oracle through synthetic traces
        let synthetic = synthesize_traces_seeded(&net, &TraceSynthesisConfig::default(), 11);
        assert_eq!(fitness(&net, &synthetic), 1.0);

        // and survives a JSON round trip
        let reloaded = json_to_petrinet(&petrinet_to_json(&net)).unwrap();
        assert_eq!(reloaded, net);
    }
}
