use crate::event_log::event_log_struct::{ActivityProjection, EventLog, InvalidLogError};
use crate::footprint::footprint_struct::FootprintMatrix;
use crate::petri_net::petri_net_struct::PetriNet;

///
/// Discover a [`PetriNet`] from a projected log and its footprint matrix
///
/// The basic alpha construction: every label becomes a transition, every causal
/// pair becomes one place (keyed by the pair) with its two arcs, and the
/// initial/final markings are the log's start/end activity sets, copied
/// verbatim. No pruning and no merging of places with identical input/output
/// sets is performed; on logs with loops or duplicate labels the result may
/// deadlock or be disconnected, which is inherent to this algorithm class.
///
/// Pure function of its inputs: discovering twice from the same log yields an
/// equal net.
///
pub fn alpha_discover_petri_net(
    log_proj: &ActivityProjection,
    footprint: &FootprintMatrix,
) -> PetriNet {
    let causal_pairs = footprint.causal_pairs();
    PetriNet {
        transitions: log_proj.activities.clone(),
        places: causal_pairs.clone(),
        initial_marking: log_proj.start_activities.clone(),
        final_marking: log_proj.end_activities.clone(),
        flow_relation: causal_pairs,
    }
}

///
/// Discover a [`PetriNet`] directly from an [`EventLog`]
///
/// Convenience wrapper building the [`ActivityProjection`] and
/// [`FootprintMatrix`] in one go. Fails with [`InvalidLogError`] if the log is
/// empty.
///
pub fn alpha_discover_from_log(log: &EventLog) -> Result<PetriNet, InvalidLogError> {
    let log_proj = ActivityProjection::from_log(log)?;
    let footprint = FootprintMatrix::from_projection(&log_proj);
    Ok(alpha_discover_petri_net(&log_proj, &footprint))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_log::event_log_struct::Activity;
    use std::collections::HashSet;

    #[test]
    fn discovers_choice_model() {
        let log = EventLog::from_label_sequences(vec![vec!["A", "B", "D"], vec!["A", "C", "D"]]);
        let net = alpha_discover_from_log(&log).unwrap();

        assert_eq!(net.transitions.len(), 4);
        assert_eq!(net.places.len(), 4);
        assert_eq!(net.initial_marking, HashSet::from(["A".to_string()]));
        assert_eq!(net.final_marking, HashSet::from(["D".to_string()]));

        let expected_places: HashSet<(Activity, Activity)> =
            [("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect();
        assert_eq!(net.places, expected_places);
        assert_eq!(net.flow_relation, expected_places);
        assert!(net.validate().is_ok());
    }

    #[test]
    fn discovery_is_idempotent() {
        let log = EventLog::from_label_sequences(vec![
            vec!["A", "B", "C", "E"],
            vec!["A", "C", "B", "E"],
            vec!["A", "D", "E"],
        ]);
        let first = alpha_discover_from_log(&log).unwrap();
        let second = alpha_discover_from_log(&log).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn single_activity_log_yields_placeless_net() {
        let log = EventLog::from_label_sequences(vec![vec!["A"]]);
        let net = alpha_discover_from_log(&log).unwrap();
        assert_eq!(net.transitions, HashSet::from(["A".to_string()]));
        assert!(net.places.is_empty());
        assert!(net.flow_relation.is_empty());
        assert_eq!(net.initial_marking, net.final_marking);
        assert!(net.validate().is_ok());
    }

    #[test]
    fn empty_log_is_rejected() {
        assert!(matches!(
            alpha_discover_from_log(&EventLog::new()),
            Err(InvalidLogError::EmptyLog)
        ));
    }
}
