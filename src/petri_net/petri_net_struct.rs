use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::event_log::event_log_struct::Activity;

/// Transient marking used during replay and trace synthesis: the set of
/// currently enabled transition labels
pub type Marking<'a> = HashSet<&'a str>;

/// A discovered (or externally supplied) Petri net over activity labels
///
/// Places are identified structurally by the causal pair that generated them:
/// one place per causal pair, never merged across pairs sharing input/output
/// transition sets (the known limiting simplification of the basic algorithm,
/// reproduced faithfully).
///
/// Each member `(a, b)` of `flow_relation` stands for the two arcs
/// `a -> place(a, b)` and `place(a, b) -> b`; every place thus has exactly one
/// incoming and one outgoing arc.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetriNet {
    /// Transition labels
    pub transitions: HashSet<Activity>,
    /// Places, keyed by their generating causal pair
    pub places: HashSet<(Activity, Activity)>,
    /// Labels enabled at the start of a replay
    pub initial_marking: HashSet<Activity>,
    /// Labels expected to be enabled at the end of a complete replay
    pub final_marking: HashSet<Activity>,
    /// Causal flow between transitions (through the place keyed by the pair)
    pub flow_relation: HashSet<(Activity, Activity)>,
}

/// Error for a structurally invalid Petri net model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidModelError {
    /// The model document is not a JSON object
    NotAnObject,
    /// A required field is missing (field name included)
    MissingField(&'static str),
    /// A field has the wrong shape, e.g. not an array of strings (field name included)
    MalformedField(&'static str),
    /// A places/flow entry is not a 2-element array of strings (field name included)
    MalformedPair(&'static str),
    /// The transition set is empty
    EmptyTransitions,
}

impl std::fmt::Display for InvalidModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidModelError::NotAnObject => write!(f, "Petri net model is not a JSON object"),
            InvalidModelError::MissingField(field) => {
                write!(f, "Petri net model is missing required field '{field}'")
            }
            InvalidModelError::MalformedField(field) => {
                write!(f, "Petri net model field '{field}' is not an array of labels")
            }
            InvalidModelError::MalformedPair(field) => {
                write!(
                    f,
                    "Petri net model field '{field}' contains an entry that is not a 2-element array of labels"
                )
            }
            InvalidModelError::EmptyTransitions => {
                write!(f, "Petri net model has an empty transition set")
            }
        }
    }
}

impl std::error::Error for InvalidModelError {}

impl PetriNet {
    /// Create a new [`PetriNet`] with no places or transitions
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }

    /// Check structural validity: a usable model has at least one transition
    pub fn validate(&self) -> Result<(), InvalidModelError> {
        if self.transitions.is_empty() {
            return Err(InvalidModelError::EmptyTransitions);
        }
        Ok(())
    }

    /// The initial marking as a transient [`Marking`]
    pub fn start_marking(&self) -> Marking<'_> {
        self.initial_marking.iter().map(String::as_str).collect()
    }

    /// Labels reachable from `activity` two hops forward through the flow
    /// relation (the targets of the places fed by `activity`)
    ///
    /// This is the marking a replay or synthesis walk advances to after firing
    /// `activity`.
    pub fn successors(&self, activity: &str) -> Marking<'_> {
        self.flow_relation
            .iter()
            .filter(|(source, _)| source == activity)
            .map(|(_, target)| target.as_str())
            .collect()
    }

    /// The single source transition of a place, if the place exists
    pub fn place_preset(&self, place: &(Activity, Activity)) -> Option<&str> {
        self.places.get(place).map(|(source, _)| source.as_str())
    }

    /// The single target transition of a place, if the place exists
    pub fn place_postset(&self, place: &(Activity, Activity)) -> Option<&str> {
        self.places.get(place).map(|(_, target)| target.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair_set(pairs: &[(&str, &str)]) -> HashSet<(Activity, Activity)> {
        pairs
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    fn label_set(labels: &[&str]) -> HashSet<Activity> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    fn sample_net() -> PetriNet {
        PetriNet {
            transitions: label_set(&["A", "B", "C", "D"]),
            places: pair_set(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]),
            initial_marking: label_set(&["A"]),
            final_marking: label_set(&["D"]),
            flow_relation: pair_set(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]),
        }
    }

    #[test]
    fn successors_follow_the_flow_relation() {
        let net = sample_net();
        assert_eq!(net.successors("A"), HashSet::from(["B", "C"]));
        assert_eq!(net.successors("B"), HashSet::from(["D"]));
        assert!(net.successors("D").is_empty());
        assert!(net.successors("unknown").is_empty());
    }

    #[test]
    fn places_have_one_source_and_one_target() {
        let net = sample_net();
        for place in &net.places {
            assert_eq!(net.place_preset(place), Some(place.0.as_str()));
            assert_eq!(net.place_postset(place), Some(place.1.as_str()));
            assert!(net.flow_relation.contains(place));
        }
        assert_eq!(net.place_preset(&("X".to_string(), "Y".to_string())), None);
    }

    #[test]
    fn empty_transition_set_is_invalid() {
        let net = PetriNet::new();
        assert_eq!(net.validate(), Err(InvalidModelError::EmptyTransitions));
        assert!(sample_net().validate().is_ok());
    }

    #[test]
    fn json_round_trip() {
        let net = sample_net();
        let parsed: PetriNet = serde_json::from_str(&net.to_json()).unwrap();
        assert_eq!(parsed, net);
    }
}
