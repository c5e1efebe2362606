use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use super::petri_net_struct::{InvalidModelError, PetriNet};
use crate::event_log::event_log_struct::Activity;

/// Error encountered while importing a Petri net model from JSON
#[derive(Debug, Clone)]
pub enum ModelImportError {
    /// IO error
    IOError(std::rc::Rc<std::io::Error>),
    /// JSON parsing error
    JsonError(std::rc::Rc<serde_json::Error>),
    /// The document parsed but does not describe a valid model
    Invalid(InvalidModelError),
}

impl std::fmt::Display for ModelImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelImportError::IOError(e) => write!(f, "Failed to read Petri net model: {e}"),
            ModelImportError::JsonError(e) => {
                write!(f, "Failed to parse Petri net model JSON: {e}")
            }
            ModelImportError::Invalid(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ModelImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelImportError::IOError(e) => Some(e.as_ref()),
            ModelImportError::JsonError(e) => Some(e.as_ref()),
            ModelImportError::Invalid(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ModelImportError {
    fn from(e: std::io::Error) -> Self {
        Self::IOError(std::rc::Rc::new(e))
    }
}

impl From<serde_json::Error> for ModelImportError {
    fn from(e: serde_json::Error) -> Self {
        Self::JsonError(std::rc::Rc::new(e))
    }
}

impl From<InvalidModelError> for ModelImportError {
    fn from(e: InvalidModelError) -> Self {
        Self::Invalid(e)
    }
}

///
/// Import a [`PetriNet`] from a JSON byte slice
///
/// Field names are matched case-insensitively and embedded spaces are treated
/// as underscores, so historical spellings such as `"Places"` or
/// `"Initial Marking"` load alongside the canonical lower-case names. The
/// imported net is validated; a model without transitions is rejected.
///
pub fn import_petri_net_json_slice(slice: &[u8]) -> Result<PetriNet, ModelImportError> {
    let value: Value = serde_json::from_slice(slice)?;
    Ok(petri_net_from_value(value)?)
}

///
/// Import a [`PetriNet`] from a JSON file given by a filepath
///
/// See [`import_petri_net_json_slice`] for the accepted field spellings.
///
pub fn import_petri_net_json_path<P: AsRef<Path>>(path: P) -> Result<PetriNet, ModelImportError> {
    let reader = BufReader::new(File::open(path)?);
    let value: Value = serde_json::from_reader(reader)?;
    Ok(petri_net_from_value(value)?)
}

///
/// Export a [`PetriNet`] to a JSON file with canonical lower-case field names
///
/// Label and pair arrays are sorted so the output is stable across runs.
///
pub fn export_petri_net_json_path<P: AsRef<Path>>(
    net: &PetriNet,
    path: P,
) -> Result<(), std::io::Error> {
    #[derive(Serialize)]
    struct CanonicalNet<'a> {
        transitions: Vec<&'a Activity>,
        places: Vec<&'a (Activity, Activity)>,
        initial_marking: Vec<&'a Activity>,
        final_marking: Vec<&'a Activity>,
        flow_relation: Vec<&'a (Activity, Activity)>,
    }
    let canonical = CanonicalNet {
        transitions: sorted(&net.transitions),
        places: sorted(&net.places),
        initial_marking: sorted(&net.initial_marking),
        final_marking: sorted(&net.final_marking),
        flow_relation: sorted(&net.flow_relation),
    };
    let writer = BufWriter::new(File::create(path)?);
    Ok(serde_json::to_writer_pretty(writer, &canonical)?)
}

fn sorted<T: Ord>(set: &HashSet<T>) -> Vec<&T> {
    let mut items: Vec<&T> = set.iter().collect();
    items.sort();
    items
}

fn petri_net_from_value(value: Value) -> Result<PetriNet, InvalidModelError> {
    let Value::Object(map) = value else {
        return Err(InvalidModelError::NotAnObject);
    };
    let mut fields: HashMap<String, Value> = map
        .into_iter()
        .map(|(key, value)| (normalize_key(&key), value))
        .collect();
    let net = PetriNet {
        transitions: take_label_set(&mut fields, "transitions")?,
        places: take_pair_set(&mut fields, "places")?,
        initial_marking: take_label_set(&mut fields, "initial_marking")?,
        final_marking: take_label_set(&mut fields, "final_marking")?,
        flow_relation: take_pair_set(&mut fields, "flow_relation")?,
    };
    net.validate()?;
    Ok(net)
}

/// Lower-case a field key and map embedded spaces to underscores
fn normalize_key(key: &str) -> String {
    key.chars()
        .map(|c| if c == ' ' { '_' } else { c.to_ascii_lowercase() })
        .collect()
}

fn take_label_set(
    fields: &mut HashMap<String, Value>,
    key: &'static str,
) -> Result<HashSet<Activity>, InvalidModelError> {
    let value = fields
        .remove(key)
        .ok_or(InvalidModelError::MissingField(key))?;
    let entries = value
        .as_array()
        .ok_or(InvalidModelError::MalformedField(key))?;
    entries
        .iter()
        .map(|entry| {
            entry
                .as_str()
                .map(str::to_string)
                .ok_or(InvalidModelError::MalformedField(key))
        })
        .collect()
}

fn take_pair_set(
    fields: &mut HashMap<String, Value>,
    key: &'static str,
) -> Result<HashSet<(Activity, Activity)>, InvalidModelError> {
    let value = fields
        .remove(key)
        .ok_or(InvalidModelError::MissingField(key))?;
    let entries = value
        .as_array()
        .ok_or(InvalidModelError::MalformedField(key))?;
    entries
        .iter()
        .map(|entry| match entry.as_array().map(Vec::as_slice) {
            Some([Value::String(source), Value::String(target)]) => {
                Ok((source.clone(), target.clone()))
            }
            _ => Err(InvalidModelError::MalformedPair(key)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::get_test_data_path;

    #[test]
    fn import_with_mixed_case_keys() {
        let json = br#"{
            "Transitions": ["A", "B"],
            "Places": [["A", "B"]],
            "Initial Marking": ["A"],
            "Final Marking": ["B"],
            "Flow Relation": [["A", "B"]]
        }"#;
        let net = import_petri_net_json_slice(json).unwrap();
        assert_eq!(net.transitions.len(), 2);
        assert!(net.places.contains(&("A".to_string(), "B".to_string())));
        assert!(net.initial_marking.contains("A"));
        assert!(net.final_marking.contains("B"));
    }

    #[test]
    fn import_saved_model_file() {
        let path = get_test_data_path().join("petri_net.json");
        let net = import_petri_net_json_path(path).unwrap();
        assert_eq!(net.transitions.len(), 4);
        assert_eq!(net.places.len(), 4);
        assert!(net.initial_marking.contains("A"));
        assert!(net.final_marking.contains("D"));
    }

    #[test]
    fn missing_field_is_rejected() {
        let json = br#"{
            "transitions": ["A"],
            "places": [],
            "initial_marking": ["A"],
            "final_marking": ["A"]
        }"#;
        assert!(matches!(
            import_petri_net_json_slice(json),
            Err(ModelImportError::Invalid(InvalidModelError::MissingField(
                "flow_relation"
            )))
        ));
    }

    #[test]
    fn malformed_pair_is_rejected() {
        let json = br#"{
            "transitions": ["A", "B"],
            "places": [["A", "B", "C"]],
            "initial_marking": ["A"],
            "final_marking": ["B"],
            "flow_relation": []
        }"#;
        assert!(matches!(
            import_petri_net_json_slice(json),
            Err(ModelImportError::Invalid(InvalidModelError::MalformedPair(
                "places"
            )))
        ));
    }

    #[test]
    fn empty_transition_set_is_rejected() {
        let json = br#"{
            "transitions": [],
            "places": [],
            "initial_marking": [],
            "final_marking": [],
            "flow_relation": []
        }"#;
        assert!(matches!(
            import_petri_net_json_slice(json),
            Err(ModelImportError::Invalid(
                InvalidModelError::EmptyTransitions
            ))
        ));
    }

    #[test]
    fn export_then_import_round_trip() {
        let json = br#"{
            "transitions": ["A", "B", "C"],
            "places": [["A", "B"], ["B", "C"]],
            "initial_marking": ["A"],
            "final_marking": ["C"],
            "flow_relation": [["A", "B"], ["B", "C"]]
        }"#;
        let net = import_petri_net_json_slice(json).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.json");
        export_petri_net_json_path(&net, &path).unwrap();
        let reimported = import_petri_net_json_path(&path).unwrap();
        assert_eq!(reimported, net);
    }
}
