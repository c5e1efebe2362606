use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde_json::Value;

use super::event_log_struct::{Activity, EventLog, InvalidLogError, Trace};

///
/// Import an [`EventLog`] from a JSON byte slice
///
/// Two document shapes are accepted:
/// - legacy: an array of traces, each trace an array of activity label strings
/// - rich: an array of traces, each trace an array of event objects carrying a
///   `task` (or `activity`) string field; all other fields (timestamps,
///   resources, costs, ...) are ignored
///
/// Both shapes may be mixed within one trace. An empty document (`[]`) is
/// rejected with [`InvalidLogError::EmptyLog`].
///
pub fn import_log_json_slice(slice: &[u8]) -> Result<EventLog, InvalidLogError> {
    let value: Value = serde_json::from_slice(slice)?;
    log_from_value(&value)
}

///
/// Import an [`EventLog`] from a JSON file given by a filepath
///
/// See [`import_log_json_slice`] for the accepted document shapes.
///
pub fn import_log_json_path<P: AsRef<Path>>(path: P) -> Result<EventLog, InvalidLogError> {
    let reader = BufReader::new(File::open(path)?);
    let value: Value = serde_json::from_reader(reader)?;
    log_from_value(&value)
}

///
/// Export an [`EventLog`] to a JSON file in the legacy shape (array of arrays of labels)
///
pub fn export_log_json_path<P: AsRef<Path>>(
    log: &EventLog,
    path: P,
) -> Result<(), std::io::Error> {
    let sequences: Vec<&[Activity]> = log.traces.iter().map(|t| t.events.as_slice()).collect();
    let writer = BufWriter::new(File::create(path)?);
    Ok(serde_json::to_writer(writer, &sequences)?)
}

fn log_from_value(value: &Value) -> Result<EventLog, InvalidLogError> {
    let traces_json = value.as_array().ok_or(InvalidLogError::NotAnArray)?;
    if traces_json.is_empty() {
        return Err(InvalidLogError::EmptyLog);
    }
    let mut traces = Vec::with_capacity(traces_json.len());
    for (trace_idx, trace_json) in traces_json.iter().enumerate() {
        let events_json = trace_json
            .as_array()
            .ok_or(InvalidLogError::MalformedTrace(trace_idx))?;
        let mut events = Vec::with_capacity(events_json.len());
        for (event_idx, event_json) in events_json.iter().enumerate() {
            let activity = project_event(event_json)
                .ok_or(InvalidLogError::MissingActivityField(trace_idx, event_idx))?;
            events.push(activity);
        }
        traces.push(Trace { events });
    }
    Ok(EventLog { traces })
}

/// Project one event entry to its activity label
fn project_event(event: &Value) -> Option<Activity> {
    match event {
        Value::String(label) => Some(label.clone()),
        Value::Object(fields) => fields
            .get("task")
            .or_else(|| fields.get("activity"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::get_test_data_path;

    #[test]
    fn import_legacy_log() {
        let json = br#"[["A","B","D"],["A","C","D"],[]]"#;
        let log = import_log_json_slice(json).unwrap();
        assert_eq!(log.traces.len(), 3);
        assert_eq!(log.traces[0].events, vec!["A", "B", "D"]);
        assert!(log.traces[2].is_empty());
    }

    #[test]
    fn import_rich_log() {
        let json = br#"[
            [{"task": "A", "timestamp": 1}, {"activity": "B"}, "D"],
            [{"task": "A"}, {"task": "C", "resource": "r1", "cost": 12.5}, {"task": "D"}]
        ]"#;
        let log = import_log_json_slice(json).unwrap();
        assert_eq!(log.traces[0].events, vec!["A", "B", "D"]);
        assert_eq!(log.traces[1].events, vec!["A", "C", "D"]);
    }

    #[test]
    fn import_rich_log_from_file() {
        let path = get_test_data_path().join("event_log.json");
        let log = import_log_json_path(path).unwrap();
        assert!(log.traces.len() >= 2);
        assert!(log.traces.iter().all(|t| !t.is_empty()));
        assert_eq!(log.traces[0].events.first().map(String::as_str), Some("A"));
    }

    #[test]
    fn empty_document_is_rejected() {
        assert!(matches!(
            import_log_json_slice(b"[]"),
            Err(InvalidLogError::EmptyLog)
        ));
    }

    #[test]
    fn non_array_document_is_rejected() {
        assert!(matches!(
            import_log_json_slice(br#"{"traces": []}"#),
            Err(InvalidLogError::NotAnArray)
        ));
    }

    #[test]
    fn event_without_activity_field_is_rejected() {
        let json = br#"[["A", {"resource": "r1"}]]"#;
        assert!(matches!(
            import_log_json_slice(json),
            Err(InvalidLogError::MissingActivityField(0, 1))
        ));
        let json = br#"[["A"], [42]]"#;
        assert!(matches!(
            import_log_json_slice(json),
            Err(InvalidLogError::MissingActivityField(1, 0))
        ));
    }

    #[test]
    fn export_then_import_round_trip() {
        let log = EventLog::from_label_sequences(vec![vec!["A", "B"], vec!["A", "C"]]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.json");
        export_log_json_path(&log, &path).unwrap();
        let imported = import_log_json_path(&path).unwrap();
        assert_eq!(imported, log);
    }
}
