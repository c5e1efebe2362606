use std::collections::{HashMap, HashSet};

/// Activity label naming one step of a process.
///
/// Labels are opaque and case-sensitive; no normalization is ever applied.
pub type Activity = String;

/// A single observed execution of a process, as an ordered sequence of activity labels.
///
/// Traces may be empty. Empty traces are excluded from all frequency and relation
/// computations but still count toward the total number of traces in a log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Trace {
    /// The activity labels, in observed order
    pub events: Vec<Activity>,
}

impl Trace {
    /// Create a new empty [`Trace`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [`Trace`] from anything yielding activity labels
    pub fn from_activities<I, S>(activities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Activity>,
    {
        Self {
            events: activities.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of events in this trace
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether this trace contains no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl AsRef<[Activity]> for Trace {
    fn as_ref(&self) -> &[Activity] {
        &self.events
    }
}

/// An ordered collection of [`Trace`]s
///
/// Duplicate traces are allowed and meaningful: their frequency is reported by
/// [`ActivityProjection::trace_frequencies`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    /// Traces of the event log
    pub traces: Vec<Trace>,
}

impl EventLog {
    /// Create a new [`EventLog`] with no traces
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an [`EventLog`] from plain label sequences
    pub fn from_label_sequences<I, T, S>(sequences: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: IntoIterator<Item = S>,
        S: Into<Activity>,
    {
        Self {
            traces: sequences.into_iter().map(Trace::from_activities).collect(),
        }
    }
}

/// Error encountered while loading or validating an event log
#[derive(Debug, Clone)]
pub enum InvalidLogError {
    /// The log contains no traces at all
    EmptyLog,
    /// The log document is not an array of traces
    NotAnArray,
    /// A trace entry (at the given index) is not a sequence
    MalformedTrace(usize),
    /// An event (trace index, event index) is neither a label string nor an
    /// object with a `task`/`activity` string field
    MissingActivityField(usize, usize),
    /// IO error
    IOError(std::rc::Rc<std::io::Error>),
    /// JSON parsing error
    JsonError(std::rc::Rc<serde_json::Error>),
}

impl std::fmt::Display for InvalidLogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidLogError::EmptyLog => write!(f, "Event log contains no traces"),
            InvalidLogError::NotAnArray => write!(f, "Event log is not an array of traces"),
            InvalidLogError::MalformedTrace(trace_idx) => {
                write!(f, "Trace at index {trace_idx} is not a sequence of events")
            }
            InvalidLogError::MissingActivityField(trace_idx, event_idx) => {
                write!(
                    f,
                    "Event {event_idx} of trace {trace_idx} has no activity label (expected a string or an object with a 'task' or 'activity' field)"
                )
            }
            InvalidLogError::IOError(e) => write!(f, "Failed to read event log: {e}"),
            InvalidLogError::JsonError(e) => write!(f, "Failed to parse event log JSON: {e}"),
        }
    }
}

impl std::error::Error for InvalidLogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvalidLogError::IOError(e) => Some(e.as_ref()),
            InvalidLogError::JsonError(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for InvalidLogError {
    fn from(e: std::io::Error) -> Self {
        Self::IOError(std::rc::Rc::new(e))
    }
}

impl From<serde_json::Error> for InvalidLogError {
    fn from(e: serde_json::Error) -> Self {
        Self::JsonError(std::rc::Rc::new(e))
    }
}

/// Projection of an [`EventLog`] on just activity labels
///
/// Derived once per log and never mutated; discovery and conformance consume this
/// instead of the raw log.
#[derive(Debug, Clone)]
pub struct ActivityProjection {
    /// Every label occurring anywhere in the log
    pub activities: HashSet<Activity>,
    /// Labels occurring first in some non-empty trace
    pub start_activities: HashSet<Activity>,
    /// Labels occurring last in some non-empty trace
    pub end_activities: HashSet<Activity>,
    /// Unique non-empty label sequences with their frequency
    pub traces: Vec<(Vec<Activity>, u64)>,
    /// Total number of traces in the log, including empty ones
    pub num_traces: usize,
}

impl ActivityProjection {
    /// Project an [`EventLog`] onto its activity labels
    ///
    /// Empty traces contribute nothing to the activity/start/end sets or the
    /// unique-trace table, but are counted in `num_traces`.
    pub fn from_log(log: &EventLog) -> Result<Self, InvalidLogError> {
        if log.traces.is_empty() {
            return Err(InvalidLogError::EmptyLog);
        }
        let mut activities: HashSet<Activity> = HashSet::new();
        let mut start_activities: HashSet<Activity> = HashSet::new();
        let mut end_activities: HashSet<Activity> = HashSet::new();
        let mut trace_freq: HashMap<Vec<Activity>, u64> = HashMap::new();
        for trace in &log.traces {
            if let (Some(first), Some(last)) = (trace.events.first(), trace.events.last()) {
                activities.extend(trace.events.iter().cloned());
                start_activities.insert(first.clone());
                end_activities.insert(last.clone());
                *trace_freq.entry(trace.events.clone()).or_insert(0) += 1;
            }
        }
        Ok(Self {
            activities,
            start_activities,
            end_activities,
            traces: trace_freq.into_iter().collect(),
            num_traces: log.traces.len(),
        })
    }

    /// Unique traces with their frequencies, most frequent first
    ///
    /// Ties are broken by the label sequence so the ordering is stable. The share of
    /// a trace is its frequency divided by `num_traces` (which includes empty traces).
    pub fn trace_frequencies(&self) -> Vec<(&[Activity], u64)> {
        let mut freqs: Vec<(&[Activity], u64)> = self
            .traces
            .iter()
            .map(|(trace, freq)| (trace.as_slice(), *freq))
            .collect();
        freqs.sort_by(|(t1, f1), (t2, f2)| f2.cmp(f1).then_with(|| t1.cmp(t2)));
        freqs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_of_simple_log() {
        let log = EventLog::from_label_sequences(vec![
            vec!["A", "B", "D"],
            vec!["A", "C", "D"],
            vec!["A", "B", "D"],
        ]);
        let proj = ActivityProjection::from_log(&log).unwrap();
        assert_eq!(
            proj.activities,
            ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect()
        );
        assert_eq!(proj.start_activities, HashSet::from(["A".to_string()]));
        assert_eq!(proj.end_activities, HashSet::from(["D".to_string()]));
        assert_eq!(proj.num_traces, 3);

        let freqs = proj.trace_frequencies();
        assert_eq!(freqs.len(), 2);
        assert_eq!(freqs[0].1, 2);
        assert_eq!(freqs[0].0.join(","), "A,B,D");
    }

    #[test]
    fn empty_traces_are_counted_but_not_projected() {
        let log = EventLog {
            traces: vec![
                Trace::from_activities(vec!["A", "B"]),
                Trace::new(),
                Trace::new(),
            ],
        };
        let proj = ActivityProjection::from_log(&log).unwrap();
        assert_eq!(proj.num_traces, 3);
        assert_eq!(proj.traces.len(), 1);
        assert_eq!(proj.activities.len(), 2);
        assert!(!proj.start_activities.contains(""));
    }

    #[test]
    fn empty_log_is_rejected() {
        let log = EventLog::new();
        assert!(matches!(
            ActivityProjection::from_log(&log),
            Err(InvalidLogError::EmptyLog)
        ));
    }
}
