use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use itertools::Itertools;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::event_log::event_log_struct::{Activity, ActivityProjection};

/// Footprint relation between an ordered pair of distinct activity labels
///
/// Classification is based purely on direct succession observed anywhere in the
/// log; neither frequency nor trace count influences it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FootprintRelation {
    /// `a` is directly followed by `b` somewhere, never the other way around (`->`)
    Causal,
    /// `b` is directly followed by `a` somewhere, never the other way around (`<-`)
    InverseCausal,
    /// Both directions of direct succession are observed (`||`)
    Parallel,
    /// Neither direction of direct succession is observed (`#`)
    Unrelated,
}

impl FootprintRelation {
    /// The relation of the swapped pair: causal flips to inverse-causal,
    /// parallel and unrelated are symmetric
    pub fn flipped(self) -> Self {
        match self {
            FootprintRelation::Causal => FootprintRelation::InverseCausal,
            FootprintRelation::InverseCausal => FootprintRelation::Causal,
            other => other,
        }
    }
}

impl std::fmt::Display for FootprintRelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            FootprintRelation::Causal => "->",
            FootprintRelation::InverseCausal => "<-",
            FootprintRelation::Parallel => "||",
            FootprintRelation::Unrelated => "#",
        };
        write!(f, "{symbol}")
    }
}

/// Footprint relation table of an event log
///
/// Total over all ordered pairs of distinct observed labels; self-pairs are
/// excluded (immediate self-succession, e.g. short loops, is a known blind spot
/// of this relation scheme and is not classified).
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FootprintMatrix {
    /// Observed labels, sorted (stable row/column ordering)
    pub activities: Vec<Activity>,
    /// Relation per ordered pair of distinct labels
    #[serde_as(as = "Vec<(_, _)>")]
    pub relations: HashMap<(Activity, Activity), FootprintRelation>,
}

impl FootprintMatrix {
    /// Build the footprint matrix of a projected event log
    ///
    /// One scan over the unique traces collects the direct-succession adjacency;
    /// pair classification then runs in parallel over the (read-only) adjacency.
    pub fn from_projection(log_proj: &ActivityProjection) -> Self {
        let mut follows: HashMap<&str, HashSet<&str>> = HashMap::new();
        for (trace, _) in &log_proj.traces {
            for pair in trace.windows(2) {
                follows
                    .entry(pair[0].as_str())
                    .or_default()
                    .insert(pair[1].as_str());
            }
        }

        let mut activities: Vec<Activity> = log_proj.activities.iter().cloned().collect();
        activities.sort();

        let pairs: Vec<(&Activity, &Activity)> = activities
            .iter()
            .cartesian_product(activities.iter())
            .filter(|(a, b)| a != b)
            .collect();
        let relations: HashMap<(Activity, Activity), FootprintRelation> = pairs
            .par_iter()
            .map(|(a, b)| {
                let a_to_b = follows
                    .get(a.as_str())
                    .is_some_and(|succ| succ.contains(b.as_str()));
                let b_to_a = follows
                    .get(b.as_str())
                    .is_some_and(|succ| succ.contains(a.as_str()));
                let relation = match (a_to_b, b_to_a) {
                    (true, true) => FootprintRelation::Parallel,
                    (true, false) => FootprintRelation::Causal,
                    (false, true) => FootprintRelation::InverseCausal,
                    (false, false) => FootprintRelation::Unrelated,
                };
                (((*a).clone(), (*b).clone()), relation)
            })
            .collect();

        Self {
            activities,
            relations,
        }
    }

    /// Relation of an ordered pair, `None` for self-pairs or unobserved labels
    pub fn relation(&self, a: &str, b: &str) -> Option<FootprintRelation> {
        self.relations.get(&(a.to_string(), b.to_string())).copied()
    }

    /// All causal pairs `(a, b)` with `a -> b`
    pub fn causal_pairs(&self) -> HashSet<(Activity, Activity)> {
        self.pairs_with(FootprintRelation::Causal)
    }

    /// All parallel pairs (both orderings are included)
    pub fn parallel_pairs(&self) -> HashSet<(Activity, Activity)> {
        self.pairs_with(FootprintRelation::Parallel)
    }

    fn pairs_with(&self, relation: FootprintRelation) -> HashSet<(Activity, Activity)> {
        self.relations
            .iter()
            .filter(|(_, rel)| **rel == relation)
            .map(|(pair, _)| pair.clone())
            .collect()
    }

    /// Render the matrix as an ASCII table for reporting
    ///
    /// Self-pairs are marked with `-` (they carry no relation).
    pub fn to_ascii_table(&self) -> String {
        let width = self
            .activities
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(1)
            .max(2);
        let mut out = String::new();
        let _ = write!(out, "{:width$}", "");
        for col in &self.activities {
            let _ = write!(out, " {col:>width$}");
        }
        out.push('\n');
        for row in &self.activities {
            let _ = write!(out, "{row:>width$}");
            for col in &self.activities {
                let cell = match self.relation(row, col) {
                    Some(rel) => rel.to_string(),
                    None => "-".to_string(),
                };
                let _ = write!(out, " {cell:>width$}");
            }
            out.push('\n');
        }
        out
    }
}
