//! Estimation types: votes, consensus, and the poker history record

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{EstimateId, MemberId, TaskId};

/// A single planning-poker vote: numeric points, or a sized label such as
/// `"M"` / `"XL"`, or the `"?"` unknown marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Vote {
    Points(u64),
    Label(String),
}

impl Vote {
    /// Numeric value, if this is a points vote
    pub fn points(&self) -> Option<u64> {
        match self {
            Self::Points(n) => Some(*n),
            Self::Label(_) => None,
        }
    }

    /// Whether this is the `"?"` unknown marker
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Label(label) if label == "?")
    }
}

impl std::fmt::Display for Vote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Points(n) => write!(f, "{n}"),
            Self::Label(label) => write!(f, "{label}"),
        }
    }
}

impl From<u64> for Vote {
    fn from(n: u64) -> Self {
        Self::Points(n)
    }
}

impl From<&str> for Vote {
    fn from(label: &str) -> Self {
        Self::Label(label.to_string())
    }
}

/// Outcome of tallying a vote map
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Consensus {
    /// One value holds the strict maximum occurrence count
    Agreed(Vote),
    /// Two or more values tie for the maximum
    Tie,
    /// The vote map was empty
    NoVotes,
}

impl Consensus {
    /// The agreed vote, if any
    pub fn agreed(&self) -> Option<&Vote> {
        match self {
            Self::Agreed(vote) => Some(vote),
            _ => None,
        }
    }

    /// The wire reason token for a failed consensus
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Self::Agreed(_) => None,
            Self::Tie => Some("tie"),
            Self::NoVotes => Some("no-votes"),
        }
    }

    /// Render as the API payload: `{"consensus": vote}` or
    /// `{"consensus": null, "reason": ...}`
    pub fn to_value(&self) -> serde_json::Value {
        match self {
            Self::Agreed(vote) => serde_json::json!({ "consensus": vote }),
            other => serde_json::json!({
                "consensus": serde_json::Value::Null,
                "reason": other.reason(),
            }),
        }
    }
}

/// Tally a vote map into a strict-plurality consensus.
///
/// Pure and order-independent: only occurrence counts matter, so permuting
/// the input cannot change the result.
pub fn resolve(votes: &BTreeMap<MemberId, Vote>) -> Consensus {
    if votes.is_empty() {
        return Consensus::NoVotes;
    }

    let mut counts: HashMap<&Vote, usize> = HashMap::new();
    for vote in votes.values() {
        *counts.entry(vote).or_insert(0) += 1;
    }

    let max = counts.values().copied().max().unwrap_or(0);
    let mut leaders = counts
        .iter()
        .filter(|(_, count)| **count == max)
        .map(|(vote, _)| (*vote).clone());

    match (leaders.next(), leaders.next()) {
        (Some(vote), None) => Consensus::Agreed(vote),
        _ => Consensus::Tie,
    }
}

/// One completed estimation round, kept in the board's poker history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationRecord {
    pub id: EstimateId,
    pub task_id: TaskId,
    pub task_title: String,
    pub estimation: Vote,
    pub votes: BTreeMap<MemberId, Vote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discussion: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl EstimationRecord {
    /// Create a new record stamped with the current time
    pub fn new(
        task_id: TaskId,
        task_title: impl Into<String>,
        estimation: Vote,
        votes: BTreeMap<MemberId, Vote>,
        discussion: Option<String>,
    ) -> Self {
        Self {
            id: EstimateId::new(),
            task_id,
            task_title: task_title.into(),
            estimation,
            votes,
            discussion,
            recorded_at: Utc::now(),
        }
    }
}
