// ABOUTME: Closed strategy types accepted by layout commands.
// ABOUTME: Covers track redistribution, tab reordering, and window lookup modes.

use serde::{Deserialize, Serialize};

/// Which tracks absorb a size change under the priority strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Priorities {
    Edge(Edge),
    /// Zero-based track indices
    Tracks(Vec<usize>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    First,
    Last,
}

impl Priorities {
    pub const FIRST: Self = Self::Edge(Edge::First);
    pub const LAST: Self = Self::Edge(Edge::Last);

    /// Resolve to sorted, deduplicated indices into a list of `len` tracks.
    /// Indices past the end are dropped.
    pub fn resolve(&self, len: usize) -> Vec<usize> {
        if len == 0 {
            return Vec::new();
        }
        match self {
            Priorities::Edge(Edge::First) => vec![0],
            Priorities::Edge(Edge::Last) => vec![len - 1],
            Priorities::Tracks(indices) => {
                let mut resolved: Vec<usize> =
                    indices.iter().copied().filter(|&i| i < len).collect();
                resolved.sort_unstable();
                resolved.dedup();
                resolved
            }
        }
    }
}

/// How pixel space is reallocated after a track count or total changes
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "strategy")]
pub enum Redistribution {
    /// Equal shares, remainder to the last track
    #[default]
    Even,
    /// The whole delta goes to the designated tracks
    Priority { priorities: Priorities },
}

impl Redistribution {
    pub fn priority(priorities: Priorities) -> Self {
        Self::Priority { priorities }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReorderStrategy {
    /// Exchange the two tabs' positions
    Swap,
    /// Move the first tab to the second tab's index
    Shift,
}

/// What kind of id a window-removal target names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdType {
    Tab,
    Window,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_edges() {
        assert_eq!(Priorities::FIRST.resolve(3), vec![0]);
        assert_eq!(Priorities::LAST.resolve(3), vec![2]);
        assert!(Priorities::LAST.resolve(0).is_empty());
    }

    #[test]
    fn resolve_drops_out_of_range_and_duplicates() {
        let p = Priorities::Tracks(vec![4, 1, 1, 9, 0]);
        assert_eq!(p.resolve(5), vec![0, 1, 4]);
    }

    #[test]
    fn redistribution_wire_format() {
        let even: Redistribution = serde_json::from_str(r#"{"strategy":"even"}"#).unwrap();
        assert_eq!(even, Redistribution::Even);

        let first: Redistribution =
            serde_json::from_str(r#"{"strategy":"priority","priorities":"first"}"#).unwrap();
        assert_eq!(first, Redistribution::priority(Priorities::FIRST));

        let tracks: Redistribution =
            serde_json::from_str(r#"{"strategy":"priority","priorities":[0,2]}"#).unwrap();
        assert_eq!(tracks, Redistribution::priority(Priorities::Tracks(vec![0, 2])));
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let result: Result<Redistribution, _> =
            serde_json::from_str(r#"{"strategy":"proportional"}"#);
        assert!(result.is_err());

        let result: Result<ReorderStrategy, _> = serde_json::from_str(r#""rotate""#);
        assert!(result.is_err());
    }
}
