//! Total float per vertex.

use crate::index::NetworkIndex;

/// `slack = latest - earliest` for every slot.
///
/// # Panics
/// If any slack is negative. Dates computed from an acyclic graph with
/// non-negative durations never produce one, so this is an internal error.
pub fn compute_slack(index: &NetworkIndex, earliest: &[i64], latest: &[i64]) -> Vec<i64> {
    earliest
        .iter()
        .zip(latest.iter())
        .enumerate()
        .map(|(slot, (&early, &late))| {
            let slack = late - early;
            assert!(
                slack >= 0,
                "internal error: vertex {} has negative slack {} (earliest {}, latest {})",
                index.id(slot),
                slack,
                early,
                late
            );
            slack
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Graph, Vertex};

    fn index_of(n: u32) -> NetworkIndex {
        let vertices = (1..=n).map(|id| Vertex::task(id, 1, &[]));
        NetworkIndex::new(&Graph::from_vertices(vertices).unwrap())
    }

    #[test]
    fn test_slack_values() {
        let index = index_of(3);
        assert_eq!(compute_slack(&index, &[0, 3, 3], &[0, 5, 3]), vec![0, 2, 0]);
    }

    #[test]
    #[should_panic(expected = "negative slack")]
    fn test_negative_slack_panics() {
        let index = index_of(1);
        compute_slack(&index, &[4], &[1]);
    }
}
