//! Forward (earliest) and backward (latest) date passes.

use crate::index::NetworkIndex;
use crate::network::Ranks;

/// Earliest start of every slot.
///
/// Processed in ascending rank order so each predecessor is final before it
/// is read.
pub fn earliest_dates(index: &NetworkIndex, ranks: &Ranks) -> Vec<i64> {
    let mut earliest = vec![0i64; index.len()];

    for &slot in &ranks.order {
        earliest[slot] = index.preds[slot]
            .iter()
            .map(|&pred| earliest[pred] + index.durations[pred])
            .max()
            .unwrap_or(0);
    }

    earliest
}

/// Overall earliest completion: the highest earliest start.
pub fn project_end(earliest: &[i64]) -> i64 {
    earliest.iter().copied().max().unwrap_or(0)
}

/// Latest start of every slot.
///
/// The unique successor-less vertex gets its earliest date. Any further
/// successor-less vertex (only possible on a graph that was not augmented)
/// defaults to the project end. Everything else takes the tightest
/// `latest(successor) - duration` and is processed in descending rank order.
pub fn latest_dates(index: &NetworkIndex, ranks: &Ranks, earliest: &[i64]) -> Vec<i64> {
    let end = project_end(earliest);
    let ends: Vec<usize> = (0..index.len())
        .filter(|&slot| index.succs[slot].is_empty())
        .collect();
    let unique_sink = match ends.as_slice() {
        [only] => Some(*only),
        _ => None,
    };

    let mut latest = vec![end; index.len()];

    for &slot in ranks.order.iter().rev() {
        if Some(slot) == unique_sink {
            latest[slot] = earliest[slot];
            continue;
        }
        let duration = index.durations[slot];
        latest[slot] = index.succs[slot]
            .iter()
            .map(|&succ| latest[succ] - duration)
            .min()
            .unwrap_or(end);
    }

    latest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Graph, Vertex, VertexId};
    use crate::network::{augment, compute_ranks};

    fn dates(vertices: Vec<Vertex>) -> (NetworkIndex, Vec<i64>, Vec<i64>) {
        let graph = Graph::from_vertices(vertices).unwrap();
        let index = NetworkIndex::new(&graph);
        let ranks = compute_ranks(&index).unwrap();
        let earliest = earliest_dates(&index, &ranks);
        let latest = latest_dates(&index, &ranks, &earliest);
        (index, earliest, latest)
    }

    fn at(index: &NetworkIndex, values: &[i64], id: u32) -> i64 {
        values[index.slot(VertexId::Task(id)).unwrap()]
    }

    #[test]
    fn test_diamond_dates() {
        let (index, earliest, latest) = dates(vec![
            Vertex::task(1, 3, &[]),
            Vertex::task(2, 2, &[1]),
            Vertex::task(3, 4, &[1]),
            Vertex::task(4, 1, &[2, 3]),
        ]);

        assert_eq!(at(&index, &earliest, 1), 0);
        assert_eq!(at(&index, &earliest, 2), 3);
        assert_eq!(at(&index, &earliest, 3), 3);
        assert_eq!(at(&index, &earliest, 4), 7);

        assert_eq!(at(&index, &latest, 1), 0);
        assert_eq!(at(&index, &latest, 2), 5);
        assert_eq!(at(&index, &latest, 3), 3);
        assert_eq!(at(&index, &latest, 4), 7);
    }

    #[test]
    fn test_ids_out_of_topological_order() {
        // 9 -> 2 -> 5: slot order (2, 5, 9) is not a valid processing order
        let (index, earliest, latest) = dates(vec![
            Vertex::task(9, 4, &[]),
            Vertex::task(2, 6, &[9]),
            Vertex::task(5, 1, &[2]),
        ]);
        assert_eq!(at(&index, &earliest, 2), 4);
        assert_eq!(at(&index, &earliest, 5), 10);
        assert_eq!(at(&index, &latest, 9), 0);
    }

    #[test]
    fn test_single_vertex() {
        let (index, earliest, latest) = dates(vec![Vertex::task(1, 5, &[])]);
        assert_eq!(at(&index, &earliest, 1), 0);
        assert_eq!(at(&index, &latest, 1), 0);
    }

    #[test]
    fn test_extra_end_defaults_to_project_end() {
        // Not augmented: 1 -> 2 (long) and 1 -> 3 (short), two ends
        let (index, earliest, latest) = dates(vec![
            Vertex::task(1, 2, &[]),
            Vertex::task(2, 10, &[1]),
            Vertex::task(3, 1, &[1]),
        ]);
        assert_eq!(project_end(&earliest), 2);
        assert_eq!(at(&index, &latest, 2), 2);
        assert_eq!(at(&index, &latest, 3), 2);
        assert_eq!(at(&index, &latest, 1), 0);
    }

    #[test]
    fn test_augmented_parallel_chains() {
        // 1 (2) -> 2 (3) and 3 (1) -> 4 (5), joined by start/end
        let graph = augment(
            &Graph::from_vertices(vec![
                Vertex::task(1, 2, &[]),
                Vertex::task(2, 3, &[1]),
                Vertex::task(3, 1, &[]),
                Vertex::task(4, 5, &[3]),
            ])
            .unwrap(),
        );
        let index = NetworkIndex::new(&graph);
        let ranks = compute_ranks(&index).unwrap();
        let earliest = earliest_dates(&index, &ranks);
        let latest = latest_dates(&index, &ranks, &earliest);

        let sink = index.slot(VertexId::Sink).unwrap();
        assert_eq!(earliest[sink], 6);
        assert_eq!(latest[sink], 6);
        assert_eq!(at(&index, &latest, 1), 1);
        assert_eq!(at(&index, &latest, 2), 3);
        assert_eq!(at(&index, &latest, 3), 0);
        assert_eq!(at(&index, &latest, 4), 1);
        for slot in 0..index.len() {
            assert!(earliest[slot] <= latest[slot]);
        }
    }

    #[test]
    fn test_empty() {
        assert_eq!(project_end(&[]), 0);
    }
}
