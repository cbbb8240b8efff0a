//! Dense integer indexing of a [`Graph`] for traversal.
//!
//! Maps each [`VertexId`] to a `usize` slot so traversal state can live in
//! plain vectors instead of hash maps.

use rustc_hash::FxHashMap;

use crate::models::{Graph, VertexId};

/// Index-addressed adjacency view of a graph snapshot.
///
/// Slots are assigned in ascending `VertexId` order, so slot order is
/// deterministic for a given graph.
#[derive(Debug, Clone)]
pub struct NetworkIndex {
    to_slot: FxHashMap<VertexId, usize>,
    ids: Vec<VertexId>,
    /// Durations indexed by slot.
    pub durations: Vec<i64>,
    /// Predecessor slots indexed by slot.
    pub preds: Vec<Vec<usize>>,
    /// Successor slots indexed by slot, derived from `preds`.
    pub succs: Vec<Vec<usize>>,
}

impl NetworkIndex {
    pub fn new(graph: &Graph) -> Self {
        let ids = graph.sorted_ids();
        let n = ids.len();

        let mut to_slot: FxHashMap<VertexId, usize> =
            FxHashMap::with_capacity_and_hasher(n, Default::default());
        for (slot, &id) in ids.iter().enumerate() {
            to_slot.insert(id, slot);
        }

        let mut durations = vec![0; n];
        let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut succs: Vec<Vec<usize>> = vec![Vec::new(); n];

        for (slot, &id) in ids.iter().enumerate() {
            let Some(vertex) = graph.get(id) else {
                continue;
            };
            durations[slot] = vertex.duration;
            for pred in &vertex.predecessors {
                if let Some(&pred_slot) = to_slot.get(pred) {
                    preds[slot].push(pred_slot);
                    succs[pred_slot].push(slot);
                }
            }
        }

        Self {
            to_slot,
            ids,
            durations,
            preds,
            succs,
        }
    }

    #[inline]
    pub fn slot(&self, id: VertexId) -> Option<usize> {
        self.to_slot.get(&id).copied()
    }

    #[inline]
    pub fn id(&self, slot: usize) -> VertexId {
        self.ids[slot]
    }

    pub fn ids(&self) -> &[VertexId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Turn a slot-indexed vector into an id-keyed map.
    pub fn to_map<T: Copy>(&self, values: &[T]) -> FxHashMap<VertexId, T> {
        self.ids
            .iter()
            .zip(values.iter())
            .map(|(&id, &value)| (id, value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Vertex;

    #[test]
    fn test_slots_follow_id_order() {
        let graph = Graph::from_vertices(vec![
            Vertex::task(5, 1, &[]),
            Vertex::task(2, 3, &[5]),
            Vertex::task(9, 2, &[2, 5]),
        ])
        .unwrap();
        let index = NetworkIndex::new(&graph);

        assert_eq!(index.len(), 3);
        assert_eq!(index.slot(VertexId::Task(2)), Some(0));
        assert_eq!(index.slot(VertexId::Task(5)), Some(1));
        assert_eq!(index.id(2), VertexId::Task(9));
        assert_eq!(index.slot(VertexId::Sink), None);

        assert_eq!(index.durations, vec![3, 1, 2]);
        assert_eq!(index.preds[2], vec![0, 1]);
        assert_eq!(index.succs[1], vec![0, 2]);
    }

    #[test]
    fn test_to_map() {
        let graph = Graph::from_vertices(vec![Vertex::task(1, 4, &[])]).unwrap();
        let index = NetworkIndex::new(&graph);
        let map = index.to_map(&index.durations);
        assert_eq!(map.get(&VertexId::Task(1)), Some(&4));
    }
}
