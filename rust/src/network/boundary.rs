//! Fictitious start/end vertex insertion.

use rustc_hash::FxHashMap;

use crate::models::{Graph, Vertex, VertexId};

/// True when the graph already has a unique source and a unique sink
/// (or is empty), so [`augment`] would leave it unchanged.
pub fn is_augmented(graph: &Graph) -> bool {
    graph.is_empty() || (graph.sources().len() == 1 && graph.sinks().len() == 1)
}

/// Return a copy of `graph` with a single source and a single sink.
///
/// When several vertices have no predecessors, a zero-duration
/// [`VertexId::Source`] becomes the predecessor of each of them. When several
/// vertices have no successors, a zero-duration [`VertexId::Sink`] lists all of
/// them as predecessors. A side that already has exactly one boundary vertex is
/// left alone, which makes the operation idempotent.
pub fn augment(graph: &Graph) -> Graph {
    if is_augmented(graph) {
        return graph.clone();
    }

    let sources = graph.sources();
    let sinks = graph.sinks();

    let mut vertices: FxHashMap<VertexId, Vertex> =
        FxHashMap::with_capacity_and_hasher(graph.len() + 2, Default::default());
    for vertex in graph.vertices() {
        vertices.insert(vertex.id, vertex.clone());
    }

    if sources.len() > 1 {
        for id in sources.iter().filter(|&&id| id != VertexId::Source) {
            if let Some(vertex) = vertices.get_mut(id) {
                vertex.predecessors.push(VertexId::Source);
            }
        }
        vertices
            .entry(VertexId::Source)
            .or_insert_with(|| Vertex::new(VertexId::Source, 0, Vec::new()));
    }

    if sinks.len() > 1 {
        let ends: Vec<VertexId> = sinks
            .into_iter()
            .filter(|&id| id != VertexId::Sink)
            .collect();
        vertices
            .entry(VertexId::Sink)
            .and_modify(|sink| sink.predecessors.extend(ends.iter().copied()))
            .or_insert_with(|| Vertex::new(VertexId::Sink, 0, ends.clone()));
    }

    Graph::from_map(vertices)
}
