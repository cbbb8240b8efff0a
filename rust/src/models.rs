//! Core data types for the precedence network.

use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use thiserror::Error;

/// Identifier of a vertex in the network.
///
/// `Source` and `Sink` are the fictitious boundary vertices; every vertex read
/// from a constraint table is a `Task`. The derived ordering puts `Source`
/// first, tasks by number, then `Sink`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VertexId {
    Source,
    Task(u32),
    Sink,
}

impl VertexId {
    pub fn is_fictitious(&self) -> bool {
        !matches!(self, VertexId::Task(_))
    }

    pub fn task_number(&self) -> Option<u32> {
        match self {
            VertexId::Task(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VertexId::Source => write!(f, "start"),
            VertexId::Task(n) => write!(f, "{}", n),
            VertexId::Sink => write!(f, "end"),
        }
    }
}

/// A unit of work and its prerequisites.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vertex {
    pub id: VertexId,
    pub duration: i64,
    /// Sorted, without duplicates once the vertex is part of a [`Graph`].
    pub predecessors: Vec<VertexId>,
}

impl Vertex {
    pub fn new(id: VertexId, duration: i64, predecessors: Vec<VertexId>) -> Self {
        Self {
            id,
            duration,
            predecessors,
        }
    }

    /// Convenience constructor for a constraint-table row.
    pub fn task(id: u32, duration: i64, predecessors: &[u32]) -> Self {
        Self::new(
            VertexId::Task(id),
            duration,
            predecessors.iter().map(|&p| VertexId::Task(p)).collect(),
        )
    }
}

/// Errors raised while assembling a [`Graph`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Vertex {0} is defined more than once")]
    DuplicateVertex(VertexId),
    #[error("Vertex {vertex} lists predecessor {predecessor}, which is not a vertex of the graph")]
    DanglingReference {
        vertex: VertexId,
        predecessor: VertexId,
    },
    #[error("Fictitious vertex {0} must stay at the network boundary")]
    MisplacedBoundary(VertexId),
}

/// Immutable precedence network: vertex id -> vertex.
///
/// Successors are derived from the predecessor lists on demand.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    vertices: FxHashMap<VertexId, Vertex>,
}

impl Graph {
    /// Build a graph, rejecting duplicate ids, predecessors that are not vertices,
    /// and fictitious vertices away from the boundary (a `Source` with
    /// predecessors, a `Sink` listed as a predecessor).
    pub fn from_vertices<I>(vertices: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = Vertex>,
    {
        let mut map: FxHashMap<VertexId, Vertex> = FxHashMap::default();
        for vertex in vertices {
            if map.contains_key(&vertex.id) {
                return Err(GraphError::DuplicateVertex(vertex.id));
            }
            map.insert(vertex.id, vertex);
        }

        let mut ids: Vec<VertexId> = map.keys().copied().collect();
        ids.sort_unstable();
        for vertex in ids.iter().filter_map(|id| map.get(id)) {
            if vertex.id == VertexId::Source && !vertex.predecessors.is_empty() {
                return Err(GraphError::MisplacedBoundary(VertexId::Source));
            }
            if vertex.predecessors.contains(&VertexId::Sink) {
                return Err(GraphError::MisplacedBoundary(VertexId::Sink));
            }
            if let Some(&missing) = vertex
                .predecessors
                .iter()
                .filter(|p| !map.contains_key(*p))
                .min()
            {
                return Err(GraphError::DanglingReference {
                    vertex: vertex.id,
                    predecessor: missing,
                });
            }
        }

        Ok(Self::from_map(map))
    }

    /// Build from a map already known to be closed under predecessor references.
    pub(crate) fn from_map(mut vertices: FxHashMap<VertexId, Vertex>) -> Self {
        for vertex in vertices.values_mut() {
            vertex.predecessors.sort_unstable();
            vertex.predecessors.dedup();
        }
        Self { vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    pub fn get(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    /// Vertices in arbitrary order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    /// All vertex ids in ascending [`VertexId`] order.
    pub fn sorted_ids(&self) -> Vec<VertexId> {
        let mut ids: Vec<VertexId> = self.vertices.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Derived successor lists, each sorted. Every vertex has an entry.
    pub fn successors(&self) -> FxHashMap<VertexId, Vec<VertexId>> {
        let mut successors: FxHashMap<VertexId, Vec<VertexId>> = self
            .vertices
            .keys()
            .map(|&id| (id, Vec::new()))
            .collect();
        for vertex in self.vertices.values() {
            for pred in &vertex.predecessors {
                if let Some(list) = successors.get_mut(pred) {
                    list.push(vertex.id);
                }
            }
        }
        for list in successors.values_mut() {
            list.sort_unstable();
        }
        successors
    }

    /// Vertices without predecessors, sorted.
    pub fn sources(&self) -> Vec<VertexId> {
        let mut sources: Vec<VertexId> = self
            .vertices
            .values()
            .filter(|v| v.predecessors.is_empty())
            .map(|v| v.id)
            .collect();
        sources.sort_unstable();
        sources
    }

    /// Vertices that are nobody's predecessor, sorted.
    pub fn sinks(&self) -> Vec<VertexId> {
        let referenced: FxHashSet<VertexId> = self
            .vertices
            .values()
            .flat_map(|v| v.predecessors.iter().copied())
            .collect();
        let mut sinks: Vec<VertexId> = self
            .vertices
            .keys()
            .filter(|id| !referenced.contains(*id))
            .copied()
            .collect();
        sinks.sort_unstable();
        sinks
    }

    /// Every `(predecessor, vertex)` edge, sorted by vertex then predecessor.
    pub fn edges(&self) -> Vec<(VertexId, VertexId)> {
        let mut edges: Vec<(VertexId, VertexId)> = self
            .vertices
            .values()
            .flat_map(|v| v.predecessors.iter().map(move |&p| (p, v.id)))
            .collect();
        edges.sort_unstable_by_key(|&(p, v)| (v, p));
        edges
    }

    pub fn duration(&self, id: VertexId) -> Option<i64> {
        self.vertices.get(&id).map(|v| v.duration)
    }

    /// Copy of this graph with every negative duration replaced by 0.
    pub(crate) fn with_clamped_durations(&self) -> Self {
        let mut vertices = self.vertices.clone();
        for vertex in vertices.values_mut() {
            vertex.duration = vertex.duration.max(0);
        }
        Self { vertices }
    }
}
