//! Topological ranking (longest path, in vertices, from any source).

use rustc_hash::FxHashMap;
use std::collections::VecDeque;

use crate::index::NetworkIndex;
use crate::models::{Graph, VertexId};

use super::cycle::{find_cycle_in, CycleError};

/// Ranks of one graph snapshot, indexed by slot of the [`NetworkIndex`] they
/// were computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranks {
    /// Rank of each slot.
    pub values: Vec<u32>,
    /// Slots sorted by `(rank, VertexId)`. Every predecessor precedes its successors.
    pub order: Vec<usize>,
}

impl Ranks {
    pub fn get(&self, slot: usize) -> u32 {
        self.values[slot]
    }

    /// Highest rank, or `None` for an empty graph.
    pub fn max_rank(&self) -> Option<u32> {
        self.values.iter().copied().max()
    }
}

/// Compute ranks with Kahn's algorithm.
///
/// `rank(v) = 0` for a vertex without predecessors, otherwise one more than
/// the highest predecessor rank. Vertices left unprocessed mean the graph has a
/// cycle, which is returned as an error.
pub fn compute_ranks(index: &NetworkIndex) -> Result<Ranks, CycleError> {
    let n = index.len();
    let mut remaining: Vec<usize> = index.preds.iter().map(Vec::len).collect();
    let mut values = vec![0u32; n];
    let mut queue: VecDeque<usize> = (0..n).filter(|&slot| remaining[slot] == 0).collect();
    let mut processed = 0;

    while let Some(slot) = queue.pop_front() {
        processed += 1;
        for &succ in &index.succs[slot] {
            values[succ] = values[succ].max(values[slot] + 1);
            remaining[succ] -= 1;
            if remaining[succ] == 0 {
                queue.push_back(succ);
            }
        }
    }

    if processed != n {
        let cycle = find_cycle_in(index).unwrap_or_else(|| {
            (0..n)
                .filter(|&slot| remaining[slot] > 0)
                .map(|slot| index.id(slot))
                .collect()
        });
        return Err(CycleError { cycle });
    }

    // Slots are assigned in id order, so sorting by (rank, slot) sorts by (rank, id)
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&slot| (values[slot], slot));

    Ok(Ranks { values, order })
}

/// Rank of every vertex of `graph`, keyed by id.
pub fn rank(graph: &Graph) -> Result<FxHashMap<VertexId, u32>, CycleError> {
    let index = NetworkIndex::new(graph);
    let ranks = compute_ranks(&index)?;
    Ok(index.to_map(&ranks.values))
}
