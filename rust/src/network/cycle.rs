//! Cycle detection by depth-first search over the predecessor relation.

use thiserror::Error;

use crate::index::NetworkIndex;
use crate::models::{Graph, VertexId};

/// A dependency cycle, listed so that each vertex is a predecessor of the next
/// and the last is a predecessor of the first.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Circular dependency detected: {}", format_cycle(.cycle))]
pub struct CycleError {
    pub cycle: Vec<VertexId>,
}

pub(crate) fn format_cycle(cycle: &[VertexId]) -> String {
    let mut parts: Vec<String> = cycle.iter().map(|id| id.to_string()).collect();
    if let Some(first) = cycle.first() {
        parts.push(first.to_string());
    }
    parts.join(" -> ")
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Finished,
}

/// Returns true if the graph contains a dependency cycle.
pub fn has_cycle(graph: &Graph) -> bool {
    find_cycle(graph).is_some()
}

/// Find one dependency cycle, if any.
pub fn find_cycle(graph: &Graph) -> Option<Vec<VertexId>> {
    find_cycle_in(&NetworkIndex::new(graph))
}

/// Iterative three-color DFS. Each stack frame is `(slot, next predecessor position)`.
pub(crate) fn find_cycle_in(index: &NetworkIndex) -> Option<Vec<VertexId>> {
    let n = index.len();
    let mut marks = vec![Mark::Unvisited; n];
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..n {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        marks[root] = Mark::OnStack;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let slot = frame.0;
            let Some(&pred) = index.preds[slot].get(frame.1) else {
                marks[slot] = Mark::Finished;
                stack.pop();
                continue;
            };
            frame.1 += 1;

            match marks[pred] {
                Mark::Unvisited => {
                    marks[pred] = Mark::OnStack;
                    stack.push((pred, 0));
                }
                Mark::OnStack => {
                    // Back-edge: the frames from `pred` upward form the cycle,
                    // each one a successor of the frame above it.
                    let start = stack.iter().position(|&(s, _)| s == pred).unwrap_or(0);
                    let mut cycle: Vec<VertexId> = stack[start..]
                        .iter()
                        .rev()
                        .map(|&(s, _)| index.id(s))
                        .collect();
                    if let Some(min_pos) = cycle
                        .iter()
                        .enumerate()
                        .min_by_key(|&(_, id)| *id)
                        .map(|(pos, _)| pos)
                    {
                        cycle.rotate_left(min_pos);
                    }
                    return Some(cycle);
                }
                Mark::Finished => {}
            }
        }
    }

    None
}
