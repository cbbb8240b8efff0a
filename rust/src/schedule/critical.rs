//! Exhaustive enumeration of critical paths.

use std::fmt;

use crate::index::NetworkIndex;
use crate::log_debug;
use crate::models::VertexId;

use super::dates::project_end;

/// A source-to-sink chain of zero-slack vertices.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct CriticalPath {
    /// Vertices from source to sink, fictitious ones included.
    pub vertices: Vec<VertexId>,
    /// Sum of durations of every vertex except the last.
    pub duration: i64,
}

impl CriticalPath {
    /// Task numbers on the path, skipping fictitious vertices.
    pub fn tasks(&self) -> Vec<u32> {
        self.vertices
            .iter()
            .filter_map(VertexId::task_number)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl fmt::Display for CriticalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", id)?;
        }
        write!(f, " ({})", self.duration)
    }
}

/// Every path from a source to a successor-less vertex that only visits
/// zero-slack vertices and whose length equals the project end.
///
/// The search only follows tight edges (`earliest(v) + duration(v) ==
/// earliest(s)`): a path containing a loose edge cannot reach the project end
/// length, so those branches are pruned together with positive-slack ones.
/// Ties are all reported, in lexicographic vertex order.
pub fn find_critical_paths(
    index: &NetworkIndex,
    earliest: &[i64],
    slack: &[i64],
    verbosity: u8,
) -> Vec<CriticalPath> {
    let end = project_end(earliest);
    let mut paths: Vec<CriticalPath> = Vec::new();

    let starts = (0..index.len())
        .filter(|&slot| index.preds[slot].is_empty() && slack[slot] == 0 && earliest[slot] == 0);

    for start in starts {
        // Parallel stacks: current path and the next successor position to try at each depth
        let mut path: Vec<usize> = vec![start];
        let mut cursor: Vec<usize> = vec![0];
        let mut accumulated: Vec<i64> = vec![0];

        while let Some(&top) = path.last() {
            let depth = path.len() - 1;
            let successors = &index.succs[top];

            if successors.is_empty() {
                if accumulated[depth] == end {
                    let vertices: Vec<VertexId> = path.iter().map(|&s| index.id(s)).collect();
                    log_debug!(verbosity, "critical path found: {:?}", vertices);
                    paths.push(CriticalPath {
                        vertices,
                        duration: accumulated[depth],
                    });
                }
                path.pop();
                cursor.pop();
                accumulated.pop();
                continue;
            }

            let Some(&next) = successors.get(cursor[depth]) else {
                path.pop();
                cursor.pop();
                accumulated.pop();
                continue;
            };
            cursor[depth] += 1;

            let reached = accumulated[depth] + index.durations[top];
            if slack[next] != 0 || reached != earliest[next] {
                log_debug!(
                    verbosity,
                    "prune {} -> {} (slack {}, reached {}, earliest {})",
                    index.id(top),
                    index.id(next),
                    slack[next],
                    reached,
                    earliest[next]
                );
                continue;
            }

            path.push(next);
            cursor.push(0);
            accumulated.push(reached);
        }
    }

    paths.sort();
    paths
}
