//! Constraint table parsing.
//!
//! Each non-blank line is `<vertex_id> <duration> <predecessor_id>*`,
//! whitespace separated. Any malformed line aborts the load.

use rustc_hash::FxHashSet;
use std::path::Path;
use thiserror::Error;

use crate::models::{Graph, GraphError, Vertex, VertexId};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Line {line}: vertex {vertex} is already defined")]
    DuplicateVertex { line: usize, vertex: u32 },
    #[error(transparent)]
    Graph(#[from] GraphError),
}

fn parse_field<T: std::str::FromStr>(
    token: &str,
    line: usize,
    what: &str,
) -> Result<T, LoadError> {
    token.parse::<T>().map_err(|_| LoadError::Parse {
        line,
        message: format!("invalid {} {:?}", what, token),
    })
}

fn parse_row(text: &str, line: usize) -> Result<Vertex, LoadError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let [id, duration, predecessors @ ..] = tokens.as_slice() else {
        return Err(LoadError::Parse {
            line,
            message: format!(
                "expected at least a vertex id and a duration, found {} field(s)",
                tokens.len()
            ),
        });
    };

    let id: u32 = parse_field(id, line, "vertex id")?;
    let duration: i64 = parse_field(duration, line, "duration")?;
    let predecessors = predecessors
        .iter()
        .map(|token| parse_field::<u32>(token, line, "predecessor id").map(VertexId::Task))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Vertex::new(VertexId::Task(id), duration, predecessors))
}

/// Parse a constraint table held in memory.
pub fn parse_constraint_table(text: &str) -> Result<Graph, LoadError> {
    let mut vertices: Vec<Vertex> = Vec::new();
    let mut seen: FxHashSet<u32> = FxHashSet::default();

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        if raw.trim().is_empty() {
            continue;
        }
        let vertex = parse_row(raw, line)?;
        if let Some(n) = vertex.id.task_number() {
            if !seen.insert(n) {
                return Err(LoadError::DuplicateVertex { line, vertex: n });
            }
        }
        vertices.push(vertex);
    }

    Ok(Graph::from_vertices(vertices)?)
}

/// Read and parse a constraint table file.
pub fn load_constraint_table(path: impl AsRef<Path>) -> Result<Graph, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_constraint_table(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table() {
        let graph = parse_constraint_table("1 3\n2 2 1\n\n3 4 1\n4 1 2 3\n").unwrap();
        assert_eq!(graph.len(), 4);
        let four = graph.get(VertexId::Task(4)).unwrap();
        assert_eq!(four.duration, 1);
        assert_eq!(four.predecessors, vec![VertexId::Task(2), VertexId::Task(3)]);
        assert!(graph.get(VertexId::Task(1)).unwrap().predecessors.is_empty());
    }

    #[test]
    fn test_extra_whitespace_is_ignored() {
        let graph = parse_constraint_table("  1\t5  \n   \n2   1   1").unwrap();
        assert_eq!(graph.duration(VertexId::Task(1)), Some(5));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_empty_table() {
        assert!(parse_constraint_table("").unwrap().is_empty());
        assert!(parse_constraint_table("\n  \n").unwrap().is_empty());
    }

    #[test]
    fn test_too_few_fields() {
        let err = parse_constraint_table("1 3\n2\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_non_integer_field() {
        let err = parse_constraint_table("1 three\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 1, .. }));
        assert_eq!(err.to_string(), "Line 1: invalid duration \"three\"");

        let err = parse_constraint_table("1 3\n2 1 x\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_negative_id_is_parse_error() {
        let err = parse_constraint_table("-1 3\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_negative_duration_is_loaded() {
        let graph = parse_constraint_table("1 -2\n").unwrap();
        assert_eq!(graph.duration(VertexId::Task(1)), Some(-2));
    }

    #[test]
    fn test_duplicate_vertex() {
        let err = parse_constraint_table("1 3\n1 4\n").unwrap_err();
        assert!(matches!(err, LoadError::DuplicateVertex { line: 2, vertex: 1 }));
    }

    #[test]
    fn test_dangling_reference() {
        let err = parse_constraint_table("1 3\n2 1 7\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Graph(GraphError::DanglingReference {
                vertex: VertexId::Task(2),
                predecessor: VertexId::Task(7),
            })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_constraint_table("/nonexistent/table.txt").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
