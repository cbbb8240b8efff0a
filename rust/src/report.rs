//! Plain-text rendering of graphs and analysis results.
//!
//! Every renderer is a `Display` wrapper, so callers can `print!` them or
//! call `to_string()`. They read only the public [`Graph`] and [`Analysis`] data.

use std::fmt;

use crate::analysis::Analysis;
use crate::models::{Graph, VertexId};

/// One `predecessor -> vertex = duration` line per edge, weighted by the
/// predecessor's duration.
pub struct EdgeList<'a>(pub &'a Graph);

impl fmt::Display for EdgeList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let graph = self.0;
        for (pred, vertex) in graph.edges() {
            let weight = graph.duration(pred).unwrap_or(0);
            writeln!(f, "{} -> {} = {}", pred, vertex, weight)?;
        }
        Ok(())
    }
}

/// Square matrix with rows as predecessors and columns as successors.
/// A cell holds the edge weight, or `*` when there is no edge.
pub struct AdjacencyMatrix<'a>(pub &'a Graph);

impl fmt::Display for AdjacencyMatrix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let graph = self.0;
        let ids = graph.sorted_ids();
        let successors = graph.successors();

        let labels: Vec<String> = ids.iter().map(VertexId::to_string).collect();
        let mut width = labels.iter().map(String::len).max().unwrap_or(1);
        for vertex in graph.vertices() {
            width = width.max(vertex.duration.to_string().len());
        }

        write!(f, "{:>width$}", "", width = width)?;
        for label in &labels {
            write!(f, " {:>width$}", label, width = width)?;
        }
        writeln!(f)?;

        for (row, label) in ids.iter().zip(&labels) {
            write!(f, "{:>width$}", label, width = width)?;
            let row_successors = successors.get(row).map(Vec::as_slice).unwrap_or(&[]);
            let weight = graph.duration(*row).unwrap_or(0);
            for column in &ids {
                if row_successors.binary_search(column).is_ok() {
                    write!(f, " {:>width$}", weight, width = width)?;
                } else {
                    write!(f, " {:>width$}", "*", width = width)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Per-vertex rank, duration, dates and slack, in processing order.
pub struct ScheduleTable<'a>(pub &'a Analysis);

impl fmt::Display for ScheduleTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let analysis = self.0;
        writeln!(
            f,
            "{:>8} {:>8} {:>5} {:>8} {:>8} {:>6}",
            "vertex", "duration", "rank", "earliest", "latest", "slack"
        )?;
        for id in &analysis.order {
            writeln!(
                f,
                "{:>8} {:>8} {:>5} {:>8} {:>8} {:>6}",
                id.to_string(),
                analysis.graph.duration(*id).unwrap_or(0),
                analysis.ranks.get(id).copied().unwrap_or(0),
                analysis.earliest.get(id).copied().unwrap_or(0),
                analysis.latest.get(id).copied().unwrap_or(0),
                analysis.slack.get(id).copied().unwrap_or(0)
            )?;
        }
        Ok(())
    }
}

/// Numbered list of critical paths.
pub struct CriticalPathList<'a>(pub &'a Analysis);

impl fmt::Display for CriticalPathList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let paths = &self.0.critical_paths;
        if paths.is_empty() {
            return writeln!(f, "no critical path");
        }
        for (i, path) in paths.iter().enumerate() {
            writeln!(f, "{}. {}", i + 1, path)?;
        }
        Ok(())
    }
}

/// Everything above, separated by section headers.
pub struct FullReport<'a>(pub &'a Analysis);

impl fmt::Display for FullReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let analysis = self.0;
        writeln!(f, "== Edges")?;
        write!(f, "{}", EdgeList(&analysis.graph))?;
        writeln!(f, "\n== Adjacency matrix")?;
        write!(f, "{}", AdjacencyMatrix(&analysis.graph))?;
        writeln!(f, "\n== Schedule")?;
        write!(f, "{}", ScheduleTable(analysis))?;
        writeln!(f, "\n== Critical paths (project duration {})", analysis.project_duration())?;
        write!(f, "{}", CriticalPathList(analysis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::config::AnalysisConfig;
    use crate::models::Vertex;

    fn diamond() -> Graph {
        Graph::from_vertices(vec![
            Vertex::task(1, 3, &[]),
            Vertex::task(2, 2, &[1]),
            Vertex::task(3, 4, &[1]),
            Vertex::task(4, 1, &[2, 3]),
        ])
        .unwrap()
    }

    #[test]
    fn test_edge_list() {
        assert_eq!(
            EdgeList(&diamond()).to_string(),
            "1 -> 2 = 3\n1 -> 3 = 3\n2 -> 4 = 2\n3 -> 4 = 4\n"
        );
    }

    #[test]
    fn test_adjacency_matrix() {
        let expected = "  1 2 3 4\n\
                        1 * 3 3 *\n\
                        2 * * * 2\n\
                        3 * * * 4\n\
                        4 * * * *\n";
        assert_eq!(AdjacencyMatrix(&diamond()).to_string(), expected);
    }

    #[test]
    fn test_matrix_labels_fictitious_vertices() {
        let graph = crate::network::augment(
            &Graph::from_vertices(vec![Vertex::task(1, 2, &[]), Vertex::task(2, 1, &[])])
                .unwrap(),
        );
        let matrix = AdjacencyMatrix(&graph).to_string();
        let header = matrix.lines().next().unwrap();
        assert_eq!(header.split_whitespace().collect::<Vec<_>>(), vec!["start", "1", "2", "end"]);
    }

    #[test]
    fn test_schedule_table_and_paths() {
        let analysis = analyze(&diamond(), &AnalysisConfig::default()).unwrap();

        let table = ScheduleTable(&analysis).to_string();
        let rows: Vec<Vec<&str>> = table
            .lines()
            .skip(1)
            .map(|line| line.split_whitespace().collect())
            .collect();
        assert_eq!(rows[0], vec!["1", "3", "0", "0", "0", "0"]);
        assert_eq!(rows[1], vec!["2", "2", "1", "3", "5", "2"]);
        assert_eq!(rows[3], vec!["4", "1", "2", "7", "7", "0"]);

        assert_eq!(
            CriticalPathList(&analysis).to_string(),
            "1. 1 -> 3 -> 4 (7)\n"
        );

        let report = FullReport(&analysis).to_string();
        assert!(report.contains("== Critical paths (project duration 7)"));
    }

    #[test]
    fn test_empty_analysis() {
        let analysis = analyze(&Graph::default(), &AnalysisConfig::default()).unwrap();
        assert_eq!(CriticalPathList(&analysis).to_string(), "no critical path\n");
        assert_eq!(EdgeList(&analysis.graph).to_string(), "");
    }
}
