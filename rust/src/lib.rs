//! Critical Path Method analysis of task precedence networks.
//!
//! Loads a constraint table, checks that it forms a DAG, adds fictitious
//! start/end vertices where needed, and computes ranks, earliest and latest
//! dates, slack and every critical path. The `rust` Python module wraps the
//! same pipeline.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::prelude::*;
use rustc_hash::FxHashMap;
use std::collections::HashMap;

pub mod analysis;
pub mod calendar;
mod config;
pub mod index;
pub mod loader;
pub mod logging;
mod models;
pub mod network;
pub mod report;
pub mod schedule;

pub use analysis::{analyze, Analysis, AnalysisError};
pub use calendar::{project_calendar, CalendarEntry, CalendarError};
pub use config::{AnalysisConfig, ConfigError, DurationPolicy};
pub use loader::{load_constraint_table, parse_constraint_table, LoadError};
pub use models::{Graph, GraphError, Vertex, VertexId};
pub use network::{augment, find_cycle, has_cycle, is_augmented, rank, CycleError};
pub use schedule::CriticalPath;

fn to_py_err(e: impl std::fmt::Display) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(e.to_string())
}

fn labelled<T: Copy>(map: &FxHashMap<VertexId, T>) -> HashMap<String, T> {
    map.iter().map(|(id, &v)| (id.to_string(), v)).collect()
}

/// Analysis results with vertices labelled as strings ("start", "end", or the task number).
#[pyclass(name = "AnalysisReport")]
#[derive(Clone, Debug)]
pub struct PyAnalysisReport {
    #[pyo3(get)]
    pub ranks: HashMap<String, u32>,
    #[pyo3(get)]
    pub earliest: HashMap<String, i64>,
    #[pyo3(get)]
    pub latest: HashMap<String, i64>,
    #[pyo3(get)]
    pub slack: HashMap<String, i64>,
    #[pyo3(get)]
    pub critical_paths: Vec<Vec<String>>,
    #[pyo3(get)]
    pub order: Vec<String>,
    #[pyo3(get)]
    pub project_duration: i64,
    /// Earliest start dates, filled only when the config has a project start.
    #[pyo3(get)]
    pub earliest_dates: HashMap<String, NaiveDate>,
    /// Latest start dates, filled only when the config has a project start.
    #[pyo3(get)]
    pub latest_dates: HashMap<String, NaiveDate>,
    /// Earliest finish dates (earliest start + duration).
    #[pyo3(get)]
    pub earliest_finish_dates: HashMap<String, NaiveDate>,
    /// Latest finish dates (latest start + duration).
    #[pyo3(get)]
    pub latest_finish_dates: HashMap<String, NaiveDate>,
    #[pyo3(get)]
    pub text: String,
}

impl PyAnalysisReport {
    fn build(analysis: &Analysis, project_start: Option<NaiveDate>) -> Result<Self, CalendarError> {
        let mut earliest_dates = HashMap::new();
        let mut latest_dates = HashMap::new();
        let mut earliest_finish_dates = HashMap::new();
        let mut latest_finish_dates = HashMap::new();
        if let Some(start) = project_start {
            for entry in project_calendar(analysis, start)? {
                let label = entry.vertex.to_string();
                earliest_dates.insert(label.clone(), entry.earliest_start);
                latest_dates.insert(label.clone(), entry.latest_start);
                earliest_finish_dates.insert(label.clone(), entry.earliest_finish);
                latest_finish_dates.insert(label, entry.latest_finish);
            }
        }

        Ok(Self {
            ranks: labelled(&analysis.ranks),
            earliest: labelled(&analysis.earliest),
            latest: labelled(&analysis.latest),
            slack: labelled(&analysis.slack),
            critical_paths: analysis
                .critical_paths
                .iter()
                .map(|path| path.vertices.iter().map(VertexId::to_string).collect())
                .collect(),
            order: analysis.order.iter().map(VertexId::to_string).collect(),
            project_duration: analysis.project_duration(),
            earliest_dates,
            latest_dates,
            earliest_finish_dates,
            latest_finish_dates,
            text: report::FullReport(analysis).to_string(),
        })
    }
}

#[pymethods]
impl PyAnalysisReport {
    fn __repr__(&self) -> String {
        format!(
            "AnalysisReport(vertices={}, project_duration={}, critical_paths={})",
            self.order.len(),
            self.project_duration,
            self.critical_paths.len()
        )
    }
}

/// Parse a constraint table and run the full analysis.
///
/// # Arguments
/// * `text` - Constraint table, one `<id> <duration> <predecessor>*` row per line
/// * `config` - Analysis configuration (defaults when omitted)
///
/// # Raises
/// * ValueError on malformed input, dangling references, cycles, or rejected negative durations
#[pyfunction]
#[pyo3(signature = (text, config=None))]
fn analyze_constraint_table(
    text: &str,
    config: Option<AnalysisConfig>,
) -> PyResult<PyAnalysisReport> {
    let config = config.unwrap_or_default();
    let graph = parse_constraint_table(text).map_err(to_py_err)?;
    let analysis = analyze(&graph, &config).map_err(to_py_err)?;
    PyAnalysisReport::build(&analysis, config.project_start).map_err(to_py_err)
}

/// Parse a constraint table and report whether it contains a dependency cycle.
#[pyfunction]
fn has_cycle_in_table(text: &str) -> PyResult<bool> {
    let graph = parse_constraint_table(text).map_err(to_py_err)?;
    Ok(has_cycle(&graph))
}

/// The cpm.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<AnalysisConfig>()?;
    m.add_class::<PyAnalysisReport>()?;

    m.add_function(wrap_pyfunction!(analyze_constraint_table, m)?)?;
    m.add_function(wrap_pyfunction!(has_cycle_in_table, m)?)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "1 3\n2 2 1\n3 4 1\n4 1 2 3\n";

    #[test]
    fn test_report_from_table() {
        let graph = parse_constraint_table(TABLE).unwrap();
        let analysis = analyze(&graph, &AnalysisConfig::default()).unwrap();
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let report = PyAnalysisReport::build(&analysis, Some(start)).unwrap();

        assert_eq!(report.slack.get("2"), Some(&2));
        assert_eq!(report.ranks.get("4"), Some(&2));
        assert_eq!(report.critical_paths, vec![vec!["1", "3", "4"]]);
        assert_eq!(report.order, vec!["1", "2", "3", "4"]);
        assert_eq!(report.project_duration, 7);
        assert_eq!(
            report.earliest_dates.get("4"),
            NaiveDate::from_ymd_opt(2025, 3, 8).as_ref()
        );
        assert_eq!(
            report.earliest_finish_dates.get("4"),
            NaiveDate::from_ymd_opt(2025, 3, 9).as_ref()
        );
        assert_eq!(
            report.latest_finish_dates.get("2"),
            NaiveDate::from_ymd_opt(2025, 3, 8).as_ref()
        );
        assert!(report.text.contains("1 -> 3 = 3"));
    }

    #[test]
    fn test_report_without_project_start() {
        let graph = parse_constraint_table("1 2\n2 3\n").unwrap();
        let analysis = analyze(&graph, &AnalysisConfig::default()).unwrap();
        let report = PyAnalysisReport::build(&analysis, None).unwrap();

        assert!(report.earliest_dates.is_empty());
        assert!(report.latest_finish_dates.is_empty());
        assert_eq!(report.earliest.get("end"), Some(&3));
        assert_eq!(report.critical_paths, vec![vec!["start", "2", "end"]]);
    }
}
