//! The composite analysis pipeline.
//!
//! validate durations -> cycle check -> augment -> rank -> earliest/latest ->
//! slack -> critical paths. Each stage reads the outputs of the previous ones
//! and produces fresh maps; nothing is cached between calls.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::config::{AnalysisConfig, ConfigError, DurationPolicy};
use crate::index::NetworkIndex;
use crate::models::{Graph, VertexId};
use crate::network::{augment, compute_ranks, find_cycle_in, CycleError};
use crate::schedule::{
    compute_slack, earliest_dates, find_critical_paths, latest_dates, project_end, CriticalPath,
};
use crate::{log_details, log_stages, log_warning};

/// Errors that abort an analysis. No partial schedule is returned with any of them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error(transparent)]
    CycleDetected(#[from] CycleError),
    #[error("Vertex {vertex} has negative duration {duration}")]
    NegativeDuration { vertex: VertexId, duration: i64 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("Total task duration exceeds {}", i64::MAX)]
    DurationOverflow,
}

/// Result of analysing one network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Analysis {
    /// The augmented graph every map below refers to.
    pub graph: Graph,
    pub ranks: FxHashMap<VertexId, u32>,
    pub earliest: FxHashMap<VertexId, i64>,
    pub latest: FxHashMap<VertexId, i64>,
    pub slack: FxHashMap<VertexId, i64>,
    pub critical_paths: Vec<CriticalPath>,
    /// Vertex ids sorted by `(rank, id)`.
    pub order: Vec<VertexId>,
}

impl Analysis {
    /// Minimum completion time: the latest date of the sink, 0 for an empty network.
    pub fn project_duration(&self) -> i64 {
        self.graph
            .sinks()
            .first()
            .and_then(|sink| self.latest.get(sink).copied())
            .unwrap_or(0)
    }

    /// Zero-slack vertices, sorted.
    pub fn critical_vertices(&self) -> Vec<VertexId> {
        let mut critical: Vec<VertexId> = self
            .slack
            .iter()
            .filter(|(_, &slack)| slack == 0)
            .map(|(&id, _)| id)
            .collect();
        critical.sort_unstable();
        critical
    }

    pub fn is_critical(&self, id: VertexId) -> bool {
        self.slack.get(&id) == Some(&0)
    }
}

/// Apply the negative duration policy, returning the graph to analyse.
fn check_durations(graph: &Graph, policy: DurationPolicy) -> Result<Graph, AnalysisError> {
    let mut negative: Vec<(VertexId, i64)> = graph
        .vertices()
        .filter(|v| v.duration < 0)
        .map(|v| (v.id, v.duration))
        .collect();
    if negative.is_empty() {
        return Ok(graph.clone());
    }
    negative.sort_unstable();

    match policy {
        DurationPolicy::Reject => {
            let (vertex, duration) = negative[0];
            Err(AnalysisError::NegativeDuration { vertex, duration })
        }
        DurationPolicy::Zero => {
            for (vertex, duration) in &negative {
                log_warning!("vertex {} has negative duration {}, using 0", vertex, duration);
            }
            Ok(graph.with_clamped_durations())
        }
    }
}

/// Every date and path length is bounded by the sum of the (non-negative)
/// durations, so the date passes cannot overflow once this sum fits.
fn check_total_duration(graph: &Graph) -> Result<i64, AnalysisError> {
    graph
        .vertices()
        .try_fold(0i64, |total, v| total.checked_add(v.duration))
        .ok_or(AnalysisError::DurationOverflow)
}

/// Run the full analysis on `graph`.
///
/// # Returns
/// * `Ok(Analysis)` with ranks, dates, slack and every critical path of the augmented graph
/// * `Err(AnalysisError::CycleDetected)` before any date is computed if the graph has a cycle
/// * `Err(AnalysisError::NegativeDuration)` under the `"reject"` policy
/// * `Err(AnalysisError::DurationOverflow)` if the durations sum past `i64::MAX`
pub fn analyze(graph: &Graph, config: &AnalysisConfig) -> Result<Analysis, AnalysisError> {
    let verbosity = config.verbosity;
    let policy = config.duration_policy()?;
    let graph = check_durations(graph, policy)?;
    let total = check_total_duration(&graph)?;
    log_details!(verbosity, "total duration {}", total);

    if let Some(cycle) = find_cycle_in(&NetworkIndex::new(&graph)) {
        log_stages!(verbosity, "cycle check failed: {:?}", cycle);
        return Err(CycleError { cycle }.into());
    }
    log_stages!(verbosity, "cycle check passed ({} vertices)", graph.len());

    let graph = augment(&graph);
    log_stages!(
        verbosity,
        "augmented network has {} vertices (source: {}, sink: {})",
        graph.len(),
        graph.contains(VertexId::Source),
        graph.contains(VertexId::Sink)
    );

    let index = NetworkIndex::new(&graph);
    let ranks = compute_ranks(&index)?;
    log_stages!(verbosity, "ranks computed (max rank {:?})", ranks.max_rank());

    let earliest = earliest_dates(&index, &ranks);
    let latest = latest_dates(&index, &ranks, &earliest);
    let slack = compute_slack(&index, &earliest, &latest);
    log_stages!(verbosity, "project end: {}", project_end(&earliest));

    for &slot in &ranks.order {
        log_details!(
            verbosity,
            "{}: rank {} earliest {} latest {} slack {}",
            index.id(slot),
            ranks.get(slot),
            earliest[slot],
            latest[slot],
            slack[slot]
        );
    }

    let critical_paths = find_critical_paths(&index, &earliest, &slack, verbosity);
    log_stages!(verbosity, "{} critical path(s)", critical_paths.len());

    Ok(Analysis {
        ranks: index.to_map(&ranks.values),
        earliest: index.to_map(&earliest),
        latest: index.to_map(&latest),
        slack: index.to_map(&slack),
        order: ranks.order.iter().map(|&slot| index.id(slot)).collect(),
        critical_paths,
        graph,
    })
}
