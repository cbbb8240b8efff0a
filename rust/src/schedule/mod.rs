//! Date propagation, slack, and critical path enumeration.
//!
//! All functions work on slot-indexed vectors of a [`NetworkIndex`](crate::index::NetworkIndex)
//! and expect an acyclic graph with precomputed [`Ranks`](crate::network::Ranks).

mod critical;
mod dates;
mod slack;

pub use critical::{find_critical_paths, CriticalPath};
pub use dates::{earliest_dates, latest_dates, project_end};
pub use slack::compute_slack;
