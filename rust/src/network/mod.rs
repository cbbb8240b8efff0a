//! Structural analysis of the precedence network.
//!
//! Everything here runs before any date is computed: the acyclicity gate,
//! boundary augmentation, and the rank order that date propagation follows.

mod boundary;
mod cycle;
mod ranking;

pub use boundary::{augment, is_augmented};
pub use cycle::{find_cycle, has_cycle, CycleError};
pub use ranking::{compute_ranks, rank, Ranks};

pub(crate) use cycle::find_cycle_in;
