//! Viterbi decoder core for convolutional codes
//!
//! The three pieces a per-symbol decode loop drives each step:
//!
//! - [`BranchMetricTable`] turns per-symbol distances into packed branch
//!   metrics for pairs of shift register states.
//! - [`PathMetricStore`] holds last round's and this round's accumulated
//!   errors per state.
//! - [`DecisionHistory`] records which predecessor won for every state,
//!   renormalizes the metrics and traces back to emit decoded bits.
//!
//! One step reads branch metrics and the read side of the store, writes the
//! write side and the slice from [`DecisionHistory::get_slice`], swaps the
//! store, then calls [`DecisionHistory::process`] on the new read side. At
//! the end of a zero-terminated stream, [`DecisionHistory::flush`] emits
//! what is left.

mod bit_writer;
mod config;
mod error;
mod history;
mod lookup;
mod path_metric;

pub use bit_writer::{BitSink, BitWriter};
pub use config::{HistoryConfig, HARD_MAX_ERROR, SOFT_MAX_ERROR};
pub use error::ConvolutionalError;
pub use history::{DecisionHistory, ProcessOutcome};
pub use lookup::{BranchMetricTable, PackedDistance};
pub use path_metric::PathMetricStore;

/// Accumulated path error. Wraps on overflow and underflow.
pub type Metric = u16;
