pub mod convolutional;

#[cfg(test)]
mod tracing_init;

pub use convolutional::{
    BitSink, BitWriter, BranchMetricTable, ConvolutionalError, DecisionHistory, HistoryConfig,
    Metric, PackedDistance, PathMetricStore, ProcessOutcome,
};
