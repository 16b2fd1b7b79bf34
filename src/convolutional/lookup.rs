//! Pair lookup for branch metrics
//!
//! Shift register states `2i` and `2i + 1` differ only in the newest input
//! bit, so the decode loop always needs their branch metrics together. The
//! table concatenates the two `rate`-bit outputs of each such pair into one
//! `2 * rate`-bit value, deduplicates those values, and gives every even
//! state a key into the deduplicated table. Each step, `fill_distance` turns
//! per-symbol distances into one packed pair per key, so a single lookup
//! yields the metrics of both transitions.

use tracing::debug;

use super::config::{check_order, check_rate};
use super::error::ConvolutionalError;
use super::Metric;

/// Two 16-bit branch distances in one 32-bit word.
///
/// The low lane belongs to the state with the newest bit clear, the high lane
/// to the state with it set. Arithmetic is lane-wise and wraps per lane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PackedDistance(u32);

impl PackedDistance {
    pub const fn pack(low: Metric, high: Metric) -> Self {
        Self(((high as u32) << 16) | low as u32)
    }

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn low(self) -> Metric {
        self.0 as Metric
    }

    pub const fn high(self) -> Metric {
        (self.0 >> 16) as Metric
    }

    /// `(low, high)`
    pub const fn split(self) -> (Metric, Metric) {
        (self.low(), self.high())
    }

    pub fn wrapping_add(self, other: Self) -> Self {
        Self::pack(
            self.low().wrapping_add(other.low()),
            self.high().wrapping_add(other.high()),
        )
    }

    /// Add the same path metric to both lanes
    pub fn wrapping_add_metric(self, metric: Metric) -> Self {
        self.wrapping_add(Self::pack(metric, metric))
    }
}

#[derive(Debug, Clone)]
pub struct BranchMetricTable {
    rate: usize,
    order: usize,
    /// One key per even shift register state
    keys: Vec<usize>,
    /// Concatenated output pairs; slot 0 is reserved and never used
    outputs: Vec<u32>,
    output_mask: u32,
    distances: Vec<PackedDistance>,
}

impl BranchMetricTable {
    /// Build the table from `table`, the `rate`-bit encoder output for each of
    /// the `2^order` shift register states.
    pub fn new(rate: usize, order: usize, table: &[u32]) -> Result<Self, ConvolutionalError> {
        check_rate(rate)?;
        check_order(order)?;

        let num_registers = 1usize << order;
        if table.len() < num_registers {
            return Err(ConvolutionalError::TableTooShort {
                expected: num_registers,
                actual: table.len(),
            });
        }

        let output_mask = (1u32 << rate) - 1;
        if let Some((index, &value)) = table[..num_registers]
            .iter()
            .enumerate()
            .find(|&(_, &value)| value & !output_mask != 0)
        {
            return Err(ConvolutionalError::OutputOutOfRange { index, value, rate });
        }

        let num_keys = num_registers >> 1;
        let mut keys = Vec::with_capacity(num_keys);
        let mut outputs = vec![0u32];
        let mut inv_outputs: Vec<Option<usize>> = vec![None; 1 << (2 * rate)];

        for i in 0..num_keys {
            let concat_out = (table[i * 2 + 1] << rate) | table[i * 2];
            let key = *inv_outputs[concat_out as usize].get_or_insert_with(|| {
                outputs.push(concat_out);
                outputs.len() - 1
            });
            keys.push(key);
        }

        debug!(rate, order, outputs_len = outputs.len(), "built pair lookup");

        let distances = vec![PackedDistance::default(); outputs.len()];
        Ok(Self {
            rate,
            order,
            keys,
            outputs,
            output_mask,
            distances,
        })
    }

    pub fn rate(&self) -> usize {
        self.rate
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn num_keys(&self) -> usize {
        self.keys.len()
    }

    /// Used slots plus the reserved slot 0
    pub fn outputs_len(&self) -> usize {
        self.outputs.len()
    }

    /// Key of even state `2 * i`, passed as `i`
    pub fn get_key(&self, i: usize) -> usize {
        self.keys[i]
    }

    pub fn concatenated_output(&self, key: usize) -> u32 {
        self.outputs[key]
    }

    /// Symbols of the pair behind `key`: `(newest bit clear, newest bit set)`
    pub fn output_symbols(&self, key: usize) -> (usize, usize) {
        let concat_out = self.outputs[key];
        (
            (concat_out & self.output_mask) as usize,
            (concat_out >> self.rate) as usize,
        )
    }

    /// Refresh packed distances from one distance per received symbol value
    pub fn fill_distance(&mut self, distances: &[Metric]) {
        assert!(
            distances.len() >= 1 << self.rate,
            "need {} symbol distances, got {}",
            1 << self.rate,
            distances.len()
        );

        for key in 1..self.outputs.len() {
            let (i0, i1) = self.output_symbols(key);
            self.distances[key] = PackedDistance::pack(distances[i0], distances[i1]);
        }
    }

    pub fn get_distance(&self, key: usize) -> PackedDistance {
        self.distances[key]
    }
}
