//! Double-buffered path metrics
//!
//! One buffer holds the accumulated errors from the last round (the read
//! side), the other receives this round's errors as the decode loop computes
//! them (the write side). `swap` flips the roles once a round is complete.

use tracing::debug;

use super::config::check_num_states;
use super::error::ConvolutionalError;
use super::Metric;

#[derive(Debug, Clone)]
pub struct PathMetricStore {
    errors: [Vec<Metric>; 2],
    /// Which buffer is the read side, 0 or 1
    index: usize,
}

impl PathMetricStore {
    pub fn new(num_states: usize) -> Result<Self, ConvolutionalError> {
        check_num_states(num_states)?;
        debug!(num_states, "allocating path metric store");

        Ok(Self {
            errors: [vec![0; num_states], vec![0; num_states]],
            index: 0,
        })
    }

    pub fn num_states(&self) -> usize {
        self.errors[0].len()
    }

    /// Zero both rounds and make buffer 0 the read side
    pub fn reset(&mut self) {
        debug!(num_states = self.num_states(), "resetting path metrics");
        self.errors[0].fill(0);
        self.errors[1].fill(0);
        self.index = 0;
    }

    pub fn swap(&mut self) {
        self.index ^= 1;
    }

    /// Accumulated error of `state` from the last round
    pub fn read_error(&self, state: usize) -> Metric {
        self.errors[self.index][state]
    }

    pub fn set_read_error(&mut self, state: usize, error: Metric) {
        self.errors[self.index][state] = error;
    }

    /// Accumulated error of `state` for the round being computed
    pub fn write_error(&self, state: usize) -> Metric {
        self.errors[self.index ^ 1][state]
    }

    pub fn set_write_error(&mut self, state: usize, error: Metric) {
        self.errors[self.index ^ 1][state] = error;
    }

    pub fn read_errors(&self) -> &[Metric] {
        &self.errors[self.index]
    }

    /// Mutable view of the last round, as needed by renormalization
    pub fn read_errors_mut(&mut self) -> &mut [Metric] {
        &mut self.errors[self.index]
    }

    /// The whole round being computed, for bulk update
    pub fn write_errors(&mut self) -> &mut [Metric] {
        &mut self.errors[self.index ^ 1]
    }

    /// Both rounds at once: `(read, write)`
    pub fn buffers_mut(&mut self) -> (&[Metric], &mut [Metric]) {
        let [first, second] = &mut self.errors;
        if self.index == 0 {
            (first.as_slice(), second.as_mut_slice())
        } else {
            (second.as_slice(), first.as_mut_slice())
        }
    }
}
