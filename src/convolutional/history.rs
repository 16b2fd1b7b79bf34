//! Decision history and traceback
//!
//! Every step the decode loop records, for each shift register state, which
//! of the two predecessor states fed the surviving path. Those decisions are
//! kept in a circular buffer of `cap = min_traceback_length +
//! traceback_group_length` slices. Once the buffer is full, traceback walks
//! the decisions backward from the best state. The newest
//! `min_traceback_length` steps only let the path converge; the older steps
//! are emitted as decoded bits.
//!
//! The same step also renormalizes the path metrics every
//! `renormalize_interval` steps so the 16-bit accumulators never run away.

use tracing::{debug, trace};

use super::bit_writer::BitSink;
use super::config::{check_num_states, HistoryConfig};
use super::error::ConvolutionalError;
use super::Metric;

/// What a call to [`DecisionHistory::process_skip`] ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Neither renormalization nor traceback was due
    Idle,
    /// Metrics renormalized, buffer not yet full
    Renormalized,
    /// Both were due; one state search served both
    RenormalizedAndTraced,
    /// Buffer full, metrics left alone
    Traced,
}

#[derive(Debug, Clone)]
pub struct DecisionHistory {
    min_traceback_length: usize,
    traceback_group_length: usize,
    cap: usize,
    num_states: usize,
    /// Shifted into the state on every backward step
    highbit: usize,
    /// `cap` slices of `num_states` decisions each, slice-major
    history: Vec<u8>,
    /// Next slice to be written
    index: usize,
    /// Valid, not yet traced slices
    len: usize,
    /// Scratch space for bits collected during traceback
    fetched: Vec<u8>,
    renormalize_interval: usize,
    renormalize_counter: usize,
}

impl DecisionHistory {
    pub fn new(num_states: usize, config: HistoryConfig) -> Result<Self, ConvolutionalError> {
        check_num_states(num_states)?;
        config.validate()?;

        let cap = config.cap();
        debug!(
            num_states,
            cap,
            min_traceback_length = config.min_traceback_length,
            renormalize_interval = config.renormalize_interval,
            "allocating decision history"
        );

        Ok(Self {
            min_traceback_length: config.min_traceback_length,
            traceback_group_length: config.traceback_group_length,
            cap,
            num_states,
            highbit: num_states >> 1,
            history: vec![0; cap * num_states],
            index: 0,
            len: 0,
            fetched: vec![0; cap],
            renormalize_interval: config.renormalize_interval,
            renormalize_counter: 0,
        })
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn highbit(&self) -> usize {
        self.highbit
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.cap
    }

    /// Slot the next call to [`get_slice`](Self::get_slice) returns
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn min_traceback_length(&self) -> usize {
        self.min_traceback_length
    }

    pub fn traceback_group_length(&self) -> usize {
        self.traceback_group_length
    }

    pub fn renormalize_interval(&self) -> usize {
        self.renormalize_interval
    }

    /// Stored decision for `state` in circular slot `slot`
    pub fn decision(&self, slot: usize, state: usize) -> u8 {
        assert!(slot < self.cap, "slot {slot} out of range for cap {}", self.cap);
        assert!(state < self.num_states, "state {state} out of range");
        self.history[slot * self.num_states + state]
    }

    /// Forget all decisions. Storage is kept.
    pub fn reset(&mut self) {
        debug!(discarded = self.len, "resetting decision history");
        self.len = 0;
        self.index = 0;
        self.renormalize_counter = 0;
    }

    /// Decisions for the step being decoded, one byte per state.
    ///
    /// The slice is committed by the next [`process`](Self::process).
    pub fn get_slice(&mut self) -> &mut [u8] {
        let start = self.index * self.num_states;
        &mut self.history[start..start + self.num_states]
    }

    /// State with the least accumulated error among `0, search_every,
    /// 2 * search_every, ...`. Ties go to the lowest state, whatever the
    /// metric value, including ties at or above 0x8000.
    pub fn search(&self, distances: &[Metric], search_every: usize) -> usize {
        assert!(search_every > 0, "search_every must be non-zero");
        assert!(distances.len() >= self.num_states, "need one distance per state");

        // Widened so that a lone 0xFFFF still beats the sentinel
        let mut least_error = i32::MAX;
        let mut best_state = 0;
        for state in (0..self.num_states).step_by(search_every) {
            let error = i32::from(distances[state]);
            if error < least_error {
                least_error = error;
                best_state = state;
            }
        }
        best_state
    }

    /// Subtract the error of `min_state` from every state, wrapping
    pub fn renormalize(&self, distances: &mut [Metric], min_state: usize) {
        let min_distance = distances[min_state];
        for distance in distances[..self.num_states].iter_mut() {
            *distance = distance.wrapping_sub(min_distance);
        }
    }

    /// Walk the history backward from `best_state`, emitting every step
    /// older than `min_traceback_length` into `output`.
    pub fn traceback<S: BitSink + ?Sized>(
        &mut self,
        mut best_state: usize,
        min_traceback_length: usize,
        output: &mut S,
    ) {
        assert!(best_state < self.num_states, "state {best_state} out of range");

        let mut slot = self.index;
        let mut fetched = 0;

        for step in 0..self.len.max(min_traceback_length) {
            slot = if slot == 0 { self.cap - 1 } else { slot - 1 };

            // Going back in time, so high order bits shift in
            let decision = self.history[slot * self.num_states + best_state];
            let path_bit = if decision != 0 { self.highbit } else { 0 };
            best_state = (best_state | path_bit) >> 1;

            if step >= min_traceback_length {
                self.fetched[fetched] = u8::from(path_bit != 0);
                fetched += 1;
            }
        }

        trace!(best_state, fetched, len = self.len, "traceback");
        if tracing::enabled!(tracing::Level::TRACE) {
            let bits: String = self.fetched[..fetched]
                .iter()
                .rev()
                .map(|&bit| if bit != 0 { '1' } else { '0' })
                .collect();
            trace!(%bits, "traceback emitted");
        }
        output.write_bitlist_reversed(&self.fetched[..fetched]);
        self.len -= fetched;
    }

    /// Commit the current slice and renormalize or trace back as due.
    ///
    /// `skip` is the stride of the best state search, for codes that only
    /// need every `skip`-th state considered.
    pub fn process_skip<S: BitSink + ?Sized>(
        &mut self,
        distances: &mut [Metric],
        output: &mut S,
        skip: usize,
    ) -> ProcessOutcome {
        self.index += 1;
        if self.index == self.cap {
            self.index = 0;
        }

        self.renormalize_counter += 1;
        self.len += 1;

        if self.renormalize_counter == self.renormalize_interval {
            self.renormalize_counter = 0;
            let best_state = self.search(distances, skip);
            trace!(best_state, min_error = distances[best_state], "renormalize");
            self.renormalize(distances, best_state);

            if self.len == self.cap {
                // Reuse the search done for renormalizing
                self.traceback(best_state, self.min_traceback_length, output);
                ProcessOutcome::RenormalizedAndTraced
            } else {
                ProcessOutcome::Renormalized
            }
        } else if self.len == self.cap {
            let best_state = self.search(distances, skip);
            self.traceback(best_state, self.min_traceback_length, output);
            ProcessOutcome::Traced
        } else {
            ProcessOutcome::Idle
        }
    }

    pub fn process<S: BitSink + ?Sized>(
        &mut self,
        distances: &mut [Metric],
        output: &mut S,
    ) -> ProcessOutcome {
        self.process_skip(distances, output, 1)
    }

    /// Emit every remaining decision, tracing back from state 0.
    ///
    /// The encoder must have terminated the stream by shifting zeros through
    /// its register, otherwise the final state is not 0 and the last bits
    /// come out wrong.
    pub fn flush<S: BitSink + ?Sized>(&mut self, output: &mut S) {
        self.traceback(0, 0, output);
    }
}
