//! Sizing parameters for the decision history

use super::error::ConvolutionalError;
use super::Metric;

/// Largest per-symbol distance produced by a hard-decision decode loop
pub const HARD_MAX_ERROR: usize = 1;

/// Largest per-symbol distance produced by a soft-decision decode loop
pub const SOFT_MAX_ERROR: usize = 255;

/// How much history to keep and how often to renormalize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Entries must be at least this old before they are decoded
    pub min_traceback_length: usize,
    /// Number of bits emitted per traceback burst
    pub traceback_group_length: usize,
    /// Steps between path metric renormalizations
    pub renormalize_interval: usize,
}

impl HistoryConfig {
    /// Standard history sizing for a code of the given `rate` and `order`.
    ///
    /// The traceback looks back `5 * order` steps before trusting a path and
    /// emits `15 * order` bits per burst. Metrics are renormalized before the
    /// worst-case growth per step, `rate * max_error`, could exhaust 16 bits.
    pub fn for_code(rate: usize, order: usize, soft: bool) -> Result<Self, ConvolutionalError> {
        check_rate(rate)?;
        check_order(order)?;

        let max_error = if soft { SOFT_MAX_ERROR } else { HARD_MAX_ERROR };

        Ok(Self {
            min_traceback_length: 5 * order,
            traceback_group_length: 15 * order,
            renormalize_interval: usize::from(Metric::MAX) / (rate * max_error),
        })
    }

    /// Total number of slices held by the circular buffer
    pub fn cap(&self) -> usize {
        self.min_traceback_length + self.traceback_group_length
    }

    pub fn validate(&self) -> Result<(), ConvolutionalError> {
        if self.traceback_group_length == 0 {
            return Err(ConvolutionalError::ZeroTracebackGroup);
        }
        if self.renormalize_interval == 0 {
            return Err(ConvolutionalError::ZeroRenormalizeInterval);
        }
        Ok(())
    }
}

impl Default for HistoryConfig {
    /// Rate 1/2, constraint length 7, hard decisions
    fn default() -> Self {
        Self {
            min_traceback_length: 5 * 7,
            traceback_group_length: 15 * 7,
            renormalize_interval: usize::from(Metric::MAX) / (2 * HARD_MAX_ERROR),
        }
    }
}

pub(crate) fn check_num_states(num_states: usize) -> Result<(), ConvolutionalError> {
    if num_states < 2 || !num_states.is_power_of_two() {
        return Err(ConvolutionalError::NumStatesNotPowerOfTwo { num_states });
    }
    Ok(())
}

pub(crate) fn check_rate(rate: usize) -> Result<(), ConvolutionalError> {
    if !(1..=8).contains(&rate) {
        return Err(ConvolutionalError::InvalidRate { rate });
    }
    Ok(())
}

pub(crate) fn check_order(order: usize) -> Result<(), ConvolutionalError> {
    if !(2..=16).contains(&order) {
        return Err(ConvolutionalError::InvalidOrder { order });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_k7_hard() {
        let config = HistoryConfig::default();
        assert_eq!(config, HistoryConfig::for_code(2, 7, false).unwrap());
        assert_eq!(config.min_traceback_length, 35);
        assert_eq!(config.traceback_group_length, 105);
        assert_eq!(config.renormalize_interval, 32767);
        assert_eq!(config.cap(), 140);
    }

    #[test]
    fn test_soft_interval_is_shorter() {
        let hard = HistoryConfig::for_code(3, 9, false).unwrap();
        let soft = HistoryConfig::for_code(3, 9, true).unwrap();
        assert_eq!(soft.renormalize_interval, 65535 / (3 * 255));
        assert!(soft.renormalize_interval < hard.renormalize_interval);
    }

    #[test]
    fn test_for_code_rejects_bad_parameters() {
        assert_eq!(
            HistoryConfig::for_code(0, 7, false),
            Err(ConvolutionalError::InvalidRate { rate: 0 })
        );
        assert_eq!(
            HistoryConfig::for_code(2, 1, false),
            Err(ConvolutionalError::InvalidOrder { order: 1 })
        );
    }

    #[test]
    fn test_validate() {
        let mut config = HistoryConfig::default();
        assert!(config.validate().is_ok());

        config.traceback_group_length = 0;
        assert_eq!(config.validate(), Err(ConvolutionalError::ZeroTracebackGroup));

        config.traceback_group_length = 3;
        config.renormalize_interval = 0;
        assert_eq!(config.validate(), Err(ConvolutionalError::ZeroRenormalizeInterval));
    }

    #[test]
    fn test_check_num_states() {
        assert!(check_num_states(2).is_ok());
        assert!(check_num_states(64).is_ok());
        assert!(check_num_states(0).is_err());
        assert!(check_num_states(1).is_err());
        assert!(check_num_states(12).is_err());
    }
}
