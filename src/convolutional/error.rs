use snafu::Snafu;

/// Errors raised while sizing the decoder's buffers and tables.
///
/// These only come out of constructors. Once a component exists, a bad index
/// or a short slice is a programming error and panics instead.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum ConvolutionalError {
    /// State count must be a power of two, at least 2
    #[snafu(display("num_states must be a power of two >= 2, got {num_states}"))]
    NumStatesNotPowerOfTwo { num_states: usize },

    /// Traceback group length of zero would never emit a bit
    #[snafu(display("traceback_group_length must be non-zero"))]
    ZeroTracebackGroup,

    /// Renormalize interval of zero would never fire
    #[snafu(display("renormalize_interval must be non-zero"))]
    ZeroRenormalizeInterval,

    #[snafu(display("rate must be in 1..=8, got {rate}"))]
    InvalidRate { rate: usize },

    #[snafu(display("order must be in 2..=16, got {order}"))]
    InvalidOrder { order: usize },

    /// Output table does not cover every shift register state
    #[snafu(display("output table needs {expected} entries, got {actual}"))]
    TableTooShort { expected: usize, actual: usize },

    /// Output table entry is wider than `rate` bits
    #[snafu(display("output table entry {index} = {value:#x} does not fit in {rate} bits"))]
    OutputOutOfRange { index: usize, value: u32, rate: usize },
}
