// Error taxonomy shared by the one-shot accessors and the worker's error channel.

use crate::scanner::ValueFault;

/// Errors produced while sampling a data source.
///
/// Every variant names the data-source kind (`"mem"`, ...) so an entry read off
/// the error channel is self-describing.
#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    /// The source could not be opened or read.
    #[error("{kind}: {op} {target}: {error}")]
    Io {
        kind: &'static str,
        op: &'static str,
        target: String,
        #[source]
        error: std::io::Error,
    },

    /// A value token failed numeric conversion; the field was set to 0.
    #[error("{kind}: convert value of {label}: {fault}")]
    Parse {
        kind: &'static str,
        label: String,
        fault: ValueFault,
    },

    /// The source produced more lines than the scanner's upper bound.
    #[error("{kind}: more than {limit} lines, remaining content was not scanned")]
    LineLimitExceeded { kind: &'static str, limit: usize },

    #[error("{kind}: encode: {reason}")]
    Encode { kind: &'static str, reason: String },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// A buffer that is not a valid frame for the requested record type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("frame truncated: {len} bytes, need at least {need}")]
    Truncated { len: usize, need: usize },

    #[error("frame marker mismatch: expected {expected:?}, found {found:?}")]
    Marker { expected: [u8; 4], found: [u8; 4] },

    #[error("unsupported frame version {0}")]
    Version(u8),

    #[error("frame payload: {0}")]
    Payload(String),
}
