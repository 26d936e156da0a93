//! Error types for byte stream operations.

use std::io;

/// Result type alias for byte stream operations.
pub type Result<T> = std::result::Result<T, StreamError>;

/// Byte stream operation error.
///
/// Overrunning the writer is never an error (the excess is dropped), so
/// every variant here is either a construction problem or a reader-side
/// contract violation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    /// A stream was configured with zero capacity.
    #[error("byte stream: capacity must be greater than 0")]
    ZeroCapacity,

    /// The capacity's storage, sentinel slot included, cannot be allocated.
    #[error("byte stream: capacity {0} is too large")]
    CapacityTooLarge(usize),

    /// The writer has closed the stream.
    #[error("byte stream: closed")]
    Closed,

    /// A pop asked for more bytes than were buffered. The stream is now errored.
    #[error("byte stream: pop of {requested} bytes exceeds {buffered} buffered")]
    PopOverrun { requested: usize, buffered: usize },

    /// The stream entered the error state earlier.
    #[error("byte stream: errored")]
    Errored,
}

impl From<StreamError> for io::Error {
    fn from(e: StreamError) -> Self {
        let kind = match e {
            StreamError::ZeroCapacity
            | StreamError::CapacityTooLarge(_)
            | StreamError::PopOverrun { .. } => io::ErrorKind::InvalidInput,
            StreamError::Closed => io::ErrorKind::BrokenPipe,
            StreamError::Errored => io::ErrorKind::Other,
        };
        io::Error::new(kind, e)
    }
}
