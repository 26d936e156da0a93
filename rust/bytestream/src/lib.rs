//! Flow-controlled, bounded byte stream.
//!
//! A [`ByteStream`] decouples a producer from a consumer through a fixed
//! in-memory ring of bytes. It enforces a capacity, delivers bytes in the
//! order they were accepted, and carries an explicit end-of-stream signal.
//!
//! # Facets
//!
//! The stream is driven through two views over the same storage:
//!
//! - [`Writer`]: push bytes up to the available capacity, close the stream
//! - [`Reader`]: peek at buffered bytes, pop a prefix, detect the end
//!
//! ```
//! use giztoy_bytestream::{ByteStream, StreamState};
//!
//! let mut stream = ByteStream::new(4);
//!
//! // Anything past the available capacity is dropped.
//! assert_eq!(stream.writer().push(b"hello"), 4);
//! assert_eq!(stream.available_capacity(), 0);
//!
//! stream.reader().pop(4).unwrap();
//! stream.writer().close();
//! assert_eq!(stream.state(), StreamState::Finished);
//! ```
//!
//! # Backpressure and Faults
//!
//! Nothing blocks. A short [`Writer::push`] is the backpressure signal;
//! callers consult [`Writer::available_capacity`] before pushing. Popping
//! more than [`Reader::bytes_buffered`] is a contract violation: the pop
//! fails, nothing is consumed, and the stream stays errored for good.
//!
//! ```
//! use giztoy_bytestream::{ByteStream, StreamError};
//!
//! let mut stream = ByteStream::new(8);
//! stream.writer().push(b"abc");
//!
//! let err = stream.reader().pop(5).unwrap_err();
//! assert_eq!(err, StreamError::PopOverrun { requested: 5, buffered: 3 });
//! assert!(stream.has_error());
//! assert_eq!(stream.bytes_popped(), 0);
//! ```
//!
//! # Sharing
//!
//! [`ByteStream::into_split`] turns a stream into a [`WriteHalf`] and a
//! [`ReadHalf`] that can live in different places. Both facets also
//! implement the `std::io` traits; an empty or full stream reports
//! [`std::io::ErrorKind::WouldBlock`].

mod config;
mod error;
mod reader;
mod split;
mod stream;
mod writer;

pub use config::{DEFAULT_CAPACITY, MAX_CAPACITY, StreamConfig};
pub use error::{Result, StreamError};
pub use reader::Reader;
pub use split::{ReadHalf, WriteHalf};
pub use stream::{ByteStream, StreamState};
pub use writer::Writer;
