//! Producer-side view of a byte stream.

use std::io;

use crate::error::StreamError;
use crate::stream::ByteStream;

/// The writer facet of a [`ByteStream`].
///
/// A push never blocks and never fails: whatever does not fit in the
/// available capacity is dropped, and the returned count tells the caller
/// how much was taken.
#[derive(Debug)]
pub struct Writer<'a> {
    stream: &'a mut ByteStream,
}

impl<'a> Writer<'a> {
    pub(crate) fn new(stream: &'a mut ByteStream) -> Self {
        Writer { stream }
    }

    /// Pushes as much of `data` as fits and returns the number of bytes accepted.
    ///
    /// Pushing to a closed or errored stream accepts nothing.
    pub fn push(&mut self, data: &[u8]) -> usize {
        self.stream.push_bytes(data)
    }

    /// Signals that nothing more will be pushed. Idempotent.
    pub fn close(&mut self) {
        self.stream.close();
    }

    /// Returns true once the stream has been closed.
    pub fn is_closed(&self) -> bool {
        self.stream.is_closed()
    }

    /// How many bytes can be pushed right now.
    pub fn available_capacity(&self) -> usize {
        self.stream.available_capacity()
    }

    /// Total bytes ever accepted.
    pub fn bytes_pushed(&self) -> u64 {
        self.stream.bytes_pushed()
    }

    /// Returns true once the stream has faulted.
    pub fn has_error(&self) -> bool {
        self.stream.has_error()
    }
}

/// `io::Write` semantics shared by [`Writer`] and [`crate::WriteHalf`].
pub(crate) fn write_io(stream: &mut ByteStream, data: &[u8]) -> io::Result<usize> {
    if stream.has_error() {
        return Err(StreamError::Errored.into());
    }
    if stream.is_closed() {
        return Err(StreamError::Closed.into());
    }
    if data.is_empty() {
        return Ok(0);
    }
    match stream.push_bytes(data) {
        0 => Err(io::ErrorKind::WouldBlock.into()),
        n => Ok(n),
    }
}

/// A full stream reports `WouldBlock`; a closed one reports `BrokenPipe`.
impl io::Write for Writer<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        write_io(self.stream, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
