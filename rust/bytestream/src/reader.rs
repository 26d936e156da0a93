//! Consumer-side view of a byte stream.

use std::io;

use crate::error::{Result, StreamError};
use crate::stream::ByteStream;

/// The reader facet of a [`ByteStream`].
///
/// [`Reader::peek`] exposes buffered bytes in place; [`Reader::pop`]
/// releases them. Popping more than is buffered is a contract violation
/// that permanently errors the stream.
///
/// # Example
///
/// ```
/// use giztoy_bytestream::ByteStream;
///
/// let mut stream = ByteStream::new(8);
/// stream.writer().push(b"abcdef");
/// stream.writer().close();
///
/// let mut out = Vec::new();
/// let mut reader = stream.reader();
/// assert_eq!(reader.drain_into(4, &mut out), 4);
/// assert_eq!(out, b"abcd");
/// assert_eq!(reader.drain_into(usize::MAX, &mut out), 2);
/// assert!(reader.is_finished());
/// ```
#[derive(Debug)]
pub struct Reader<'a> {
    stream: &'a mut ByteStream,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(stream: &'a mut ByteStream) -> Self {
        Reader { stream }
    }

    /// Returns the next contiguous run of buffered bytes without consuming it.
    ///
    /// When the buffered region wraps past the end of storage only the first
    /// segment is returned; pop it and peek again for the rest. The slice is
    /// empty when nothing is buffered or the stream has errored.
    pub fn peek(&self) -> &[u8] {
        self.stream.peek_bytes()
    }

    /// Consumes exactly `len` bytes.
    ///
    /// If fewer than `len` bytes are buffered nothing is consumed and the
    /// stream enters the error state.
    pub fn pop(&mut self, len: usize) -> Result<()> {
        self.stream.pop_bytes(len)
    }

    /// Moves up to `max_len` buffered bytes into `out`, across the wrap point.
    ///
    /// Returns the number of bytes appended.
    pub fn drain_into(&mut self, max_len: usize, out: &mut Vec<u8>) -> usize {
        drain(self.stream, max_len, out)
    }

    /// Returns true when the stream is closed and fully drained.
    pub fn is_finished(&self) -> bool {
        self.stream.is_finished()
    }

    /// Bytes pushed but not yet popped.
    pub fn bytes_buffered(&self) -> usize {
        self.stream.bytes_buffered()
    }

    /// Total bytes ever popped.
    pub fn bytes_popped(&self) -> u64 {
        self.stream.bytes_popped()
    }

    /// Returns true once the stream has faulted.
    pub fn has_error(&self) -> bool {
        self.stream.has_error()
    }
}

pub(crate) fn drain(stream: &mut ByteStream, max_len: usize, out: &mut Vec<u8>) -> usize {
    let mut moved = 0;
    while moved < max_len {
        let chunk = stream.peek_bytes();
        if chunk.is_empty() {
            break;
        }
        let n = chunk.len().min(max_len - moved);
        out.extend_from_slice(&chunk[..n]);
        // `n` is within the peeked run, so the pop cannot fault.
        let _ = stream.pop_bytes(n);
        moved += n;
    }
    moved
}

/// `BufRead::fill_buf` semantics shared by [`Reader`] and [`crate::ReadHalf`].
pub(crate) fn fill_io(stream: &ByteStream) -> io::Result<&[u8]> {
    if stream.has_error() {
        return Err(StreamError::Errored.into());
    }
    let chunk = stream.peek_bytes();
    if chunk.is_empty() && !stream.is_closed() {
        return Err(io::ErrorKind::WouldBlock.into());
    }
    Ok(chunk)
}

/// `io::Read` semantics shared by [`Reader`] and [`crate::ReadHalf`].
pub(crate) fn read_io(stream: &mut ByteStream, out: &mut [u8]) -> io::Result<usize> {
    if out.is_empty() {
        return Ok(0);
    }
    let chunk = fill_io(stream)?;
    let n = chunk.len().min(out.len());
    out[..n].copy_from_slice(&chunk[..n]);
    stream.pop_bytes(n)?;
    Ok(n)
}

/// Returns `Ok(0)` only once the stream is finished; an empty open stream
/// reports `WouldBlock`.
impl io::Read for Reader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        read_io(self.stream, buf)
    }
}

impl io::BufRead for Reader<'_> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        fill_io(self.stream)
    }

    fn consume(&mut self, amt: usize) {
        // An overrun is recorded in the stream's error flag.
        let _ = self.stream.pop_bytes(amt);
    }
}
