//! Circular byte storage shared by the writer and reader facets.

use std::fmt;

use tracing::{debug, trace, warn};

use crate::config::{DEFAULT_CAPACITY, MAX_CAPACITY, StreamConfig};
use crate::error::{Result, StreamError};
use crate::reader::Reader;
use crate::writer::Writer;

/// Lifecycle of a [`ByteStream`], derived from its flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamState {
    /// The writer may still push.
    Open,
    /// The writer has closed; bytes remain to be read.
    Closed,
    /// Closed and fully drained.
    Finished,
    /// A reader-side contract violation faulted the stream.
    Errored,
}

/// A bounded, flow-controlled byte stream.
///
/// `ByteStream` owns a fixed ring of `capacity + 1` byte slots. The extra
/// slot is never filled, so `write_idx == read_idx` always means empty and
/// a full ring leaves exactly one gap before the read position.
///
/// The producer side is reached through [`ByteStream::writer`] and the
/// consumer side through [`ByteStream::reader`]. Queries are also available
/// directly on `&ByteStream`.
///
/// # Example
///
/// ```
/// use giztoy_bytestream::ByteStream;
///
/// let mut stream = ByteStream::new(4);
/// assert_eq!(stream.writer().push(b"hello"), 4);
/// assert_eq!(stream.reader().peek(), b"hell");
///
/// stream.reader().pop(2).unwrap();
/// stream.writer().close();
/// assert_eq!(stream.bytes_buffered(), 2);
/// assert!(!stream.is_finished());
/// ```
pub struct ByteStream {
    buf: Box<[u8]>,
    write_idx: usize,
    read_idx: usize,
    closed: bool,
    errored: bool,
    pushed: u64,
    popped: u64,
    label: Option<String>,
}

impl ByteStream {
    /// Creates a stream that buffers at most `capacity` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 or above [`MAX_CAPACITY`]. Use [`ByteStream::try_new`]
    /// to get an error instead.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be greater than 0");
        assert!(capacity <= MAX_CAPACITY, "capacity is too large");
        Self::build(capacity, None)
    }

    /// Creates a stream, rejecting unusable capacities.
    pub fn try_new(capacity: usize) -> Result<Self> {
        Self::with_config(StreamConfig::new(capacity))
    }

    /// Creates a stream from a config.
    pub fn with_config(config: StreamConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config.capacity, config.label))
    }

    fn build(capacity: usize, label: Option<String>) -> Self {
        ByteStream {
            buf: vec![0u8; capacity + 1].into_boxed_slice(),
            write_idx: 0,
            read_idx: 0,
            closed: false,
            errored: false,
            pushed: 0,
            popped: 0,
            label,
        }
    }

    /// Returns the writer facet.
    pub fn writer(&mut self) -> Writer<'_> {
        Writer::new(self)
    }

    /// Returns the reader facet.
    pub fn reader(&mut self) -> Reader<'_> {
        Reader::new(self)
    }

    /// Maximum number of buffered-but-unread bytes.
    pub fn capacity(&self) -> usize {
        self.buf.len() - 1
    }

    /// The label from the stream's config, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Bytes pushed but not yet popped.
    pub fn bytes_buffered(&self) -> usize {
        let slots = self.buf.len();
        (self.write_idx + slots - self.read_idx) % slots
    }

    /// How many bytes a push can accept right now.
    pub fn available_capacity(&self) -> usize {
        let slots = self.buf.len();
        (slots - self.write_idx + self.read_idx - 1) % slots
    }

    /// Total bytes ever accepted by push.
    pub fn bytes_pushed(&self) -> u64 {
        self.pushed
    }

    /// Total bytes ever popped.
    pub fn bytes_popped(&self) -> u64 {
        self.popped
    }

    /// Returns true once the writer has closed the stream.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns true when the stream is closed and fully drained.
    pub fn is_finished(&self) -> bool {
        self.closed && self.write_idx == self.read_idx
    }

    /// Returns true once the stream has faulted.
    pub fn has_error(&self) -> bool {
        self.errored
    }

    /// Current lifecycle state. `Errored` takes precedence.
    pub fn state(&self) -> StreamState {
        if self.errored {
            StreamState::Errored
        } else if self.is_finished() {
            StreamState::Finished
        } else if self.closed {
            StreamState::Closed
        } else {
            StreamState::Open
        }
    }

    /// Moves the stream into the terminal error state.
    pub fn set_error(&mut self) {
        if self.errored {
            return;
        }
        self.errored = true;
        debug!(label = ?self.label, "byte stream: error set");
    }

    /// Copies the longest prefix of `data` that fits and returns its length.
    pub(crate) fn push_bytes(&mut self, data: &[u8]) -> usize {
        if self.errored || self.closed {
            debug!(
                label = ?self.label,
                len = data.len(),
                closed = self.closed,
                errored = self.errored,
                "byte stream: push ignored"
            );
            return 0;
        }

        let n = data.len().min(self.available_capacity());
        let slots = self.buf.len();

        // At most two segments: up to the physical end, then from slot 0.
        let head = n.min(slots - self.write_idx);
        self.buf[self.write_idx..self.write_idx + head].copy_from_slice(&data[..head]);
        self.buf[..n - head].copy_from_slice(&data[head..n]);

        self.write_idx = (self.write_idx + n) % slots;
        self.pushed += n as u64;

        if n < data.len() {
            trace!(
                label = ?self.label,
                offered = data.len(),
                accepted = n,
                "byte stream: push truncated"
            );
        }
        n
    }

    /// The contiguous run of buffered bytes starting at the read position.
    pub(crate) fn peek_bytes(&self) -> &[u8] {
        if self.errored {
            return &[];
        }
        let len = self.bytes_buffered();
        let contig = len.min(self.buf.len() - self.read_idx);
        &self.buf[self.read_idx..self.read_idx + contig]
    }

    /// Consumes exactly `len` bytes or faults the stream.
    pub(crate) fn pop_bytes(&mut self, len: usize) -> Result<()> {
        if self.errored {
            return Err(StreamError::Errored);
        }

        let buffered = self.bytes_buffered();
        if len > buffered {
            self.errored = true;
            warn!(
                label = ?self.label,
                requested = len,
                buffered,
                "byte stream: pop past buffered data, stream errored"
            );
            return Err(StreamError::PopOverrun {
                requested: len,
                buffered,
            });
        }

        self.read_idx = (self.read_idx + len) % self.buf.len();
        self.popped += len as u64;
        Ok(())
    }

    pub(crate) fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        debug!(
            label = ?self.label,
            pushed = self.pushed,
            buffered = self.bytes_buffered(),
            "byte stream: closed"
        );
    }
}

impl Default for ByteStream {
    /// A stream of [`DEFAULT_CAPACITY`] bytes.
    fn default() -> Self {
        Self::build(DEFAULT_CAPACITY, None)
    }
}

impl fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteStream")
            .field("label", &self.label)
            .field("capacity", &self.capacity())
            .field("buffered", &self.bytes_buffered())
            .field("pushed", &self.pushed)
            .field("popped", &self.popped)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_accounting(s: &ByteStream) {
        assert!(s.bytes_buffered() <= s.capacity());
        assert_eq!(s.available_capacity() + s.bytes_buffered(), s.capacity());
        assert_eq!(
            s.bytes_pushed() - s.bytes_popped(),
            s.bytes_buffered() as u64
        );
    }

    #[test]
    fn test_new_stream_is_empty() {
        let s = ByteStream::new(8);
        assert_eq!(s.capacity(), 8);
        assert_eq!(s.bytes_buffered(), 0);
        assert_eq!(s.available_capacity(), 8);
        assert_eq!(s.state(), StreamState::Open);
        assert!(s.peek_bytes().is_empty());
        assert_accounting(&s);
    }

    #[test]
    #[should_panic(expected = "capacity must be greater than 0")]
    fn test_zero_capacity_panics() {
        ByteStream::new(0);
    }

    #[test]
    fn test_try_new_rejects_zero() {
        assert_eq!(
            ByteStream::try_new(0).unwrap_err(),
            StreamError::ZeroCapacity
        );
        assert_eq!(ByteStream::try_new(3).unwrap().capacity(), 3);
    }

    #[test]
    fn test_try_new_rejects_oversized() {
        let huge = isize::MAX as usize;
        assert_eq!(
            ByteStream::try_new(huge).unwrap_err(),
            StreamError::CapacityTooLarge(huge)
        );

        let config = StreamConfig::new(usize::MAX - 1);
        assert_eq!(
            ByteStream::with_config(config).unwrap_err(),
            StreamError::CapacityTooLarge(usize::MAX - 1)
        );
    }

    #[test]
    #[should_panic(expected = "capacity is too large")]
    fn test_oversized_capacity_panics() {
        ByteStream::new(isize::MAX as usize);
    }

    #[test]
    fn test_with_config_label() {
        let s = ByteStream::with_config(StreamConfig::new(2).with_label("inbound")).unwrap();
        assert_eq!(s.capacity(), 2);
        assert_eq!(s.label(), Some("inbound"));
    }

    #[test]
    fn test_default_capacity() {
        assert_eq!(ByteStream::default().capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_sentinel_slot_caps_buffer() {
        let mut s = ByteStream::new(3);
        assert_eq!(s.push_bytes(b"abcd"), 3);
        assert_eq!(s.bytes_buffered(), 3);
        assert_eq!(s.available_capacity(), 0);
        assert_ne!(s.write_idx, s.read_idx);
        assert_eq!(s.push_bytes(b"x"), 0);
        assert_accounting(&s);
    }

    #[test]
    fn test_capacity_one() {
        let mut s = ByteStream::new(1);
        for b in 0u8..10 {
            assert_eq!(s.push_bytes(&[b, b]), 1);
            assert_eq!(s.peek_bytes(), &[b]);
            s.pop_bytes(1).unwrap();
            assert_accounting(&s);
        }
        assert_eq!(s.bytes_pushed(), 10);
    }

    #[test]
    fn test_push_splits_across_wrap() {
        let mut s = ByteStream::new(4);
        s.push_bytes(b"abc");
        s.pop_bytes(3).unwrap();
        // write_idx = 3 of 5 slots; "wxyz" lands in slots 3, 4, 0, 1.
        assert_eq!(s.push_bytes(b"wxyz"), 4);
        assert_eq!(s.write_idx, 2);
        assert_eq!(s.peek_bytes(), b"wx");
        s.pop_bytes(2).unwrap();
        assert_eq!(s.peek_bytes(), b"yz");
        assert_accounting(&s);
    }

    #[test]
    fn test_pop_overrun_faults() {
        let mut s = ByteStream::new(4);
        s.push_bytes(b"abc");
        assert_eq!(
            s.pop_bytes(5),
            Err(StreamError::PopOverrun {
                requested: 5,
                buffered: 3
            })
        );
        assert!(s.has_error());
        assert_eq!(s.bytes_popped(), 0);
        assert_eq!(s.bytes_buffered(), 3);
        assert_eq!(s.state(), StreamState::Errored);
    }

    #[test]
    fn test_errored_stream_is_inert() {
        let mut s = ByteStream::new(4);
        s.push_bytes(b"ab");
        s.set_error();
        s.set_error();

        assert_eq!(s.push_bytes(b"cd"), 0);
        assert_eq!(s.bytes_pushed(), 2);
        assert!(s.peek_bytes().is_empty());
        assert_eq!(s.pop_bytes(1), Err(StreamError::Errored));
        assert_eq!(s.bytes_popped(), 0);

        s.close();
        assert!(s.is_closed());
        assert_eq!(s.state(), StreamState::Errored);
    }

    #[test]
    fn test_state_transitions() {
        let mut s = ByteStream::new(4);
        s.push_bytes(b"ab");
        assert_eq!(s.state(), StreamState::Open);
        s.close();
        assert_eq!(s.state(), StreamState::Closed);
        s.pop_bytes(2).unwrap();
        assert_eq!(s.state(), StreamState::Finished);
    }

    #[test]
    fn test_close_empty_is_finished() {
        let mut s = ByteStream::new(4);
        assert!(!s.is_finished());
        s.close();
        assert!(s.is_finished());
    }

    #[test]
    fn test_debug_omits_storage() {
        let mut s = ByteStream::with_config(StreamConfig::new(4).with_label("dbg")).unwrap();
        s.push_bytes(b"zz");
        let out = format!("{:?}", s);
        assert!(out.contains("\"dbg\""));
        assert!(out.contains("buffered: 2"));
        assert!(!out.contains("buf:"));
    }
}
