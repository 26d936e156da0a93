//! Owned writer/reader handles over one shared stream.

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::reader::{drain, read_io};
use crate::stream::ByteStream;
use crate::writer::write_io;

impl ByteStream {
    /// Splits the stream into owned write and read handles.
    ///
    /// Both handles share the same storage behind a lock, so they can be
    /// moved to different owners or threads. Neither handle ever waits for
    /// the other to make progress. Dropping the [`WriteHalf`] closes the stream.
    ///
    /// # Example
    ///
    /// ```
    /// use giztoy_bytestream::ByteStream;
    ///
    /// let (mut tx, rx) = ByteStream::new(16).into_split();
    /// tx.push(b"ping");
    /// drop(tx);
    ///
    /// let mut out = Vec::new();
    /// rx.drain_into(usize::MAX, &mut out);
    /// assert_eq!(out, b"ping");
    /// assert!(rx.is_finished());
    /// ```
    pub fn into_split(self) -> (WriteHalf, ReadHalf) {
        let inner = Arc::new(Mutex::new(self));
        (
            WriteHalf {
                inner: Arc::clone(&inner),
            },
            ReadHalf { inner },
        )
    }
}

/// The owned producer handle returned by [`ByteStream::into_split`].
#[derive(Debug)]
pub struct WriteHalf {
    inner: Arc<Mutex<ByteStream>>,
}

impl WriteHalf {
    /// Pushes as much of `data` as fits and returns the number of bytes accepted.
    pub fn push(&mut self, data: &[u8]) -> usize {
        self.inner.lock().push_bytes(data)
    }

    /// Signals that nothing more will be pushed. Idempotent.
    pub fn close(&mut self) {
        self.inner.lock().close();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().is_closed()
    }

    pub fn available_capacity(&self) -> usize {
        self.inner.lock().available_capacity()
    }

    pub fn bytes_pushed(&self) -> u64 {
        self.inner.lock().bytes_pushed()
    }

    pub fn has_error(&self) -> bool {
        self.inner.lock().has_error()
    }
}

impl io::Write for WriteHalf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        write_io(&mut self.inner.lock(), buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for WriteHalf {
    fn drop(&mut self) {
        self.inner.lock().close();
    }
}

/// The owned consumer handle returned by [`ByteStream::into_split`].
#[derive(Debug)]
pub struct ReadHalf {
    inner: Arc<Mutex<ByteStream>>,
}

impl ReadHalf {
    /// Calls `f` with the next contiguous run of buffered bytes.
    ///
    /// The stream stays locked while `f` runs and the lock is not reentrant:
    /// calling back into this handle or the [`WriteHalf`] from inside `f`
    /// deadlocks. Return what you need from `f` and act on it afterwards.
    pub fn peek_with<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        let stream = self.inner.lock();
        f(stream.peek_bytes())
    }

    /// Consumes exactly `len` bytes or errors the stream.
    pub fn pop(&self, len: usize) -> Result<()> {
        self.inner.lock().pop_bytes(len)
    }

    /// Moves up to `max_len` buffered bytes into `out`.
    pub fn drain_into(&self, max_len: usize, out: &mut Vec<u8>) -> usize {
        drain(&mut self.inner.lock(), max_len, out)
    }

    pub fn is_finished(&self) -> bool {
        self.inner.lock().is_finished()
    }

    pub fn bytes_buffered(&self) -> usize {
        self.inner.lock().bytes_buffered()
    }

    pub fn bytes_popped(&self) -> u64 {
        self.inner.lock().bytes_popped()
    }

    pub fn has_error(&self) -> bool {
        self.inner.lock().has_error()
    }
}

impl io::Read for ReadHalf {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        read_io(&mut self.inner.lock(), buf)
    }
}
