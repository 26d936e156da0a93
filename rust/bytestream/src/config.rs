//! Stream configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StreamError};

/// Capacity used by [`StreamConfig::default`].
pub const DEFAULT_CAPACITY: usize = 4096;

/// Largest capacity whose storage, sentinel slot included, fits in one allocation.
pub const MAX_CAPACITY: usize = isize::MAX as usize - 1;

/// Byte stream configuration.
///
/// Missing fields fall back to [`StreamConfig::default`] when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Maximum number of buffered-but-unread bytes.
    pub capacity: usize,
    /// Name attached to the stream's log events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            label: None,
        }
    }
}

impl StreamConfig {
    /// Create a config with the given capacity and no label.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            label: None,
        }
    }

    /// Set capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the log label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Checks that a stream can be built from this config.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(StreamError::ZeroCapacity);
        }
        if self.capacity > MAX_CAPACITY {
            return Err(StreamError::CapacityTooLarge(self.capacity));
        }
        Ok(())
    }
}
