//! Owned buffer pool for the acquisition cycle.
//!
//! One pool holds the three buffers a cycle moves data through: the
//! acquisition buffer the capture engine fills, the outbound frame handed to
//! the serial link, and the inbound words received from the host. The
//! controller owns the pool exclusively, so a buffer can never alias between
//! an in-flight transfer and a reader.

use core::fmt;

use crate::protocol::constants::{ACQUISITION_CAPACITY, SAMPLES_PER_FRAME};

/// The three fixed buffers reused across cycles.
pub struct BufferPool {
    pub(crate) acquisition: [u16; ACQUISITION_CAPACITY],
    pub(crate) outbound: [u16; SAMPLES_PER_FRAME],
    pub(crate) inbound: [u16; SAMPLES_PER_FRAME],
}

impl BufferPool {
    /// Create a zeroed pool.
    pub const fn new() -> Self {
        Self {
            acquisition: [0; ACQUISITION_CAPACITY],
            outbound: [0; SAMPLES_PER_FRAME],
            inbound: [0; SAMPLES_PER_FRAME],
        }
    }

    /// Raw samples captured by the most recent acquisition.
    ///
    /// Only the first `samples_per_frame * frame_count` words of the slice
    /// are meaningful after a capture.
    pub fn acquisition(&self) -> &[u16] {
        &self.acquisition
    }

    /// The decimated frame most recently handed to the serial link.
    pub fn outbound(&self) -> &[u16] {
        &self.outbound
    }

    /// Words received from the host in the most recent exchange.
    pub fn inbound(&self) -> &[u16] {
        &self.inbound
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("acquisition_words", &self.acquisition.len())
            .field("outbound_words", &self.outbound.len())
            .field("inbound_words", &self.inbound.len())
            .finish()
    }
}
