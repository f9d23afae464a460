//! Bulk acquisition engine.
//!
//! Drives the memory-to-memory capture from the parallel input register into
//! the acquisition buffer. Arming is non-blocking; the buffer must not be
//! read until a wait observes completion. The window length is chosen by the
//! caller through the slice it hands in: `samples_per_frame * frame_count`
//! words at the moment the capture starts.

use core::fmt;

use crate::error::{Result, ScopeError};
use crate::hal::SampleBus;

/// Acquisition engine over a [`SampleBus`].
pub struct AcquisitionEngine<B: SampleBus> {
    bus: B,
}

impl<B: SampleBus> AcquisitionEngine<B> {
    /// Wrap a sample bus.
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Arm a capture into `dst` and return immediately.
    ///
    /// # Errors
    ///
    /// A start failure here means the transfer engine is misconfigured;
    /// callers treat it as fatal rather than retrying.
    pub fn start(&mut self, dst: &mut [u16]) -> Result<()> {
        crate::scope_log!(trace, "capture armed, {} words", dst.len());
        self.bus.begin_capture(dst)
    }

    /// Whether the armed capture has completed.
    pub fn is_done(&mut self) -> bool {
        self.bus.capture_done()
    }

    /// Block until the armed capture completes, polling at most `max_polls`
    /// times.
    ///
    /// # Errors
    ///
    /// Returns `Timeout` when the budget is exhausted without a completion
    /// signal.
    pub fn wait(&mut self, max_polls: u32) -> Result<()> {
        for _ in 0..max_polls {
            if self.bus.capture_done() {
                return Ok(());
            }
        }
        crate::scope_log!(error, "capture did not complete within {} polls", max_polls);
        Err(ScopeError::Timeout)
    }

    /// Access the underlying bus.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Mutable access to the underlying bus.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }
}

impl<B: SampleBus> fmt::Debug for AcquisitionEngine<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AcquisitionEngine").finish_non_exhaustive()
    }
}
