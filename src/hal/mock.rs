//! Mock HAL implementations for testing.
//!
//! These mocks let the full acquisition pipeline run without hardware:
//! programmable sample data, adjustable completion latency (in polls) to
//! exercise the wait loops, and failure injection for the transfer-start
//! error paths. They are `no_std`-clean, backed by `heapless` storage.
//!
//! ## Example
//!
//! ```rust
//! use penscope::hal::mock::MockHostLink;
//! use penscope::hal::HostLink;
//!
//! let mut link = MockHostLink::new();
//! link.queue_response(&[0xDEAD, 0xBEEF, 0x0100, 0xFA00, 0x0000]);
//!
//! let tx = [0u16; 4];
//! let mut rx = [0u16; 8];
//! link.begin_transfer(&tx, &mut rx).unwrap();
//! assert!(link.transfer_done());
//! assert_eq!(rx[0], 0xDEAD);
//! ```

use heapless::{Deque, Vec};

use crate::error::{Result, ScopeError};
use crate::hal::{CycleDelay, GainPins, HostLink, SampleBus};
use crate::protocol::constants::SAMPLES_PER_FRAME;

/// How a mock capture fills its destination buffer.
#[derive(Debug, Clone)]
pub enum FillPattern {
    /// `dst[i] = i` (wrapping) - distinct values, handy for stride checks
    Ramp,
    /// Every word the same value
    Constant(u16),
    /// Cycle through a short sequence
    Sequence(Vec<u16, 64>),
}

/// Mock parallel-port capture source.
///
/// Fills the destination synchronously when the capture is armed and reports
/// completion after a configurable number of polls, so tests can cover both
/// the immediate path and the wait loop.
#[derive(Debug)]
pub struct MockSampleBus {
    fill: FillPattern,
    completion_polls: u32,
    remaining_polls: u32,
    started: bool,
    fail_next: bool,
    captures: usize,
    last_capture_len: usize,
}

impl MockSampleBus {
    /// Create a mock that completes on the first poll and fills a ramp.
    pub fn new() -> Self {
        Self {
            fill: FillPattern::Ramp,
            completion_polls: 0,
            remaining_polls: 0,
            started: false,
            fail_next: false,
            captures: 0,
            last_capture_len: 0,
        }
    }

    /// Choose how captured buffers are filled.
    pub fn set_fill(&mut self, fill: FillPattern) {
        self.fill = fill;
    }

    /// Report completion only after `polls` calls to `capture_done`.
    pub fn set_completion_polls(&mut self, polls: u32) {
        self.completion_polls = polls;
    }

    /// Make the next `begin_capture` fail.
    pub fn fail_next_capture(&mut self) {
        self.fail_next = true;
    }

    /// Number of captures armed so far.
    pub fn captures(&self) -> usize {
        self.captures
    }

    /// Word count requested by the most recent capture.
    pub fn last_capture_len(&self) -> usize {
        self.last_capture_len
    }
}

impl Default for MockSampleBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleBus for MockSampleBus {
    fn begin_capture(&mut self, dst: &mut [u16]) -> Result<()> {
        if self.fail_next {
            self.fail_next = false;
            return Err(ScopeError::bus_not_ready());
        }

        match &self.fill {
            FillPattern::Ramp => {
                for (i, slot) in dst.iter_mut().enumerate() {
                    *slot = i as u16;
                }
            }
            FillPattern::Constant(value) => dst.fill(*value),
            FillPattern::Sequence(seq) if !seq.is_empty() => {
                for (i, slot) in dst.iter_mut().enumerate() {
                    *slot = seq[i % seq.len()];
                }
            }
            FillPattern::Sequence(_) => dst.fill(0),
        }

        self.remaining_polls = self.completion_polls;
        self.started = true;
        self.captures += 1;
        self.last_capture_len = dst.len();
        Ok(())
    }

    fn capture_done(&mut self) -> bool {
        if !self.started {
            return false;
        }
        if self.remaining_polls == 0 {
            true
        } else {
            self.remaining_polls -= 1;
            false
        }
    }
}

/// Mock full-duplex host link.
///
/// Pre-programmed responses are copied into the receive buffer in FIFO order
/// when a transfer is armed; transmitted frames and chip-select transitions
/// are recorded for inspection.
#[derive(Debug)]
pub struct MockHostLink {
    responses: Deque<Vec<u16, SAMPLES_PER_FRAME>, 16>,
    last_sent: Vec<u16, SAMPLES_PER_FRAME>,
    transfers: usize,
    select_events: Vec<bool, 64>,
    completion_polls: u32,
    remaining_polls: u32,
    started: bool,
    fail_next: bool,
}

impl MockHostLink {
    /// Create a mock that completes on the first poll with no responses.
    pub fn new() -> Self {
        Self {
            responses: Deque::new(),
            last_sent: Vec::new(),
            transfers: 0,
            select_events: Vec::new(),
            completion_polls: 0,
            remaining_polls: 0,
            started: false,
            fail_next: false,
        }
    }

    /// Queue words to land in the receive buffer of a future transfer.
    ///
    /// Responses are consumed in FIFO order; a transfer with no queued
    /// response leaves the receive buffer untouched.
    pub fn queue_response(&mut self, words: &[u16]) {
        let mut frame = Vec::new();
        let take = words.len().min(SAMPLES_PER_FRAME);
        let _ = frame.extend_from_slice(&words[..take]);
        let queued = self.responses.push_back(frame);
        debug_assert!(queued.is_ok(), "response queue full, response dropped");
    }

    /// Report completion only after `polls` calls to `transfer_done`.
    pub fn set_completion_polls(&mut self, polls: u32) {
        self.completion_polls = polls;
    }

    /// Make the next `begin_transfer` fail.
    pub fn fail_next_transfer(&mut self) {
        self.fail_next = true;
    }

    /// The frame most recently clocked out.
    pub fn last_sent(&self) -> &[u16] {
        &self.last_sent
    }

    /// Number of transfers armed so far.
    pub fn transfers(&self) -> usize {
        self.transfers
    }

    /// Every chip-select transition, in order (`true` = asserted).
    pub fn select_events(&self) -> &[bool] {
        &self.select_events
    }

    /// Forget recorded frames and chip-select transitions.
    pub fn clear_history(&mut self) {
        self.last_sent.clear();
        self.select_events.clear();
    }
}

impl Default for MockHostLink {
    fn default() -> Self {
        Self::new()
    }
}

impl HostLink for MockHostLink {
    fn set_select(&mut self, active: bool) {
        let logged = self.select_events.push(active);
        debug_assert!(logged.is_ok(), "select event log full, transition dropped");
    }

    fn begin_transfer(&mut self, tx: &[u16], rx: &mut [u16]) -> Result<()> {
        if self.fail_next {
            self.fail_next = false;
            return Err(ScopeError::transfer_start_failed());
        }

        self.last_sent.clear();
        let take = tx.len().min(SAMPLES_PER_FRAME);
        let _ = self.last_sent.extend_from_slice(&tx[..take]);

        if let Some(frame) = self.responses.pop_front() {
            let n = frame.len().min(rx.len());
            rx[..n].copy_from_slice(&frame[..n]);
        }

        self.remaining_polls = self.completion_polls;
        self.started = true;
        self.transfers += 1;
        Ok(())
    }

    fn transfer_done(&mut self) -> bool {
        if !self.started {
            return false;
        }
        if self.remaining_polls == 0 {
            true
        } else {
            self.remaining_polls -= 1;
            false
        }
    }
}

/// Mock gain range-select lines.
#[derive(Debug, Default)]
pub struct MockGainPins {
    /// Level most recently driven on line A
    pub line_a: bool,
    /// Level most recently driven on line B
    pub line_b: bool,
    /// How many times the lines were driven
    pub writes: usize,
}

impl GainPins for MockGainPins {
    fn set(&mut self, line_a: bool, line_b: bool) {
        self.line_a = line_a;
        self.line_b = line_b;
        self.writes += 1;
    }
}

/// Mock inter-cycle delay that only counts invocations.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Number of pauses taken
    pub pauses: usize,
}

impl CycleDelay for MockDelay {
    fn pause(&mut self) {
        self.pauses += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bus_ramp_fill_and_immediate_completion() {
        let mut bus = MockSampleBus::new();
        let mut buf = [0u16; 16];
        bus.begin_capture(&mut buf).unwrap();
        assert!(bus.capture_done());
        assert_eq!(buf[0], 0);
        assert_eq!(buf[15], 15);
        assert_eq!(bus.captures(), 1);
        assert_eq!(bus.last_capture_len(), 16);
    }

    #[test]
    fn test_bus_completion_latency() {
        let mut bus = MockSampleBus::new();
        bus.set_completion_polls(2);
        let mut buf = [0u16; 4];
        bus.begin_capture(&mut buf).unwrap();
        assert!(!bus.capture_done());
        assert!(!bus.capture_done());
        assert!(bus.capture_done());
    }

    #[test]
    fn test_bus_not_done_before_start() {
        let mut bus = MockSampleBus::new();
        assert!(!bus.capture_done());
    }

    #[test]
    fn test_bus_failure_injection() {
        let mut bus = MockSampleBus::new();
        bus.fail_next_capture();
        let mut buf = [0u16; 4];
        assert!(bus.begin_capture(&mut buf).is_err());
        // One-shot: the next capture succeeds
        assert!(bus.begin_capture(&mut buf).is_ok());
    }

    #[test]
    fn test_link_response_fifo_order() {
        let mut link = MockHostLink::new();
        link.queue_response(&[0x0001]);
        link.queue_response(&[0x0002]);

        let tx = [0u16; 2];
        let mut rx = [0u16; 2];
        link.begin_transfer(&tx, &mut rx).unwrap();
        assert_eq!(rx[0], 0x0001);
        link.begin_transfer(&tx, &mut rx).unwrap();
        assert_eq!(rx[0], 0x0002);
    }

    #[test]
    fn test_link_records_sent_frame_and_select() {
        let mut link = MockHostLink::new();
        link.set_select(true);
        let tx = [0xAAu16, 0xBB];
        let mut rx = [0u16; 2];
        link.begin_transfer(&tx, &mut rx).unwrap();
        link.set_select(false);

        assert_eq!(link.last_sent(), &[0xAA, 0xBB]);
        assert_eq!(link.select_events(), &[true, false]);
        assert_eq!(link.transfers(), 1);
    }

    #[test]
    fn test_link_history_covers_long_runs() {
        let mut link = MockHostLink::new();
        for i in 0..10u16 {
            link.queue_response(&[i]);
        }
        let tx = [0u16; 1];
        let mut rx = [0u16; 1];
        for i in 0..10u16 {
            link.set_select(true);
            link.begin_transfer(&tx, &mut rx).unwrap();
            link.set_select(false);
            assert_eq!(rx[0], i);
        }
        assert_eq!(link.select_events().len(), 20);
        assert_eq!(link.transfers(), 10);
    }

    #[test]
    fn test_link_no_response_leaves_rx_untouched() {
        let mut link = MockHostLink::new();
        let tx = [0u16; 2];
        let mut rx = [0x55u16; 2];
        link.begin_transfer(&tx, &mut rx).unwrap();
        assert_eq!(rx, [0x55, 0x55]);
    }
}
