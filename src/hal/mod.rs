//! Hardware abstraction boundary.
//!
//! The acquisition core never touches registers itself: everything below the
//! traits here (pin muxing, transfer-engine setup, interrupt wiring) is the
//! board support crate's job, done before the controller is constructed.
//!
//! The traits follow the Dependency Inversion Principle: the controller and
//! engines depend only on these abstractions, and so do the real drivers and
//! the mocks in [`mock`], so protocol logic runs unchanged on the host.
//!
//! Completion is modeled as level-polled flags, matching hardware where an
//! interrupt-context callback sets a "done" bit: `begin_*` arms a transfer
//! and returns immediately, `*_done` reports whether the completion signal
//! has fired since. Implementations own the flag; it never escapes this
//! boundary.

pub mod mock;

use crate::error::Result;

/// Bulk capture source for raw samples.
///
/// A real implementation arms a memory-to-memory transfer from the parallel
/// input register into `dst` and flips its completion flag from transfer-done
/// interrupt context.
pub trait SampleBus {
    /// Arm a capture of `dst.len()` words. Returns immediately; the data in
    /// `dst` is valid only once [`SampleBus::capture_done`] reports true.
    ///
    /// # Errors
    ///
    /// Returns error if the transfer engine refuses to arm. The caller
    /// treats this as a configuration fault, not a per-cycle hiccup.
    fn begin_capture(&mut self, dst: &mut [u16]) -> Result<()>;

    /// Whether the capture armed by the last `begin_capture` has finished.
    fn capture_done(&mut self) -> bool;
}

/// Full-duplex serial link to the host.
pub trait HostLink {
    /// Drive the chip-select line; `true` asserts it active.
    fn set_select(&mut self, active: bool);

    /// Arm a full-duplex transfer clocking `tx` out while filling `rx`.
    /// Returns immediately; `rx` is valid only once
    /// [`HostLink::transfer_done`] reports true.
    ///
    /// # Errors
    ///
    /// Returns error if the transfer fails to start. The cycle then proceeds
    /// without host data; nothing received earlier is reused.
    fn begin_transfer(&mut self, tx: &[u16], rx: &mut [u16]) -> Result<()>;

    /// Whether the transfer armed by the last `begin_transfer` has finished.
    fn transfer_done(&mut self) -> bool;
}

/// The two gain range-select output lines.
pub trait GainPins {
    /// Drive both lines to the given levels.
    fn set(&mut self, line_a: bool, line_b: bool);
}

/// Fixed inter-cycle pause.
pub trait CycleDelay {
    /// Block for the configured inter-cycle interval.
    fn pause(&mut self);
}
