//! Runtime configuration for the acquisition core.
//!
//! Defaults reproduce the stock firmware values; board integrations override
//! what their analog front end calibrates differently.

use crate::protocol::constants::{DIAGNOSTIC_WINDOW, MAX_FRAMES, VREF};

/// Controller settings, fixed for the lifetime of a run loop.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Reference voltage the decode scales against, in volts
    pub vref: f32,
    /// Upper bound accepted for a host-requested frame count; must stay
    /// within the acquisition buffer capacity
    pub max_frames: u16,
    /// Completion-poll budget per transfer before declaring a timeout
    pub wait_polls: u32,
    /// Decoded samples averaged for the per-cycle diagnostic report
    pub diagnostic_window: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vref: VREF,
            max_frames: MAX_FRAMES,
            wait_polls: 1_000_000,
            diagnostic_window: DIAGNOSTIC_WINDOW,
        }
    }
}
