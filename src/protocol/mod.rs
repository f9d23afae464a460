//! Host command protocol.
//!
//! The host drives the probe over the full-duplex serial link: every exchange
//! ships one frame of samples out and may carry one configuration command back
//! in. The inbound words are validated against a fixed passcode prefix before
//! anything is parsed; a frame that fails validation changes no state.

pub mod command;
pub mod constants;

pub use command::*;
pub use constants::*;
