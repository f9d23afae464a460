#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![doc = include_str!("../README.md")]

pub mod buffer;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod gain;
pub mod hal;
pub mod protocol;
pub mod sample;

// Macro module (must be declared before use)
#[macro_use]
pub mod logging;

// Re-export commonly used types
#[doc(inline)]
pub use buffer::BufferPool;
#[doc(inline)]
pub use config::Config;
#[doc(inline)]
pub use controller::{Controller, CycleReport, Phase};
#[doc(inline)]
pub use error::{Result, ScopeError};
#[doc(inline)]
pub use gain::GainRange;
#[doc(inline)]
pub use protocol::command::HostCommand;
#[doc(inline)]
pub use protocol::constants::{CommandId, PASSCODE, SAMPLES_PER_FRAME, VREF};
