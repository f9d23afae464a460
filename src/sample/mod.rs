//! Raw sample handling: voltage decode and frame decimation.

pub mod decimate;
pub mod decode;

pub use decimate::select_frame;
pub use decode::{average_volts, decode, decode_with_vref, reverse12};
