//! Raw sample to calibrated voltage decode.
//!
//! The input port is wired with the bit order reversed relative to logical
//! significance, so a raw reading must be bit-reversed before it means
//! anything. The reversed value is a 12-bit two's-complement number scaled
//! against the reference voltage:
//!
//! ```text
//! raw (port order) --reverse12--> logical 12-bit --sign-extend--> i16
//! volts = signed / 2048.0 * VREF
//! ```
//!
//! Every 12-bit input is valid; the decode is pure and total.

use crate::protocol::constants::{SAMPLE_BITS, SAMPLE_MASK, VREF};

/// Reverse the bit order of a 12-bit value (bit i becomes bit 11-i).
///
/// Self-inverse over the 12-bit domain. Bits above the sample mask are
/// discarded before reversal.
pub const fn reverse12(raw: u16) -> u16 {
    let raw = raw & SAMPLE_MASK;
    let mut reversed: u16 = 0;
    let mut i = 0;
    while i < SAMPLE_BITS {
        if raw & (1 << i) != 0 {
            reversed |= 1 << (SAMPLE_BITS - 1 - i);
        }
        i += 1;
    }
    reversed
}

/// Sign-extend a logical 12-bit value into an i16.
const fn sign_extend(logical: u16) -> i16 {
    if logical & 0x0800 != 0 {
        (logical | 0xF000) as i16
    } else {
        logical as i16
    }
}

/// Decode a raw port reading into volts using the stock reference voltage.
pub fn decode(raw: u16) -> f32 {
    decode_with_vref(raw, VREF)
}

/// Decode a raw port reading into volts against an explicit reference.
///
/// The result spans roughly `-vref..vref`: logical 0x800 maps to `-vref`
/// exactly, logical 0x7FF to one LSB below `+vref`.
pub fn decode_with_vref(raw: u16, vref: f32) -> f32 {
    let signed = sign_extend(reverse12(raw));
    (f32::from(signed) / 2048.0) * vref
}

/// Average the decoded value of the first `window` samples of a buffer.
///
/// Shorter buffers average what is there; an empty buffer reads 0 V. Used for
/// the per-cycle diagnostic report, not for the outbound data path.
pub fn average_volts(samples: &[u16], window: usize, vref: f32) -> f32 {
    let n = samples.len().min(window);
    if n == 0 {
        return 0.0;
    }
    let mut sum = 0.0f32;
    for &raw in &samples[..n] {
        sum += decode_with_vref(raw, vref);
    }
    sum / n as f32
}
