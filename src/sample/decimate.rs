//! Decimating frame selection.
//!
//! When the acquisition window spans more than one frame, the outbound buffer
//! keeps only every `frame_count`-th sample; the samples in between are
//! discarded, not averaged. With `frame_count == 1` the selection is the
//! identity over the first frame.

use crate::error::{Result, ScopeError};

/// Fill `dst` by striding across `src` at `frame_count`.
///
/// `dst[i] = src[i * frame_count]` for every index of `dst`. A frame count of
/// zero is treated as one.
///
/// # Errors
///
/// Returns `BufferTooSmall` when `src` cannot cover the full stride, instead
/// of reading out of bounds.
pub fn select_frame(src: &[u16], dst: &mut [u16], frame_count: u16) -> Result<()> {
    let stride = usize::from(frame_count.max(1));
    if src.len() < dst.len().saturating_mul(stride) {
        return Err(ScopeError::buffer_too_small());
    }
    for (i, slot) in dst.iter_mut().enumerate() {
        *slot = src[i * stride];
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize) -> std::vec::Vec<u16> {
        (0..len).map(|i| i as u16).collect()
    }

    #[test]
    fn test_identity_at_frame_count_one() {
        let src = ramp(1000);
        let mut dst = [0u16; 1000];
        select_frame(&src, &mut dst, 1).unwrap();
        assert_eq!(&dst[..], &src[..]);
    }

    #[test]
    fn test_every_second_sample_at_frame_count_two() {
        let src = ramp(2000);
        let mut dst = [0u16; 1000];
        select_frame(&src, &mut dst, 2).unwrap();
        for (i, &word) in dst.iter().enumerate() {
            assert_eq!(word, (i * 2) as u16);
        }
    }

    #[test]
    fn test_zero_frame_count_behaves_as_one() {
        let src = ramp(8);
        let mut dst = [0u16; 8];
        select_frame(&src, &mut dst, 0).unwrap();
        assert_eq!(&dst[..], &src[..]);
    }

    #[test]
    fn test_short_source_is_rejected() {
        let src = ramp(1999);
        let mut dst = [0u16; 1000];
        let err = select_frame(&src, &mut dst, 2).unwrap_err();
        match err {
            ScopeError::Transfer(e) => assert!(e.is_buffer_too_small()),
            _ => panic!("expected transfer error"),
        }
    }
}
