//! Analog gain ranges and their output-line encoding.
//!
//! The front end exposes four preset amplification bands, selected by two
//! independent output lines. The host picks a band by sending the expected
//! signal magnitude; the firmware maps that magnitude into the tightest band
//! that still covers it.

/// One of the four front-end gain ranges.
///
/// The variants carry the amplification multiplier; `lines()` gives the
/// levels the two range-select outputs must be driven to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GainRange {
    /// x10 - signals up to 100
    X10,
    /// x5 - signals up to 500
    X5,
    /// x2 - signals up to 2000
    X2,
    /// x1 - everything larger
    X1,
}

impl GainRange {
    /// Select the range for a host-requested signal magnitude.
    ///
    /// Band bounds are inclusive: 100 still selects x10, 101 falls into x5;
    /// 2000 still selects x2, 2001 falls into x1.
    pub const fn for_request(value: u32) -> Self {
        if value <= 100 {
            Self::X10
        } else if value <= 500 {
            Self::X5
        } else if value <= 2000 {
            Self::X2
        } else {
            Self::X1
        }
    }

    /// Levels for the two range-select lines, `(line_a, line_b)`.
    pub const fn lines(self) -> (bool, bool) {
        match self {
            Self::X10 => (true, true),
            Self::X5 => (false, true),
            Self::X2 => (true, false),
            Self::X1 => (false, false),
        }
    }

    /// Amplification multiplier of this range.
    pub const fn multiplier(self) -> u8 {
        match self {
            Self::X10 => 10,
            Self::X5 => 5,
            Self::X2 => 2,
            Self::X1 => 1,
        }
    }
}

impl Default for GainRange {
    /// The range-select lines come out of bring-up driven low/high.
    fn default() -> Self {
        Self::X5
    }
}
