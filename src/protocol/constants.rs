//! Protocol and acquisition constants.

/// Samples per frame; also the fixed word count of every serial transaction.
pub const SAMPLES_PER_FRAME: usize = 1000;

/// Mask keeping the 12 valid bits of a raw sample.
pub const SAMPLE_MASK: u16 = 0x0FFF;

/// Significant bits in a raw sample.
pub const SAMPLE_BITS: u32 = 12;

/// Reference voltage used to scale decoded samples, in volts.
pub const VREF: f32 = 1.5;

/// 32-bit passcode a command frame must open with.
pub const PASSCODE: u32 = 0xDEAD_BEEF;

/// Words in a command frame: passcode (2), identifier (1), value (2).
pub const COMMAND_WORDS: usize = 5;

/// Upper bound on the frame count a host command may select.
pub const MAX_FRAMES: u16 = 50;

/// Capacity of the acquisition buffer, in 16-bit words.
pub const ACQUISITION_CAPACITY: usize = SAMPLES_PER_FRAME * MAX_FRAMES as usize;

/// Decoded samples averaged for the per-cycle diagnostic report.
pub const DIAGNOSTIC_WINDOW: usize = 100;

/// Host command identifiers.
///
/// Identifiers outside this set are ignored without error, so hosts can probe
/// newer commands against older firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum CommandId {
    /// Select a gain range from the command value
    SetGain = 1,
    /// Set the acquisition window scale (frame count)
    SetWindow = 2,
    /// Set the analog offset (reserved, not yet wired to hardware)
    SetOffset = 3,
}

impl CommandId {
    /// Convert a u16 to `CommandId`
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(Self::SetGain),
            2 => Some(Self::SetWindow),
            3 => Some(Self::SetOffset),
            _ => None,
        }
    }

    /// Convert `CommandId` to u16
    pub const fn to_u16(self) -> u16 {
        self as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_id_mapping() {
        assert_eq!(CommandId::from_u16(1), Some(CommandId::SetGain));
        assert_eq!(CommandId::from_u16(2), Some(CommandId::SetWindow));
        assert_eq!(CommandId::from_u16(3), Some(CommandId::SetOffset));
        assert_eq!(CommandId::from_u16(0), None);
        assert_eq!(CommandId::from_u16(4), None);
        assert_eq!(CommandId::SetWindow.to_u16(), 2);
    }

    #[test]
    fn test_capacity_covers_max_window() {
        assert_eq!(ACQUISITION_CAPACITY, SAMPLES_PER_FRAME * MAX_FRAMES as usize);
    }
}
