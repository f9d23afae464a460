//! Command frame validation, parsing and encoding.
//!
//! A command rides in the first words of the inbound exchange buffer:
//!
//! ```text
//! ┌───────────────┬───────────────┬───────────────┐
//! │ word0 : word1 │    word2      │ word3 : word4 │
//! │ 32-bit        │ identifier    │ value low /   │
//! │ passcode      │ (byte-swapped)│ high halves   │
//! │               │               │ (byte-swapped)│
//! └───────────────┴───────────────┴───────────────┘
//! ```
//!
//! The host transmits the identifier and both value halves byte-swapped
//! relative to the link's word order, so each 16-bit field is swapped back
//! before use. The value's low half sits at word index 3 and the high half at
//! index 4.
//!
//! Commands are decoded fresh every cycle and never persisted.

use crate::error::{Result, ScopeError};
use crate::protocol::constants::{CommandId, COMMAND_WORDS, PASSCODE};

/// One parsed host command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HostCommand {
    /// Raw command identifier (see [`CommandId`] for the known set)
    pub identifier: u16,
    /// 32-bit command argument
    pub value: u32,
}

impl HostCommand {
    /// Check whether a received buffer carries a valid command frame.
    ///
    /// True iff the buffer holds at least [`COMMAND_WORDS`] words and the
    /// first two words, concatenated high-half-first, equal the passcode.
    /// Anything else is silently not a command.
    pub fn verify(words: &[u16]) -> bool {
        if words.len() < COMMAND_WORDS {
            return false;
        }
        let magic = (u32::from(words[0]) << 16) | u32::from(words[1]);
        magic == PASSCODE
    }

    /// Parse a command frame from received words.
    ///
    /// # Errors
    ///
    /// Returns error if the buffer is shorter than a command frame or the
    /// passcode prefix does not match. Callers that only want the
    /// accept/discard decision should use [`HostCommand::verify`] first.
    pub fn parse(words: &[u16]) -> Result<Self> {
        if words.len() < COMMAND_WORDS {
            return Err(ScopeError::command_too_short());
        }
        if !Self::verify(words) {
            return Err(ScopeError::bad_passcode());
        }

        let identifier = words[2].swap_bytes();
        let value_low = u32::from(words[3].swap_bytes());
        let value_high = u32::from(words[4].swap_bytes());

        Ok(Self {
            identifier,
            value: (value_high << 16) | value_low,
        })
    }

    /// Encode this command into its on-wire form.
    ///
    /// This is the host-side counterpart of [`HostCommand::parse`]; the
    /// firmware itself never transmits commands, but tests and host tooling
    /// build frames with it.
    pub fn encode(&self) -> [u16; COMMAND_WORDS] {
        [
            (PASSCODE >> 16) as u16,
            PASSCODE as u16,
            self.identifier.swap_bytes(),
            (self.value as u16).swap_bytes(),
            ((self.value >> 16) as u16).swap_bytes(),
        ]
    }

    /// The known command this identifier selects, if any.
    pub const fn id(&self) -> Option<CommandId> {
        CommandId::from_u16(self.identifier)
    }
}
