//! Error types for acquisition, exchange and command handling.
//!
//! This module provides structured error types with backtraces (when std is
//! enabled) and helper methods for error information. The taxonomy follows the
//! device's recovery rules: configuration errors are fatal to the run loop,
//! transfer errors cost at most one cycle, command errors are discarded
//! silently by the protocol layer.

use core::fmt;

#[cfg(feature = "std")]
use std::backtrace::Backtrace;

/// Result type alias for acquisition-core operations.
pub type Result<T> = core::result::Result<T, ScopeError>;

// =============================================================================
// Error Kind Enums (Internal)
// =============================================================================

/// Configuration error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum ConfigErrorKind {
    InvalidSetting,
    BusNotReady,
}

/// Transfer error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum TransferErrorKind {
    StartFailed,
    BufferTooSmall,
}

/// Command protocol error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum CommandErrorKind {
    BufferTooShort,
    BadPasscode,
    UnknownIdentifier,
}

// =============================================================================
// Main Error Type
// =============================================================================

/// Acquisition-core error type.
///
/// This is the main error type returned by all operations. It contains a
/// backtrace (when the std feature is enabled) and detailed error information
/// through helper methods.
#[derive(Debug)]
pub enum ScopeError {
    /// Configuration or bring-up errors - fatal, the run loop stops
    Config(ConfigError),
    /// Transfer-start or buffer-shape errors - cost one cycle at most
    Transfer(TransferError),
    /// Command protocol errors - discarded silently by the handler
    Command(CommandError),
    /// A completion signal did not arrive within the poll budget
    Timeout,
}

// =============================================================================
// Structured Error Types
// =============================================================================

/// Configuration error with optional backtrace
#[derive(Debug)]
pub struct ConfigError {
    kind: ConfigErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl ConfigError {
    pub(crate) fn new(kind: ConfigErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Backtrace captured where the error was created
    #[cfg(feature = "std")]
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    /// Check if a configuration value was rejected
    pub fn is_invalid_setting(&self) -> bool {
        matches!(self.kind, ConfigErrorKind::InvalidSetting)
    }

    /// Check if the transfer hardware refused to arm
    pub fn is_bus_not_ready(&self) -> bool {
        matches!(self.kind, ConfigErrorKind::BusNotReady)
    }
}

/// Transfer error with optional backtrace
#[derive(Debug)]
pub struct TransferError {
    kind: TransferErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl TransferError {
    pub(crate) fn new(kind: TransferErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Backtrace captured where the error was created
    #[cfg(feature = "std")]
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    /// Check if the transfer failed to start
    pub fn is_start_failed(&self) -> bool {
        matches!(self.kind, TransferErrorKind::StartFailed)
    }

    /// Check if a buffer was too small for the requested transfer
    pub fn is_buffer_too_small(&self) -> bool {
        matches!(self.kind, TransferErrorKind::BufferTooSmall)
    }
}

/// Command protocol error with optional backtrace
#[derive(Debug)]
pub struct CommandError {
    kind: CommandErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl CommandError {
    pub(crate) fn new(kind: CommandErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Backtrace captured where the error was created
    #[cfg(feature = "std")]
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    /// Check if the inbound buffer was shorter than a command frame
    pub fn is_too_short(&self) -> bool {
        matches!(self.kind, CommandErrorKind::BufferTooShort)
    }

    /// Check if the passcode prefix did not match
    pub fn is_bad_passcode(&self) -> bool {
        matches!(self.kind, CommandErrorKind::BadPasscode)
    }

    /// Check if the identifier maps to no known command
    pub fn is_unknown_identifier(&self) -> bool {
        matches!(self.kind, CommandErrorKind::UnknownIdentifier)
    }
}

// =============================================================================
// Convenience Constructors for ScopeError
// =============================================================================

impl ScopeError {
    // Configuration errors
    #[inline]
    pub fn invalid_setting() -> Self {
        Self::Config(ConfigError::new(ConfigErrorKind::InvalidSetting))
    }

    #[inline]
    pub fn bus_not_ready() -> Self {
        Self::Config(ConfigError::new(ConfigErrorKind::BusNotReady))
    }

    // Transfer errors
    #[inline]
    pub fn transfer_start_failed() -> Self {
        Self::Transfer(TransferError::new(TransferErrorKind::StartFailed))
    }

    #[inline]
    pub fn buffer_too_small() -> Self {
        Self::Transfer(TransferError::new(TransferErrorKind::BufferTooSmall))
    }

    // Command errors
    #[inline]
    pub fn command_too_short() -> Self {
        Self::Command(CommandError::new(CommandErrorKind::BufferTooShort))
    }

    #[inline]
    pub fn bad_passcode() -> Self {
        Self::Command(CommandError::new(CommandErrorKind::BadPasscode))
    }

    #[inline]
    pub fn unknown_identifier() -> Self {
        Self::Command(CommandError::new(CommandErrorKind::UnknownIdentifier))
    }

    /// Check if this is a completion timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Check if this is a fatal configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a per-cycle transfer error
    pub fn is_transfer(&self) -> bool {
        matches!(self, Self::Transfer(_))
    }

    /// Check if this is a command protocol error
    pub fn is_command(&self) -> bool {
        matches!(self, Self::Command(_))
    }
}

// =============================================================================
// Display Implementation
// =============================================================================

impl fmt::Display for ScopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeError::Config(e) => write!(f, "Configuration error: {:?}", e.kind),
            ScopeError::Transfer(e) => write!(f, "Transfer error: {:?}", e.kind),
            ScopeError::Command(e) => write!(f, "Command error: {:?}", e.kind),
            ScopeError::Timeout => write!(f, "Completion timeout"),
        }
    }
}

// Implement std::error::Error for std-based applications
#[cfg(feature = "std")]
impl std::error::Error for ScopeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_helpers() {
        assert!(ScopeError::invalid_setting().is_config());
        assert!(ScopeError::transfer_start_failed().is_transfer());
        assert!(ScopeError::bad_passcode().is_command());
        assert!(ScopeError::Timeout.is_timeout());

        match ScopeError::buffer_too_small() {
            ScopeError::Transfer(e) => assert!(e.is_buffer_too_small()),
            _ => panic!("wrong category"),
        }
        match ScopeError::command_too_short() {
            ScopeError::Command(e) => assert!(e.is_too_short()),
            _ => panic!("wrong category"),
        }
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_backtrace_accessor() {
        match ScopeError::transfer_start_failed() {
            ScopeError::Transfer(e) => {
                assert!(!format!("{:?}", e.backtrace().status()).is_empty());
            }
            _ => panic!("wrong category"),
        }
    }
}
