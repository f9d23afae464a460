//! Serial exchange engine.
//!
//! Runs one full-duplex transaction against the host: chip select is
//! asserted for exactly the span of the transfer, the outbound frame clocks
//! out while inbound words fill the receive buffer, and the call blocks
//! until the completion signal fires or the poll budget runs out. Blocking
//! here is deliberate: the serial clock is slow relative to the acquisition
//! cadence and the control loop has no useful work during the wait.

use core::fmt;

use crate::error::{Result, ScopeError};
use crate::hal::HostLink;

/// Exchange engine over a [`HostLink`].
pub struct ExchangeEngine<L: HostLink> {
    link: L,
}

impl<L: HostLink> ExchangeEngine<L> {
    /// Wrap a host link.
    pub fn new(link: L) -> Self {
        Self { link }
    }

    /// Run one full-duplex exchange, blocking until completion.
    ///
    /// Chip select is deasserted on every exit path, including failures.
    ///
    /// # Errors
    ///
    /// Returns the start failure if the transfer would not arm (the receive
    /// buffer then holds no new data), or `Timeout` if the completion signal
    /// never fires within `max_polls`.
    pub fn exchange(&mut self, tx: &[u16], rx: &mut [u16], max_polls: u32) -> Result<()> {
        self.link.set_select(true);

        if let Err(e) = self.link.begin_transfer(tx, rx) {
            self.link.set_select(false);
            crate::scope_log!(warn, "serial exchange failed to start");
            return Err(e);
        }

        for _ in 0..max_polls {
            if self.link.transfer_done() {
                self.link.set_select(false);
                crate::scope_log!(trace, "serial exchange complete, {} words", tx.len());
                return Ok(());
            }
        }

        self.link.set_select(false);
        crate::scope_log!(error, "serial exchange did not complete within {} polls", max_polls);
        Err(ScopeError::Timeout)
    }

    /// Access the underlying link.
    pub fn link(&self) -> &L {
        &self.link
    }

    /// Mutable access to the underlying link.
    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }
}

impl<L: HostLink> fmt::Debug for ExchangeEngine<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExchangeEngine").finish_non_exhaustive()
    }
}
