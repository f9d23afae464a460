//! Transfer engines: bulk sample acquisition and the serial host exchange.
//!
//! Both engines wrap a HAL trait and turn its armed-transfer/completion-flag
//! model into a bounded await: `wait` polls the completion signal up to an
//! explicit budget and reports a timeout instead of hanging forever on a
//! stalled transfer.

pub mod acquire;
pub mod exchange;

pub use acquire::AcquisitionEngine;
pub use exchange::ExchangeEngine;
