//! Composable batch delivery transports for Beacon.
//!
//! A transport takes an ordered batch of events and attempts delivery.
//! Three composition strategies wrap the same contract, so they nest
//! arbitrarily:
//!
//! - [`TransportSwitch`]: fallback selection, delegating to the first
//!   usable candidate
//! - [`TransportGroup`]: fan-out, delivering to every usable member,
//!   succeeding if any member succeeds
//! - [`TransportRetry`]: bounded retries with capped exponential backoff
//!
//! [`HttpTransport`] is the concrete end of a composition: it POSTs the
//! batch to a collector endpoint as JSON.

mod error;
mod group;
mod http;
mod retry;
mod switch;
mod transport;

pub use error::{TransportError, TransportResult};
pub use group::TransportGroup;
pub use http::{HttpTransport, HttpTransportConfig};
pub use retry::{RetryConfig, TransportRetry};
pub use switch::TransportSwitch;
pub use transport::{Transport, mock};
