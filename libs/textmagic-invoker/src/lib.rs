#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Client-side invoker for the TextMagic SMS gateway HTTP API.
//!
//! The crate does one thing: it sends a single authenticated command to the
//! gateway as a form-encoded HTTP POST and hands back the raw textual
//! response. There is no retry policy, no response parsing and no protocol
//! state; higher-level command wrappers own all of that.
//!
//! # Request shape
//!
//! Every invocation posts a body of `application/x-www-form-urlencoded`
//! fields in a fixed order: `cmd`, `username`, `password`, then the
//! command-specific parameters in the order the caller supplied them.
//! A 2xx status returns the entity body verbatim; anything else (and any
//! transport failure) surfaces as a single [`ServiceInvokerError`].
//!
//! # Example
//!
//! ```ignore
//! use textmagic_invoker::HttpServiceInvoker;
//!
//! let invoker = HttpServiceInvoker::new()?;
//! let reply = invoker
//!     .invoke("user1", "pass1", "send", &[("phone", "1555123"), ("text", "hi")])
//!     .await?;
//! // reply is the raw gateway response, e.g. "OK:12345"
//! ```
//!
//! The HTTP transport is a seam: [`HttpTransport`] is injected at
//! construction, so tests (and embedders with their own client stack) can
//! substitute the default hyper-based [`HyperTransport`].

mod config;
mod error;
mod invoker;
mod transport;

pub use config::{DEFAULT_REQUEST_TIMEOUT, InvokerConfig, TEXTMAGIC_API_URL, TransportSecurity};
pub use error::{BoxError, ServiceInvokerError};
pub use invoker::HttpServiceInvoker;
pub use transport::{HttpTransport, HyperTransport, TransportResponse};
