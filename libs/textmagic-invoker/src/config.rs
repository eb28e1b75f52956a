//! Invoker configuration.
//!
//! Endpoint and transport settings are plain data passed at construction
//! time; [`crate::HyperTransport::from_config`] consumes them to build the
//! transport handle. There is no subclassing-style override surface.

use std::time::Duration;

/// Production gateway endpoint.
pub const TEXTMAGIC_API_URL: &str = "https://www.textmagic.com/app/api";

/// Default per-request timeout applied by the built-in transport.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport security configuration
///
/// Controls whether the transport enforces TLS or allows insecure HTTP.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportSecurity {
    /// Require TLS for all connections (HTTPS only) - default and recommended
    #[default]
    TlsOnly,
    /// Allow insecure HTTP connections (for testing with mock servers only)
    ///
    /// **WARNING**: This should only be used for local testing with mock
    /// servers. Never use in production as it exposes credentials in
    /// cleartext.
    AllowInsecureHttp,
}

/// Configuration for [`crate::HttpServiceInvoker`]
///
/// Both the endpoint URL and the transport handle built from this config are
/// treated as immutable once the invoker is constructed.
#[derive(Debug, Clone)]
pub struct InvokerConfig {
    /// Gateway endpoint URL (default: [`TEXTMAGIC_API_URL`])
    pub api_url: String,

    /// Per-request timeout (default: 30 seconds)
    ///
    /// Applies to the whole exchange, from connection establishment to the
    /// last body byte. `None` disables the timeout entirely and leaves the
    /// call waiting on the peer.
    pub request_timeout: Option<Duration>,

    /// Transport security mode (default: [`TransportSecurity::TlsOnly`])
    pub transport: TransportSecurity,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            api_url: TEXTMAGIC_API_URL.to_owned(),
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            transport: TransportSecurity::default(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_production_gateway() {
        let config = InvokerConfig::default();

        assert_eq!(config.api_url, "https://www.textmagic.com/app/api");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.transport, TransportSecurity::TlsOnly);
    }

    #[test]
    fn endpoint_override_keeps_remaining_defaults() {
        let config = InvokerConfig {
            api_url: "https://staging.example.com/app/api".to_owned(),
            ..InvokerConfig::default()
        };

        assert_eq!(config.api_url, "https://staging.example.com/app/api");
        assert_eq!(config.transport, TransportSecurity::TlsOnly);
    }
}
