//! HTTP transport seam.
//!
//! [`HttpTransport`] is the collaborator interface the invoker consumes:
//! execute one POST with an already-encoded form body, return the status code
//! and entity bytes. [`HyperTransport`] is the default implementation, a
//! hyper client over rustls with compiled-in webpki roots. Tests and
//! embedders with their own HTTP stack provide alternative implementations.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, Uri};
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;

use crate::config::{InvokerConfig, TransportSecurity};
use crate::error::BoxError;

/// Status code and entity bytes of a completed exchange.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code of the response
    pub status: http::StatusCode,
    /// Fully collected response entity
    pub body: Bytes,
}

/// Capability to execute one form-encoded POST request.
///
/// Implementations must fully consume the response and release all
/// request-scoped resources before returning, on every path. The default
/// implementation does this by collecting the entity into memory; the
/// connection itself is managed by RAII.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Execute a POST to `url` with `body` as the
    /// `application/x-www-form-urlencoded` entity.
    ///
    /// # Errors
    ///
    /// Returns the underlying transport failure (connection, TLS, timeout,
    /// stream interruption). Non-2xx statuses are not errors at this layer;
    /// classification belongs to the invoker.
    async fn post_form(&self, url: &str, body: Bytes) -> Result<TransportResponse, BoxError>;
}

/// Default [`HttpTransport`] backed by a pooled hyper client.
///
/// TLS uses rustls with the webpki root set compiled into the binary, so the
/// transport behaves identically regardless of the host OS certificate store.
pub struct HyperTransport {
    client: Client<hyper_rustls::HttpsConnector<HttpConnector>, Full<Bytes>>,
    request_timeout: Option<Duration>,
    security: TransportSecurity,
}

impl HyperTransport {
    /// Build a transport from the invoker configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS client configuration cannot be assembled.
    pub fn from_config(config: &InvokerConfig) -> Result<Self, BoxError> {
        if config.transport == TransportSecurity::AllowInsecureHttp {
            tracing::warn!(
                "insecure HTTP enabled (TransportSecurity::AllowInsecureHttp); \
                 use only for testing with mock servers"
            );
        }

        let provider = rustls::crypto::CryptoProvider::get_default()
            .cloned()
            .unwrap_or_else(|| Arc::new(rustls::crypto::aws_lc_rs::default_provider()));

        let builder =
            hyper_rustls::HttpsConnectorBuilder::new().with_provider_and_webpki_roots(provider)?;
        let https = match config.transport {
            TransportSecurity::TlsOnly => builder.https_only().enable_http1().build(),
            TransportSecurity::AllowInsecureHttp => builder.https_or_http().enable_http1().build(),
        };

        let client = Client::builder(TokioExecutor::new()).build::<_, Full<Bytes>>(https);

        Ok(Self {
            client,
            request_timeout: config.request_timeout,
            security: config.transport,
        })
    }

    /// Validate the URL and its scheme against the transport security mode.
    fn validate_url(&self, url: &str) -> Result<Uri, BoxError> {
        let uri: Uri = url
            .parse()
            .map_err(|e: http::uri::InvalidUri| format!("invalid URL '{url}': {e}"))?;

        if uri.authority().is_none() {
            return Err(format!("invalid URL '{url}': missing host").into());
        }

        match uri.scheme_str() {
            Some("https") => Ok(uri),
            Some("http") if self.security == TransportSecurity::AllowInsecureHttp => Ok(uri),
            Some("http") => {
                Err("HTTPS required (transport security is TlsOnly)".to_owned().into())
            }
            Some(other) => {
                Err(format!("URL scheme '{other}' not supported; use http:// or https://").into())
            }
            None => Err(format!("invalid URL '{url}': missing scheme").into()),
        }
    }
}

#[async_trait]
impl HttpTransport for HyperTransport {
    async fn post_form(&self, url: &str, body: Bytes) -> Result<TransportResponse, BoxError> {
        let uri = self.validate_url(url)?;

        let request = Request::post(uri)
            .header(
                http::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded; charset=UTF-8",
            )
            .body(Full::new(body))?;

        let pending = self.client.request(request);
        let response = match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, pending)
                .await
                .map_err(|_| format!("request timed out after {limit:?}"))??,
            None => pending.await?,
        };

        let (parts, body) = response.into_parts();
        // Collecting the entity drives the exchange to completion so the
        // pooled connection is reusable; dropping early would tear it down.
        let body = body.collect().await?.to_bytes();

        Ok(TransportResponse {
            status: parts.status,
            body,
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn hyper_transport(security: TransportSecurity) -> HyperTransport {
        let config = InvokerConfig {
            transport: security,
            ..InvokerConfig::default()
        };
        HyperTransport::from_config(&config).unwrap()
    }

    #[tokio::test]
    async fn posts_form_body_and_returns_status_and_entity() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(Method::POST)
                .path("/app/api")
                .header(
                    "content-type",
                    "application/x-www-form-urlencoded; charset=UTF-8",
                )
                .body("cmd=account&username=u&password=p");
            then.status(200).body("balance:42");
        });

        let transport = hyper_transport(TransportSecurity::AllowInsecureHttp);
        let response = transport
            .post_form(
                &server.url("/app/api"),
                Bytes::from_static(b"cmd=account&username=u&password=p"),
            )
            .await
            .unwrap();

        mock.assert();
        assert_eq!(response.status, http::StatusCode::OK);
        assert_eq!(response.body, Bytes::from_static(b"balance:42"));
    }

    #[tokio::test]
    async fn non_2xx_status_is_not_a_transport_error() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(Method::POST).path("/app/api");
            then.status(500).body("boom");
        });

        let transport = hyper_transport(TransportSecurity::AllowInsecureHttp);
        let response = transport
            .post_form(&server.url("/app/api"), Bytes::from_static(b"cmd=x"))
            .await
            .unwrap();

        assert_eq!(response.status, http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body, Bytes::from_static(b"boom"));
    }

    #[tokio::test]
    async fn http_scheme_rejected_when_tls_only() {
        let transport = hyper_transport(TransportSecurity::TlsOnly);

        let err = transport
            .post_form("http://example.com/app/api", Bytes::new())
            .await
            .unwrap_err();

        assert!(
            err.to_string().contains("HTTPS required"),
            "unexpected error: {err}"
        );
    }

    #[tokio::test]
    async fn unsupported_scheme_rejected() {
        let transport = hyper_transport(TransportSecurity::AllowInsecureHttp);

        let err = transport
            .post_form("ftp://files.example.com/x", Bytes::new())
            .await
            .unwrap_err();

        assert!(
            err.to_string().contains("scheme 'ftp' not supported"),
            "unexpected error: {err}"
        );
    }

    #[tokio::test]
    async fn relative_url_rejected() {
        let transport = hyper_transport(TransportSecurity::AllowInsecureHttp);

        let err = transport.post_form("/app/api", Bytes::new()).await.unwrap_err();

        assert!(err.to_string().contains("invalid URL"), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn connection_failure_surfaces_as_error() {
        // Port 0 is never connectable; the connector fails without touching
        // the network.
        let transport = hyper_transport(TransportSecurity::AllowInsecureHttp);

        let err = transport
            .post_form("http://127.0.0.1:0/app/api", Bytes::from_static(b"cmd=x"))
            .await
            .unwrap_err();

        assert!(!err.to_string().is_empty());
    }
}
