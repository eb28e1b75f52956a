//! The gateway command invoker.

use std::sync::Arc;

use bytes::Bytes;

use crate::config::InvokerConfig;
use crate::error::ServiceInvokerError;
use crate::transport::{HttpTransport, HyperTransport};

/// Client-side invoker for TextMagic gateway commands.
///
/// Holds the fixed endpoint URL and a shared transport handle; both are
/// immutable after construction, so one instance can serve the whole process.
/// The invoker is `Send + Sync` and cloning is cheap; concurrent invocations
/// from multiple tasks are safe because there is no other shared state.
#[derive(Clone)]
pub struct HttpServiceInvoker {
    api_url: String,
    transport: Arc<dyn HttpTransport>,
}

impl HttpServiceInvoker {
    /// Create an invoker for the production gateway with the default
    /// transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the default transport cannot be built.
    pub fn new() -> Result<Self, ServiceInvokerError> {
        Self::with_config(InvokerConfig::default())
    }

    /// Create an invoker from an explicit configuration, building the
    /// default hyper-based transport from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be built from `config`.
    pub fn with_config(config: InvokerConfig) -> Result<Self, ServiceInvokerError> {
        let transport =
            HyperTransport::from_config(&config).map_err(ServiceInvokerError::transport)?;
        Ok(Self::with_transport(&config, Arc::new(transport)))
    }

    /// Create an invoker over a caller-provided transport.
    ///
    /// Only the endpoint URL is taken from `config`; transport settings are
    /// the provided implementation's concern.
    #[must_use]
    pub fn with_transport(config: &InvokerConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            api_url: config.api_url.clone(),
            transport,
        }
    }

    /// Send one authenticated command to the gateway and return the raw
    /// response text.
    ///
    /// The form body is encoded in a fixed field order: `cmd`, `username`,
    /// `password`, then `parameters` in the order given. Caller-supplied
    /// keys named `cmd`, `username` or `password` are not deduplicated; they
    /// produce duplicate fields exactly as provided.
    ///
    /// A status in 200-299 returns the entity decoded as UTF-8 text, with no
    /// trimming or parsing. The call owns no retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceInvokerError`] when the gateway answers with a status
    /// outside 200-299 (message names the code), or when the transport fails
    /// (message and `source()` taken from the underlying error).
    pub async fn invoke(
        &self,
        login: &str,
        password: &str,
        command: &str,
        parameters: &[(&str, &str)],
    ) -> Result<String, ServiceInvokerError> {
        let body = encode_form_body(login, password, command, parameters)
            .map_err(|e| ServiceInvokerError::transport(Box::new(e)))?;

        // Guard keeps the parameter trace string from being built when debug
        // logging is off. The password is deliberately absent from the trace.
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!(
                login,
                command,
                parameters = %format_parameters(parameters),
                "invoking gateway command"
            );
        }

        let response = self
            .transport
            .post_form(&self.api_url, Bytes::from(body))
            .await
            .map_err(|cause| {
                tracing::debug!(error = %cause, "transport failure during gateway invocation");
                ServiceInvokerError::transport(cause)
            })?;

        if !response.status.is_success() {
            return Err(ServiceInvokerError::http_status(response.status.as_u16()));
        }

        Ok(String::from_utf8_lossy(&response.body).into_owned())
    }
}

/// Encode the outgoing form body with the required leading fields.
fn encode_form_body(
    login: &str,
    password: &str,
    command: &str,
    parameters: &[(&str, &str)],
) -> Result<String, serde_urlencoded::ser::Error> {
    let mut fields: Vec<(&str, &str)> = Vec::with_capacity(3 + parameters.len());
    fields.push(("cmd", command));
    fields.push(("username", login));
    fields.push(("password", password));
    fields.extend_from_slice(parameters);
    serde_urlencoded::to_string(&fields)
}

/// Render parameters as `[key = value; ...]` for the debug trace.
fn format_parameters(parameters: &[(&str, &str)]) -> String {
    let mut out = String::from("[");
    for (i, (key, value)) in parameters.iter().enumerate() {
        if i > 0 {
            out.push_str("; ");
        }
        out.push_str(key);
        out.push_str(" = ");
        out.push_str(value);
    }
    out.push(']');
    out
}
