//! The asynchronous executor.
//!
//! This module provides [`ODataClient`], which drives a compiled command
//! through the transport collaborator, maps HTTP statuses to typed
//! outcomes, and decodes success bodies into entries.
//!
//! Each terminal call performs exactly one network round trip and suspends
//! only at the send/receive boundary. The client holds no locks and caches
//! nothing: commands and descriptors are immutable values, so any number of
//! operations may run concurrently over one client without coordination.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::auth::Credentials;
use crate::client::{HttpTransport, RequestDescriptor, Transport, TransportResponse};
use crate::config::ServiceConfig;
use crate::data::Entry;
use crate::odata::command::Command;
use crate::odata::compile::{compile, resolve, Verb};
use crate::odata::errors::{DecodeError, ODataError};

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The async client executing command chains against one service.
///
/// # Status mapping
///
/// | Status | Context | Outcome |
/// |---|---|---|
/// | 200/201/204 | any | success, payload per body presence |
/// | 404 | find | success with no entity — probing for absence is normal |
/// | 404 | update/delete | [`ODataError::NotFound`] |
/// | other 4xx/5xx | any | [`ODataError::Protocol`] with status and raw body |
///
/// The client never retries; retry policy belongs to the caller.
///
/// # Thread Safety
///
/// `ODataClient` is `Send + Sync` and can be shared across tasks.
///
/// # Example
///
/// ```rust,ignore
/// use odata_client::{Command, Entry, ODataClient, ServiceConfig, ServiceRoot};
///
/// let config = ServiceConfig::builder()
///     .service_root(ServiceRoot::new("https://services.example.org/V2/OData")?)
///     .build()?;
/// let client = ODataClient::new(&config);
///
/// let created = client
///     .insert(&Command::for_collection("Products").set(
///         Entry::new().with("Name", "Test1").with("Price", 18),
///     ))
///     .await?;
/// ```
pub struct ODataClient {
    service_root: String,
    credentials: Credentials,
    default_headers: HashMap<String, String>,
    transport: Arc<dyn Transport>,
}

impl ODataClient {
    /// Creates a client over the default `reqwest` transport.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be created; see
    /// [`HttpTransport::new`].
    #[must_use]
    pub fn new(config: &ServiceConfig) -> Self {
        Self::with_transport(config, Arc::new(HttpTransport::new()))
    }

    /// Creates a client over a caller-supplied transport.
    ///
    /// Use this to substitute a transport with custom timeouts, or a stub
    /// in tests.
    #[must_use]
    pub fn with_transport(config: &ServiceConfig, transport: Arc<dyn Transport>) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}OData Client Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("User-Agent".to_string(), user_agent);

        Self {
            service_root: config.service_root().as_str().to_string(),
            credentials: config.credentials().clone(),
            default_headers,
            transport,
        }
    }

    /// Returns the service root this client targets.
    #[must_use]
    pub fn service_root(&self) -> &str {
        &self.service_root
    }

    /// Returns the default headers attached to every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Finds a single entity.
    ///
    /// With a key, the single-entity URL is requested directly. With a
    /// filter, the filtered collection is requested and its first entry
    /// returned. Absence — a 404, an empty body, or an empty match set —
    /// is `Ok(None)`, never an error.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError`] for malformed chains, protocol failures,
    /// undecodable bodies, and transport failures.
    pub async fn find_one(&self, command: &Command) -> Result<Option<Entry>, ODataError> {
        let by_key = resolve(command).addressed_by_key;
        let descriptor = compile(command, Verb::Find)?;
        let response = self.dispatch(&descriptor).await?;

        if response.status == 404 {
            return Ok(None);
        }
        if !response.is_success() {
            return Err(Self::protocol_failure(&response));
        }
        if response.body.is_empty() {
            return Ok(None);
        }

        if by_key {
            decode_entity(&response.body).map(Some).map_err(Into::into)
        } else {
            Ok(decode_collection(&response.body)?.into_iter().next())
        }
    }

    /// Finds all entities the chain addresses.
    ///
    /// A 404 or empty body yields an empty sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError`] for malformed chains, protocol failures,
    /// undecodable bodies, and transport failures.
    pub async fn find_all(&self, command: &Command) -> Result<Vec<Entry>, ODataError> {
        let by_key = resolve(command).addressed_by_key;
        let descriptor = compile(command, Verb::Find)?;
        let response = self.dispatch(&descriptor).await?;

        if response.status == 404 {
            return Ok(Vec::new());
        }
        if !response.is_success() {
            return Err(Self::protocol_failure(&response));
        }
        if response.body.is_empty() {
            return Ok(Vec::new());
        }

        if by_key {
            Ok(vec![decode_entity(&response.body)?])
        } else {
            decode_collection(&response.body).map_err(Into::into)
        }
    }

    /// Inserts a new entity and returns the created entry.
    ///
    /// The chain must carry a payload and no key; the service must echo
    /// the created entity (a bodiless success is a decode failure).
    ///
    /// # Errors
    ///
    /// Returns [`ODataError`] for malformed chains, protocol failures,
    /// undecodable bodies, and transport failures.
    pub async fn insert(&self, command: &Command) -> Result<Entry, ODataError> {
        let descriptor = compile(command, Verb::Insert)?;
        let response = self.dispatch(&descriptor).await?;

        if !response.is_success() {
            return Err(Self::protocol_failure(&response));
        }
        if response.body.is_empty() {
            return Err(DecodeError::MissingBody.into());
        }
        decode_entity(&response.body).map_err(Into::into)
    }

    /// Updates the addressed entity with the chain's resolved payload.
    ///
    /// Returns the echoed entity when the service responds with a body,
    /// `None` on a bodiless 204.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError::NotFound`] when the addressed entity does not
    /// exist, and [`ODataError`] for malformed chains, protocol failures,
    /// undecodable bodies, and transport failures.
    pub async fn update(&self, command: &Command) -> Result<Option<Entry>, ODataError> {
        let target = resolve(command).describe_target();
        let descriptor = compile(command, Verb::Update)?;
        let response = self.dispatch(&descriptor).await?;

        if response.status == 404 {
            return Err(Self::not_found(command, target));
        }
        if !response.is_success() {
            return Err(Self::protocol_failure(&response));
        }
        if response.body.is_empty() {
            return Ok(None);
        }
        decode_entity(&response.body).map(Some).map_err(Into::into)
    }

    /// Deletes the addressed entity.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError::NotFound`] when the addressed entity does not
    /// exist, and [`ODataError`] for malformed chains, protocol failures,
    /// and transport failures.
    pub async fn delete(&self, command: &Command) -> Result<(), ODataError> {
        let target = resolve(command).describe_target();
        let descriptor = compile(command, Verb::Delete)?;
        let response = self.dispatch(&descriptor).await?;

        if response.status == 404 {
            return Err(Self::not_found(command, target));
        }
        if !response.is_success() {
            return Err(Self::protocol_failure(&response));
        }
        Ok(())
    }

    /// Sends one descriptor through the transport.
    async fn dispatch(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<TransportResponse, ODataError> {
        let url = format!("{}/{}", self.service_root, descriptor.url);

        let mut headers = self.default_headers.clone();
        for (name, value) in &descriptor.headers {
            headers.insert(name.clone(), value.clone());
        }
        self.credentials.apply(&mut headers);

        let body = descriptor
            .body
            .as_ref()
            .map(|body| body.to_string().into_bytes());

        debug!(method = %descriptor.method, url = %url, "dispatching request");

        let response = self
            .transport
            .send(descriptor.method, &url, &headers, body.as_deref())
            .await?;
        Ok(response)
    }

    fn not_found(command: &Command, target: String) -> ODataError {
        ODataError::NotFound {
            collection: command.collection().to_string(),
            target,
        }
    }

    fn protocol_failure(response: &TransportResponse) -> ODataError {
        warn!(status = response.status, "service returned a protocol failure");
        ODataError::Protocol {
            status: response.status,
            body: response.body_text(),
        }
    }
}

// Verify ODataClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ODataClient>();
};

/// Decodes a single-entity body, unwrapping the `d` envelope when present.
fn decode_entity(body: &[u8]) -> Result<Entry, DecodeError> {
    let json: serde_json::Value = serde_json::from_slice(body)?;
    let payload = unwrap_envelope(&json);
    Entry::from_json(payload).ok_or(DecodeError::UnexpectedShape {
        expected: "a wire-format object",
    })
}

/// Decodes a collection body.
///
/// Accepts the enumerable-items shapes the protocol's dialects produce:
/// a `value` property, a `results` property (inside a `d` envelope or
/// not), or a bare array.
fn decode_collection(body: &[u8]) -> Result<Vec<Entry>, DecodeError> {
    let json: serde_json::Value = serde_json::from_slice(body)?;
    let payload = unwrap_envelope(&json);

    let items = payload
        .get("value")
        .and_then(serde_json::Value::as_array)
        .or_else(|| payload.get("results").and_then(serde_json::Value::as_array))
        .or_else(|| payload.as_array())
        .ok_or(DecodeError::UnexpectedShape {
            expected: "an enumerable-items property",
        })?;

    items
        .iter()
        .map(|item| {
            Entry::from_json(item).ok_or(DecodeError::UnexpectedShape {
                expected: "wire-format objects in the items sequence",
            })
        })
        .collect()
}

/// Unwraps the legacy single-property `d` envelope.
fn unwrap_envelope(json: &serde_json::Value) -> &serde_json::Value {
    match json.as_object() {
        Some(map) if map.len() == 1 => map.get("d").unwrap_or(json),
        _ => json,
    }
}
