//! Transport primitives for provider calls.
//!
//! The module exposes [`HttpTransport`], the engine's only dependency on an HTTP stack, and
//! [`decode_json_object`] so custom transports decode bodies exactly like the bundled
//! [`ReqwestTransport`]. A transport answers every call with one of three outcomes:
//!
//! - `Ok(Some(object))` when the body is a JSON object, whatever the HTTP status (providers put
//!   OAuth `error` payloads in 4xx bodies),
//! - `Ok(None)` when the body is empty,
//! - `Err(TransportError)` when the request failed or the body is not a JSON object.

// self
use crate::{_prelude::*, error::TransportError};

/// Decoded JSON object returned by the provider.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Query or form parameters in wire order.
pub type Params = Vec<(String, String)>;

/// Boxed future returned by [`HttpTransport`] calls.
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<Option<JsonObject>, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP clients able to reach the provider endpoints.
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared (behind an
/// `Arc`) by the short-lived engines built per inbound request. Each call owns its request
/// handle for the duration of the returned future and releases it on every exit path. No
/// retries are expected; a timeout is reported as an ordinary [`TransportError`].
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Issues a `GET` with `query` appended to `url` using form URL-encoding.
	fn get<'a>(&'a self, url: &'a Url, query: &'a [(String, String)]) -> TransportFuture<'a>;

	/// Issues a `POST` with an `application/x-www-form-urlencoded` body.
	fn post<'a>(&'a self, url: &'a Url, form: &'a [(String, String)]) -> TransportFuture<'a>;
}

/// Decodes a provider response body.
///
/// Whitespace-only bodies decode to `None`; anything else must be a JSON object.
pub fn decode_json_object(
	body: &[u8],
	status: Option<u16>,
) -> Result<Option<JsonObject>, TransportError> {
	if body.iter().all(u8::is_ascii_whitespace) {
		return Ok(None);
	}

	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map(Some)
		.map_err(|source| TransportError::Decode { source, status })
}

/// Request timeout used by [`ReqwestTransport::with_defaults`].
#[cfg(feature = "reqwest")]
pub const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Provider endpoints answer directly, so the clients built by [`ReqwestTransport::new`] and
/// [`ReqwestTransport::with_defaults`] never follow redirects. Configure any custom
/// [`ReqwestClient`] passed to [`ReqwestTransport::with_client`] the same way.
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Builds a client with [`DEFAULT_TIMEOUT`] that does not follow redirects.
	pub fn with_defaults() -> Result<Self, crate::error::ConfigError> {
		Self::new(DEFAULT_TIMEOUT)
	}

	/// Builds a client that gives up after `timeout` and does not follow redirects.
	pub fn new(timeout: std::time::Duration) -> Result<Self, crate::error::ConfigError> {
		let client = ReqwestClient::builder()
			.timeout(timeout)
			.redirect(reqwest::redirect::Policy::none())
			.build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	async fn read(request: reqwest::RequestBuilder) -> Result<Option<JsonObject>, TransportError> {
		let response = request.send().await?;
		let status = response.status().as_u16();
		let body = response.bytes().await?;

		#[cfg(feature = "tracing")]
		tracing::debug!(status, bytes = body.len(), "provider responded");

		decode_json_object(&body, Some(status))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn get<'a>(&'a self, url: &'a Url, query: &'a [(String, String)]) -> TransportFuture<'a> {
		Box::pin(Self::read(self.0.get(url.clone()).query(query)))
	}

	fn post<'a>(&'a self, url: &'a Url, form: &'a [(String, String)]) -> TransportFuture<'a> {
		Box::pin(Self::read(self.0.post(url.clone()).form(form)))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn empty_bodies_decode_to_none() {
		assert!(decode_json_object(b"", Some(200)).expect("Empty body is valid.").is_none());
		assert!(decode_json_object(b" \r\n", Some(200)).expect("Blank body is valid.").is_none());
	}

	#[test]
	fn objects_decode_regardless_of_status() {
		let object = decode_json_object(b"{\"error\":\"invalid_token\"}", Some(400))
			.expect("Error payload should decode.")
			.expect("Error payload is not empty.");

		assert_eq!(object.get("error").and_then(|v| v.as_str()), Some("invalid_token"));
	}

	#[test]
	fn non_objects_are_transport_failures() {
		let err = decode_json_object(b"<html>oops</html>", Some(502))
			.expect_err("HTML bodies must not decode.");

		assert!(matches!(err, TransportError::Decode { status: Some(502), .. }));
		assert!(decode_json_object(b"[1,2]", Some(200)).is_err());
	}
}
