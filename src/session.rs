//! Session contracts consumed by stateful flows, plus the callback inputs they validate.
//!
//! The engine never reaches for ambient request state: redirect-build and callback handling
//! receive a [`SessionStore`] and [`CallbackParams`] explicitly.

pub mod memory;

pub use memory::MemorySession;

// self
use crate::_prelude::*;

/// Boxed future returned by [`SessionStore`] calls.
pub type SessionFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SessionError>> + 'a + Send>>;

/// Per-user session storage owned by the host application.
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Stores `value` under `key`, replacing any previous value.
	fn put<'a>(&'a self, key: &'a str, value: String) -> SessionFuture<'a, ()>;

	/// Reads and removes the value stored under `key`.
	fn pull<'a>(&'a self, key: &'a str) -> SessionFuture<'a, Option<String>>;
}

/// Error type produced by [`SessionStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum SessionError {
	/// Backend-level failure for the session engine.
	#[error("Session backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Inputs read from the inbound callback request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackParams {
	/// `state` echoed back by the provider.
	pub state: Option<String>,
	/// Authorization `code` issued by the provider.
	pub code: Option<String>,
	/// `error` reported when the user denied consent.
	pub error: Option<String>,
}
impl CallbackParams {
	/// Creates callback inputs from already-extracted values.
	pub fn new(state: Option<String>, code: Option<String>) -> Self {
		Self { state, code, error: None }
	}

	/// Parses a raw, form URL-encoded query string (without the leading `?`).
	///
	/// Repeated keys keep the last value.
	pub fn from_query(query: &str) -> Self {
		let mut params = Self::default();

		for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
			match key.as_ref() {
				"state" => params.state = Some(value.into_owned()),
				"code" => params.code = Some(value.into_owned()),
				"error" => params.error = Some(value.into_owned()),
				_ => {},
			}
		}

		params
	}

	/// Parses the query string of a full callback URL.
	pub fn from_url(url: &Url) -> Self {
		url.query().map(Self::from_query).unwrap_or_default()
	}

	/// Returns the authorization code when present and non-empty.
	pub fn code(&self) -> Option<&str> {
		self.code.as_deref().filter(|code| !code.is_empty())
	}

	/// Returns the echoed state, if any.
	pub fn state(&self) -> Option<&str> {
		self.state.as_deref()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn callback_params_parse_from_url() {
		let url = Url::parse(
			"https://app.example.com/callback?state=abc123&code=4%2F0Ab+cd&scope=email+openid",
		)
		.expect("Callback URL fixture should parse.");
		let params = CallbackParams::from_url(&url);

		assert_eq!(params.state(), Some("abc123"));
		assert_eq!(params.code(), Some("4/0Ab cd"));
		assert_eq!(params.error, None);
	}

	#[test]
	fn empty_code_reads_as_absent() {
		let params = CallbackParams::from_query("state=abc&code=");

		assert_eq!(params.code, Some(String::new()));
		assert_eq!(params.code(), None);
	}

	#[test]
	fn consent_denial_is_captured() {
		let params = CallbackParams::from_query("error=access_denied&state=abc");

		assert_eq!(params.error.as_deref(), Some("access_denied"));
		assert_eq!(params.code(), None);
	}

	#[test]
	fn url_without_query_yields_defaults() {
		let url = Url::parse("https://app.example.com/callback")
			.expect("Callback URL fixture should parse.");

		assert_eq!(CallbackParams::from_url(&url), CallbackParams::default());
	}
}
