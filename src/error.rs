//! Flow-level error types shared across the engine, transport, and session layers.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical flow error exposed by the `try_*` APIs.
///
/// Only [`Error::Config`] is fatal. Every other variant describes a rejection that the
/// `Option`/`bool` flavored APIs collapse into an absent result.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout, undecodable body).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Session store failure.
	#[error(transparent)]
	Session(#[from] crate::session::SessionError),

	/// Stored CSRF state was absent, empty, or did not match the callback.
	#[error("Authorization state is missing or does not match the callback.")]
	CsrfMismatch,
	/// Token argument handed to a token operation was empty.
	#[error("Token argument is empty.")]
	EmptyToken,
	/// Callback carried no authorization code.
	#[error("Callback request is missing the authorization code.")]
	MissingCode,
	/// Token endpoint answered without an `access_token`.
	#[error("Token endpoint response is missing the access token.")]
	MissingAccessToken,
	/// Provider answered with an empty body where a payload was required.
	#[error("Provider returned an empty response.")]
	EmptyResponse,
	/// Provider answered with an OAuth `error` field.
	#[error("Provider returned an OAuth error: {error}.")]
	Provider {
		/// Provider-supplied `error` code.
		error: String,
		/// Provider-supplied `error_description`, when present.
		description: Option<String>,
	},
	/// Revocation endpoint answered with a non-empty payload.
	#[error("Revocation endpoint did not confirm the revocation.")]
	NotRevoked,
}
impl Error {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn label(&self) -> &'static str {
		match self {
			Self::Config(_) => "config",
			Self::Transport(_) => "transport",
			Self::Session(_) => "session",
			Self::CsrfMismatch => "csrf_mismatch",
			Self::EmptyToken => "empty_token",
			Self::MissingCode => "missing_code",
			Self::MissingAccessToken => "missing_access_token",
			Self::EmptyResponse => "empty_response",
			Self::Provider { .. } => "provider",
			Self::NotRevoked => "not_revoked",
		}
	}
}

/// Configuration and validation failures raised while building an engine.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A required client setting is empty.
	#[error("Client configuration is missing `{field}`.")]
	MissingField {
		/// Name of the empty setting.
		field: &'static str,
	},
	/// Redirect URI cannot be parsed.
	#[error("Redirect URI is invalid.")]
	InvalidRedirect {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A fixed provider endpoint cannot be parsed.
	#[error("Provider endpoint `{endpoint}` is invalid.")]
	InvalidEndpoint {
		/// Which endpoint failed to parse.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Requested scopes cannot be normalized.
	#[error("Requested scopes are invalid.")]
	InvalidScope(#[from] crate::auth::ScopeValidationError),
	/// Configuration document could not be deserialized.
	#[error("Configuration document is malformed.")]
	Parse(#[from] serde_path_to_error::Error<serde_json::Error>),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, decoding).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
	/// Provider responded with a body that is not a JSON object.
	#[error("Provider returned a body that is not a JSON object.")]
	Decode {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
