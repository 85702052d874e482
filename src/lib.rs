//! Google OAuth 2.0 / OpenID Connect authorization-code client: CSRF-checked consent redirects,
//! code exchange, userinfo lookups, refresh, and revocation behind a pluggable transport.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod flows;
pub mod http;
pub mod obs;
pub mod provider;
pub mod session;
pub mod user;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::collections::VecDeque;
	// self
	use crate::{
		config::ClientConfig,
		error::TransportError,
		flows::GoogleOAuth2,
		http::{HttpTransport, JsonObject, Params, TransportFuture},
	};

	/// Client identifier used by [`build_recording_engine`].
	pub const TEST_CLIENT_ID: &str = "test-client.apps.googleusercontent.com";
	/// Client secret used by [`build_recording_engine`].
	pub const TEST_CLIENT_SECRET: &str = "test-client-secret";
	/// Redirect URI used by [`build_recording_engine`].
	pub const TEST_REDIRECT_URI: &str = "https://app.example.com/auth/google/callback";

	/// HTTP method seen by [`RecordingTransport`].
	#[derive(Clone, Copy, Debug, PartialEq, Eq)]
	pub enum Method {
		/// `GET` with query parameters.
		Get,
		/// `POST` with a form body.
		Post,
	}

	/// One request captured by [`RecordingTransport`].
	#[derive(Clone, Debug)]
	pub struct RecordedCall {
		/// Request method.
		pub method: Method,
		/// Target URL without the parameters.
		pub url: Url,
		/// Query or form parameters in wire order.
		pub params: Params,
	}
	impl RecordedCall {
		/// Returns the last value sent for `key`.
		pub fn param(&self, key: &str) -> Option<&str> {
			self.params.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
		}
	}

	/// Scripted answer for the next call.
	#[derive(Clone, Debug)]
	pub enum Reply {
		/// Decoded JSON object.
		Json(JsonObject),
		/// Empty body.
		Empty,
		/// Network-level failure.
		NetworkFailure,
	}

	/// In-process [`HttpTransport`] that records every call and answers from a script.
	///
	/// Clones share the script and the call log. A call without a scripted reply fails with an
	/// I/O error.
	#[derive(Clone, Debug, Default)]
	pub struct RecordingTransport {
		replies: Arc<Mutex<VecDeque<Reply>>>,
		calls: Arc<Mutex<Vec<RecordedCall>>>,
	}
	impl RecordingTransport {
		/// Queues a JSON object reply.
		pub fn reply_json(self, value: serde_json::Value) -> Self {
			let serde_json::Value::Object(object) = value else {
				panic!("Scripted replies must be JSON objects.");
			};

			self.reply(Reply::Json(object))
		}

		/// Queues an empty-body reply.
		pub fn reply_empty(self) -> Self {
			self.reply(Reply::Empty)
		}

		/// Queues a network failure.
		pub fn reply_network_failure(self) -> Self {
			self.reply(Reply::NetworkFailure)
		}

		/// Returns a snapshot of the recorded calls.
		pub fn calls(&self) -> Vec<RecordedCall> {
			self.calls.lock().clone()
		}

		fn reply(self, reply: Reply) -> Self {
			self.replies.lock().push_back(reply);

			self
		}

		fn answer(
			&self,
			method: Method,
			url: &Url,
			params: &[(String, String)],
		) -> TransportFuture<'_> {
			let call = RecordedCall { method, url: url.clone(), params: params.to_vec() };

			self.calls.lock().push(call);

			let outcome = match self.replies.lock().pop_front() {
				Some(Reply::Json(object)) => Ok(Some(object)),
				Some(Reply::Empty) => Ok(None),
				Some(Reply::NetworkFailure) => Err(TransportError::network(std::io::Error::new(
					std::io::ErrorKind::ConnectionRefused,
					"scripted network failure",
				))),
				None => Err(TransportError::Io(std::io::Error::other("no scripted reply left"))),
			};

			Box::pin(async move { outcome })
		}
	}
	impl HttpTransport for RecordingTransport {
		fn get<'a>(&'a self, url: &'a Url, query: &'a [(String, String)]) -> TransportFuture<'a> {
			self.answer(Method::Get, url, query)
		}

		fn post<'a>(&'a self, url: &'a Url, form: &'a [(String, String)]) -> TransportFuture<'a> {
			self.answer(Method::Post, url, form)
		}
	}

	/// Builds a stateful engine over `transport` with the `TEST_*` credentials.
	pub fn build_recording_engine(
		transport: RecordingTransport,
	) -> GoogleOAuth2<RecordingTransport> {
		let client = ClientConfig::new(TEST_CLIENT_ID, TEST_CLIENT_SECRET, TEST_REDIRECT_URI)
			.expect("Test client fixture should be valid.");

		GoogleOAuth2::with_http_client(client, transport)
			.expect("Test engine should build from the fixed endpoints.")
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
