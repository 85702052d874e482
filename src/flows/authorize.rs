//! Consent redirect construction.
//!
//! A stateful engine issues a fresh CSRF state per redirect, stores it in the host session under
//! [`STATE_SESSION_KEY`], and sends it as the `state` parameter. A stateless engine leaves the
//! session untouched. No network call is made.

// crates.io
use oauth2::CsrfToken;
// self
use crate::{
	_prelude::*,
	auth::{self, STATE_SESSION_KEY},
	flows::{GoogleOAuth2, common},
	http::HttpTransport,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	session::SessionStore,
};

/// Consent redirect handed back to the host application.
#[derive(Clone)]
pub struct AuthorizationRedirect {
	url: Url,
	state: Option<CsrfToken>,
}
impl AuthorizationRedirect {
	/// Fully-formed authorize URL the user agent should be sent to.
	pub fn url(&self) -> &Url {
		&self.url
	}

	/// CSRF state embedded in the URL; `None` for stateless engines.
	pub fn state(&self) -> Option<&CsrfToken> {
		self.state.as_ref()
	}

	/// Consumes the redirect, returning the target URL.
	pub fn into_url(self) -> Url {
		self.url
	}
}
impl Debug for AuthorizationRedirect {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizationRedirect")
			.field("host", &self.url.host_str())
			.field("path", &self.url.path())
			.field("has_state", &self.state.is_some())
			.finish()
	}
}

impl<T> GoogleOAuth2<T>
where
	T: ?Sized + HttpTransport,
{
	/// Builds the authorize URL for an already-issued state (or none).
	pub fn authorization_url(&self, state: Option<&CsrfToken>) -> Url {
		let params =
			common::authorize_params(&self.client, &self.scopes, state, &self.extra_params);
		let mut url = self.endpoints.authorization.url().clone();

		url.query_pairs_mut().extend_pairs(params.iter());

		url
	}

	/// Issues the consent redirect, storing the CSRF state in `session` when stateful.
	pub async fn build_authorization_redirect(
		&self,
		session: &dyn SessionStore,
	) -> Result<AuthorizationRedirect> {
		const KIND: FlowKind = FlowKind::Authorize;

		let span = FlowSpan::new(KIND, "build_authorization_redirect");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let state = if self.stateless {
					None
				} else {
					let state = auth::generate_state();

					session.put(STATE_SESSION_KEY, state.secret().clone()).await?;

					Some(state)
				};
				let url = self.authorization_url(state.as_ref());

				Ok(AuthorizationRedirect { url, state })
			})
			.await;

		obs::record_result(KIND, &result);

		result
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::{RecordingTransport, TEST_CLIENT_ID, TEST_REDIRECT_URI, build_recording_engine},
		auth::STATE_LEN,
		provider::AUTHORIZATION_ENDPOINT,
		session::MemorySession,
	};

	fn query(url: &Url, key: &str) -> Vec<String> {
		url.query_pairs().filter(|(k, _)| k == key).map(|(_, v)| v.into_owned()).collect()
	}

	#[tokio::test]
	async fn stateful_redirect_stores_matching_state() {
		let transport = RecordingTransport::default();
		let engine = build_recording_engine(transport.clone());
		let session = MemorySession::default();
		let redirect = engine
			.build_authorization_redirect(&session)
			.await
			.expect("Redirect should be built.");
		let stored = session.peek(STATE_SESSION_KEY).expect("State should be stored.");

		assert!(stored.len() >= STATE_LEN);
		assert_eq!(query(redirect.url(), "state"), vec![stored.clone()]);
		assert_eq!(redirect.state().map(|state| state.secret().as_str()), Some(stored.as_str()));
		assert!(transport.calls().is_empty());
	}

	#[tokio::test]
	async fn redirect_carries_fixed_fields() {
		let engine = build_recording_engine(RecordingTransport::default());
		let session = MemorySession::default();
		let url = engine
			.build_authorization_redirect(&session)
			.await
			.expect("Redirect should be built.")
			.into_url();

		assert!(url.as_str().starts_with(AUTHORIZATION_ENDPOINT));
		assert_eq!(query(&url, "client_id"), vec![TEST_CLIENT_ID.to_owned()]);
		assert_eq!(query(&url, "redirect_uri"), vec![TEST_REDIRECT_URI.to_owned()]);
		assert_eq!(query(&url, "scope"), vec!["email openid".to_owned()]);
		assert_eq!(query(&url, "response_type"), vec!["code".to_owned()]);
		assert!(url.as_str().contains("scope=email+openid"));
	}

	#[tokio::test]
	async fn stateless_redirect_leaves_session_untouched() {
		let engine = build_recording_engine(RecordingTransport::default()).stateless();
		let session = MemorySession::default();
		let redirect = engine
			.build_authorization_redirect(&session)
			.await
			.expect("Redirect should be built.");

		assert!(redirect.state().is_none());
		assert!(query(redirect.url(), "state").is_empty());
		assert!(session.is_empty());
	}

	#[tokio::test]
	async fn duplicate_scopes_are_sent_once() {
		let engine = build_recording_engine(RecordingTransport::default())
			.with_scopes(["openid", "email", "email", "profile"])
			.expect("Scopes should be valid.");
		let redirect = engine
			.build_authorization_redirect(&MemorySession::default())
			.await
			.expect("Redirect should be built.");

		assert_eq!(query(redirect.url(), "scope"), vec!["email openid profile".to_owned()]);
	}

	#[tokio::test]
	async fn extra_params_override_built_in_fields() {
		let engine = build_recording_engine(RecordingTransport::default()).with_extra_params([
			("scope", "https://www.googleapis.com/auth/drive"),
			("prompt", "consent"),
		]);
		let redirect = engine
			.build_authorization_redirect(&MemorySession::default())
			.await
			.expect("Redirect should be built.");

		assert_eq!(
			query(redirect.url(), "scope"),
			vec!["https://www.googleapis.com/auth/drive".to_owned()]
		);
		assert_eq!(query(redirect.url(), "prompt"), vec!["consent".to_owned()]);
	}

	#[test]
	fn empty_scope_sets_are_still_sent() {
		let engine = build_recording_engine(RecordingTransport::default())
			.with_scopes(Vec::<String>::new())
			.expect("Empty scope lists are legal.");
		let url = engine.authorization_url(None);

		assert_eq!(query(&url, "scope"), vec![String::new()]);
	}

	#[test]
	fn debug_output_hides_the_state() {
		let state = CsrfToken::new("sensitive-state-value".into());
		let engine = build_recording_engine(RecordingTransport::default());
		let url = engine.authorization_url(Some(&state));
		let redirect = AuthorizationRedirect { url, state: Some(state) };

		assert!(!format!("{redirect:?}").contains("sensitive-state-value"));
	}
}
