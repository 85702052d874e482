//! Authorization-code flow engine.
//!
//! [`GoogleOAuth2`] owns the client configuration, the requested scopes, the extra authorize
//! parameters, the stateless toggle, and the user cached by the last successful lookup. The
//! grant-specific logic lives in submodules:
//!
//! - `authorize`: consent redirect construction and CSRF state issuance,
//! - `callback`: state validation, code exchange, and profile mapping,
//! - `token`: userinfo lookups, refresh, and revocation for tokens obtained elsewhere.
//!
//! An engine is meant to be built per inbound request. Every operation that touches the cached
//! user takes `&mut self`, so one engine can never serve two requests concurrently.

pub mod authorize;
pub mod callback;
pub mod token;

mod common;

pub use authorize::*;

// self
use crate::{
	_prelude::*,
	auth::ScopeSet,
	config::{self, ClientConfig, FlowConfig},
	error::ConfigError,
	http::HttpTransport,
	provider::ProviderEndpoints,
	user::UserRecord,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Engine specialized for the crate's default reqwest transport.
pub type ReqwestGoogleOAuth2 = GoogleOAuth2<ReqwestTransport>;

/// Drives the authorization-code flow against the fixed Google endpoints.
pub struct GoogleOAuth2<T>
where
	T: ?Sized + HttpTransport,
{
	/// Transport used for every outbound provider request.
	pub http: Arc<T>,
	client: ClientConfig,
	endpoints: ProviderEndpoints,
	scopes: ScopeSet,
	extra_params: BTreeMap<String, String>,
	stateless: bool,
	user: Option<UserRecord>,
}
impl<T> GoogleOAuth2<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates a stateful engine requesting `openid email` over the caller-provided transport.
	pub fn with_http_client(
		client: ClientConfig,
		http: impl Into<Arc<T>>,
	) -> Result<Self, ConfigError> {
		Ok(Self {
			http: http.into(),
			client,
			endpoints: ProviderEndpoints::google()?,
			scopes: ScopeSet::openid_email(),
			extra_params: BTreeMap::new(),
			stateless: false,
			user: None,
		})
	}

	/// Validates a [`FlowConfig`] and builds an engine from it.
	pub fn from_config(config: &FlowConfig, http: impl Into<Arc<T>>) -> Result<Self, ConfigError> {
		let mut engine = Self::with_http_client(config.client()?, http)?;

		engine.scopes = config.scopes.clone();
		engine.extra_params = config.extra_params.clone();
		engine.stateless = config.stateless;

		Ok(engine)
	}

	/// Validated client credentials.
	pub fn client_config(&self) -> &ClientConfig {
		&self.client
	}

	/// Provider endpoints the engine talks to.
	pub fn endpoints(&self) -> &ProviderEndpoints {
		&self.endpoints
	}

	/// Redirect URI sent with the authorize and token requests.
	pub fn redirect_uri(&self) -> &str {
		self.client.redirect_uri.as_str()
	}

	/// Replaces the redirect URI.
	pub fn set_redirect_uri(&mut self, url: impl Into<String>) -> Result<&mut Self, ConfigError> {
		let url = url.into();

		if url.is_empty() {
			return Err(ConfigError::MissingField { field: "redirect_uri" });
		}

		self.client.redirect_uri = config::parse_redirect(url)?;

		Ok(self)
	}

	/// Requested scopes.
	pub fn scopes(&self) -> &ScopeSet {
		&self.scopes
	}

	/// Replaces the requested scopes with the deduplicated input.
	///
	/// An empty list is legal and leaves the provider to apply its default scopes.
	pub fn set_scopes<I, S>(&mut self, scopes: I) -> Result<&mut Self, ConfigError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scopes = ScopeSet::new(scopes)?;

		Ok(self)
	}

	/// Builder flavor of [`set_scopes`](Self::set_scopes).
	pub fn with_scopes<I, S>(mut self, scopes: I) -> Result<Self, ConfigError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.set_scopes(scopes)?;

		Ok(self)
	}

	/// Extra parameters merged into the authorize request.
	pub fn extra_params(&self) -> &BTreeMap<String, String> {
		&self.extra_params
	}

	/// Replaces the extra authorize parameters.
	///
	/// A key that collides with a built-in parameter (`client_id`, `redirect_uri`, `scope`,
	/// `response_type`, `state`) replaces the built-in value.
	pub fn set_extra_params<I, K, V>(&mut self, params: I) -> &mut Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.extra_params = params.into_iter().map(|(k, v)| (k.into(), v.into())).collect();

		self
	}

	/// Builder flavor of [`set_extra_params`](Self::set_extra_params).
	pub fn with_extra_params<I, K, V>(mut self, params: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.set_extra_params(params);

		self
	}

	/// Returns true when CSRF state is neither issued nor validated.
	pub fn is_stateless(&self) -> bool {
		self.stateless
	}

	/// Toggles CSRF state usage.
	pub fn set_stateless(&mut self, stateless: bool) -> &mut Self {
		self.stateless = stateless;

		self
	}

	/// Switches the engine to stateless mode, for API-only flows without a session.
	pub fn stateless(mut self) -> Self {
		self.stateless = true;

		self
	}

	/// User cached by the last successful callback or token lookup.
	pub fn user(&self) -> Option<&UserRecord> {
		self.user.as_ref()
	}

	/// Drops and returns the cached user so the next callback runs the full flow again.
	pub fn forget_user(&mut self) -> Option<UserRecord> {
		self.user.take()
	}
}
#[cfg(feature = "reqwest")]
impl GoogleOAuth2<ReqwestTransport> {
	/// Creates an engine that provisions its own reqwest transport via
	/// [`ReqwestTransport::with_defaults`].
	pub fn new(client: ClientConfig) -> Result<Self, ConfigError> {
		Self::with_http_client(client, ReqwestTransport::with_defaults()?)
	}
}
impl<T> Debug for GoogleOAuth2<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("GoogleOAuth2")
			.field("client_id", &self.client.client_id)
			.field("redirect_uri", &self.redirect_uri())
			.field("scopes", &self.scopes)
			.field("extra_params", &self.extra_params)
			.field("stateless", &self.stateless)
			.field("user_cached", &self.user.is_some())
			.finish()
	}
}
