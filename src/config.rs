//! Client credentials and the serde-backed configuration surface.
//!
//! [`ClientConfig`] is the validated, per-engine credential triple. [`FlowConfig`] mirrors the
//! options a host application keeps in its own configuration files (`client_id`,
//! `client_secret`, `redirect_uri`, `scopes`, `extra_params`, `stateless`); loading those files
//! is left to the host, which hands the parsed document to
//! [`GoogleOAuth2::from_config`](crate::flows::GoogleOAuth2::from_config).

// crates.io
use oauth2::{ClientId, ClientSecret, RedirectUrl};
// self
use crate::{
	_prelude::*,
	auth::ScopeSet,
	error::ConfigError,
};

/// Validated OAuth client credentials.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// OAuth 2.0 client identifier used in every request.
	pub client_id: ClientId,
	/// Confidential client secret sent to the token endpoint.
	pub client_secret: ClientSecret,
	/// Callback URL registered with the provider.
	pub redirect_uri: RedirectUrl,
}
impl ClientConfig {
	/// Validates and wraps the credential triple.
	///
	/// Every field must be non-empty and the redirect URI must be an absolute URL.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		redirect_uri: impl Into<String>,
	) -> Result<Self, ConfigError> {
		let client_id = required("client_id", client_id.into())?;
		let client_secret = required("client_secret", client_secret.into())?;
		let redirect_uri = parse_redirect(required("redirect_uri", redirect_uri.into())?)?;

		Ok(Self {
			client_id: ClientId::new(client_id),
			client_secret: ClientSecret::new(client_secret),
			redirect_uri,
		})
	}
}

/// Deserializable engine configuration.
///
/// Every field is optional in the source document: missing credentials surface as
/// [`ConfigError::MissingField`] when the engine is built, `scopes` defaults to
/// `["openid", "email"]`, and the engine is stateful unless `stateless` is set. Scopes are
/// normalized while parsing, so an invalid entry fails at its JSON path.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// Confidential client secret.
	pub client_secret: String,
	/// Callback URL registered with the provider.
	pub redirect_uri: String,
	/// Scopes requested on the consent screen.
	pub scopes: ScopeSet,
	/// Extra authorize parameters; they override built-in keys on collision.
	pub extra_params: BTreeMap<String, String>,
	/// Skips CSRF state generation and validation when true.
	pub stateless: bool,
}
impl FlowConfig {
	/// Creates a configuration with default scopes and no extra parameters.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		redirect_uri: impl Into<String>,
	) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			redirect_uri: redirect_uri.into(),
			..Default::default()
		}
	}

	/// Parses a JSON document, reporting the path of the offending field on failure.
	pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
		let mut deserializer = serde_json::Deserializer::from_str(raw);

		Ok(serde_path_to_error::deserialize(&mut deserializer)?)
	}

	/// Validates the credential triple.
	pub fn client(&self) -> Result<ClientConfig, ConfigError> {
		ClientConfig::new(&self.client_id, &self.client_secret, &self.redirect_uri)
	}
}
impl Default for FlowConfig {
	fn default() -> Self {
		Self {
			client_id: String::new(),
			client_secret: String::new(),
			redirect_uri: String::new(),
			scopes: ScopeSet::openid_email(),
			extra_params: BTreeMap::new(),
			stateless: false,
		}
	}
}
impl Debug for FlowConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("FlowConfig")
			.field("client_id", &self.client_id)
			.field("client_secret_set", &!self.client_secret.is_empty())
			.field("redirect_uri", &self.redirect_uri)
			.field("scopes", &self.scopes)
			.field("extra_params", &self.extra_params)
			.field("stateless", &self.stateless)
			.finish()
	}
}

pub(crate) fn parse_redirect(raw: String) -> Result<RedirectUrl, ConfigError> {
	RedirectUrl::new(raw).map_err(|source| ConfigError::InvalidRedirect { source })
}

fn required(field: &'static str, value: String) -> Result<String, ConfigError> {
	if value.is_empty() { Err(ConfigError::MissingField { field }) } else { Ok(value) }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn client_config_requires_every_field() {
		for (id, secret, redirect, field) in [
			("", "secret", "https://app.example.com/cb", "client_id"),
			("id", "", "https://app.example.com/cb", "client_secret"),
			("id", "secret", "", "redirect_uri"),
		] {
			let err = ClientConfig::new(id, secret, redirect)
				.expect_err("Empty client settings must be rejected.");

			assert!(
				matches!(err, ConfigError::MissingField { field: f } if f == field),
				"Unexpected error for {field}: {err:?}."
			);
		}
	}

	#[test]
	fn client_config_rejects_relative_redirects() {
		let err = ClientConfig::new("id", "secret", "/callback")
			.expect_err("Relative redirect URIs must be rejected.");

		assert!(matches!(err, ConfigError::InvalidRedirect { .. }));
	}

	#[test]
	fn client_secret_stays_out_of_debug_output() {
		let client = ClientConfig::new("id", "very-secret", "https://app.example.com/cb")
			.expect("Client config fixture should be valid.");
		let config = FlowConfig::new("id", "very-secret", "https://app.example.com/cb");

		assert!(!format!("{client:?}").contains("very-secret"));
		assert!(!format!("{config:?}").contains("very-secret"));
	}

	#[test]
	fn json_documents_fill_defaults() {
		let config = FlowConfig::from_json_str(
			r#"{"client_id":"id","client_secret":"secret","redirect_uri":"https://app.example.com/cb"}"#,
		)
		.expect("Minimal config should parse.");

		assert_eq!(config.scopes, ScopeSet::openid_email());
		assert!(config.extra_params.is_empty());
		assert!(!config.stateless);
		assert!(config.client().is_ok());
	}

	#[test]
	fn json_errors_report_the_field_path() {
		let err = FlowConfig::from_json_str(r#"{"client_id":"id","stateless":"yes"}"#)
			.expect_err("Non-boolean stateless flag must be rejected.");

		match err {
			ConfigError::Parse(inner) => assert_eq!(inner.path().to_string(), "stateless"),
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn scopes_are_normalized_while_parsing() {
		let config = FlowConfig::from_json_str(r#"{"scopes":["profile","openid","profile"]}"#)
			.expect("Duplicated scopes should parse.");

		assert_eq!(config.scopes.normalized(), "openid profile");

		let err = FlowConfig::from_json_str(r#"{"scopes":["openid","two words"]}"#)
			.expect_err("Scopes with whitespace must be rejected.");

		match err {
			ConfigError::Parse(inner) => assert!(inner.path().to_string().starts_with("scopes")),
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn missing_credentials_surface_when_validated() {
		let config = FlowConfig::from_json_str(r#"{"stateless":true}"#)
			.expect("Credential-less documents still parse.");

		assert!(matches!(config.client(), Err(ConfigError::MissingField { field: "client_id" })));
	}
}
