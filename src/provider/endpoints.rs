// crates.io
use oauth2::{AuthUrl, RevocationUrl, TokenUrl};
// self
use crate::{_prelude::*, error::ConfigError};

/// Consent screen the user is redirected to.
pub const AUTHORIZATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/auth";
/// Code exchange and refresh endpoint.
pub const TOKEN_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/token";
/// OpenID Connect userinfo endpoint.
pub const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v3/userinfo";
/// Token revocation endpoint.
pub const REVOCATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/revoke";

/// Endpoint set used by every flow.
#[derive(Clone, Debug)]
pub struct ProviderEndpoints {
	/// Authorization endpoint used to build the consent redirect.
	pub authorization: AuthUrl,
	/// Token endpoint used for code exchanges and refreshes.
	pub token: TokenUrl,
	/// Userinfo endpoint queried with an access token.
	pub userinfo: Url,
	/// Revocation endpoint accepting access or refresh tokens.
	pub revocation: RevocationUrl,
}
impl ProviderEndpoints {
	/// Parses the fixed Google endpoint set.
	pub fn google() -> Result<Self, ConfigError> {
		Ok(Self {
			authorization: AuthUrl::from_url(parse("authorization", AUTHORIZATION_ENDPOINT)?),
			token: TokenUrl::from_url(parse("token", TOKEN_ENDPOINT)?),
			userinfo: parse("userinfo", USERINFO_ENDPOINT)?,
			revocation: RevocationUrl::from_url(parse("revocation", REVOCATION_ENDPOINT)?),
		})
	}
}

fn parse(endpoint: &'static str, raw: &str) -> Result<Url, ConfigError> {
	Url::parse(raw).map_err(|source| ConfigError::InvalidEndpoint { endpoint, source })
}
