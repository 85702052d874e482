//! Shared helpers for flow implementations (request parameters, response guards).

// crates.io
use oauth2::CsrfToken;
// self
use crate::{
	_prelude::*,
	auth::{ScopeSet, TokenSecret},
	config::ClientConfig,
	http::{JsonObject, Params},
	provider::GrantType,
	user,
};

/// Builds the authorize query in wire order.
///
/// Extra parameters replace a built-in value in place when their key collides and are appended
/// otherwise.
pub(crate) fn authorize_params(
	client: &ClientConfig,
	scopes: &ScopeSet,
	state: Option<&CsrfToken>,
	extra: &BTreeMap<String, String>,
) -> Params {
	let mut params = vec![
		pair("client_id", client.client_id.as_str()),
		pair("redirect_uri", client.redirect_uri.as_str()),
		pair("scope", &scopes.normalized()),
		pair("response_type", "code"),
	];

	if let Some(state) = state {
		params.push(pair("state", state.secret()));
	}

	for (key, value) in extra {
		match params.iter_mut().find(|(existing, _)| existing == key) {
			Some(slot) => slot.1 = value.clone(),
			None => params.push((key.clone(), value.clone())),
		}
	}

	params
}

pub(crate) fn token_exchange_params(client: &ClientConfig, code: &str) -> Params {
	vec![
		pair("code", code),
		pair("client_id", client.client_id.as_str()),
		pair("client_secret", client.client_secret.secret()),
		pair("redirect_uri", client.redirect_uri.as_str()),
		GrantType::AuthorizationCode.form_pair(),
	]
}

pub(crate) fn refresh_params(client: &ClientConfig, refresh_token: &str) -> Params {
	vec![
		pair("client_id", client.client_id.as_str()),
		pair("client_secret", client.client_secret.secret()),
		pair("refresh_token", refresh_token),
		GrantType::RefreshToken.form_pair(),
	]
}

pub(crate) fn userinfo_params(access_token: &str) -> Params {
	vec![pair("access_token", access_token)]
}

pub(crate) fn revoke_params(token: &str) -> Params {
	vec![pair("token", token)]
}

/// Rejects payloads carrying an OAuth `error` field.
pub(crate) fn ensure_no_provider_error(object: &JsonObject) -> Result<()> {
	match object.get("error") {
		None | Some(serde_json::Value::Null) => Ok(()),
		Some(value) => Err(Error::Provider {
			error: value.as_str().map(ToOwned::to_owned).unwrap_or_else(|| value.to_string()),
			description: user::string_field(object, "error_description"),
		}),
	}
}

/// Token endpoint answer reduced to the fields the flows consume.
#[derive(Debug)]
pub(crate) struct TokenGrant {
	pub(crate) access_token: TokenSecret,
	pub(crate) refresh_token: Option<TokenSecret>,
	pub(crate) expires_in: Option<i64>,
}
impl TokenGrant {
	pub(crate) fn from_response(response: Option<JsonObject>) -> Result<Self> {
		let object = response.ok_or(Error::EmptyResponse)?;
		let Some(access_token) = non_empty(&object, "access_token") else {
			ensure_no_provider_error(&object)?;

			return Err(Error::MissingAccessToken);
		};

		Ok(Self {
			access_token,
			refresh_token: non_empty(&object, "refresh_token"),
			expires_in: user::int_field(&object, "expires_in").filter(|seconds| *seconds >= 0),
		})
	}
}

fn non_empty(object: &JsonObject, key: &str) -> Option<TokenSecret> {
	user::string_field(object, key).filter(|value| !value.is_empty()).map(TokenSecret::new)
}

fn pair(key: &str, value: &str) -> (String, String) {
	(key.to_owned(), value.to_owned())
}
