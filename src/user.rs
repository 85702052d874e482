//! User record produced by the flows: mapped profile fields, issued tokens, and the raw payload.

// crates.io
use serde_json::Value;
// self
use crate::{_prelude::*, auth::TokenSecret, http::JsonObject};

/// Profile fields the provider is known to return, extracted by fixed key.
///
/// Keys outside the fixed mapping are ignored here and stay reachable through
/// [`UserRecord::attribute`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserProfile {
	/// `sub`: stable subject identifier.
	pub sub: Option<String>,
	/// `name`: display name.
	pub name: Option<String>,
	/// `email`: primary address.
	pub email: Option<String>,
	/// `email_verified`: whether the provider verified `email`.
	pub email_verified: bool,
	/// `picture`: avatar URL.
	pub picture: Option<String>,
}
impl UserProfile {
	/// Extracts the fixed profile fields from a userinfo payload.
	///
	/// Numeric `sub` values are rendered as strings and `email_verified` accepts both JSON
	/// booleans and the legacy `"true"` string.
	pub fn from_attributes(attributes: &JsonObject) -> Self {
		Self {
			sub: string_field(attributes, "sub"),
			name: string_field(attributes, "name"),
			email: string_field(attributes, "email"),
			email_verified: bool_field(attributes, "email_verified"),
			picture: string_field(attributes, "picture"),
		}
	}
}

/// Authenticated user returned by the callback and token lookups.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
	subject_id: Option<String>,
	name: Option<String>,
	email: Option<String>,
	email_verified: bool,
	picture_url: Option<String>,
	raw: JsonObject,
	access_token: Option<TokenSecret>,
	refresh_token: Option<TokenSecret>,
	expires_in: Option<i64>,
	granted_at: Option<OffsetDateTime>,
}
impl UserRecord {
	/// Builds a record from a userinfo payload: keeps the payload as raw attributes and maps the
	/// fixed profile fields.
	pub fn from_attributes(attributes: JsonObject) -> Self {
		let profile = UserProfile::from_attributes(&attributes);

		Self::default().with_raw(attributes).map(profile)
	}

	/// Replaces the raw attributes without touching the typed fields.
	pub fn with_raw(mut self, raw: JsonObject) -> Self {
		self.raw = raw;

		self
	}

	/// Overwrites the typed profile fields.
	pub fn map(mut self, profile: UserProfile) -> Self {
		let UserProfile { sub, name, email, email_verified, picture } = profile;

		self.subject_id = sub;
		self.name = name;
		self.email = email;
		self.email_verified = email_verified;
		self.picture_url = picture;

		self
	}

	/// Attaches the access token used to fetch the profile.
	pub fn with_access_token(mut self, token: TokenSecret) -> Self {
		self.access_token = Some(token);

		self
	}

	/// Attaches (or clears) the refresh token issued with the access token.
	pub fn with_refresh_token(mut self, token: Option<TokenSecret>) -> Self {
		self.refresh_token = token;

		self
	}

	/// Attaches (or clears) the access token lifetime, stamping the grant instant.
	pub fn with_expires_in(mut self, seconds: Option<i64>) -> Self {
		self.expires_in = seconds;
		self.granted_at = seconds.map(|_| OffsetDateTime::now_utc());

		self
	}

	/// Stable subject identifier (`sub`).
	pub fn subject_id(&self) -> Option<&str> {
		self.subject_id.as_deref()
	}

	/// Display name.
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Primary email address.
	pub fn email(&self) -> Option<&str> {
		self.email.as_deref()
	}

	/// Whether the provider verified [`email`](Self::email).
	pub fn email_verified(&self) -> bool {
		self.email_verified
	}

	/// Avatar URL.
	pub fn picture_url(&self) -> Option<&str> {
		self.picture_url.as_deref()
	}

	/// Untouched provider payload.
	pub fn raw(&self) -> &JsonObject {
		&self.raw
	}

	/// Access token the profile was fetched with.
	pub fn access_token(&self) -> Option<&TokenSecret> {
		self.access_token.as_ref()
	}

	/// Refresh token issued alongside the access token, if any.
	pub fn refresh_token(&self) -> Option<&TokenSecret> {
		self.refresh_token.as_ref()
	}

	/// Access token lifetime in seconds as reported by the token endpoint.
	pub fn expires_in_seconds(&self) -> Option<i64> {
		self.expires_in
	}

	/// Access token lifetime as a duration.
	pub fn expires_in(&self) -> Option<Duration> {
		self.expires_in.map(Duration::seconds)
	}

	/// Instant the access token stops being valid, counted from when the grant was recorded.
	///
	/// Returns `None` when the lifetime is unknown or lands outside the representable range.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		self.granted_at?.checked_add(self.expires_in()?)
	}

	/// Reads a raw attribute.
	pub fn attribute(&self, key: &str) -> Option<&Value> {
		self.raw.get(key)
	}

	/// Returns true if the raw payload carries `key`.
	pub fn has_attribute(&self, key: &str) -> bool {
		self.raw.contains_key(key)
	}

	/// Sets a raw attribute, returning the previous value. Typed fields are unaffected.
	pub fn set_attribute(
		&mut self,
		key: impl Into<String>,
		value: impl Into<Value>,
	) -> Option<Value> {
		self.raw.insert(key.into(), value.into())
	}

	/// Removes a raw attribute, returning it. Typed fields are unaffected.
	pub fn remove_attribute(&mut self, key: &str) -> Option<Value> {
		self.raw.remove(key)
	}
}

/// Reads a string field, rendering numbers as their decimal text.
pub(crate) fn string_field(object: &JsonObject, key: &str) -> Option<String> {
	match object.get(key)? {
		Value::String(value) => Some(value.clone()),
		Value::Number(value) => Some(value.to_string()),
		_ => None,
	}
}

/// Reads an integer field given either as a JSON number or a numeric string.
pub(crate) fn int_field(object: &JsonObject, key: &str) -> Option<i64> {
	match object.get(key)? {
		Value::Number(value) => value.as_i64(),
		Value::String(value) => value.trim().parse().ok(),
		_ => None,
	}
}

fn bool_field(object: &JsonObject, key: &str) -> bool {
	match object.get(key) {
		Some(Value::Bool(value)) => *value,
		Some(Value::String(value)) => value.eq_ignore_ascii_case("true"),
		_ => false,
	}
}
