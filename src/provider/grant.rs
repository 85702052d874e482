// self
use crate::_prelude::*;

/// `grant_type` values the token endpoint accepts from this client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GrantType {
	/// Exchanges the callback `code`.
	AuthorizationCode,
	/// Trades a refresh token for a new access token.
	RefreshToken,
}
impl GrantType {
	/// Wire value of the `grant_type` form field.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::AuthorizationCode => "authorization_code",
			Self::RefreshToken => "refresh_token",
		}
	}

	/// The complete `grant_type` form field.
	pub fn form_pair(self) -> (String, String) {
		("grant_type".into(), self.as_str().into())
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
