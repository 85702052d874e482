//! Direct token operations: userinfo lookups, refresh grants, and revocation.
//!
//! Every operation rejects an empty token argument up front with [`Error::EmptyToken`] and
//! makes no network call in that case.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	flows::{
		GoogleOAuth2,
		common::{self, TokenGrant},
	},
	http::HttpTransport,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	user::UserRecord,
};

impl<T> GoogleOAuth2<T>
where
	T: ?Sized + HttpTransport,
{
	/// Fetches the profile behind `access_token` and caches the resulting user on the engine.
	pub async fn try_fetch_user_from_token(&mut self, access_token: &str) -> Result<UserRecord> {
		const KIND: FlowKind = FlowKind::UserInfo;

		let span = FlowSpan::new(KIND, "fetch_user_from_token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let access_token = non_empty(access_token)?;
				let user = self.fetch_profile(TokenSecret::new(access_token)).await?;

				self.user = Some(user.clone());

				Ok(user)
			})
			.await;

		obs::record_result(KIND, &result);

		result
	}

	/// [`try_fetch_user_from_token`](Self::try_fetch_user_from_token) with rejections collapsed
	/// into `None`.
	pub async fn fetch_user_from_token(&mut self, access_token: &str) -> Option<UserRecord> {
		self.try_fetch_user_from_token(access_token).await.ok()
	}

	/// Exchanges `refresh_token` for a new access token.
	///
	/// The engine's cached user is left untouched; the caller decides what to do with the new
	/// token.
	pub async fn try_refresh_access_token(&self, refresh_token: &str) -> Result<TokenSecret> {
		const KIND: FlowKind = FlowKind::Refresh;

		let span = FlowSpan::new(KIND, "refresh_access_token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let refresh_token = non_empty(refresh_token)?;
				let form = common::refresh_params(&self.client, refresh_token);
				let response = self.http.post(self.endpoints.token.url(), &form).await?;

				Ok(TokenGrant::from_response(response)?.access_token)
			})
			.await;

		obs::record_result(KIND, &result);

		result
	}

	/// [`try_refresh_access_token`](Self::try_refresh_access_token) with rejections collapsed
	/// into `None`.
	pub async fn refresh_access_token(&self, refresh_token: &str) -> Option<TokenSecret> {
		self.try_refresh_access_token(refresh_token).await.ok()
	}

	/// Revokes an access or refresh token.
	///
	/// The revocation endpoint confirms with an empty body (or an empty JSON object); any other
	/// payload is a rejection.
	pub async fn try_revoke_token(&self, token: &str) -> Result<()> {
		const KIND: FlowKind = FlowKind::Revoke;

		let span = FlowSpan::new(KIND, "revoke_token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let token = non_empty(token)?;
				let query = common::revoke_params(token);

				match self.http.get(self.endpoints.revocation.url(), &query).await? {
					None => Ok(()),
					Some(object) if object.is_empty() => Ok(()),
					Some(object) => {
						common::ensure_no_provider_error(&object)?;

						Err(Error::NotRevoked)
					},
				}
			})
			.await;

		obs::record_result(KIND, &result);

		result
	}

	/// [`try_revoke_token`](Self::try_revoke_token) collapsed into a success flag.
	pub async fn revoke_token(&self, token: &str) -> bool {
		self.try_revoke_token(token).await.is_ok()
	}

	/// Queries the userinfo endpoint and maps the payload, attaching `access_token`.
	///
	/// An empty body and an empty JSON object both mean there is no user.
	pub(super) async fn fetch_profile(&self, access_token: TokenSecret) -> Result<UserRecord> {
		let query = common::userinfo_params(access_token.expose());
		let object = self
			.http
			.get(&self.endpoints.userinfo, &query)
			.await?
			.filter(|object| !object.is_empty())
			.ok_or(Error::EmptyResponse)?;

		common::ensure_no_provider_error(&object)?;

		Ok(UserRecord::from_attributes(object).with_access_token(access_token))
	}
}

fn non_empty(token: &str) -> Result<&str> {
	if token.is_empty() { Err(Error::EmptyToken) } else { Ok(token) }
}
