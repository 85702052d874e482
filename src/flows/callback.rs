//! Callback handling: CSRF validation, code exchange, and profile mapping.

// self
use crate::{
	_prelude::*,
	auth::{self, STATE_SESSION_KEY},
	flows::{
		GoogleOAuth2,
		common::{self, TokenGrant},
	},
	http::HttpTransport,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	session::{CallbackParams, SessionStore},
	user::UserRecord,
};

impl<T> GoogleOAuth2<T>
where
	T: ?Sized + HttpTransport,
{
	/// Completes the authorization-code flow for an inbound callback.
	///
	/// A user cached by an earlier success is returned as-is without touching the session or the
	/// transport. Otherwise the stored state is pulled from `session` (stateful engines only) and
	/// must equal the callback `state`, the `code` is exchanged at the token endpoint, and the
	/// profile is fetched with the issued access token. The resulting user is cached on the
	/// engine.
	pub async fn try_complete_authorization(
		&mut self,
		params: &CallbackParams,
		session: &dyn SessionStore,
	) -> Result<UserRecord> {
		const KIND: FlowKind = FlowKind::Callback;

		let span = FlowSpan::new(KIND, "complete_authorization");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				if let Some(user) = &self.user {
					return Ok(user.clone());
				}
				if !self.stateless {
					let stored = session.pull(STATE_SESSION_KEY).await?;

					auth::verify_state(stored.as_deref(), params.state())?;
				}

				let code = match (params.code(), &params.error) {
					(Some(code), _) => code,
					(None, Some(error)) =>
						return Err(Error::Provider { error: error.clone(), description: None }),
					(None, None) => return Err(Error::MissingCode),
				};
				let form = common::token_exchange_params(&self.client, code);
				let response = self.http.post(self.endpoints.token.url(), &form).await?;
				let TokenGrant { access_token, refresh_token, expires_in } =
					TokenGrant::from_response(response)?;
				let user = self
					.fetch_profile(access_token)
					.await?
					.with_refresh_token(refresh_token)
					.with_expires_in(expires_in);

				self.user = Some(user.clone());

				Ok(user)
			})
			.await;

		obs::record_result(KIND, &result);

		result
	}

	/// [`try_complete_authorization`](Self::try_complete_authorization) with every rejection
	/// collapsed into `None`.
	pub async fn complete_authorization(
		&mut self,
		params: &CallbackParams,
		session: &dyn SessionStore,
	) -> Option<UserRecord> {
		self.try_complete_authorization(params, session).await.ok()
	}
}
