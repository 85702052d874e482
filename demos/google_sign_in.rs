//! Walks through issuing a Google consent redirect and validating the callback that comes back.
//!
//! Set `GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET`, and `GOOGLE_REDIRECT_URI` to use real
//! credentials; placeholders are used otherwise. Pass the full callback URL as the first argument
//! to exchange the code it carries.

// std
use std::{env, time::Duration};
// crates.io
use color_eyre::{Result, eyre::eyre};
// self
use oauth2_google::{
	auth::ScopeSet,
	config::FlowConfig,
	flows::GoogleOAuth2,
	http::ReqwestTransport,
	session::{CallbackParams, MemorySession},
	url::Url,
};

fn var(key: &str, fallback: &str) -> String {
	env::var(key).unwrap_or_else(|_| fallback.to_owned())
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let mut config = FlowConfig::new(
		var("GOOGLE_CLIENT_ID", "demo-client.apps.googleusercontent.com"),
		var("GOOGLE_CLIENT_SECRET", "demo-secret"),
		var("GOOGLE_REDIRECT_URI", "http://localhost:8080/auth/google/callback"),
	);

	config.scopes = ScopeSet::new(["openid", "email", "profile"])?;
	config.extra_params.insert("access_type".into(), "offline".into());

	let transport = ReqwestTransport::new(Duration::from_secs(10))?;
	let session = MemorySession::default();
	let redirect = GoogleOAuth2::<ReqwestTransport>::from_config(&config, transport.clone())?
		.build_authorization_redirect(&session)
		.await?;

	println!("Send your user to {}.", redirect.url());

	let Some(callback) = env::args().nth(1) else {
		println!("Re-run with the callback URL to finish the flow.");

		return Ok(());
	};
	let params = CallbackParams::from_url(&Url::parse(&callback)?);

	// The in-memory session does not outlive the previous run.
	config.stateless = true;

	let mut engine = GoogleOAuth2::<ReqwestTransport>::from_config(&config, transport)?;
	let user = engine
		.try_complete_authorization(&params, &session)
		.await
		.map_err(|err| eyre!("Sign-in rejected ({}): {err}.", err.label()))?;

	println!(
		"Signed in {} <{}> (verified: {}).",
		user.name().unwrap_or("<unnamed>"),
		user.email().unwrap_or("<no email>"),
		user.email_verified()
	);

	if let Some(refresh_token) = user.refresh_token() {
		let refreshed = engine.refresh_access_token(refresh_token.expose()).await;

		println!("Refresh succeeded: {}.", refreshed.is_some());
	}

	Ok(())
}
