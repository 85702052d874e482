#![cfg(feature = "test")]

// crates.io
use serde_json::json;
// self
use oauth2_google::{
	_preludet::*,
	auth::STATE_SESSION_KEY,
	config::FlowConfig,
	flows::GoogleOAuth2,
	session::{CallbackParams, MemorySession},
};

fn config() -> FlowConfig {
	FlowConfig::from_json_str(&format!(
		r#"{{
			"client_id": "{TEST_CLIENT_ID}",
			"client_secret": "{TEST_CLIENT_SECRET}",
			"redirect_uri": "{TEST_REDIRECT_URI}",
			"scopes": ["openid", "email", "profile"],
			"extra_params": {{ "access_type": "offline", "prompt": "consent" }}
		}}"#
	))
	.expect("Config fixture should parse.")
}

fn engine(transport: RecordingTransport) -> GoogleOAuth2<RecordingTransport> {
	GoogleOAuth2::from_config(&config(), transport).expect("Engine should build from config.")
}

#[tokio::test]
async fn redirect_then_callback_round_trip() {
	let transport = RecordingTransport::default()
		.reply_json(json!({
			"access_token": "A",
			"refresh_token": "R",
			"expires_in": 3600,
			"id_token": "header.payload.signature",
			"token_type": "Bearer",
		}))
		.reply_json(json!({
			"sub": "123",
			"name": "Jane",
			"email": "jane@x.com",
			"email_verified": true,
			"picture": "http://x/p.png",
			"hd": "x.com",
		}));
	let session = MemorySession::default();
	let redirect = engine(transport.clone())
		.build_authorization_redirect(&session)
		.await
		.expect("Redirect should be built.");
	let pairs: HashMap<_, _> = redirect.url().query_pairs().into_owned().collect();

	assert_eq!(pairs.get("scope").map(String::as_str), Some("email openid profile"));
	assert_eq!(pairs.get("access_type").map(String::as_str), Some("offline"));
	assert_eq!(pairs.get("prompt").map(String::as_str), Some("consent"));
	assert_eq!(pairs.get("state"), session.peek(STATE_SESSION_KEY).as_ref());

	// The callback is usually served by a fresh engine sharing only the session.
	let callback_url = Url::parse(&format!(
		"{TEST_REDIRECT_URI}?state={}&code=4%2F0AX4XfWh&scope=email+profile+openid",
		pairs["state"]
	))
	.expect("Callback URL should parse.");
	let mut callback_engine = engine(transport.clone());
	let user = callback_engine
		.complete_authorization(&CallbackParams::from_url(&callback_url), &session)
		.await
		.expect("Callback should produce a user.");

	assert_eq!(user.subject_id(), Some("123"));
	assert_eq!(user.email(), Some("jane@x.com"));
	assert_eq!(user.access_token().map(|token| token.expose()), Some("A"));
	assert_eq!(user.refresh_token().map(|token| token.expose()), Some("R"));
	assert_eq!(user.expires_in_seconds(), Some(3600));
	assert_eq!(user.attribute("hd"), Some(&json!("x.com")));
	assert!(user.expires_at().is_some());
	assert!(session.is_empty());

	let calls = transport.calls();

	assert_eq!(calls.len(), 2);
	assert_eq!(calls[0].param("code"), Some("4/0AX4XfWh"));
	assert_eq!(calls[1].param("access_token"), Some("A"));
}

#[tokio::test]
async fn forged_callbacks_are_rejected_without_network_calls() {
	let transport = RecordingTransport::default();
	let session = MemorySession::default();
	let _ = engine(transport.clone())
		.build_authorization_redirect(&session)
		.await
		.expect("Redirect should be built.");
	let mut callback_engine = engine(transport.clone());
	let forged = CallbackParams::new(Some("forged".into()), Some("stolen-code".into()));

	assert!(matches!(
		callback_engine.try_complete_authorization(&forged, &session).await,
		Err(Error::CsrfMismatch)
	));
	assert!(session.is_empty());
	assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn token_lifecycle_refresh_then_revoke() {
	let transport = RecordingTransport::default()
		.reply_json(json!({ "access_token": "A2", "expires_in": 3599 }))
		.reply_empty()
		.reply_json(json!({
			"error": "invalid_token",
			"error_description": "Token expired or revoked",
		}));
	let engine = engine(transport.clone());
	let refreshed = engine.refresh_access_token("R").await.expect("Refresh should succeed.");

	assert_eq!(refreshed.expose(), "A2");
	assert!(engine.revoke_token(refreshed.expose()).await);
	assert!(!engine.revoke_token(refreshed.expose()).await);

	let calls = transport.calls();

	assert_eq!(calls[0].param("grant_type"), Some("refresh_token"));
	assert_eq!(calls[1].param("token"), Some("A2"));
}

#[tokio::test]
async fn config_extras_override_built_in_authorize_fields() {
	let mut config = config();

	config.extra_params.extend([
		("scope".to_owned(), "openid https://www.googleapis.com/auth/drive".to_owned()),
		("response_type".to_owned(), "code id_token".to_owned()),
	]);

	let engine =
		GoogleOAuth2::<RecordingTransport>::from_config(&config, RecordingTransport::default())
			.expect("Engine should build from config.");
	let redirect = engine
		.build_authorization_redirect(&MemorySession::default())
		.await
		.expect("Redirect should be built.");
	let pairs: Vec<(String, String)> = redirect.url().query_pairs().into_owned().collect();
	let keys: Vec<&str> = pairs.iter().map(|(key, _)| key.as_str()).collect();

	assert_eq!(
		keys,
		["client_id", "redirect_uri", "scope", "response_type", "state", "access_type", "prompt"]
	);
	assert_eq!(pairs[2].1, "openid https://www.googleapis.com/auth/drive");
	assert_eq!(pairs[3].1, "code id_token");
}
