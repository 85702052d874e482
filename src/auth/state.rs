//! CSRF state generation and callback validation.

// crates.io
use oauth2::CsrfToken;
use rand::{Rng, distr::Alphanumeric};
// self
use crate::_prelude::*;

/// Length of every generated state value.
pub const STATE_LEN: usize = 40;
/// Session key under which the pending state is stored between redirect and callback.
pub const STATE_SESSION_KEY: &str = "state";

/// Generates a fresh, unpredictable state token for one authorization redirect.
pub fn generate_state() -> CsrfToken {
	CsrfToken::new(random_string(STATE_LEN))
}

/// Checks the state popped from the session against the one echoed by the callback.
///
/// Fails closed: a missing or empty stored value never matches, even when the callback also
/// omits its `state`.
pub fn verify_state(stored: Option<&str>, returned: Option<&str>) -> Result<()> {
	match stored {
		Some(expected) if !expected.is_empty() && returned == Some(expected) => Ok(()),
		_ => Err(Error::CsrfMismatch),
	}
}

fn random_string(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}
