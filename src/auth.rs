//! Auth-domain primitives: scope sets, CSRF state tokens, and redacted token secrets.

pub mod scope;
pub mod secret;
pub mod state;

pub use scope::*;
pub use secret::*;
pub use state::*;
