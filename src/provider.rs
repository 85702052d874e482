//! Fixed provider metadata: endpoint URLs and grant identifiers.
//!
//! The engine talks to exactly one identity provider. `endpoints` exposes the validated,
//! compatibility-critical URLs and `grant` the `grant_type` values sent to the token endpoint.

mod endpoints;
mod grant;

pub use endpoints::*;
pub use grant::*;
