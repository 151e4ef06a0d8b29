//! Registry authentication: token model, challenge payloads, and the caching authenticator.

pub mod authenticator;
pub mod challenge;
mod metrics;
pub mod token;

pub use authenticator::*;
pub use challenge::*;
pub use metrics::*;
pub use token::*;
