//! Public extension contracts (challenge signing, text encoding).
//!
//! The registry protocol depends on two capabilities the client never implements itself in
//! full: a [`Signer`] holding the caller's key material, and a reversible [`TextEncoder`] used
//! for every signature and document payload placed on the wire. Both are object-safe so the
//! client can share them behind an [`Arc`](std::sync::Arc).

pub mod encoding;
pub mod signer;

pub use encoding::*;
pub use signer::*;
