//! Rate-limited, token-caching client for the CRPT product-traceability registry: challenge/sign/token
//! authentication and signed document registration in one crate.
//!
//! The crate is organised around three collaborating parts:
//!
//! - [`rate_limit::RateLimiter`] gates every outbound request against one shared budget.
//! - [`auth::Authenticator`] caches the registry token and renews it at most once at a time.
//! - [`document::DocumentRegistrar`] submits signed documents and returns the registry identifier.
//!
//! [`client::RegistryClient`] wires them together behind a single `register_document` call.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod document;
pub mod endpoints;
pub mod error;
pub mod ext;
pub mod http;
pub mod obs;
pub mod rate_limit;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use httpmock as _;
