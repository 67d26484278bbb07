//! # iamport - client for the Iamport payment gateway
//!
//! An async wrapper around the Iamport REST API. The [`Iamport`] handle
//! caches the bearer token, refreshes it when it expires, and normalizes
//! every reply into an [`IamportResponse`] or an [`IamportError`].
//!
//! ```no_run
//! use iamport::{ClientConfig, Iamport};
//!
//! # async fn run() -> iamport::Result<()> {
//! let client = Iamport::new(ClientConfig::new("imp_key", "imp_secret"))?;
//! let payment = client.find_by_imp_uid("imp_448280090638").await?;
//! if payment.is_empty() {
//!     println!("no such payment");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! A lookup for an unknown id resolves with status 404 and an empty
//! payload instead of failing.

pub mod client;
pub mod error;
pub mod types;
pub mod validation;

mod certifications;
mod escrows;
mod payments;
mod subscribe;
mod vbanks;

// Re-exports for convenience
pub use client::Iamport;
pub use error::{ErrorKind, IamportError, Result};
pub use types::*;

/// Current version of the iamport library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
