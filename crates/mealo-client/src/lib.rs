//! Unofficial HTTP client for the Mealo food-delivery web API.
//!
//! Mealo has no session-token endpoint. Every call hands back `Set-Cookie`
//! headers that encode server-assigned state (selected location, cart
//! identity, pricing context), and the caller must collect and forward those
//! cookies on every subsequent call. [`PlatformClient`] performs the
//! individual calls; [`workflow`] models the implicit cookie-carried state
//! machine on top of them.

mod client;
mod error;
mod headers;
pub mod types;
pub mod workflow;

pub use client::{
    CartMutation, CreatedCart, PlatformClient, StepResponse, DEFAULT_BASE_URL, LOCATION_COOKIE,
};
pub use error::PlatformError;
