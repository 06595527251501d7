//! Bearer token provisioning for permsync.
//!
//! Token acquisition itself (OAuth flows, secret stores) lives outside
//! permsync. This crate defines the seam: a [`TokenProvider`] trait, two
//! simple providers, and a [`TokenScope`] guard that holds one token for
//! the length of one reconciliation and releases it afterwards.
//!
//! # Design Principles
//!
//! - **Explicit, not ambient**: the token is passed into every HTTP
//!   operation as a parameter; nothing caches it across invocations
//! - **Acquire once**: one token per reconciliation, reused by the fetch
//!   and every mutation
//! - **Never logged**: [`BearerToken`] has a redacted `Debug`

pub mod error;
pub mod provider;
pub mod scope;
pub mod token;

pub use error::TokenError;
pub use provider::{EnvTokenProvider, StaticTokenProvider, TokenProvider};
pub use scope::TokenScope;
pub use token::BearerToken;
