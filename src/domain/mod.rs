//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `rebuild` - Change events, whitelist/blacklist rules and build records

pub mod foundation;
pub mod rebuild;
