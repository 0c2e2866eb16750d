//! Domain types for the rolo contacts bridge.
//!
//! This crate is deliberately free of transport and engine dependencies.
//! It defines the shapes exchanged across the bridge — contact attributes,
//! native search fields, find options, accounts, and wire error codes — and
//! nothing else. The bridge crate depends on it; it depends only on serde.

pub mod account;
pub mod contact;
pub mod error;
pub mod field;
pub mod find;

pub use error::ErrorCode;
