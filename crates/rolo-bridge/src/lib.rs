//! Bridge between a high-level contacts API and a platform-native contact
//! store.
//!
//! The bridge translates the caller's field-based query model into the
//! native filter/attribute representation, normalizes shape mismatches
//! (date encodings, typed sub-lists, numeric ids) in both directions, and
//! routes asynchronous native completion events back to the pending caller
//! through an identifier-keyed registry.
//!
//! Transport and delivery are trait seams the host supplies: a
//! [`NativeChannel`] carrying the opaque command/event string protocol, and
//! a [`ResultSink`] per request. The core itself is synchronous and
//! single-threaded: dispatch returns immediately, and completions are fed
//! back through [`Gateway::on_event`] on the same event loop.

pub mod error;
pub mod filter;
pub mod gateway;
pub mod handlers;
pub mod normalize;
pub mod registry;
pub mod sink;
pub mod validate;
pub mod wire;

pub use error::{Error, Result};
pub use gateway::{Gateway, GatewayConfig, NativeChannel};
pub use sink::ResultSink;


// ─── Shared test helpers ─────────────────────────────────────────────────────
