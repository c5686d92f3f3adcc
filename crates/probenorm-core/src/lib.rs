//! probenorm-core — probe output normalization.
//!
//! Converts raw, line-oriented network-measurement probe output into typed
//! [`ResultEntity`] values with derived metrics and human-readable
//! renderings.
//!
//! # Architecture
//!
//! ```text
//! blob ──► split ──► classify ──► extract ──► resolve location ──► Vec<ResultEntity>
//!                                                                      │
//!                                                                      └──► export
//! ```
//!
//! Everything is synchronous and pure. The alias table used for location
//! resolution is injected by the caller through [`AliasLookup`].

pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod location;
pub mod normalizer;
pub mod probe;
pub mod types;

pub use error::{BatchError, RecordError};
pub use location::{resolve_location, AliasLookup, NoAliases};
pub use normalizer::{normalize_output, normalize_record, Batch, Normalized, Options};
pub use probe::ProbeTag;
pub use types::{Provenance, ResultEntity, Success, TestKind, UnknownTestKind};
