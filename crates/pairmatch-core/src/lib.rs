//! pairmatch-core: share codes, scoring, and the quiz model.
//!
//! This crate defines the data model two quiz participants exchange, the
//! codec that packs it into URL-safe share codes, and the scoring that turns
//! two answer sets into a compatibility summary.

pub mod codec;
pub mod error;
pub mod flow;
pub mod model;
pub mod parser;
pub mod route;
pub mod scoring;
pub mod store;
pub mod templates;
pub mod traits;
pub mod validate;

pub use error::CodecError;
