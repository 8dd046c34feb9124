//! Input/output helpers.
//!
//! - format detection + CSV/JSON parsing (`ingest`)
//! - result exports (CSV/JSON) (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
