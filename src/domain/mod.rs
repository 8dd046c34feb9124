//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - parser output (`RawRecord`, `FieldValue`, `InputFormat`)
//! - validated inputs (`ValidatedRecord`, `ModelInputs`)
//! - calculator output (`CalculationResult`, `RiskStatus`)

pub mod types;

pub use types::*;
