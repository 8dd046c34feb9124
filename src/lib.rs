//! `risk-report` library crate.
//!
//! The binary (`riskrep`) is a thin wrapper around this library so that:
//!
//! - the parse/validate/calculate/render pipeline is testable without spawning processes
//! - `process` can be embedded anywhere a text-in, text-out call fits

pub mod app;
pub mod calc;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod report;
pub mod validate;

pub use app::pipeline::{PipelineError, PipelineOutput, process, run_pipeline};
