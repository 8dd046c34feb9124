//! Risk metric calculations.
//!
//! Each metric is a small closed-form function of the validated inputs. All
//! outputs are rounded to 2 decimals (ties to even, see `math::round`).

pub mod metrics;

pub use metrics::*;
