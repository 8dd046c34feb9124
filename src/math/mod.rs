//! Numeric helpers shared by the calculator and the report formatter.

pub mod round;

pub use round::*;
