//! Decimal rounding of binary floats.
//!
//! Rounding works on the exact value stored in the `f64`, not on its shortest
//! decimal rendering: `2.675` is stored as `2.67499999...` and rounds down,
//! while `0.125` is an exact tie and goes to the even neighbour (`0.12`).

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to `dp` decimal places, ties to even.
///
/// Non-finite values and magnitudes outside `Decimal`'s range are returned
/// unchanged.
pub fn round_half_even(x: f64, dp: u32) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let Some(d) = Decimal::from_f64_retain(x) else {
        return x;
    };
    let rounded = d.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven);
    // Parse the decimal text so the result is the f64 nearest to it.
    let out = rounded.to_string().parse::<f64>().unwrap_or(x);
    // Keep the sign of values that round to zero (-0.001 -> -0.0).
    if out == 0.0 { 0.0_f64.copysign(x) } else { out }
}

/// Round to 2 decimal places, ties to even.
pub fn round2(x: f64) -> f64 {
    round_half_even(x, 2)
}
