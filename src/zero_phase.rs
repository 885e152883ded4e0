//! Zero-phase filter application.
//!
//! The cascade runs forward over the signal, then backward over the result,
//! so the net phase shift is zero and feature timing (QRS complexes, EEG
//! transients) is preserved. Both ends are padded with an odd reflection of
//! the signal and each pass starts from the cascade's steady state, so the
//! start-up transients land in the padding and are trimmed away.

use crate::error::{BiosigError, Result};
use crate::filters::{FilterCoefficients, SosFilter};

/// Samples of reflected padding required on each end of the signal.
pub fn pad_len(coeffs: &FilterCoefficients) -> usize {
    3 * 2 * coeffs.num_sections()
}

/// Apply `coeffs` forward and backward over `values`.
///
/// Pure transformation: the input is untouched and the output is a new
/// vector of identical length.
///
/// # Errors
/// `InsufficientSamples` when the signal is too short to cover the
/// reflection padding.
pub fn apply_zero_phase(coeffs: &FilterCoefficients, values: &[f64]) -> Result<Vec<f64>> {
    let n = values.len();
    let pad = pad_len(coeffs);

    if n <= pad {
        return Err(BiosigError::InsufficientSamples {
            required: pad + 1,
            actual: n,
        });
    }

    // Odd (point-reflected) extension about both endpoints.
    let mut extended = Vec::with_capacity(n + 2 * pad);
    let first = values[0];
    let last = values[n - 1];
    for i in (1..=pad).rev() {
        extended.push(2.0 * first - values[i]);
    }
    extended.extend_from_slice(values);
    for i in 1..=pad {
        extended.push(2.0 * last - values[n - 1 - i]);
    }

    // Forward pass.
    let mut forward = SosFilter::primed(coeffs, extended[0]);
    forward.process_signal(&mut extended);

    // Backward pass over the reversed forward output.
    extended.reverse();
    let mut backward = SosFilter::primed(coeffs, extended[0]);
    backward.process_signal(&mut extended);
    extended.reverse();

    Ok(extended[pad..pad + n].to_vec())
}
