use crate::error::{BiosigError, Result};

/// Estimate an integer sampling rate from elapsed-seconds timestamps.
///
/// Real recordings carry minor inter-sample jitter; averaging the successive
/// differences smooths it out, and rounding snaps to the integer rate filter
/// design expects.
///
/// # Arguments
/// * `timestamps` - strictly increasing elapsed seconds
///
/// # Returns
/// `round(1 / mean(successive differences))` in Hz
///
/// # Errors
/// `InsufficientData` for fewer than 2 timestamps, `DegenerateTiming` when
/// the mean interval is zero, negative, or not a number.
pub fn estimate_sampling_rate(timestamps: &[f64]) -> Result<u32> {
    if timestamps.len() < 2 {
        return Err(BiosigError::InsufficientData {
            count: timestamps.len(),
        });
    }

    let diffs: Vec<f64> = timestamps.windows(2).map(|w| w[1] - w[0]).collect();
    let mean_interval = diffs.iter().sum::<f64>() / diffs.len() as f64;

    // A non-positive mean means duplicated or decreasing timestamps; refuse
    // rather than report an infinite or negative rate.
    if !(mean_interval > 0.0) {
        return Err(BiosigError::DegenerateTiming(format!(
            "mean sampling interval is {mean_interval} s"
        )));
    }

    let fs = (1.0 / mean_interval).round() as u32;
    log::debug!(
        "Estimated sampling rate: {} Hz (mean interval {:.6} s over {} samples)",
        fs,
        mean_interval,
        timestamps.len()
    );

    Ok(fs)
}
