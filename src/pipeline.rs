//! Conditioning pipeline.
//!
//! Sequences rate estimation, filter design, and zero-phase application
//! over one in-memory series. Every stage failure aborts the run and
//! surfaces the originating error unchanged; the causes are deterministic
//! input-quality or configuration problems, so nothing is retried.

use crate::error::Result;
use crate::filters::design_bandpass;
use crate::sampling::estimate_sampling_rate;
use crate::types::{ConditioningResult, FilterSpec, SignalType, TimeSeries};
use crate::zero_phase::apply_zero_phase;

/// Run the full conditioning pipeline on a validated series.
///
/// # Arguments
/// * `series` - loaded recording with strictly increasing timestamps
/// * `signal_type` - preset selection (ECG or EEG)
///
/// # Returns
/// A `ConditioningResult` carrying the estimated sampling rate and the
/// filtered values aligned with the input.
pub fn condition(series: &TimeSeries, signal_type: SignalType) -> Result<ConditioningResult> {
    log::info!(
        "Conditioning {} samples ({:.2} s) as {}",
        series.len(),
        series.duration_secs(),
        signal_type
    );

    let sampling_rate = estimate_sampling_rate(&series.timestamps())?;
    log::info!("Estimated sampling rate: {} Hz", sampling_rate);

    let spec = FilterSpec::for_signal(signal_type, f64::from(sampling_rate))?;
    log::debug!(
        "Bandpass spec: {}-{} Hz, order {}",
        spec.lowcut_hz,
        spec.highcut_hz,
        spec.order
    );

    let coefficients = design_bandpass(&spec);
    let original = series.values();
    let filtered = apply_zero_phase(&coefficients, &original)?;

    Ok(ConditioningResult::new(
        signal_type,
        sampling_rate,
        original,
        filtered,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BiosigError;
    use crate::types::Sample;
    use std::f64::consts::PI;

    fn sine_series(freq: f64, fs: f64, n: usize) -> TimeSeries {
        let samples = (0..n)
            .map(|i| {
                let t = i as f64 / fs;
                Sample::new(t, (2.0 * PI * freq * t).sin())
            })
            .collect();
        TimeSeries::new(samples).unwrap()
    }

    #[test]
    fn test_condition_reports_estimated_rate() {
        let series = sine_series(10.0, 250.0, 1000);
        let result = condition(&series, SignalType::Ecg).unwrap();
        assert_eq!(result.sampling_rate_hz, 250);
        assert_eq!(result.filtered.len(), 1000);
        assert_eq!(result.original.len(), 1000);
        assert_eq!(result.signal_type, SignalType::Ecg);
        assert!(!result.id.is_empty());
    }

    #[test]
    fn test_condition_rejects_low_rate_for_preset() {
        // 50 Hz cannot carry the 45 Hz ECG highcut
        let series = sine_series(5.0, 50.0, 500);
        assert!(matches!(
            condition(&series, SignalType::Ecg),
            Err(BiosigError::InvalidFilterRange { fs, .. }) if fs == 50.0
        ));
    }

    #[test]
    fn test_condition_eeg_at_100hz() {
        let series = sine_series(10.0, 100.0, 800);
        let result = condition(&series, SignalType::Eeg).unwrap();
        assert_eq!(result.sampling_rate_hz, 100);
        assert!(result.filtered.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_condition_short_series_fails_at_application() {
        let series = sine_series(10.0, 250.0, 20);
        assert!(matches!(
            condition(&series, SignalType::Ecg),
            Err(BiosigError::InsufficientSamples { .. })
        ));
    }
}
