use std::f64::consts::PI;
use std::io::Write;

use biosig_rs::{
    condition, estimate_sampling_rate, load_csv, load_csv_with, BiosigError, FilterSpec,
    LoaderOptions, Sample, SignalType, TimeSeries,
};

fn sine_series(freq: f64, fs: f64, n: usize) -> TimeSeries {
    let samples = (0..n)
        .map(|i| {
            let t = i as f64 / fs;
            Sample::new(t, (2.0 * PI * freq * t).sin())
        })
        .collect();
    TimeSeries::new(samples).unwrap()
}

/// ECG-ish synthetic trace: R-peak spikes at 75 BPM over baseline wander
/// and powerline noise.
fn synthetic_ecg(fs: f64, n: usize) -> TimeSeries {
    let samples = (0..n)
        .map(|i| {
            let t = i as f64 / fs;
            let phase = (t % 0.8) / 0.8;
            let r_peak = if (phase - 0.4).abs() < 0.02 { 1.5 } else { 0.0 };
            let baseline = 0.3 * (2.0 * PI * 0.2 * t).sin();
            let powerline = 0.1 * (2.0 * PI * 60.0 * t).sin();
            Sample::new(t, r_peak + baseline + powerline)
        })
        .collect();
    TimeSeries::new(samples).unwrap()
}

// =============================================================================
// SAMPLING RATE ESTIMATION
// =============================================================================

#[test]
fn test_estimate_from_ten_millisecond_spacing() {
    let timestamps = [0.0, 0.01, 0.02, 0.03];
    assert_eq!(estimate_sampling_rate(&timestamps).unwrap(), 100);
}

#[test]
fn test_estimate_needs_two_timestamps() {
    assert!(matches!(
        estimate_sampling_rate(&[0.42]),
        Err(BiosigError::InsufficientData { count: 1 })
    ));
}

// =============================================================================
// FILTER DESIGN VALIDATION
// =============================================================================

#[test]
fn test_ecg_design_at_100hz_succeeds() {
    assert!(FilterSpec::for_signal(SignalType::Ecg, 100.0).is_ok());
}

#[test]
fn test_ecg_design_at_50hz_fails_nyquist() {
    assert!(matches!(
        FilterSpec::for_signal(SignalType::Ecg, 50.0),
        Err(BiosigError::InvalidFilterRange { .. })
    ));
}

#[test]
fn test_eeg_design_below_double_highcut_fails() {
    // EEG highcut = 30 Hz, so anything under 60 Hz must be rejected
    assert!(FilterSpec::for_signal(SignalType::Eeg, 59.0).is_err());
    assert!(FilterSpec::for_signal(SignalType::Eeg, 61.0).is_ok());
}

// =============================================================================
// FULL PIPELINE
// =============================================================================

#[test]
fn test_pipeline_on_synthetic_ecg() {
    let series = synthetic_ecg(360.0, 10_000);
    let result = condition(&series, SignalType::Ecg).unwrap();

    assert_eq!(result.sampling_rate_hz, 360);
    assert_eq!(result.filtered.len(), 10_000);
    assert!(result.filtered.iter().all(|v| v.is_finite()));
}

#[test]
fn test_pipeline_preserves_peak_timing() {
    let fs = 360.0;
    let series = synthetic_ecg(fs, 7200);
    let result = condition(&series, SignalType::Ecg).unwrap();

    // The tallest filtered deflection around each R-peak must stay within
    // a few samples of the known spike center; a causal single-pass filter
    // of this order would lag by far more.
    let window = (0.1 * fs) as usize;
    for beat in 1..8 {
        // Spikes sit where (t % 0.8) / 0.8 is within 0.02 of 0.4
        let center = ((beat as f64 * 0.8 + 0.32) * fs).round() as usize;
        let neighborhood = center - window..center + window;

        let filt_peak = neighborhood
            .clone()
            .max_by(|&a, &b| result.filtered[a].partial_cmp(&result.filtered[b]).unwrap())
            .unwrap();

        assert!(
            (filt_peak as i64 - center as i64).abs() <= 6,
            "beat {}: filtered peak at {} vs spike center {}",
            beat,
            filt_peak,
            center
        );
    }
}

#[test]
fn test_pipeline_passband_amplitude_retained() {
    let series = sine_series(10.0, 250.0, 2500);
    let result = condition(&series, SignalType::Ecg).unwrap();

    let rms = |x: &[f64]| (x.iter().map(|v| v * v).sum::<f64>() / x.len() as f64).sqrt();
    let ratio = rms(&result.filtered) / rms(&result.original);
    assert!(ratio > 0.95, "passband rms ratio {ratio}");
}

#[test]
fn test_pipeline_stopband_tone_removed() {
    let series = sine_series(90.0, 250.0, 2500);
    let result = condition(&series, SignalType::Ecg).unwrap();

    let rms = |x: &[f64]| (x.iter().map(|v| v * v).sum::<f64>() / x.len() as f64).sqrt();
    let ratio = rms(&result.filtered) / rms(&result.original);
    assert!(ratio < 0.05, "stopband rms ratio {ratio}");
}

// =============================================================================
// CSV INTAKE TO PIPELINE
// =============================================================================

#[test]
fn test_load_and_condition_csv_recording() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recording.csv");

    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "Device: SimECG-1000").unwrap();
    writeln!(file, "Exported: 2024-03-01").unwrap();
    writeln!(file, "Time,Signal").unwrap();
    for i in 0..1000 {
        let t = i as f64 / 250.0;
        writeln!(file, "{},{}", t, (2.0 * PI * 12.0 * t).sin()).unwrap();
    }

    let series = load_csv(&path).unwrap();
    assert_eq!(series.len(), 1000);

    let result = condition(&series, SignalType::Ecg).unwrap();
    assert_eq!(result.sampling_rate_hz, 250);
    assert_eq!(result.filtered.len(), 1000);
}

#[test]
fn test_load_clock_timestamps_and_estimate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clock.csv");

    // Quoted MM:SS.fff clock strings, 100 Hz
    let mut file = std::fs::File::create(&path).unwrap();
    for i in 0..400 {
        let secs = i as f64 / 100.0;
        writeln!(file, "'0:{:06.3}',{}", secs, (i as f64 * 0.1).sin()).unwrap();
    }

    let options = LoaderOptions {
        skip_rows: 0,
        has_header: false,
    };
    let series = load_csv_with(&path, &options).unwrap();
    assert_eq!(series.len(), 400);
    assert_eq!(estimate_sampling_rate(&series.timestamps()).unwrap(), 100);
}
