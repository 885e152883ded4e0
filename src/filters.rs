//! Butterworth bandpass design as cascaded second-order sections.
//!
//! IIR coefficients are kept in biquad (SOS) form for numerical stability.
//! The bandpass is realized as a highpass cascade at the low edge followed
//! by a lowpass cascade at the high edge, each built with the prewarped
//! bilinear transform. The response is maximally flat in the passband and
//! monotonic in the stopbands.

use std::f64::consts::PI;

use crate::types::FilterSpec;

/// Single second-order section.
/// Transfer function: H(z) = (b0 + b1*z^-1 + b2*z^-2) / (1 + a1*z^-1 + a2*z^-2)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoeffs {
    /// Gain at DC (z = 1).
    pub fn dc_gain(&self) -> f64 {
        (self.b0 + self.b1 + self.b2) / (1.0 + self.a1 + self.a2)
    }
}

/// State for a single biquad section (Direct Form II Transposed).
#[derive(Debug, Clone, Default)]
struct BiquadState {
    z1: f64,
    z2: f64,
}

/// Single stateful biquad filter section.
#[derive(Debug, Clone)]
pub struct BiquadFilter {
    coeffs: BiquadCoeffs,
    state: BiquadState,
}

impl BiquadFilter {
    pub fn new(coeffs: BiquadCoeffs) -> Self {
        Self {
            coeffs,
            state: BiquadState::default(),
        }
    }

    /// Biquad whose state sits at the steady-state response to a constant
    /// input of `level`, so a pass starting near `level` has no step
    /// transient.
    fn primed(coeffs: BiquadCoeffs, level: f64) -> Self {
        let h = coeffs.dc_gain();
        Self {
            coeffs,
            state: BiquadState {
                z1: (h - coeffs.b0) * level,
                z2: (coeffs.b2 - coeffs.a2 * h) * level,
            },
        }
    }

    /// Process a single sample using Direct Form II Transposed.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let output = self.coeffs.b0 * input + self.state.z1;
        self.state.z1 = self.coeffs.b1 * input - self.coeffs.a1 * output + self.state.z2;
        self.state.z2 = self.coeffs.b2 * input - self.coeffs.a2 * output;
        output
    }

    /// Reset filter state.
    pub fn reset(&mut self) {
        self.state = BiquadState::default();
    }
}

/// Immutable coefficient set for one designed bandpass filter: the biquad
/// cascade, unity overall passband gain.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCoefficients {
    sections: Vec<BiquadCoeffs>,
}

impl FilterCoefficients {
    pub fn sections(&self) -> &[BiquadCoeffs] {
        &self.sections
    }

    pub fn num_sections(&self) -> usize {
        self.sections.len()
    }
}

/// Cascaded second-order sections filter.
#[derive(Debug, Clone)]
pub struct SosFilter {
    sections: Vec<BiquadFilter>,
}

impl SosFilter {
    pub fn new(coeffs: &FilterCoefficients) -> Self {
        Self {
            sections: coeffs.sections.iter().copied().map(BiquadFilter::new).collect(),
        }
    }

    /// Cascade primed to the steady-state response of a constant input
    /// `x0`. Each section's operating level is the previous section's DC
    /// output for that level.
    pub fn primed(coeffs: &FilterCoefficients, x0: f64) -> Self {
        let mut level = x0;
        let sections = coeffs
            .sections
            .iter()
            .map(|&c| {
                let section = BiquadFilter::primed(c, level);
                level *= c.dc_gain();
                section
            })
            .collect();
        Self { sections }
    }

    /// Process a single sample through all sections.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let mut output = input;
        for section in &mut self.sections {
            output = section.process(output);
        }
        output
    }

    /// Process an entire signal in-place.
    pub fn process_signal(&mut self, signal: &mut [f64]) {
        for sample in signal.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Process a signal and return a new vector (original unchanged).
    pub fn filter(&mut self, signal: &[f64]) -> Vec<f64> {
        signal.iter().map(|&s| self.process(s)).collect()
    }

    /// Reset all section states.
    pub fn reset(&mut self) {
        for section in &mut self.sections {
            section.reset();
        }
    }
}

/// Design bandpass coefficients for a validated spec.
///
/// The spec's Nyquist check has already run, so the design itself cannot
/// fail: every produced section has its poles strictly inside the unit
/// circle.
pub fn design_bandpass(spec: &FilterSpec) -> FilterCoefficients {
    let wn_low = prewarp(spec.lowcut_hz, spec.sampling_rate_hz);
    let wn_high = prewarp(spec.highcut_hz, spec.sampling_rate_hz);

    let mut sections = highpass_sections(wn_low, spec.order);
    sections.extend(lowpass_sections(wn_high, spec.order));

    FilterCoefficients { sections }
}

/// Prewarp an analog edge frequency for the bilinear transform.
fn prewarp(freq: f64, sample_rate: f64) -> f64 {
    (PI * freq / sample_rate).tan()
}

/// Butterworth section damping 2*sin(pi*(2k+1)/2N); always positive, which
/// keeps the bilinear-transformed poles inside the unit circle.
fn section_damping(k: usize, order: usize) -> f64 {
    2.0 * (PI * (2.0 * k as f64 + 1.0) / (2.0 * order as f64)).sin()
}

/// Lowpass second-order sections at prewarped edge `wn`.
fn lowpass_sections(wn: f64, order: usize) -> Vec<BiquadCoeffs> {
    let num_sections = (order + 1) / 2;
    let mut sections = Vec::with_capacity(num_sections);

    for k in 0..num_sections {
        // For odd order the last section is first-order: H(s) = wn / (s + wn)
        if order % 2 == 1 && k == num_sections - 1 {
            let gain = wn / (1.0 + wn);
            sections.push(BiquadCoeffs {
                b0: gain,
                b1: gain,
                b2: 0.0,
                a1: (wn - 1.0) / (wn + 1.0),
                a2: 0.0,
            });
        } else {
            let beta = section_damping(k, order);
            let wn2 = wn * wn;
            let denom = 1.0 + beta * wn + wn2;

            sections.push(BiquadCoeffs {
                b0: wn2 / denom,
                b1: 2.0 * wn2 / denom,
                b2: wn2 / denom,
                a1: 2.0 * (wn2 - 1.0) / denom,
                a2: (1.0 - beta * wn + wn2) / denom,
            });
        }
    }

    sections
}

/// Highpass second-order sections at prewarped edge `wn`.
fn highpass_sections(wn: f64, order: usize) -> Vec<BiquadCoeffs> {
    let num_sections = (order + 1) / 2;
    let mut sections = Vec::with_capacity(num_sections);

    for k in 0..num_sections {
        // First-order tail for odd orders: H(s) = s / (s + wn)
        if order % 2 == 1 && k == num_sections - 1 {
            let gain = 1.0 / (1.0 + wn);
            sections.push(BiquadCoeffs {
                b0: gain,
                b1: -gain,
                b2: 0.0,
                a1: (wn - 1.0) / (wn + 1.0),
                a2: 0.0,
            });
        } else {
            let beta = section_damping(k, order);
            let wn2 = wn * wn;
            let denom = 1.0 + beta * wn + wn2;

            sections.push(BiquadCoeffs {
                b0: 1.0 / denom,
                b1: -2.0 / denom,
                b2: 1.0 / denom,
                a1: 2.0 * (wn2 - 1.0) / denom,
                a2: (1.0 - beta * wn + wn2) / denom,
            });
        }
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SignalType;

    fn ecg_coeffs(fs: f64) -> FilterCoefficients {
        let spec = FilterSpec::for_signal(SignalType::Ecg, fs).unwrap();
        design_bandpass(&spec)
    }

    /// Stability triangle for a biquad: |a2| < 1 and |a1| < 1 + a2.
    #[test]
    fn test_sections_are_stable() {
        for fs in [100.0, 250.0, 360.0, 500.0] {
            for section in ecg_coeffs(fs).sections() {
                assert!(
                    section.a2.abs() < 1.0,
                    "a2={} unstable at fs={}",
                    section.a2,
                    fs
                );
                assert!(
                    section.a1.abs() < 1.0 + section.a2,
                    "a1={} a2={} unstable at fs={}",
                    section.a1,
                    section.a2,
                    fs
                );
            }
        }
    }

    #[test]
    fn test_section_count_matches_order() {
        // Order 4 highpass + order 4 lowpass = 2 + 2 biquads
        assert_eq!(ecg_coeffs(250.0).num_sections(), 4);
    }

    #[test]
    fn test_bandpass_rejects_dc() {
        let mut filter = SosFilter::new(&ecg_coeffs(250.0));
        let mut last = f64::MAX;
        for _ in 0..5000 {
            last = filter.process(1.0);
        }
        assert!(last.abs() < 1e-3, "DC leak: {last}");
    }

    #[test]
    fn test_bandpass_passes_midband_tone() {
        let fs = 250.0;
        let freq = 10.0;
        let mut filter = SosFilter::new(&ecg_coeffs(fs));

        let signal: Vec<f64> = (0..5000)
            .map(|i| (2.0 * PI * freq * i as f64 / fs).sin())
            .collect();
        let out = filter.filter(&signal);

        // Steady-state amplitude over the second half, transient discarded
        let peak = out[2500..].iter().fold(0.0f64, |m, &v| m.max(v.abs()));
        assert!(peak > 0.9 && peak < 1.1, "midband peak {peak}");
    }

    #[test]
    fn test_bandpass_attenuates_high_tone() {
        let fs = 250.0;
        let freq = 90.0; // well above the 45 Hz ECG highcut
        let mut filter = SosFilter::new(&ecg_coeffs(fs));

        let signal: Vec<f64> = (0..5000)
            .map(|i| (2.0 * PI * freq * i as f64 / fs).sin())
            .collect();
        let out = filter.filter(&signal);

        let peak = out[2500..].iter().fold(0.0f64, |m, &v| m.max(v.abs()));
        assert!(peak < 0.1, "stopband peak {peak}");
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let coeffs = ecg_coeffs(250.0);
        let mut filter = SosFilter::new(&coeffs);
        let signal: Vec<f64> = (0..200)
            .map(|i| (2.0 * PI * 10.0 * i as f64 / 250.0).sin())
            .collect();

        let first = filter.filter(&signal);
        filter.reset();
        let second = filter.filter(&signal);
        assert_eq!(first, second);
    }

    #[test]
    fn test_impulse_response_decays() {
        let mut filter = SosFilter::new(&ecg_coeffs(250.0));
        let mut impulse = vec![0.0; 4000];
        impulse[0] = 1.0;
        let out = filter.filter(&impulse);

        assert!(out.iter().all(|v| v.is_finite()));
        let tail = out[3500..].iter().fold(0.0f64, |m, &v| m.max(v.abs()));
        assert!(tail < 1e-6, "impulse tail {tail}");
    }

    #[test]
    fn test_primed_cascade_has_no_step_transient() {
        let coeffs = ecg_coeffs(250.0);
        let mut filter = SosFilter::primed(&coeffs, 5.0);
        // Constant input equal to the priming level: output starts at the
        // steady-state response (zero, since a bandpass rejects DC).
        for _ in 0..100 {
            let out = filter.process(5.0);
            assert!(out.abs() < 1e-9, "transient output {out}");
        }
    }
}
