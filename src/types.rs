use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BiosigError, Result};

/// One recorded point: elapsed seconds since the first sample, and the
/// measured amplitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub elapsed_secs: f64,
    pub value: f64,
}

impl Sample {
    pub fn new(elapsed_secs: f64, value: f64) -> Self {
        Self {
            elapsed_secs,
            value,
        }
    }
}

/// A single-channel recording as an ordered, non-empty sequence of samples.
///
/// Timestamps are strictly increasing; duplicates or decreases are a
/// data-quality error and rejected at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeries {
    samples: Vec<Sample>,
}

impl TimeSeries {
    /// Validate and wrap a sample sequence.
    ///
    /// # Errors
    /// `UnsupportedFormat` when the sequence is empty, `DegenerateTiming`
    /// when timestamps are not strictly increasing.
    pub fn new(samples: Vec<Sample>) -> Result<Self> {
        if samples.is_empty() {
            return Err(BiosigError::UnsupportedFormat(
                "series contains no samples".to_string(),
            ));
        }

        for (i, pair) in samples.windows(2).enumerate() {
            if pair[1].elapsed_secs <= pair[0].elapsed_secs {
                return Err(BiosigError::DegenerateTiming(format!(
                    "timestamp at row {} ({} s) does not increase past row {} ({} s)",
                    i + 1,
                    pair[1].elapsed_secs,
                    i,
                    pair[0].elapsed_secs
                )));
            }
        }

        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Elapsed-seconds column.
    pub fn timestamps(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.elapsed_secs).collect()
    }

    /// Amplitude column.
    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    /// Recording duration in seconds (first to last sample).
    pub fn duration_secs(&self) -> f64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => last.elapsed_secs - first.elapsed_secs,
            _ => 0.0,
        }
    }
}

/// Supported signal types, each tied to a fixed bandpass preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
    Ecg,
    Eeg,
}

impl SignalType {
    pub const ALL: [SignalType; 2] = [SignalType::Ecg, SignalType::Eeg];

    /// Bandpass preset for this signal type.
    pub fn preset(self) -> BandPreset {
        match self {
            SignalType::Ecg => BandPreset {
                lowcut_hz: 0.5,
                highcut_hz: 45.0,
                order: 4,
            },
            SignalType::Eeg => BandPreset {
                lowcut_hz: 1.0,
                highcut_hz: 30.0,
                order: 4,
            },
        }
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalType::Ecg => write!(f, "ecg"),
            SignalType::Eeg => write!(f, "eeg"),
        }
    }
}

impl FromStr for SignalType {
    type Err = BiosigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ecg" => Ok(SignalType::Ecg),
            "eeg" => Ok(SignalType::Eeg),
            other => Err(BiosigError::UnsupportedSignalType(other.to_string())),
        }
    }
}

/// Fixed (lowcut, highcut, order) configuration keyed by signal type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandPreset {
    pub lowcut_hz: f64,
    pub highcut_hz: f64,
    pub order: usize,
}

/// A validated band/rate combination ready for filter design.
///
/// Construction guarantees 0 < lowcut/nyquist < highcut/nyquist < 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub lowcut_hz: f64,
    pub highcut_hz: f64,
    pub order: usize,
    pub sampling_rate_hz: f64,
}

impl FilterSpec {
    /// Build the spec for a signal type's preset at the given sampling rate.
    ///
    /// # Errors
    /// `InvalidFilterRange` when the rate cannot carry the preset band,
    /// e.g. fs below 2x the preset highcut.
    pub fn for_signal(signal_type: SignalType, sampling_rate_hz: f64) -> Result<Self> {
        let preset = signal_type.preset();
        let nyquist = 0.5 * sampling_rate_hz;
        let low = preset.lowcut_hz / nyquist;
        let high = preset.highcut_hz / nyquist;

        if !(low > 0.0 && low < high && high < 1.0) {
            return Err(BiosigError::InvalidFilterRange {
                fs: sampling_rate_hz,
                lowcut: preset.lowcut_hz,
                highcut: preset.highcut_hz,
            });
        }

        Ok(Self {
            lowcut_hz: preset.lowcut_hz,
            highcut_hz: preset.highcut_hz,
            order: preset.order,
            sampling_rate_hz,
        })
    }
}

/// Output of one conditioning run.
///
/// `original` and `filtered` are aligned with the input series, sample for
/// sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditioningResult {
    pub id: String,
    pub signal_type: SignalType,
    pub sampling_rate_hz: u32,
    pub original: Vec<f64>,
    pub filtered: Vec<f64>,
    pub created_at: String,
}

impl ConditioningResult {
    pub fn new(
        signal_type: SignalType,
        sampling_rate_hz: u32,
        original: Vec<f64>,
        filtered: Vec<f64>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            signal_type,
            sampling_rate_hz,
            original,
            filtered,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
